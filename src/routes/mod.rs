//! API 라우트 설정 모듈
//!
//! 계정 관련 엔드포인트를 `/account` 아래에 모으고, 헬스체크를 루트에 등록합니다.
//!
//! # Auth Middleware Usage
//!
//! `/account/mypage` 범위만 [`AuthMiddleware`]로 감쌉니다. 로그인/가입/재발급은
//! 토큰을 만들기 위한 엔드포인트이므로 인증 없이 접근합니다.
//!
//! 서비스(`AuthService`, `AccountResolver`)는 라우트보다 먼저 앱 데이터로 등록되어야 합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new()
//!     .configure(|cfg| services.configure(cfg))
//!     .configure(configure_all_routes);
//! ```

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_account_routes(cfg);
}

/// 계정 관련 라우트를 설정합니다
///
/// # Route Groups
///
/// ## Public 라우트
/// - `POST /account/join`, `POST /account/join/additional-info`
/// - `POST /account/email`, `POST /account/check/phone`
/// - `POST /account/login`
/// - `GET /account/oauth2/web/authorize`
/// - `POST /account/oauth2/app/login`, `POST /account/oauth2/web/login`
/// - `DELETE /account/logout` (핸들러에서 토큰 직접 검증)
/// - `POST /account/issue/token`
///
/// ## Protected 라우트
/// - `GET /account/mypage/profile`
///
/// # Examples
///
/// ```bash
/// # 로그인
/// curl -X POST http://localhost:8080/account/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"user@example.com","password":"Passw0rd!23","platform":"WEB"}'
///
/// # 액세스 토큰 재발급
/// curl -X POST http://localhost:8080/account/issue/token \
///   -H "Refresh-Token: eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." \
///   -H "Content-Type: application/json" \
///   -d '{"platform":"WEB"}'
/// ```
fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/account")
            .service(
                web::scope("/mypage")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::users::my_profile),
            )
            // 가입
            .service(handlers::auth::join)
            .service(handlers::auth::join_additional_info)
            .service(handlers::users::check_email)
            .service(handlers::users::check_phone)
            // 로그인/로그아웃
            .service(handlers::auth::login)
            .service(handlers::auth::oauth2_authorize_url)
            .service(handlers::auth::oauth2_app_login)
            .service(handlers::auth::oauth2_web_login)
            .service(handlers::auth::logout)
            // 토큰
            .service(handlers::token_handlers::reissue_access_token),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "account_auth_service",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
