//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Authorization 헤더의 Bearer 액세스 토큰 검증
//! - 로그아웃된 토큰 거부
//! - 계정 정보를 request extension에 `AuthenticatedAccount`로 저장
//!
//! # 사용 방법
//!
//! `AccountResolver`가 앱 데이터로 등록되어 있어야 합니다.
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .app_data(resolver.clone())
//!     .service(
//!         web::scope("/account/mypage")
//!             .wrap(AuthMiddleware::required())
//!             .service(profile)
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
