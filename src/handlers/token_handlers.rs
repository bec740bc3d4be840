use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::domain::dto::tokens::{PlatformRequest, RefreshTokenResponse};
use crate::errors::AppError;
use crate::handlers::transport::{attach_access_token, refresh_token_from};
use crate::services::auth::AuthService;

/// 액세스 토큰 재발급 API 핸들러
///
/// 리프레시 토큰은 `Refresh-Token` 헤더에서 먼저 찾고, 없으면 `refreshToken` 쿠키를 사용합니다.
/// 리프레시 토큰은 교체되지 않으며 새 액세스 토큰만 내려갑니다.
///
/// # Endpoint
/// `POST /account/issue/token`
#[post("/issue/token")]
pub async fn reissue_access_token(
    auth: web::Data<AuthService>,
    req: HttpRequest,
    payload: web::Json<PlatformRequest>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = refresh_token_from(&req)
        .ok_or_else(|| AppError::MissingCredentials("리프레시 토큰이 없습니다".to_string()))?;

    let access = auth.refresh(payload.platform, &refresh_token).await?;

    let mut builder = HttpResponse::Ok();
    attach_access_token(&mut builder, &access);
    Ok(builder.json(RefreshTokenResponse::from(&access)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::cookie::Cookie;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use crate::config::{Platform, ACCESS_TOKEN_HEADER, REFRESH_TOKEN_COOKIE, REFRESH_TOKEN_HEADER};
    use crate::domain::dto::users::request::JoinRequest;
    use crate::handlers::test_support::{join_body, services, PASSWORD};

    macro_rules! token_app {
        ($services:expr) => {
            test::init_service(
                App::new()
                    .configure(|cfg| $services.configure(cfg))
                    .service(web::scope("/account").service(reissue_access_token)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_reissue_from_header_and_cookie() {
        let services = services();
        let request: JoinRequest = serde_json::from_value(join_body("a@b.com", "01012345678")).unwrap();
        services.auth.register(&request).await.unwrap();
        let outcome = services.auth.login(Platform::App, "a@b.com", PASSWORD).await.unwrap();
        let app = token_app!(services);

        let req = test::TestRequest::post()
            .uri("/account/issue/token")
            .insert_header((REFRESH_TOKEN_HEADER, outcome.tokens.refresh.token.clone()))
            .set_json(json!({ "platform": "APP" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let bearer = resp.headers().get(ACCESS_TOKEN_HEADER).unwrap().to_str().unwrap().to_string();
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(format!("Bearer {}", body["accessToken"].as_str().unwrap()), bearer);
        assert!(body["accessTokenExpiresAt"].is_string());

        let req = test::TestRequest::post()
            .uri("/account/issue/token")
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, outcome.tokens.refresh.token.clone()))
            .set_json(json!({ "platform": "APP" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_reissue_rejects_missing_or_mismatched_token() {
        let services = services();
        let request: JoinRequest = serde_json::from_value(join_body("a@b.com", "01012345678")).unwrap();
        services.auth.register(&request).await.unwrap();
        let outcome = services.auth.login(Platform::App, "a@b.com", PASSWORD).await.unwrap();
        let app = token_app!(services);

        let req = test::TestRequest::post()
            .uri("/account/issue/token")
            .set_json(json!({ "platform": "APP" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/account/issue/token")
            .insert_header((REFRESH_TOKEN_HEADER, outcome.tokens.refresh.token.clone()))
            .set_json(json!({ "platform": "WEB" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/account/issue/token")
            .insert_header((REFRESH_TOKEN_HEADER, outcome.tokens.access.token.clone()))
            .set_json(json!({ "platform": "APP" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
