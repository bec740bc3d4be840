//! Authentication HTTP Handlers
//!
//! 가입, 자체 로그인, 소셜 로그인, 로그아웃 엔드포인트입니다.
//! 로그인 응답은 본문과 함께 토큰을 헤더/쿠키로도 내려줍니다.
//!
//! # Endpoints
//!
//! - `POST /account/join`, `POST /account/join/additional-info`
//! - `POST /account/login`
//! - `GET /account/oauth2/web/authorize?type=`
//! - `POST /account/oauth2/app/login?platform=&type=&accessToken=`
//! - `POST /account/oauth2/web/login`
//! - `DELETE /account/logout`
use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::request::{
    AdditionalJoinInfoRequest, JoinRequest, LoginRequest, OAuthAppLoginQuery, OAuthAuthorizeQuery,
    OAuthWebLoginRequest,
};
use crate::domain::dto::users::response::{
    ApiResponse, AuthorizationUrlResponse, LoginAccountResponse, OAuth2LoginResponse, ProfileResponse,
};
use crate::errors::AppError;
use crate::handlers::transport::{access_token_from, attach_token_pair, expire_token_cookies, refresh_token_header};
use crate::services::auth::AuthService;
use crate::utils::string_utils::mask_email;

/// 자체 회원가입
///
/// # Endpoint
/// `POST /account/join`
#[post("/join")]
pub async fn join(
    auth: web::Data<AuthService>,
    payload: web::Json<JoinRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let identity = auth.register(&payload).await?;
    log::info!("회원가입 완료: {}", mask_email(&identity.email));

    Ok(HttpResponse::Created().json(ApiResponse::message("회원가입이 완료되었습니다")))
}

/// 가입 후 추가 정보 입력
///
/// # Endpoint
/// `POST /account/join/additional-info`
#[post("/join/additional-info")]
pub async fn join_additional_info(
    auth: web::Data<AuthService>,
    payload: web::Json<AdditionalJoinInfoRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let identity = auth.complete_profile(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ProfileResponse::from(identity))))
}

/// 이메일/비밀번호 로그인
///
/// # Endpoint
/// `POST /account/login`
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let outcome = auth
        .login(payload.platform, &payload.email, &payload.password)
        .await?;

    let mut builder = HttpResponse::Ok();
    attach_token_pair(&mut builder, &outcome.tokens);
    Ok(builder.json(LoginAccountResponse::new(&outcome.identity, &outcome.tokens)))
}

/// 웹 소셜 로그인을 시작할 인가 페이지 주소
///
/// # Endpoint
/// `GET /account/oauth2/web/authorize?type={KAKAO|NAVER|GOOGLE}`
#[get("/oauth2/web/authorize")]
pub async fn oauth2_authorize_url(
    auth: web::Data<AuthService>,
    query: web::Query<OAuthAuthorizeQuery>,
) -> Result<HttpResponse, AppError> {
    let (url, state) = auth.authorization_url(query.login_type)?;

    Ok(HttpResponse::Ok().json(AuthorizationUrlResponse { url, state }))
}

/// 앱 소셜 로그인
///
/// 앱이 프로바이더 SDK로 받은 액세스 토큰을 쿼리로 전달합니다.
///
/// # Endpoint
/// `POST /account/oauth2/app/login?platform=APP&type=KAKAO&accessToken={token}`
#[post("/oauth2/app/login")]
pub async fn oauth2_app_login(
    auth: web::Data<AuthService>,
    query: web::Query<OAuthAppLoginQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let outcome = auth
        .app_federated_login(query.platform, query.login_type, &query.access_token)
        .await?;

    let mut builder = HttpResponse::Ok();
    attach_token_pair(&mut builder, &outcome.tokens);
    Ok(builder.json(OAuth2LoginResponse::new(&outcome.identity, &outcome.tokens)))
}

/// 웹 소셜 로그인
///
/// # Endpoint
/// `POST /account/oauth2/web/login`
#[post("/oauth2/web/login")]
pub async fn oauth2_web_login(
    auth: web::Data<AuthService>,
    payload: web::Json<OAuthWebLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let outcome = auth
        .web_federated_login(payload.platform, payload.login_type, &payload.code)
        .await?;

    let mut builder = HttpResponse::Ok();
    attach_token_pair(&mut builder, &outcome.tokens);
    Ok(builder.json(OAuth2LoginResponse::new(&outcome.identity, &outcome.tokens)))
}

/// 로그아웃
///
/// `Authorization` 헤더의 액세스 토큰은 필수이고, `Refresh-Token` 헤더가 있으면 같은 계정인지 확인합니다.
/// `refreshToken` 쿠키는 읽지 않습니다.
///
/// # Endpoint
/// `DELETE /account/logout`
#[delete("/logout")]
pub async fn logout(
    auth: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let access_token = access_token_from(&req)?;
    let refresh_token = refresh_token_header(&req);

    auth.logout(&access_token, refresh_token.as_deref()).await?;

    let mut builder = HttpResponse::Ok();
    expire_token_cookies(&mut builder);
    Ok(builder.json(ApiResponse::message("로그아웃되었습니다")))
}
