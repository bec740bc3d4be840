//! # Account HTTP Handlers
//!
//! 가입 전 중복 확인과 인증된 계정의 프로필 조회 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/account/email` | 이메일 중복 확인 | 200 / 409 |
//! | `POST` | `/account/check/phone` | 전화번호 중복 확인 | 200 / 409 |
//! | `GET` | `/account/mypage/profile` | 내 프로필 (인증 필요) | 200 / 401 |
//!
//! 중복이면 409 본문의 `origin`에 기존 계정의 가입 경로(NATIVE, KAKAO 등)가 담깁니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::request::{DuplicateEmailRequest, DuplicatePhoneRequest};
use crate::domain::dto::users::response::{ApiResponse, ProfileResponse};
use crate::domain::models::auth::AuthenticatedAccount;
use crate::errors::AppError;
use crate::services::auth::AuthService;
use crate::utils::string_utils::mask_email;

/// 이메일 중복 확인
///
/// # Endpoint
/// `POST /account/email`
#[post("/email")]
pub async fn check_email(
    auth: web::Data<AuthService>,
    payload: web::Json<DuplicateEmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    auth.ensure_email_available(&payload.email).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("중복된 이메일이 없습니다")))
}

/// 전화번호 중복 확인
///
/// # Endpoint
/// `POST /account/check/phone`
#[post("/check/phone")]
pub async fn check_phone(
    auth: web::Data<AuthService>,
    payload: web::Json<DuplicatePhoneRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    auth.ensure_phone_available(&payload.phone).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("중복된 전화번호가 없습니다")))
}

/// 내 프로필
///
/// [`AuthMiddleware`](crate::middlewares::AuthMiddleware)가 바인딩한 계정을 그대로 돌려줍니다.
///
/// # Endpoint
/// `GET /account/mypage/profile`
#[get("/profile")]
pub async fn my_profile(account: AuthenticatedAccount) -> Result<HttpResponse, AppError> {
    log::debug!("프로필 조회: {}", mask_email(account.email()));

    Ok(HttpResponse::Ok().json(ApiResponse::success(ProfileResponse::from(account.into_inner()))))
}
