//! 소셜 로그인 요청 DTO
use serde::Deserialize;
use validator::Validate;

use crate::config::{LoginType, Platform};

/// [앱 전용] 소셜 로그인 쿼리 파라미터
///
/// `POST /account/oauth2/app/login?platform=APP&type=KAKAO&accessToken=...`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OAuthAppLoginQuery {
    pub platform: Platform,

    #[serde(rename = "type")]
    pub login_type: LoginType,

    #[validate(length(min = 1, message = "프로바이더 액세스 토큰이 필요합니다"))]
    pub access_token: String,
}

/// [웹 전용] 소셜 로그인 요청 본문 (인가 코드)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OAuthWebLoginRequest {
    #[validate(length(min = 1, message = "Authorization code가 필요합니다"))]
    pub code: String,

    pub platform: Platform,

    #[serde(rename = "type")]
    pub login_type: LoginType,
}

/// 웹 인가 페이지 주소 요청
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthAuthorizeQuery {
    #[serde(rename = "type")]
    pub login_type: LoginType,
}
