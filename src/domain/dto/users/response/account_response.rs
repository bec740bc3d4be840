//! 계정 응답 DTO
use serde::Serialize;

use crate::config::LoginType;
use crate::domain::entities::users::{AccountRole, Identity};
use crate::domain::models::token::TokenPair;

/// 자체 로그인 응답
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginAccountResponse {
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl LoginAccountResponse {
    pub fn new(identity: &Identity, tokens: &TokenPair) -> Self {
        Self {
            email: identity.email.clone(),
            access_token: tokens.access.token.clone(),
            refresh_token: tokens.refresh.token.clone(),
        }
    }
}

/// 소셜 로그인 응답
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2LoginResponse {
    pub login_success: bool,
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub birthday: Option<String>,
    pub phone: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
}

impl OAuth2LoginResponse {
    pub fn new(identity: &Identity, tokens: &TokenPair) -> Self {
        Self {
            login_success: true,
            user_id: identity.id_string().unwrap_or_default(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            birthday: identity.birthday.clone(),
            phone: identity.phone.clone(),
            access_token: tokens.access.token.clone(),
            refresh_token: tokens.refresh.token.clone(),
        }
    }
}

/// 마이페이지 프로필 응답
/// 웹 소셜 로그인 시작 응답
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationUrlResponse {
    pub url: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub nickname: String,
    pub university_name: Option<String>,
    pub login_type: LoginType,
    pub role: AccountRole,
}

impl From<Identity> for ProfileResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id_string().unwrap_or_default(),
            email: identity.email,
            name: identity.name,
            nickname: identity.nickname,
            university_name: identity.university_name,
            login_type: identity.login_type,
            role: identity.role,
        }
    }
}
