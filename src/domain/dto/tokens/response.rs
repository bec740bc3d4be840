use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::token::IssuedToken;

/// 토큰 갱신 응답. 액세스 토큰만 재발급됩니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
}

impl From<&IssuedToken> for RefreshTokenResponse {
    fn from(issued: &IssuedToken) -> Self {
        Self {
            access_token: issued.token.clone(),
            access_token_expires_at: issued.expires_at,
        }
    }
}
