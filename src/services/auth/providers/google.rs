//! Google OAuth 2.0 어댑터
//!
//! # 사용자 정보 응답 구조
//!
//! ```json
//! {
//!   "id": "1234567890",
//!   "email": "user@gmail.com",
//!   "verified_email": true,
//!   "name": "John Doe",
//!   "picture": "https://lh3.googleusercontent.com/.../photo.jpg"
//! }
//! ```

use async_trait::async_trait;
use serde::Deserialize;

use super::{parse_body, require_email, OAuthProvider, ProviderHttpClient};
use crate::config::{LoginType, ProviderSettings};
use crate::domain::models::oauth::{NormalizedProviderIdentity, ProviderToken, ProviderUserInfo};
use crate::errors::AppResult;
use crate::utils::string_utils::clean_optional_string;

const GOOGLE_SCOPE: &str = "openid email profile";

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

pub struct GoogleProvider {
    client: ProviderHttpClient,
}

impl GoogleProvider {
    pub fn new(settings: ProviderSettings) -> AppResult<Self> {
        Ok(Self {
            client: ProviderHttpClient::new(LoginType::Google, settings)?,
        })
    }
}

#[async_trait]
impl OAuthProvider for GoogleProvider {
    fn provider_tag(&self) -> LoginType {
        LoginType::Google
    }

    fn authorization_url(&self, state: &str) -> AppResult<String> {
        Ok(self.client.authorization_url(state, &[("scope", GOOGLE_SCOPE), ("access_type", "offline")]))
    }

    async fn request_access_token(&self, code: &str) -> AppResult<ProviderToken> {
        self.client.exchange_code(code, &[]).await
    }

    async fn request_user_info(&self, token: &ProviderToken) -> AppResult<ProviderUserInfo> {
        self.client.fetch_user_info(token).await
    }

    fn normalize(&self, info: ProviderUserInfo) -> AppResult<NormalizedProviderIdentity> {
        let user: GoogleUserInfo = parse_body(info)?;

        Ok(NormalizedProviderIdentity {
            email: require_email(LoginType::Google, user.email)?,
            name: clean_optional_string(user.name),
            birthday: None,
            phone: None,
            provider: LoginType::Google,
        })
    }
}
