//! Kakao 로그인 어댑터
//!
//! # 사용자 정보 응답 구조 (`/v2/user/me`)
//!
//! ```json
//! {
//!   "id": 123456789,
//!   "kakao_account": {
//!     "email": "user@kakao.com",
//!     "name": "홍길동",
//!     "birthyear": "1995",
//!     "birthday": "0321",
//!     "phone_number": "+82 10-1234-5678",
//!     "profile": { "nickname": "길동" }
//!   }
//! }
//! ```

use async_trait::async_trait;
use serde::Deserialize;

use super::{format_birthday, parse_body, require_email, OAuthProvider, ProviderHttpClient};
use crate::config::{LoginType, ProviderSettings};
use crate::domain::models::oauth::{NormalizedProviderIdentity, ProviderToken, ProviderUserInfo};
use crate::errors::AppResult;
use crate::utils::string_utils::{clean_optional_string, normalize_korean_phone};

#[derive(Debug, Deserialize)]
struct KakaoUserResponse {
    #[serde(default)]
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoAccount {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    birthyear: Option<String>,
    /// `MMDD`
    #[serde(default)]
    birthday: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    profile: Option<KakaoProfile>,
}

#[derive(Debug, Deserialize)]
struct KakaoProfile {
    #[serde(default)]
    nickname: Option<String>,
}

pub struct KakaoProvider {
    client: ProviderHttpClient,
}

impl KakaoProvider {
    pub fn new(settings: ProviderSettings) -> AppResult<Self> {
        Ok(Self {
            client: ProviderHttpClient::new(LoginType::Kakao, settings)?,
        })
    }
}

#[async_trait]
impl OAuthProvider for KakaoProvider {
    fn provider_tag(&self) -> LoginType {
        LoginType::Kakao
    }

    fn authorization_url(&self, state: &str) -> AppResult<String> {
        Ok(self.client.authorization_url(state, &[]))
    }

    async fn request_access_token(&self, code: &str) -> AppResult<ProviderToken> {
        self.client.exchange_code(code, &[]).await
    }

    async fn request_user_info(&self, token: &ProviderToken) -> AppResult<ProviderUserInfo> {
        self.client.fetch_user_info(token).await
    }

    fn normalize(&self, info: ProviderUserInfo) -> AppResult<NormalizedProviderIdentity> {
        let response: KakaoUserResponse = parse_body(info)?;
        let account = response.kakao_account.unwrap_or_default();

        // 실명 동의가 없으면 프로필 닉네임을 이름으로 사용
        let name = clean_optional_string(account.name)
            .or_else(|| clean_optional_string(account.profile.and_then(|p| p.nickname)));

        Ok(NormalizedProviderIdentity {
            email: require_email(LoginType::Kakao, account.email)?,
            name,
            birthday: format_birthday(account.birthyear.as_deref(), account.birthday.as_deref()),
            phone: account.phone_number.as_deref().and_then(normalize_korean_phone),
            provider: LoginType::Kakao,
        })
    }
}
