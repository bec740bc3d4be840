//! Naver 로그인 어댑터
//!
//! 토큰 교환에 인가 요청과 같은 `state`가 필요합니다.
//!
//! # 사용자 정보 응답 구조 (`/v1/nid/me`)
//!
//! ```json
//! {
//!   "resultcode": "00",
//!   "message": "success",
//!   "response": {
//!     "email": "user@naver.com",
//!     "name": "홍길동",
//!     "birthyear": "1995",
//!     "birthday": "03-21",
//!     "mobile": "010-1234-5678"
//!   }
//! }
//! ```

use async_trait::async_trait;
use serde::Deserialize;

use super::{format_birthday, parse_body, require_email, OAuthProvider, ProviderHttpClient};
use crate::config::{LoginType, ProviderSettings};
use crate::domain::models::oauth::{NormalizedProviderIdentity, ProviderToken, ProviderUserInfo};
use crate::errors::{AppError, AppResult};
use crate::utils::string_utils::{clean_optional_string, normalize_korean_phone};

const NAVER_SUCCESS_CODE: &str = "00";

#[derive(Debug, Deserialize)]
struct NaverUserResponse {
    #[serde(default)]
    resultcode: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    response: Option<NaverAccount>,
}

#[derive(Debug, Default, Deserialize)]
struct NaverAccount {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    birthyear: Option<String>,
    /// `MM-DD`
    #[serde(default)]
    birthday: Option<String>,
    #[serde(default)]
    mobile: Option<String>,
}

pub struct NaverProvider {
    client: ProviderHttpClient,
}

impl NaverProvider {
    pub fn new(settings: ProviderSettings) -> AppResult<Self> {
        Ok(Self {
            client: ProviderHttpClient::new(LoginType::Naver, settings)?,
        })
    }
}

#[async_trait]
impl OAuthProvider for NaverProvider {
    fn provider_tag(&self) -> LoginType {
        LoginType::Naver
    }

    fn authorization_url(&self, state: &str) -> AppResult<String> {
        Ok(self.client.authorization_url(state, &[]))
    }

    async fn request_access_token(&self, code: &str) -> AppResult<ProviderToken> {
        let state = self.client.settings().state.clone();
        self.client.exchange_code(code, &[("state", state.as_str())]).await
    }

    async fn request_user_info(&self, token: &ProviderToken) -> AppResult<ProviderUserInfo> {
        self.client.fetch_user_info(token).await
    }

    fn normalize(&self, info: ProviderUserInfo) -> AppResult<NormalizedProviderIdentity> {
        let body: NaverUserResponse = parse_body(info)?;

        if body.resultcode.as_deref() != Some(NAVER_SUCCESS_CODE) {
            return Err(AppError::ExternalServiceError(format!(
                "NAVER 사용자 정보 조회 실패: {} ({})",
                body.message.unwrap_or_default(),
                body.resultcode.unwrap_or_default()
            )));
        }

        let account = body.response.unwrap_or_default();

        Ok(NormalizedProviderIdentity {
            email: require_email(LoginType::Naver, account.email)?,
            name: clean_optional_string(account.name),
            birthday: format_birthday(account.birthyear.as_deref(), account.birthday.as_deref()),
            phone: account.mobile.as_deref().and_then(normalize_korean_phone),
            provider: LoginType::Naver,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::providers::test_support::settings_for;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider() -> NaverProvider {
        NaverProvider::new(settings_for("http://localhost:1")).unwrap()
    }

    fn info(body: serde_json::Value) -> ProviderUserInfo {
        ProviderUserInfo { provider: LoginType::Naver, body }
    }

    #[test]
    fn test_normalize_naver_profile() {
        let profile = provider()
            .normalize(info(json!({
                "resultcode": "00",
                "message": "success",
                "response": {
                    "email": "lee@naver.com",
                    "name": "이영희",
                    "birthyear": "1990",
                    "birthday": "12-25",
                    "mobile": "010-9876-5432"
                }
            })))
            .unwrap();

        assert_eq!(profile.email, "lee@naver.com");
        assert_eq!(profile.birthday.as_deref(), Some("1990-12-25"));
        assert_eq!(profile.phone.as_deref(), Some("01098765432"));
        assert_eq!(profile.provider, LoginType::Naver);
    }

    #[test]
    fn test_failed_result_code_is_external_error() {
        assert!(matches!(
            provider().normalize(info(json!({ "resultcode": "024", "message": "Authentication failed" }))),
            Err(AppError::ExternalServiceError(_))
        ));
    }

    #[actix_web::test]
    async fn test_token_exchange_sends_state() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("state=test-state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "naver-access",
                "refresh_token": "naver-refresh",
                "token_type": "bearer",
                "expires_in": "3600"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = NaverProvider::new(settings_for(&server.uri())).unwrap();
        let token = provider.request_access_token("code").await.unwrap();

        assert_eq!(token.access_token, "naver-access");
        assert_eq!(token.expires_in, Some(3600));
    }
}
