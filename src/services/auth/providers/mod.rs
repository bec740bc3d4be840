//! 외부 OAuth 프로바이더 연동 계층
//!
//! 로그인 유형(`LoginType`) 태그로 어댑터를 찾아 호출합니다. 모든 어댑터는 같은 계약을 구현합니다:
//!
//! ```text
//! 웹:  code ──► request_access_token ──► request_user_info ──► normalize
//! 앱:  provider access token ──────────► request_user_info_for_app ──► normalize
//! ```
//!
//! 정규화 결과의 이메일이 계정 연결 키입니다. 이메일을 주지 않는 프로바이더 응답은 거부됩니다.

pub mod google;
pub mod kakao;
pub mod naver;
pub mod native;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::{LoginType, ProviderSettings};
use crate::domain::models::oauth::{NormalizedProviderIdentity, ProviderToken, ProviderUserInfo};
use crate::errors::{AppError, AppResult, ErrorContext};

pub use google::GoogleProvider;
pub use kakao::KakaoProvider;
pub use naver::NaverProvider;
pub use native::NativeProvider;

const PROVIDER_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth 프로바이더 어댑터 계약
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    fn provider_tag(&self) -> LoginType;

    /// 웹 클라이언트를 보낼 인가 페이지 주소
    fn authorization_url(&self, state: &str) -> AppResult<String>;

    /// 인가 코드를 프로바이더 액세스 토큰으로 교환합니다.
    async fn request_access_token(&self, code: &str) -> AppResult<ProviderToken>;

    async fn request_user_info(&self, token: &ProviderToken) -> AppResult<ProviderUserInfo>;

    /// 앱 클라이언트가 프로바이더 SDK로 받아 온 액세스 토큰으로 사용자 정보를 조회합니다.
    async fn request_user_info_for_app(&self, access_token: &str) -> AppResult<ProviderUserInfo> {
        self.request_user_info(&ProviderToken::bearer(access_token)).await
    }

    fn normalize(&self, info: ProviderUserInfo) -> AppResult<NormalizedProviderIdentity>;
}

/// 프로바이더 공통 HTTP 호출
///
/// 토큰 교환은 form POST, 사용자 정보 조회는 Bearer GET 입니다.
#[derive(Clone)]
pub struct ProviderHttpClient {
    tag: LoginType,
    settings: ProviderSettings,
    http: reqwest::Client,
}

impl ProviderHttpClient {
    pub fn new(tag: LoginType, settings: ProviderSettings) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(PROVIDER_HTTP_TIMEOUT)
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self { tag, settings, http })
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// 인가 페이지 주소를 만듭니다. `extra`는 프로바이더별 추가 파라미터입니다.
    pub fn authorization_url(&self, state: &str, extra: &[(&str, &str)]) -> String {
        let mut params: Vec<(&str, &str)> = vec![
            ("client_id", self.settings.client_id.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("response_type", "code"),
            ("state", state),
        ];
        params.extend_from_slice(extra);

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.settings.authorize_uri, query_string)
    }

    /// `authorization_code` 그랜트로 토큰을 교환합니다.
    pub async fn exchange_code(&self, code: &str, extra: &[(&str, &str)]) -> AppResult<ProviderToken> {
        let mut params: Vec<(&str, &str)> = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("code", code),
        ];
        params.extend_from_slice(extra);

        let response = self
            .http
            .post(&self.settings.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 요청 실패: {}", self.tag, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 교환 실패 ({}): {}",
                self.tag, status, error_text
            )));
        }

        let token: ProviderToken = Self::parse_json(self.tag, response).await?;
        if token.access_token.is_empty() {
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 응답에 access_token이 없습니다",
                self.tag
            )));
        }

        log::debug!("{} 토큰 교환 성공", self.tag);
        Ok(token)
    }

    /// 사용자 정보 조회
    ///
    /// 프로바이더가 401을 돌려주면 제출된 토큰이 유효하지 않은 것이므로 `Unauthenticated`.
    pub async fn fetch_user_info(&self, token: &ProviderToken) -> AppResult<ProviderUserInfo> {
        let response = self
            .http
            .get(&self.settings.user_info_uri)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 요청 실패: {}", self.tag, e)))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED => {
                return Err(AppError::Unauthenticated(format!(
                    "{} 액세스 토큰이 유효하지 않습니다",
                    self.tag
                )));
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                return Err(AppError::ExternalServiceError(format!(
                    "{} 사용자 정보 조회 실패 ({}): {}",
                    self.tag, status, error_text
                )));
            }
        }

        let body: serde_json::Value = Self::parse_json(self.tag, response).await?;
        Ok(ProviderUserInfo { provider: self.tag, body })
    }

    async fn parse_json<T: DeserializeOwned>(tag: LoginType, response: reqwest::Response) -> AppResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 응답 파싱 실패: {}", tag, e)))
    }
}

/// 원본 응답을 프로바이더별 구조체로 해석합니다.
pub(crate) fn parse_body<T: DeserializeOwned>(info: ProviderUserInfo) -> AppResult<T> {
    let provider = info.provider;
    serde_json::from_value(info.body)
        .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 형식 오류: {}", provider, e)))
}

/// 이메일 필수 확인
pub(crate) fn require_email(provider: LoginType, email: Option<String>) -> AppResult<String> {
    email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| {
            AppError::ValidationError(format!(
                "{} 계정에서 이메일 정보를 제공받지 못했습니다. 이메일 제공에 동의해주세요",
                provider.display_name()
            ))
        })
}

/// 생일 표기 통일
///
/// `MMDD` 또는 `MM-DD`를 받아 연도가 있으면 `YYYY-MM-DD`, 없으면 `MM-DD`로 만듭니다.
pub(crate) fn format_birthday(year: Option<&str>, month_day: Option<&str>) -> Option<String> {
    let digits = crate::utils::string_utils::digits_only(month_day?);
    if digits.len() != 4 {
        return None;
    }
    let (month, day) = digits.split_at(2);

    match year.map(str::trim).filter(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit())) {
        Some(year) => Some(format!("{}-{}-{}", year, month, day)),
        None => Some(format!("{}-{}", month, day)),
    }
}

/// 로그인 유형별 어댑터 목록
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: HashMap<LoginType, Arc<dyn OAuthProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 같은 태그의 어댑터가 있으면 교체합니다.
    pub fn register(&mut self, adapter: Arc<dyn OAuthProvider>) {
        self.adapters.insert(adapter.provider_tag(), adapter);
    }

    pub fn with(mut self, adapter: Arc<dyn OAuthProvider>) -> Self {
        self.register(adapter);
        self
    }

    /// # Errors
    ///
    /// * `AppError::UnsupportedProvider` - 등록되지 않은 로그인 유형
    pub fn get(&self, tag: LoginType) -> AppResult<Arc<dyn OAuthProvider>> {
        self.adapters
            .get(&tag)
            .cloned()
            .ok_or_else(|| AppError::UnsupportedProvider(format!("지원하지 않는 로그인 유형입니다: {}", tag)))
    }

    /// 환경 변수 설정으로 모든 어댑터를 등록합니다.
    pub fn from_env() -> AppResult<Self> {
        let mut registry = Self::new().with(Arc::new(NativeProvider));

        for tag in LoginType::FEDERATED {
            let Some(settings) = ProviderSettings::from_env(tag) else {
                continue;
            };
            let adapter: Arc<dyn OAuthProvider> = match tag {
                LoginType::Google => Arc::new(GoogleProvider::new(settings)?),
                LoginType::Kakao => Arc::new(KakaoProvider::new(settings)?),
                LoginType::Naver => Arc::new(NaverProvider::new(settings)?),
                LoginType::Native => continue,
            };
            registry.register(adapter);
        }

        log::info!("OAuth 프로바이더 {}개 등록 완료", registry.adapters.len());
        Ok(registry)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// 테스트 서버를 가리키는 프로바이더 설정
    pub fn settings_for(base_url: &str) -> ProviderSettings {
        ProviderSettings {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "http://localhost/callback".to_string(),
            authorize_uri: format!("{}/authorize", base_url),
            token_uri: format!("{}/token", base_url),
            user_info_uri: format!("{}/userinfo", base_url),
            state: "test-state".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_birthday() {
        assert_eq!(format_birthday(Some("1995"), Some("0321")), Some("1995-03-21".to_string()));
        assert_eq!(format_birthday(Some("1995"), Some("03-21")), Some("1995-03-21".to_string()));
        assert_eq!(format_birthday(None, Some("1225")), Some("12-25".to_string()));
        assert_eq!(format_birthday(Some("95"), Some("1225")), Some("12-25".to_string()));
        assert_eq!(format_birthday(Some("1995"), None), None);
        assert_eq!(format_birthday(None, Some("12")), None);
    }

    #[test]
    fn test_require_email() {
        assert_eq!(require_email(LoginType::Kakao, Some(" a@b.com ".to_string())).unwrap(), "a@b.com");
        assert!(matches!(
            require_email(LoginType::Kakao, Some("".to_string())),
            Err(AppError::ValidationError(_))
        ));
        assert!(require_email(LoginType::Naver, None).is_err());
    }

    #[test]
    fn test_registry_dispatches_by_tag() {
        let kakao = KakaoProvider::new(test_support::settings_for("http://localhost:1")).unwrap();
        let registry = ProviderRegistry::new()
            .with(Arc::new(NativeProvider))
            .with(Arc::new(kakao));

        assert_eq!(registry.get(LoginType::Kakao).unwrap().provider_tag(), LoginType::Kakao);
        assert_eq!(registry.get(LoginType::Native).unwrap().provider_tag(), LoginType::Native);
        assert!(matches!(
            registry.get(LoginType::Google),
            Err(AppError::UnsupportedProvider(_))
        ));
    }

    #[test]
    fn test_authorization_url_encodes_params() {
        let client = ProviderHttpClient::new(LoginType::Google, test_support::settings_for("https://auth.test"))
            .unwrap();
        let url = client.authorization_url("s t", &[("scope", "openid email")]);

        assert!(url.starts_with("https://auth.test/authorize?client_id=client-id"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%2Fcallback"));
        assert!(url.contains("state=s%20t"));
        assert!(url.contains("scope=openid%20email"));
    }
}
