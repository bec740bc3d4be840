//! 자체 로그인 어댑터
//!
//! 레지스트리 조회가 모든 로그인 유형에 대해 성립하도록 등록되지만,
//! 외부 프로바이더 호출은 지원하지 않습니다. 자체 로그인은 비밀번호 검증 경로를 사용합니다.

use async_trait::async_trait;

use super::OAuthProvider;
use crate::config::LoginType;
use crate::domain::models::oauth::{NormalizedProviderIdentity, ProviderToken, ProviderUserInfo};
use crate::errors::{AppError, AppResult};

pub struct NativeProvider;

impl NativeProvider {
    fn unsupported() -> AppError {
        AppError::UnsupportedProvider("자체 로그인은 소셜 로그인 경로를 사용할 수 없습니다".to_string())
    }
}

#[async_trait]
impl OAuthProvider for NativeProvider {
    fn provider_tag(&self) -> LoginType {
        LoginType::Native
    }

    fn authorization_url(&self, _state: &str) -> AppResult<String> {
        Err(Self::unsupported())
    }

    async fn request_access_token(&self, _code: &str) -> AppResult<ProviderToken> {
        Err(Self::unsupported())
    }

    async fn request_user_info(&self, _token: &ProviderToken) -> AppResult<ProviderUserInfo> {
        Err(Self::unsupported())
    }

    fn normalize(&self, _info: ProviderUserInfo) -> AppResult<NormalizedProviderIdentity> {
        Err(Self::unsupported())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_native_adapter_rejects_federated_calls() {
        let adapter = NativeProvider;

        assert!(matches!(
            adapter.request_access_token("code").await,
            Err(AppError::UnsupportedProvider(_))
        ));
        assert!(matches!(
            adapter.request_user_info_for_app("token").await,
            Err(AppError::UnsupportedProvider(_))
        ));
    }
}
