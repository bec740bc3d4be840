//! 요청 헤더로부터 인증된 계정을 찾는 리졸버
//!
//! 미들웨어와 핸들러가 같은 규칙으로 계정을 확인하도록 인증 판정을 한 곳에 둡니다.
//! 결과는 요청 extensions 로 전달되며 전역 상태를 사용하지 않습니다.

use std::sync::Arc;

use crate::domain::entities::users::Identity;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::AccountStore;
use crate::services::auth::TokenService;

pub struct AccountResolver {
    token_service: Arc<TokenService>,
    accounts: Arc<dyn AccountStore>,
}

impl AccountResolver {
    pub fn new(token_service: Arc<TokenService>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { token_service, accounts }
    }

    /// Authorization 헤더 값으로 계정을 찾습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::MissingCredentials` - 헤더 없음 또는 빈 토큰
    /// * `AppError::Unauthenticated` - 만료, 서명 불일치, 로그아웃된 토큰
    /// * `AppError::UnknownIdentity` - 토큰 주체에 해당하는 계정 없음
    /// * `AppError::SessionStoreUnavailable` - 폐기 목록 조회 실패
    pub async fn resolve(&self, authorization: Option<&str>) -> AppResult<Identity> {
        let header = authorization
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::MissingCredentials("Authorization 헤더가 없습니다".to_string()))?;

        let token = TokenService::extract_bearer_token(header)?;

        let email = self
            .token_service
            .verify_access(token)
            .await
            .map_err(AppError::into_unauthenticated)?;

        self.accounts
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::UnknownIdentity("토큰 주체에 해당하는 계정이 없습니다".to_string()))
    }
}
