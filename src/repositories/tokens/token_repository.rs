use std::sync::Arc;
use std::time::Duration;

use crate::caching::SessionStore;
use crate::errors::AppResult;
use crate::utils::string_utils::mask_email;

/// 세션 레코드 키 접두사 (`RT:<email>`)
pub const SESSION_KEY_PREFIX: &str = "RT:";
/// 폐기된 액세스 토큰 키에 저장되는 값
pub const REVOKED_MARKER: &str = "logout";

/// 세션 레코드와 액세스 토큰 폐기 목록을 관리하는 Repository
///
/// 하나의 키 공간을 접두사 규칙으로 나누어 사용합니다:
/// - `RT:<email>` → 현재 유효한 리프레시 토큰 (계정당 하나, 새 로그인이 덮어씀)
/// - `<access token 원문>` → `"logout"` (남은 수명만큼만 유지)
///
/// 모든 쓰기는 해당 토큰의 남은 수명을 TTL로 가지므로 폐기 목록은 저절로 비워집니다.
#[derive(Clone)]
pub struct TokenRepository {
    store: Arc<dyn SessionStore>,
}

impl TokenRepository {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn session_key(email: &str) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, email)
    }

    /// 세션 레코드 저장 (기존 레코드 덮어쓰기)
    ///
    /// `ttl`은 리프레시 토큰의 남은 수명이어야 합니다. 0이면 저장하지 않습니다.
    ///
    /// ```rust,ignore
    /// repo.store_session("user@example.com", &pair.refresh.token, ttl).await?;
    /// ```
    pub async fn store_session(&self, email: &str, refresh_token: &str, ttl: Duration) -> AppResult<()> {
        if ttl.is_zero() {
            log::warn!("만료된 리프레시 토큰의 세션 저장 요청 무시 - 사용자: {}", mask_email(email));
            return Ok(());
        }

        self.store
            .set(&Self::session_key(email), refresh_token, ttl)
            .await?;

        log::debug!("세션 레코드 저장 - 사용자: {}, ttl: {}초", mask_email(email), ttl.as_secs());
        Ok(())
    }

    /// 현재 세션 레코드의 리프레시 토큰
    pub async fn find_session(&self, email: &str) -> AppResult<Option<String>> {
        self.store.get(&Self::session_key(email)).await
    }

    pub async fn delete_session(&self, email: &str) -> AppResult<()> {
        self.store.delete(&Self::session_key(email)).await?;
        log::debug!("세션 레코드 삭제 - 사용자: {}", mask_email(email));
        Ok(())
    }

    /// 액세스 토큰을 남은 수명 동안 폐기 목록에 등록합니다.
    ///
    /// 이미 만료된 토큰(`ttl` 0)은 서명 검증 단계에서 거부되므로 등록하지 않습니다.
    pub async fn revoke_access_token(&self, access_token: &str, ttl: Duration) -> AppResult<()> {
        if ttl.is_zero() {
            return Ok(());
        }

        self.store.set(access_token, REVOKED_MARKER, ttl).await?;
        log::info!("액세스 토큰 폐기 등록 - TTL: {}초", ttl.as_secs());
        Ok(())
    }

    pub async fn is_revoked(&self, access_token: &str) -> AppResult<bool> {
        Ok(self.store.get(access_token).await?.is_some())
    }
}
