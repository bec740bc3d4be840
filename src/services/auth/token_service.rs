//! JWT 토큰 관리 서비스 구현
//!
//! JSON Web Token 기반의 인증 시스템을 제공합니다.
//! 액세스 토큰과 리프레시 토큰의 발급, 검증, 재발급을 담당합니다.
//!
//! 검증 경로는 두 가지입니다:
//! - 서명/만료 검증 (`verify_access`, `verify_refresh`, `rotate`)
//! - 서명 검증 없는 클레임 읽기 (`subject_of`, `expiry_of`): 이미 검증을 통과한 토큰이나
//!   로그아웃 처리처럼 만료 시각만 필요한 경우에 사용합니다.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::{JwtSettings, Platform};
use crate::domain::models::token::{IssuedToken, TokenClaims, TokenKind, TokenPair};
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::tokens::TokenRepository;

const BEARER_PREFIX: &str = "Bearer ";

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 토큰을 생성하고 검증합니다.
/// 만료 판정에 여유 시간(leeway)을 두지 않습니다.
pub struct TokenService {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_repo: TokenRepository,
}

impl TokenService {
    pub fn new(settings: JwtSettings, token_repo: TokenRepository) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());

        Self {
            settings,
            encoding_key,
            decoding_key,
            token_repo,
        }
    }

    /// 액세스/리프레시 토큰 쌍 발급
    ///
    /// # Arguments
    ///
    /// * `platform` - 토큰을 사용할 클라이언트 플랫폼
    /// * `email` - 토큰 주체(계정 이메일)
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - 두 토큰과 각각의 만료 시각
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pair = token_service.issue(Platform::Web, "user@example.com")?;
    /// println!("access expires at {}", pair.access.expires_at);
    /// ```
    pub fn issue(&self, platform: Platform, email: &str) -> AppResult<TokenPair> {
        self.issue_at(platform, email, Utc::now())
    }

    /// 지정한 발급 시각으로 토큰 쌍을 만듭니다.
    pub(crate) fn issue_at(&self, platform: Platform, email: &str, issued_at: DateTime<Utc>) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access: self.mint(platform, email, TokenKind::Access, issued_at)?,
            refresh: self.mint(platform, email, TokenKind::Refresh, issued_at)?,
        })
    }

    fn mint(&self, platform: Platform, email: &str, kind: TokenKind, issued_at: DateTime<Utc>) -> AppResult<IssuedToken> {
        let ttl = match kind {
            TokenKind::Access => self.settings.access_ttl,
            TokenKind::Refresh => self.settings.refresh_ttl,
        };
        let expires_at = issued_at + ttl;

        let claims = TokenClaims {
            sub: email.to_string(),
            platform,
            kind,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("JWT 토큰 생성 실패")?;

        Ok(IssuedToken {
            token,
            // 클레임과 같은 초 단위로 맞춥니다
            expires_at: Self::timestamp_to_datetime(claims.exp)?,
        })
    }

    /// 서명과 만료를 검증하고 클레임을 반환합니다.
    fn decode_verified(&self, token: &str) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::InvalidToken("토큰이 만료되었습니다".to_string()),
                ErrorKind::InvalidSignature => AppError::InvalidToken("토큰 서명이 일치하지 않습니다".to_string()),
                _ => AppError::InvalidToken(format!("유효하지 않은 토큰입니다: {}", e)),
            })
    }

    /// 서명 검증 없이 클레임만 읽습니다.
    fn decode_unverified(&self, token: &str) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::InvalidToken(format!("토큰을 해석할 수 없습니다: {}", e)))
    }

    /// 액세스 토큰 검증
    ///
    /// 서명, 만료, 토큰 용도를 먼저 확인한 뒤에 폐기 목록을 조회합니다.
    /// 구조적으로 잘못된 토큰은 세션 저장소에 접근하지 않고 거부됩니다.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 토큰 주체(이메일)
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 만료, 서명 불일치, 리프레시 토큰 제출, 폐기된 토큰
    /// * `AppError::SessionStoreUnavailable` - 폐기 목록 조회 실패
    pub async fn verify_access(&self, token: &str) -> AppResult<String> {
        let claims = self.decode_verified(token)?;

        if claims.kind != TokenKind::Access {
            return Err(AppError::InvalidToken("액세스 토큰이 아닙니다".to_string()));
        }

        if self.token_repo.is_revoked(token).await? {
            return Err(AppError::InvalidToken("로그아웃된 토큰입니다".to_string()));
        }

        Ok(claims.sub)
    }

    /// 리프레시 토큰 검증
    ///
    /// 서명과 만료가 유효하고, 리프레시 용도이며, 발급 플랫폼이 일치할 때만 `true`.
    pub fn verify_refresh(&self, token: &str, platform: Platform) -> bool {
        match self.decode_verified(token) {
            Ok(claims) => claims.kind == TokenKind::Refresh && claims.platform == platform,
            Err(e) => {
                log::debug!("리프레시 토큰 검증 실패: {}", e);
                false
            }
        }
    }

    /// 리프레시 토큰으로 새 액세스 토큰 발급
    ///
    /// 새 토큰은 리프레시 토큰과 같은 주체와 플랫폼을 가지며, 현재 시각 기준으로 만료됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 검증 실패 또는 액세스 토큰 제출
    pub fn rotate(&self, refresh_token: &str) -> AppResult<IssuedToken> {
        let claims = self.decode_verified(refresh_token)?;

        if claims.kind != TokenKind::Refresh {
            return Err(AppError::InvalidToken("리프레시 토큰이 아닙니다".to_string()));
        }

        self.mint(claims.platform, &claims.sub, TokenKind::Access, Utc::now())
    }

    /// 토큰 주체(이메일). 서명을 검증하지 않습니다.
    pub fn subject_of(&self, token: &str) -> AppResult<String> {
        Ok(self.decode_unverified(token)?.sub)
    }

    /// 토큰 만료 시각. 서명을 검증하지 않습니다.
    pub fn expiry_of(&self, token: &str) -> AppResult<DateTime<Utc>> {
        Self::timestamp_to_datetime(self.decode_unverified(token)?.exp)
    }

    /// 토큰의 남은 수명. 이미 만료되었으면 0.
    pub fn remaining_lifetime(&self, token: &str) -> AppResult<std::time::Duration> {
        let remaining = self.expiry_of(token)? - Utc::now();
        Ok(remaining.to_std().unwrap_or(std::time::Duration::ZERO))
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    /// 접두사가 없으면 헤더 값 전체를 토큰으로 취급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::MissingCredentials` - 토큰 부분이 비어 있음
    pub fn extract_bearer_token(header: &str) -> AppResult<&str> {
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .unwrap_or(header)
            .trim();

        if token.is_empty() {
            return Err(AppError::MissingCredentials("토큰이 비어 있습니다".to_string()));
        }

        Ok(token)
    }

    fn timestamp_to_datetime(timestamp: i64) -> AppResult<DateTime<Utc>> {
        Utc.timestamp_opt(timestamp, 0)
            .single()
            .ok_or_else(|| AppError::InvalidToken(format!("잘못된 만료 시각: {}", timestamp)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Duration;

    use crate::caching::memory::MemorySessionStore;

    fn settings(secret: &str) -> JwtSettings {
        JwtSettings {
            secret: secret.to_string(),
            access_ttl: Duration::minutes(30),
            refresh_ttl: Duration::days(14),
        }
    }

    fn service() -> (TokenService, TokenRepository) {
        let repo = TokenRepository::new(Arc::new(MemorySessionStore::new()));
        (TokenService::new(settings("test-secret"), repo.clone()), repo)
    }

    #[actix_web::test]
    async fn test_issue_and_verify_access() {
        let (service, _) = service();
        let pair = service.issue(Platform::Web, "a@b.com").unwrap();

        assert_eq!(service.verify_access(&pair.access.token).await.unwrap(), "a@b.com");
        assert_eq!(service.subject_of(&pair.refresh.token).unwrap(), "a@b.com");
        assert_eq!(service.expiry_of(&pair.access.token).unwrap(), pair.access.expires_at);
        assert!(pair.refresh.expires_at > pair.access.expires_at);
    }

    #[actix_web::test]
    async fn test_expired_access_token_is_rejected() {
        let (service, _) = service();
        let issued_at = Utc::now() - Duration::minutes(30) - Duration::seconds(10);
        let pair = service.issue_at(Platform::App, "a@b.com", issued_at).unwrap();

        assert!(matches!(
            service.verify_access(&pair.access.token).await,
            Err(AppError::InvalidToken(_))
        ));
        // 만료되어도 클레임은 읽을 수 있음
        assert_eq!(service.subject_of(&pair.access.token).unwrap(), "a@b.com");
        assert_eq!(service.remaining_lifetime(&pair.access.token).unwrap(), std::time::Duration::ZERO);
    }

    #[actix_web::test]
    async fn test_foreign_signature_is_rejected() {
        let (service, _) = service();
        let other = TokenService::new(
            settings("other-secret"),
            TokenRepository::new(Arc::new(MemorySessionStore::new())),
        );
        let forged = other.issue(Platform::Web, "a@b.com").unwrap();

        assert!(matches!(
            service.verify_access(&forged.access.token).await,
            Err(AppError::InvalidToken(_))
        ));
        assert!(!service.verify_refresh(&forged.refresh.token, Platform::Web));
    }

    #[actix_web::test]
    async fn test_access_check_rejects_refresh_token() {
        let (service, _) = service();
        let pair = service.issue(Platform::Web, "a@b.com").unwrap();

        assert!(service.verify_access(&pair.refresh.token).await.is_err());
        assert!(!service.verify_refresh(&pair.access.token, Platform::Web));
        assert!(service.rotate(&pair.access.token).is_err());
    }

    #[actix_web::test]
    async fn test_revoked_access_token_is_rejected() {
        let (service, repo) = service();
        let pair = service.issue(Platform::Web, "a@b.com").unwrap();

        repo.revoke_access_token(&pair.access.token, std::time::Duration::from_secs(60))
            .await
            .unwrap();

        assert!(matches!(
            service.verify_access(&pair.access.token).await,
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_refresh_is_bound_to_platform() {
        let (service, _) = service();
        let pair = service.issue(Platform::App, "a@b.com").unwrap();

        assert!(service.verify_refresh(&pair.refresh.token, Platform::App));
        assert!(!service.verify_refresh(&pair.refresh.token, Platform::Web));
    }

    #[actix_web::test]
    async fn test_rotate_keeps_subject_and_platform() {
        let (service, _) = service();
        let issued_at = Utc::now() - Duration::minutes(5);
        let pair = service.issue_at(Platform::App, "a@b.com", issued_at).unwrap();

        let access = service.rotate(&pair.refresh.token).unwrap();

        assert!(access.expires_at > pair.access.expires_at);
        assert_eq!(service.verify_access(&access.token).await.unwrap(), "a@b.com");
        assert_ne!(access.token, pair.access.token);
    }

    #[test]
    fn test_unique_tokens_within_same_second() {
        let (service, _) = service();
        let now = Utc::now();
        let first = service.issue_at(Platform::Web, "a@b.com", now).unwrap();
        let second = service.issue_at(Platform::Web, "a@b.com", now).unwrap();

        assert_ne!(first.refresh.token, second.refresh.token);
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(TokenService::extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert_eq!(TokenService::extract_bearer_token("abc.def").unwrap(), "abc.def");
        assert!(matches!(
            TokenService::extract_bearer_token("Bearer   "),
            Err(AppError::MissingCredentials(_))
        ));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let (service, _) = service();
        assert!(matches!(service.subject_of("not-a-jwt"), Err(AppError::InvalidToken(_))));
        assert!(!service.verify_refresh("not-a-jwt", Platform::Web));
    }
}
