//! # 서비스 조립
//!
//! 애플리케이션 시작 시 한 번 실행되어 저장소와 서비스를 연결합니다.
//!
//! ```text
//!  AccountStore ─────────┬──────────────► AuthService ◄── ProviderRegistry
//!  (Mongo / Memory)      │                    ▲
//!                        │                    │
//!  SessionStore ──► TokenRepository ──► TokenService
//!  (Redis / Memory)                           │
//!                        └──────────────► AccountResolver
//! ```
//!
//! 조립된 서비스는 `web::Data`(내부 `Arc`)로 워커 스레드 간에 공유됩니다.

use std::sync::Arc;

use actix_web::web;

use crate::caching::memory::MemorySessionStore;
use crate::caching::redis::RedisClient;
use crate::caching::SessionStore;
use crate::config::{JwtSettings, PasswordConfig, StorageBackend, StorageConfig};
use crate::db::Database;
use crate::errors::{AppError, AppResult};
use crate::repositories::tokens::TokenRepository;
use crate::repositories::users::{AccountStore, MemoryAccountStore, MongoAccountStore};
use crate::services::auth::{AccountResolver, AuthService, ProviderRegistry, TokenService};

/// HTTP 계층에 공유되는 서비스 묶음
#[derive(Clone)]
pub struct AppServices {
    pub auth: web::Data<AuthService>,
    pub resolver: web::Data<AccountResolver>,
}

impl AppServices {
    /// 주어진 저장소와 설정으로 서비스를 조립합니다.
    pub fn build(
        accounts: Arc<dyn AccountStore>,
        sessions: Arc<dyn SessionStore>,
        jwt: JwtSettings,
        providers: ProviderRegistry,
        bcrypt_cost: u32,
    ) -> Self {
        let token_repo = TokenRepository::new(sessions);
        let token_service = Arc::new(TokenService::new(jwt, token_repo.clone()));

        let resolver = AccountResolver::new(token_service.clone(), accounts.clone());
        let auth = AuthService::new(accounts, token_service, token_repo, providers, bcrypt_cost);

        Self {
            auth: web::Data::new(auth),
            resolver: web::Data::new(resolver),
        }
    }

    /// 환경 변수 설정으로 저장소에 연결하고 서비스를 조립합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 운영 환경에 `JWT_SECRET`이 없음
    /// * `AppError::DatabaseError` - MongoDB 연결/인덱스 생성 실패
    /// * `AppError::SessionStoreUnavailable` - Redis 연결 실패
    pub async fn from_env() -> AppResult<Self> {
        // 저장소 연결 전에 서명 키부터 확인
        let jwt = JwtSettings::from_env()?;
        let providers = ProviderRegistry::from_env()?;
        let (accounts, sessions) = Self::connect_stores(StorageConfig::backend()).await?;

        Ok(Self::build(
            accounts,
            sessions,
            jwt,
            providers,
            PasswordConfig::bcrypt_cost(),
        ))
    }

    async fn connect_stores(backend: StorageBackend) -> AppResult<(Arc<dyn AccountStore>, Arc<dyn SessionStore>)> {
        match backend {
            StorageBackend::Mongo => {
                log::info!("📡 MongoDB / Redis 연결 중...");

                let database = Arc::new(Database::new().await?);
                let accounts = MongoAccountStore::new(database).await?;

                let redis = RedisClient::new()
                    .await
                    .map_err(|e| AppError::SessionStoreUnavailable(format!("Redis 연결 실패: {}", e)))?;

                Ok((Arc::new(accounts), Arc::new(redis)))
            }
            StorageBackend::Memory => {
                log::warn!("⚠️ 메모리 저장소 사용 중: 재시작 시 계정과 세션이 사라집니다");
                Ok((Arc::new(MemoryAccountStore::new()), Arc::new(MemorySessionStore::new())))
            }
        }
    }

    /// 서비스를 앱 데이터로 등록합니다.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.resolver.clone());
    }
}
