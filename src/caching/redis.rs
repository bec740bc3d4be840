//! # Redis 세션 저장소 구현
//!
//! Redis를 백엔드로 하는 [`SessionStore`] 구현체입니다.
//!
//! ## 연결 관리
//!
//! `ConnectionManager`를 사용하여 단일 멀티플렉싱 연결을 공유하고,
//! 연결이 끊기면 자동으로 재연결합니다. 복제 비용이 낮아 요청마다 clone 하여 사용합니다.
//!
//! ## 장애 정책
//!
//! 모든 명령은 `REDIS_COMMAND_TIMEOUT_MS` 제한 시간 안에 끝나야 합니다.
//! Redis 오류와 시간 초과는 모두 `AppError::SessionStoreUnavailable`로 변환되어
//! 호출자가 세션 상태를 확인할 수 없는 상태로 진행하지 않도록 합니다.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult};

use crate::caching::SessionStore;
use crate::config::RedisConfig;
use crate::errors::{AppError, AppResult};

/// Redis 세션 저장소 클라이언트
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::caching::{redis::RedisClient, SessionStore};
/// use std::time::Duration;
///
/// let redis = RedisClient::new().await?;
/// redis.set("RT:user@example.com", &refresh_token, Duration::from_secs(1209600)).await?;
/// let stored = redis.get("RT:user@example.com").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    connection: ConnectionManager,
    command_timeout: Duration,
}

impl RedisClient {
    /// 환경 변수 설정(`REDIS_URL`, `REDIS_COMMAND_TIMEOUT_MS`)으로 연결합니다.
    ///
    /// 생성 시 PING 명령으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::connect(&RedisConfig::url(), RedisConfig::command_timeout()).await
    }

    pub async fn connect(url: &str, command_timeout: Duration) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(url)?;

        let mut connection = tokio::time::timeout(command_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| format!("Redis 연결 시간 초과 ({}ms)", command_timeout.as_millis()))??;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        tokio::time::timeout(command_timeout, redis::cmd("PING").query_async::<()>(&mut connection))
            .await
            .map_err(|_| "Redis PING 시간 초과".to_string())??;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { connection, command_timeout })
    }

    /// Redis 명령을 제한 시간 안에서 실행하고 에러를 세션 저장소 장애로 변환합니다.
    async fn run<T, F>(&self, command: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.command_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                log::error!("Redis {} 실패: {}", command, e);
                Err(AppError::SessionStoreUnavailable(format!("Redis {} 실패: {}", command, e)))
            }
            Err(_) => {
                log::error!("Redis {} 시간 초과 ({}ms)", command, self.command_timeout.as_millis());
                Err(AppError::SessionStoreUnavailable(format!("Redis {} 시간 초과", command)))
            }
        }
    }
}

/// PSETEX 만료 시간(ms). 0은 허용되지 않으므로 최소 1ms
fn expiry_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl SessionStore for RedisClient {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let millis = expiry_millis(ttl);
        self.run("PSETEX", async move { conn.pset_ex::<_, _, ()>(key, value, millis).await })
            .await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection.clone();
        self.run("GET", async move { conn.get::<_, Option<String>>(key).await })
            .await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        self.run("DEL", async move { conn.del::<_, ()>(key).await })
            .await
    }
}
