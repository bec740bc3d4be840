//! 세션 저장소 계층 모듈
//!
//! 리프레시 세션 레코드(`RT:<email>`)와 액세스 토큰 폐기 목록을 담는
//! 키-값 저장소 추상화입니다. 모든 쓰기는 명시적인 TTL을 가지며,
//! 저장소는 키 단위 조회/쓰기/삭제만 수행합니다 (스캔 없음).
//!
//! # 구현체
//!
//! - [`redis::RedisClient`] - Redis 기반 (운영)
//! - [`memory::MemorySessionStore`] - 프로세스 메모리 기반 (로컬 개발, 테스트)
//!
//! 저장소에 접근할 수 없거나 응답이 제한 시간을 넘기면
//! 모든 구현체는 `AppError::SessionStoreUnavailable`을 반환합니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! REDIS_COMMAND_TIMEOUT_MS=2000
//! ```

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppResult;

pub mod memory;
pub mod redis;

/// TTL 기반 키-값 세션 저장소
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 키에 값을 저장하고 `ttl` 이후 만료되도록 설정합니다. 기존 값은 덮어씁니다.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// 키의 현재 값을 조회합니다. 없거나 만료되었으면 `None`.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 키를 삭제합니다. 키가 없어도 성공입니다.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
