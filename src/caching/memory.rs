//! 프로세스 메모리 기반 세션 저장소
//!
//! `STORAGE_BACKEND=memory` 로컬 개발 모드와 테스트에서 사용합니다.
//! 만료는 조회 시점에 판단합니다. 만료된 항목은 조회될 때, 그리고 쓰기마다 전체에서 제거되므로
//! 다시 조회되지 않는 폐기 토큰도 남지 않습니다.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::caching::SessionStore;
use crate::errors::AppResult;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 만료되지 않은 항목 수
    pub async fn live_entries(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let now = Instant::now();
        let entry = Entry {
            value: value.to_string(),
            expires_at: now + ttl,
        };

        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // 만료된 항목 정리
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_set_get_delete() {
        let store = MemorySessionStore::new();
        store.set("RT:a@b.com", "refresh", Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.get("RT:a@b.com").await.unwrap(), Some("refresh".to_string()));

        store.delete("RT:a@b.com").await.unwrap();
        assert_eq!(store.get("RT:a@b.com").await.unwrap(), None);

        // 없는 키 삭제도 성공
        store.delete("RT:a@b.com").await.unwrap();
    }

    #[actix_web::test]
    async fn test_overwrite_replaces_value() {
        let store = MemorySessionStore::new();
        store.set("RT:a@b.com", "first", Duration::from_secs(60)).await.unwrap();
        store.set("RT:a@b.com", "second", Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.get("RT:a@b.com").await.unwrap(), Some("second".to_string()));
        assert_eq!(store.live_entries().await, 1);
    }

    #[actix_web::test]
    async fn test_entry_expires_after_ttl() {
        let store = MemorySessionStore::new();
        store.set("token", "logout", Duration::from_millis(30)).await.unwrap();
        assert!(store.get("token").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(store.get("token").await.unwrap(), None);
        assert_eq!(store.live_entries().await, 0);
    }

    #[actix_web::test]
    async fn test_write_purges_unread_expired_entries() {
        let store = MemorySessionStore::new();
        for i in 0..500 {
            store
                .set(&format!("access-token-{}", i), "logout", Duration::from_millis(10))
                .await
                .unwrap();
        }
        assert!(store.entries.read().await.len() >= 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        store.set("RT:a@b.com", "refresh", Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.entries.read().await.len(), 1);
        assert_eq!(store.live_entries().await, 1);
    }
}
