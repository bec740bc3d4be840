//! 프로세스 메모리 기반 계정 저장소
//!
//! `STORAGE_BACKEND=memory` 로컬 개발 모드와 테스트에서 사용합니다.
//! MongoDB 구현과 같은 유니크 규칙(email, nickname, phone)을 적용합니다.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::domain::entities::users::Identity;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::AccountStore;

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<ObjectId, Identity>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }

    async fn find_where<F>(&self, predicate: F) -> Option<Identity>
    where
        F: Fn(&Identity) -> bool,
    {
        self.accounts
            .read()
            .await
            .values()
            .find(|identity| predicate(identity))
            .cloned()
    }
}

/// 다른 계정과 유니크 필드가 겹치는지 확인
fn conflicting_field(existing: &Identity, candidate: &Identity) -> Option<&'static str> {
    if existing.email == candidate.email {
        Some("email")
    } else if existing.nickname == candidate.nickname {
        Some("nickname")
    } else if existing.phone.is_some() && existing.phone == candidate.phone {
        Some("phone")
    } else {
        None
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        Ok(self.find_where(|identity| identity.email == email).await)
    }

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<Identity>> {
        Ok(self
            .find_where(|identity| identity.phone.as_deref() == Some(phone))
            .await)
    }

    async fn save(&self, mut identity: Identity) -> AppResult<Identity> {
        let mut accounts = self.accounts.write().await;
        let id = identity.id.unwrap_or_else(ObjectId::new);

        let conflict = accounts
            .iter()
            .filter(|(existing_id, _)| **existing_id != id)
            .find_map(|(_, existing)| conflicting_field(existing, &identity));

        if let Some(field) = conflict {
            return Err(AppError::ConflictError(format!("이미 사용 중인 {} 입니다", field)));
        }

        identity.id = Some(id);
        accounts.insert(id, identity.clone());
        Ok(identity)
    }

    async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool> {
        Ok(self.find_where(|identity| identity.nickname == nickname).await.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native(email: &str, phone: &str, nickname: &str) -> Identity {
        Identity::new_native(
            email.to_string(),
            "hash".to_string(),
            phone.to_string(),
            nickname.to_string(),
        )
    }

    #[actix_web::test]
    async fn test_save_assigns_id_and_finds_by_keys() {
        let store = MemoryAccountStore::new();
        let saved = store.save(native("a@b.com", "01012345678", "a@b.1234567")).await.unwrap();
        assert_eq!(saved.id_string().unwrap().len(), 24);

        assert_eq!(store.find_by_email("a@b.com").await.unwrap().unwrap().id, saved.id);
        assert_eq!(store.find_by_phone("01012345678").await.unwrap().unwrap().id, saved.id);
        assert!(store.exists_by_nickname("a@b.1234567").await.unwrap());
        assert!(!store.exists_by_nickname("other").await.unwrap());
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_conflict() {
        let store = MemoryAccountStore::new();
        store.save(native("a@b.com", "01012345678", "nick-1")).await.unwrap();

        let result = store.save(native("a@b.com", "01099998888", "nick-2")).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(store.count().await, 1);
    }

    #[actix_web::test]
    async fn test_update_existing_does_not_conflict_with_itself() {
        let store = MemoryAccountStore::new();
        let mut saved = store.save(native("a@b.com", "01012345678", "nick-1")).await.unwrap();
        saved.name = Some("홍길동".to_string());

        let updated = store.save(saved.clone()).await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(store.count().await, 1);
        assert_eq!(
            store.find_by_email("a@b.com").await.unwrap().unwrap().name.as_deref(),
            Some("홍길동")
        );
    }
}
