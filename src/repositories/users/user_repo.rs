//! # 계정 리포지토리 구현
//!
//! 인증 계층이 필요로 하는 계정 조회/저장 계약과 MongoDB 구현체입니다.
//!
//! ## 특징
//!
//! - **유니크 인덱스**: email, nickname, phone(sparse)
//! - **충돌 보고**: 유니크 인덱스 위반(E11000)은 `ConflictError`로 변환되어
//!   동시 가입 경쟁에서 호출자가 재조회 후 진행할 수 있습니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::users::Identity;
use crate::errors::{AppError, AppResult};

/// 계정 저장소 계약
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<Identity>>;

    /// 새 계정이면 식별자를 부여해 삽입하고, 기존 계정이면 전체를 교체합니다.
    ///
    /// 유일성 위반 시 `AppError::ConflictError`.
    async fn save(&self, identity: Identity) -> AppResult<Identity>;

    async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool>;
}

/// MongoDB `accounts` 컬렉션 기반 계정 저장소
pub struct MongoAccountStore {
    collection: Collection<Identity>,
}

impl MongoAccountStore {
    pub const COLLECTION: &'static str = "accounts";

    /// 컬렉션 핸들을 만들고 유니크 인덱스를 보장합니다.
    pub async fn new(db: Arc<Database>) -> AppResult<Self> {
        let store = Self {
            collection: db.get_database().collection::<Identity>(Self::COLLECTION),
        };
        store.create_indexes().await?;
        Ok(store)
    }

    /// 유니크 인덱스 생성
    ///
    /// 연동 계정은 전화번호가 없을 수 있으므로 phone 인덱스는 sparse 입니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let nickname_index = IndexModel::builder()
            .keys(doc! { "nickname": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("nickname_unique".to_string())
                .build())
            .build();

        let phone_index = IndexModel::builder()
            .keys(doc! { "phone": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("phone_unique".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([email_index, nickname_index, phone_index])
            .await
            .map_err(|e| AppError::DatabaseError(format!("인덱스 생성 실패: {}", e)))?;

        log::info!("✅ accounts 컬렉션 인덱스 확인 완료");
        Ok(())
    }

    async fn find_one(&self, filter: mongodb::bson::Document) -> AppResult<Option<Identity>> {
        self.collection
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

/// E11000 duplicate key 여부
fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == 11000,
        ErrorKind::Command(e) => e.code == 11000,
        _ => false,
    }
}

fn map_write_error(error: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&error) {
        AppError::ConflictError(format!("이미 존재하는 계정입니다: {}", error))
    } else {
        AppError::DatabaseError(error.to_string())
    }
}

#[async_trait]
impl AccountStore for MongoAccountStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        self.find_one(doc! { "email": email }).await
    }

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<Identity>> {
        self.find_one(doc! { "phone": phone }).await
    }

    async fn save(&self, mut identity: Identity) -> AppResult<Identity> {
        match identity.id {
            Some(id) => {
                self.collection
                    .replace_one(doc! { "_id": id }, &identity)
                    .await
                    .map_err(map_write_error)?;
            }
            None => {
                identity.id = Some(ObjectId::new());
                self.collection
                    .insert_one(&identity)
                    .await
                    .map_err(map_write_error)?;
            }
        }

        Ok(identity)
    }

    async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool> {
        Ok(self.find_one(doc! { "nickname": nickname }).await?.is_some())
    }
}
