//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! - [`users`] - 계정 저장소 (`AccountStore` trait, MongoDB/메모리 구현)
//! - [`tokens`] - 세션 레코드와 토큰 폐기 목록 (`TokenRepository`)
//!
//! 구현체는 `Arc<dyn Trait>`으로 서비스에 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{AccountStore, MongoAccountStore};
//!
//! let accounts: Arc<dyn AccountStore> = Arc::new(MongoAccountStore::new(database).await?);
//! let identity = accounts.find_by_email("user@example.com").await?;
//! ```

pub mod tokens;
pub mod users;
