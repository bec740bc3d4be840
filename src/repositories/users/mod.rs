//! 계정 데이터 액세스 계층
//!
//! [`AccountStore`](user_repo::AccountStore) 계약과 구현체를 제공합니다.
//! 저장소는 이메일과 닉네임(그리고 값이 있는 전화번호)의 유일성을 보장해야 하며,
//! 유일성 위반은 `AppError::ConflictError`로 보고합니다.

pub mod memory;
pub mod user_repo;

pub use memory::MemoryAccountStore;
pub use user_repo::{AccountStore, MongoAccountStore};
