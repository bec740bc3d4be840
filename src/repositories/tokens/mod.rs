//! 세션 토큰 리포지토리 모듈
//!
//! 세션 저장소 위에서 리프레시 세션 레코드와 액세스 토큰 폐기 목록을 관리합니다.
//!
//! # Features
//!
//! - **세션 레코드**: 계정당 하나의 리프레시 토큰 (`RT:<email>`)
//! - **Access Token 폐기**: 로그아웃된 토큰을 남은 수명 동안 거부
//! - **TTL 자동 관리**: 저장소 TTL을 통한 자동 만료 처리
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::repositories::tokens::TokenRepository;
//!
//! let token_repo = TokenRepository::new(session_store.clone());
//! token_repo.store_session("user@example.com", &refresh_token, ttl).await?;
//! token_repo.revoke_access_token(&access_token, remaining).await?;
//! ```

pub mod token_repository;

pub use token_repository::*;
