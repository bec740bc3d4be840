//! 계정 관리 서비스 모듈
//!
//! 계정 레코드의 생성, 비밀번호 검증, 소셜 계정 연결을 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - 이메일/닉네임/전화번호 유일성은 저장소 유니크 제약으로 보장
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::AccountService;
//!
//! let service = AccountService::new(accounts.clone(), PasswordConfig::bcrypt_cost());
//! let identity = service.verify_password("user@example.com", "Passw0rd!23").await?;
//! ```

pub mod user_service;

pub use user_service::AccountService;
