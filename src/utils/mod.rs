//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 마스킹, 전화번호 정규화
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::{mask_email, normalize_korean_phone};
//!
//! log::info!("로그인 성공 - 사용자: {}", mask_email(&email));
//! let phone = normalize_korean_phone("+82 10-1234-5678"); // Some("01012345678")
//! ```

pub mod string_utils;
