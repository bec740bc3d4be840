//! 도메인 계층
//!
//! - `entities` - 영속 계정 레코드 (`Identity`)
//! - `models` - 토큰 클레임, 프로바이더 프로필, 요청 범위 인증 계정
//! - `dto` - HTTP 요청/응답 본문

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
