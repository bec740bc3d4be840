//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 생성 시점에 저장소와 설정을 주입받으며, 애플리케이션 시작 시
//! `core::AppServices`가 한 번 조립해 `web::Data`로 공유합니다.
//!
//! # Features
//!
//! - 계정 생성, 비밀번호 검증, 소셜 계정 연결
//! - JWT 토큰 기반 인증과 세션 관리
//! - OAuth 2.0 소셜 로그인 (Google, Kakao, Naver)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthService, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(JwtSettings::from_env()?, token_repo.clone()));
//! let auth = AuthService::new(accounts, tokens, token_repo, ProviderRegistry::from_env()?, cost);
//! ```

pub mod auth;
pub mod users;
