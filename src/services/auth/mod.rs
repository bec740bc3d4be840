//! 인증 및 보안 서비스 모듈
//!
//! JWT 기반 토큰 인증, 세션 관리, OAuth 2.0 소셜 로그인을 담당하는 서비스들을 제공합니다.
//!
//! # Features
//!
//! - 가입 정보 형식 검증과 중복 확인 (`CredentialValidator`)
//! - JWT 액세스/리프레시 토큰 발급, 검증, 재발급 (`TokenService`)
//! - Google / Kakao / Naver 프로바이더 어댑터 (`providers`)
//! - 요청 헤더로부터 계정 확인 (`AccountResolver`)
//! - 가입/로그인/로그아웃/재발급 흐름 조율 (`AuthService`)
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명, 만료 여유 시간 없음
//! - 계정당 활성 세션 하나 (새 로그인이 이전 리프레시 토큰을 무효화)
//! - 로그아웃된 액세스 토큰은 남은 수명 동안 거부
//! - 세션 저장소 장애 시 인증 실패로 처리 (fail closed)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::AuthService;
//!
//! let outcome = auth_service.login(Platform::Web, "user@example.com", "Passw0rd!23").await?;
//! let access = auth_service.refresh(Platform::Web, &outcome.tokens.refresh.token).await?;
//! ```

pub mod account_resolver;
pub mod auth_service;
pub mod credential_validator;
pub mod providers;
pub mod token_service;

pub use account_resolver::AccountResolver;
pub use auth_service::{AuthService, LoginOutcome};
pub use credential_validator::{CredentialValidator, DuplicateCheck};
pub use providers::{OAuthProvider, ProviderRegistry};
pub use token_service::TokenService;
