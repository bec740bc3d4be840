//! 계정 인증 서비스
//!
//! 자체 가입/로그인과 소셜 로그인(Google, Kakao, Naver)을 처리하고,
//! JWT 액세스/리프레시 토큰과 Redis 세션 레코드로 로그인 상태를 관리합니다.
//!
//! # Features
//!
//! - **가입**: 이메일/전화번호/비밀번호 형식 검증, 기존 가입 경로를 알려주는 중복 확인
//! - **JWT 인증**: 플랫폼(WEB/APP)에 묶인 액세스/리프레시 토큰
//! - **세션**: 계정당 하나의 리프레시 세션, 로그아웃된 액세스 토큰 폐기 목록
//! - **소셜 로그인**: 같은 이메일은 가입 경로와 관계없이 하나의 계정
//! - **MongoDB**: 계정 영구 저장
//! - **Redis**: 세션 레코드와 폐기 목록
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /account/*, /health
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답, 토큰 헤더와 쿠키
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← AuthService, TokenService, AccountResolver
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← AccountStore, TokenRepository
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소 (테스트에서는 메모리 구현)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use account_auth_service::config::Platform;
//! use account_auth_service::core::AppServices;
//!
//! let services = AppServices::from_env().await?;
//! let outcome = services.auth.login(Platform::Web, "user@example.com", "Passw0rd!23").await?;
//! let refreshed = services.auth.refresh(Platform::Web, &outcome.tokens.refresh.token).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
