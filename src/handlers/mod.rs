//! # HTTP Request Handlers Module
//!
//! `/account` 아래의 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 핸들러는 요청을 DTO로 받아 형식 검증만 수행하고, 인증 규칙은 모두
//! 앱 데이터로 등록된 [`AuthService`](crate::services::auth::AuthService)에 맡깁니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Web, Mobile App)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                 ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   AuthService / AccountResolver      ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   AccountStore / TokenRepository     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 가입, 로그인(자체/소셜), 로그아웃
//! - [`token_handlers`] - 액세스 토큰 재발급
//! - [`users`] - 중복 확인, 내 프로필
//! - [`transport`] - 토큰 헤더/쿠키 읽기와 쓰기
//!
//! ## 토큰 전달
//!
//! | 토큰 | 헤더 | 쿠키 |
//! |------|------|------|
//! | 액세스 | `Authorization: Bearer <token>` | `accessToken` |
//! | 리프레시 | `Refresh-Token: <token>` | `refreshToken` |
//!
//! 쿠키는 httpOnly, path `/`, max-age는 토큰의 남은 수명입니다.
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! `AppError`의 `ResponseError` 구현이 상태 코드와 JSON 본문을 결정합니다.

pub mod auth;
pub mod token_handlers;
pub mod transport;
pub mod users;
