//! # Core Module
//!
//! 애플리케이션 구성 요소를 조립하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 서비스 조립
//! - **AppServices**: 저장소, 토큰 서비스, 프로바이더 레지스트리를 조립해 `web::Data`로 보관
//! - **명시적 주입**: 모든 의존성은 생성자 인자로 전달되며 전역 상태를 사용하지 않음
//! - **저장소 선택**: `STORAGE_BACKEND` 설정에 따라 MongoDB + Redis 또는 메모리 저장소
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::AppServices;
//!
//! let services = AppServices::from_env().await?;
//!
//! HttpServer::new(move || {
//!     let services = services.clone();
//!     App::new()
//!         .configure(move |cfg| services.configure(cfg))
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod registry;

pub use registry::AppServices;
