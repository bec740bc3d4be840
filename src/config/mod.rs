//! # Configuration Module
//!
//! 인증 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리하며,
//! 서비스에 주입할 값 타입(`JwtSettings`, `ProviderSettings`)을 만들어 줍니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 세션 저장소, 서버, 환경 관련 설정
//! - [`auth_config`] - JWT, 로그인 유형, 플랫폼, OAuth 프로바이더 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 저장소
//! export STORAGE_BACKEND="mongo"   # mongo | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # JWT 설정
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_ACCESS_EXPIRATION_MINUTES="30"
//! export JWT_REFRESH_EXPIRATION_DAYS="14"
//!
//! # 요청 속도 제한
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//!
//! # 소셜 로그인 (사용 시)
//! export KAKAO_CLIENT_ID="your-client-id"
//! export KAKAO_CLIENT_SECRET="your-client-secret"
//! export KAKAO_REDIRECT_URI="https://yourdomain.com/oauth/kakao"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
