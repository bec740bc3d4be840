//! # Account Data Transfer Objects Module
//!
//! 계정 API의 요청/응답 본문 구조를 정의합니다. 와이어 필드는 camelCase 입니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── account_request.rs   # 가입, 추가 정보, 자체 로그인, 중복 확인
//! │   └── oauth_request.rs     # 앱/웹 소셜 로그인
//! └── response/
//!     ├── api_response.rs      # 공통 응답 래퍼
//!     └── account_response.rs  # 로그인 결과, 프로필
//! ```
//!
//! ## JSON 응답 예제
//!
//! 자체 로그인:
//! ```json
//! { "success": true, "data": { "email": "a@b.com", "accessToken": "eyJ...", "refreshToken": "eyJ..." } }
//! ```
//!
//! 소셜 로그인:
//! ```json
//! {
//!   "loginSuccess": true,
//!   "userId": "507f1f77bcf86cd799439011",
//!   "email": "kim@kakao.com",
//!   "name": "김철수",
//!   "birthday": "1995-03-21",
//!   "phone": "01012345678",
//!   "accessToken": "eyJ...",
//!   "refreshToken": "eyJ..."
//! }
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
