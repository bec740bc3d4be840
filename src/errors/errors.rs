//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! 인증 계열 에러(`Unauthenticated`, `InvalidToken`, `MissingCredentials`,
//! `UnknownIdentity`)는 응답 본문에 내부 사유를 싣지 않고
//! `{"error": "unauthenticated"}`로만 응답합니다. 사유는 로그로만 남습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! fn check_password_match(password: &str, check: &str) -> Result<(), AppError> {
//!     if password != check {
//!         return Err(AppError::ValidationError("비밀번호가 일치하지 않습니다".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use actix_web::http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::config::LoginType;

/// 중복 검사 대상 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    Phone,
}

impl DuplicateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateField::Email => "email",
            DuplicateField::Phone => "phone",
        }
    }
}

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 형식 검증 실패 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 이미 가입된 이메일/전화번호 (409 Conflict)
    ///
    /// 충돌한 계정의 가입 경로를 함께 전달합니다.
    #[error("{}로그인으로 가입된 계정이 존재합니다. ({origin}, {})", .origin.display_name(), .field.as_str())]
    DuplicateAccount { origin: LoginType, field: DuplicateField },

    /// 액세스/리프레시 토큰 누락, 만료, 폐기 등 인증 실패 (401 Unauthorized)
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// 서명 불일치, 구조 오류, 폐기된 토큰 (401 Unauthorized)
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Authorization 헤더 없음 (401 Unauthorized)
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// 토큰은 유효하지만 계정이 존재하지 않음 (401 Unauthorized)
    #[error("Unknown identity: {0}")]
    UnknownIdentity(String),

    /// 지원하지 않는 로그인 유형 (400 Bad Request)
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// 세션 저장소(Redis) 접근 불가 또는 시간 초과 (503 Service Unavailable)
    #[error("Session store unavailable: {0}")]
    SessionStoreUnavailable(String),

    /// 저장소 유니크 제약 위반 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 리소스 찾을 수 없음 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 외부 OAuth 프로바이더 호출 실패 (502 Bad Gateway)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 인증 실패 계열 에러인지 여부
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            AppError::Unauthenticated(_)
                | AppError::InvalidToken(_)
                | AppError::MissingCredentials(_)
                | AppError::UnknownIdentity(_)
        )
    }

    /// 토큰 검증 실패를 호출자에게 보일 `Unauthenticated`로 변환합니다.
    ///
    /// 인프라 장애(`SessionStoreUnavailable` 등)는 그대로 둡니다.
    pub fn into_unauthenticated(self) -> AppError {
        match self {
            AppError::InvalidToken(reason) | AppError::MissingCredentials(reason) => {
                AppError::Unauthenticated(reason)
            }
            other => other,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::UnsupportedProvider(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateAccount { .. } | AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SessionStoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            e if e.is_authentication_failure() => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        let body = match self {
            e if e.is_authentication_failure() => json!({ "error": "unauthenticated" }),
            AppError::DuplicateAccount { origin, field } => json!({
                "error": self.to_string(),
                "origin": origin,
                "field": field.as_str(),
            }),
            AppError::ValidationError(msg) => json!({ "error": msg }),
            _ if status.is_server_error() => {
                log::error!("요청 처리 실패: {}", self);
                json!({ "error": status.canonical_reason().unwrap_or("server error") })
            }
            _ => json!({ "error": self.to_string() }),
        };

        actix_web::HttpResponse::build(status).json(body)
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
