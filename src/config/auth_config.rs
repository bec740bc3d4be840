//! 인증 관련 설정 관리 모듈
//!
//! JWT 서명/만료 설정, 로그인 유형과 클라이언트 플랫폼 열거형,
//! 그리고 외부 OAuth 프로바이더(Google, Kakao, Naver) 접속 설정을 관리합니다.

use std::env;
use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config::Environment;
use crate::errors::{AppError, AppResult};

/// 액세스 토큰 응답 헤더 / 요청 헤더 이름 (`Bearer <token>`)
pub const ACCESS_TOKEN_HEADER: &str = "Authorization";
/// 리프레시 토큰 응답 헤더 / 요청 헤더 이름
pub const REFRESH_TOKEN_HEADER: &str = "Refresh-Token";
/// 액세스 토큰 쿠키 이름
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// 리프레시 토큰 쿠키 이름
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// JWT 토큰 관리 설정
///
/// ## 환경 변수
///
/// ```bash
/// export JWT_SECRET="your-super-secret-256-bit-key-generated-securely"
/// export JWT_ACCESS_EXPIRATION_MINUTES="30"
/// export JWT_REFRESH_EXPIRATION_DAYS="14"
/// ```
pub struct JwtConfig;

/// 개발/테스트 환경 전용 서명 키
const DEV_JWT_SECRET: &str = "local-development-only-secret";

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 개발/테스트 환경에서만 비밀키 없이 기동할 수 있습니다.
    ///
    /// ```bash
    /// # 안전한 JWT 키 생성
    /// openssl rand -base64 32
    /// ```
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 스테이징/프로덕션에서 `JWT_SECRET`이 없거나 비어 있음
    pub fn secret() -> AppResult<String> {
        Self::resolve_secret(env::var("JWT_SECRET").ok(), Environment::current())
    }

    fn resolve_secret(configured: Option<String>, environment: Environment) -> AppResult<String> {
        match configured.filter(|secret| !secret.trim().is_empty()) {
            Some(secret) => Ok(secret),
            None if matches!(environment, Environment::Development | Environment::Test) => {
                log::warn!("JWT_SECRET not set, {:?} 환경용 기본 키를 사용합니다", environment);
                Ok(DEV_JWT_SECRET.to_string())
            }
            None => Err(AppError::InternalError(format!(
                "{:?} 환경에서는 JWT_SECRET 설정이 필요합니다",
                environment
            ))),
        }
    }

    /// 액세스 토큰 만료 시간(분). 기본값: 30분
    pub fn access_expiration_minutes() -> i64 {
        env::var("JWT_ACCESS_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|m: &i64| *m > 0)
            .unwrap_or(30)
    }

    /// 리프레시 토큰 만료 시간(일). 기본값: 14일
    ///
    /// 세션 레코드의 TTL도 이 값을 넘지 않습니다.
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|d: &i64| *d > 0)
            .unwrap_or(14)
    }
}

/// 토큰 서비스에 주입되는 JWT 설정 값
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl JwtSettings {
    /// 환경 변수에서 설정을 읽어 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 운영 환경에 서명 키가 없음
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            secret: JwtConfig::secret()?,
            access_ttl: Duration::minutes(JwtConfig::access_expiration_minutes()),
            refresh_ttl: Duration::days(JwtConfig::refresh_expiration_days()),
        })
    }
}

/// 계정의 로그인 유형 (가입 경로)
///
/// 와이어 표현은 대문자 태그(`NATIVE`, `GOOGLE`, `KAKAO`, `NAVER`)이며,
/// 자체 로그인은 과거 표기인 `JWT`도 허용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoginType {
    /// 이메일/패스워드 자체 로그인
    #[serde(alias = "JWT")]
    Native,
    Google,
    Kakao,
    Naver,
}

impl LoginType {
    pub const FEDERATED: [LoginType; 3] = [LoginType::Google, LoginType::Kakao, LoginType::Naver];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoginType::Native => "NATIVE",
            LoginType::Google => "GOOGLE",
            LoginType::Kakao => "KAKAO",
            LoginType::Naver => "NAVER",
        }
    }

    /// 외부 프로바이더를 통한 로그인인지 여부
    pub fn is_federated(&self) -> bool {
        !matches!(self, LoginType::Native)
    }

    /// 사용자에게 보여줄 가입 경로 이름
    pub fn display_name(&self) -> &'static str {
        match self {
            LoginType::Native => "일반",
            LoginType::Google => "구글",
            LoginType::Kakao => "카카오",
            LoginType::Naver => "네이버",
        }
    }
}

impl fmt::Display for LoginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 토큰을 발급받은 클라이언트 플랫폼
///
/// 리프레시 토큰은 발급된 플랫폼에서만 사용할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    #[serde(alias = "app")]
    App,
    #[serde(alias = "web")]
    Web,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::App => "APP",
            Platform::Web => "WEB",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 외부 OAuth 프로바이더 접속 설정
///
/// 각 값은 `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET`, `{PREFIX}_REDIRECT_URI`,
/// `{PREFIX}_AUTH_URI`, `{PREFIX}_TOKEN_URI`, `{PREFIX}_USER_INFO_URI`, `{PREFIX}_STATE`
/// 환경 변수에서 읽으며 PREFIX는 `GOOGLE`, `KAKAO`, `NAVER` 입니다.
/// 엔드포인트는 각 프로바이더의 공개 주소가 기본값입니다.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorize_uri: String,
    pub token_uri: String,
    pub user_info_uri: String,
    /// 인가 요청/토큰 교환에 사용하는 state 값 (Naver는 토큰 교환에도 필요)
    pub state: String,
}

impl ProviderSettings {
    /// 프로바이더별 설정을 환경 변수에서 읽습니다.
    ///
    /// 자체 로그인(`Native`)은 외부 설정이 없으므로 `None`을 반환합니다.
    pub fn from_env(login_type: LoginType) -> Option<Self> {
        let (authorize, token, user_info) = Self::default_endpoints(login_type)?;
        let prefix = login_type.as_str();
        let read = |name: &str, default: &str| {
            env::var(format!("{}_{}", prefix, name)).unwrap_or_else(|_| default.to_string())
        };

        let client_id = read("CLIENT_ID", "");
        if client_id.is_empty() {
            log::warn!("{}_CLIENT_ID not set, {} 로그인은 실패합니다", prefix, login_type.display_name());
        }

        Some(Self {
            client_id,
            client_secret: read("CLIENT_SECRET", ""),
            redirect_uri: read("REDIRECT_URI", ""),
            authorize_uri: read("AUTH_URI", authorize),
            token_uri: read("TOKEN_URI", token),
            user_info_uri: read("USER_INFO_URI", user_info),
            state: read("STATE", "account-auth"),
        })
    }

    fn default_endpoints(login_type: LoginType) -> Option<(&'static str, &'static str, &'static str)> {
        match login_type {
            LoginType::Native => None,
            LoginType::Google => Some((
                "https://accounts.google.com/o/oauth2/v2/auth",
                "https://oauth2.googleapis.com/token",
                "https://www.googleapis.com/oauth2/v2/userinfo",
            )),
            LoginType::Kakao => Some((
                "https://kauth.kakao.com/oauth/authorize",
                "https://kauth.kakao.com/oauth/token",
                "https://kapi.kakao.com/v2/user/me",
            )),
            LoginType::Naver => Some((
                "https://nid.naver.com/oauth2.0/authorize",
                "https://nid.naver.com/oauth2.0/token",
                "https://openapi.naver.com/v1/nid/me",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_required_outside_development() {
        for environment in [Environment::Production, Environment::Staging] {
            assert!(matches!(
                JwtConfig::resolve_secret(None, environment),
                Err(AppError::InternalError(_))
            ));
            assert!(JwtConfig::resolve_secret(Some("  ".to_string()), environment).is_err());
        }

        assert_eq!(
            JwtConfig::resolve_secret(Some("prod-key".to_string()), Environment::Production).unwrap(),
            "prod-key"
        );
        assert_eq!(
            JwtConfig::resolve_secret(None, Environment::Development).unwrap(),
            DEV_JWT_SECRET
        );
        assert!(JwtConfig::resolve_secret(None, Environment::Test).is_ok());
    }

    #[test]
    fn test_login_type_wire_format() {
        assert_eq!(serde_json::to_string(&LoginType::Native).unwrap(), "\"NATIVE\"");
        assert_eq!(serde_json::to_string(&LoginType::Kakao).unwrap(), "\"KAKAO\"");

        let legacy: LoginType = serde_json::from_str("\"JWT\"").unwrap();
        assert_eq!(legacy, LoginType::Native);
        assert!(serde_json::from_str::<LoginType>("\"GITHUB\"").is_err());
    }

    #[test]
    fn test_platform_wire_format() {
        assert_eq!(serde_json::to_string(&Platform::Web).unwrap(), "\"WEB\"");
        let app: Platform = serde_json::from_str("\"APP\"").unwrap();
        assert_eq!(app, Platform::App);
        let lower: Platform = serde_json::from_str("\"web\"").unwrap();
        assert_eq!(lower, Platform::Web);
    }

    #[test]
    fn test_provider_settings_only_for_federated_types() {
        assert!(ProviderSettings::from_env(LoginType::Native).is_none());

        let naver = ProviderSettings::from_env(LoginType::Naver).unwrap();
        if env::var("NAVER_TOKEN_URI").is_err() {
            assert_eq!(naver.token_uri, "https://nid.naver.com/oauth2.0/token");
        }
    }

    #[test]
    fn test_federated_types_exclude_native() {
        assert!(LoginType::FEDERATED.iter().all(LoginType::is_federated));
        assert!(!LoginType::Native.is_federated());
    }
}
