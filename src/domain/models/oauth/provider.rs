//! 외부 OAuth 프로바이더와 주고받는 값 타입
//!
//! 프로바이더마다 응답 구조가 다르므로 사용자 정보는 원본 JSON 그대로 보관하고,
//! 각 어댑터의 `normalize`가 공통 구조인 [`NormalizedProviderIdentity`]로 변환합니다.

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::LoginType;

/// 인가 코드 교환으로 받은 프로바이더 액세스 토큰
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Naver는 문자열(`"3600"`)로, 다른 프로바이더는 숫자로 보냅니다.
    #[serde(default, deserialize_with = "deserialize_lenient_seconds")]
    pub expires_in: Option<i64>,
}

fn deserialize_lenient_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl ProviderToken {
    /// 앱 클라이언트가 직접 받아 온 토큰을 감쌉니다.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: Some("bearer".to_string()),
            refresh_token: None,
            expires_in: None,
        }
    }
}

/// 프로바이더 사용자 정보 원본 응답
#[derive(Debug, Clone)]
pub struct ProviderUserInfo {
    pub provider: LoginType,
    pub body: serde_json::Value,
}

/// 프로바이더 응답을 정규화한 프로필. 계정 조회/생성에만 쓰이고 저장되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedProviderIdentity {
    pub email: String,
    pub name: Option<String>,
    /// `YYYY-MM-DD` 또는 연도를 모르면 `MM-DD`
    pub birthday: Option<String>,
    /// 국내 번호 숫자만 (`01012345678`)
    pub phone: Option<String>,
    pub provider: LoginType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_in_accepts_number_or_string() {
        let numeric: ProviderToken =
            serde_json::from_str(r#"{"access_token":"a","expires_in":3599}"#).unwrap();
        let textual: ProviderToken =
            serde_json::from_str(r#"{"access_token":"a","expires_in":"3600"}"#).unwrap();
        let absent: ProviderToken = serde_json::from_str(r#"{"access_token":"a"}"#).unwrap();

        assert_eq!(numeric.expires_in, Some(3599));
        assert_eq!(textual.expires_in, Some(3600));
        assert_eq!(absent.expires_in, None);
    }
}
