//! JWT 인증 토큰 구조체 및 페어링 된 세트
//!
//! 액세스/리프레시 토큰의 클레임과, 발급된 토큰을 만료 시각과 함께 묶은 값 타입입니다.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Platform;

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT 클레임
///
/// `sub`는 계정 이메일입니다. `jti`는 같은 초에 발급된 토큰도 서로 다른 문자열이 되도록 합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub platform: Platform,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// 발급된 단일 토큰과 만료 시각
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// `now` 기준 남은 유효 시간(초). 이미 만료되었으면 0.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

/// 로그인 시 발급되는 액세스/리프레시 토큰 쌍
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}
