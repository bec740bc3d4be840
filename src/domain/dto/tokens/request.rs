use serde::Deserialize;

use crate::config::Platform;

/// 토큰 갱신 요청 본문
///
/// 리프레시 토큰 자체는 `Refresh-Token` 헤더 또는 `refreshToken` 쿠키로 전달됩니다.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformRequest {
    pub platform: Platform,
}
