//! # 문자열 유틸리티
//!
//! 입력 정리, 로그 마스킹, 전화번호 정규화 등 문자열 처리 함수들입니다.

use serde::Deserialize;

/// 공백뿐인 문자열은 `None`으로 취급합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 로그 출력용 이메일 마스킹 (`abcdef@x.com` → `ab***@x.com`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        None => "***".to_string(),
    }
}

/// 숫자만 남깁니다.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// 국제 표기 전화번호를 국내 숫자 표기로 정규화합니다.
///
/// `+82 10-1234-5678` → `01012345678`, `010-1234-5678` → `01012345678`
pub fn normalize_korean_phone(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let digits = digits_only(trimmed);
    if digits.is_empty() {
        return None;
    }

    if trimmed.starts_with("+82") {
        let national = digits.trim_start_matches("82");
        if national.starts_with('0') {
            Some(national.to_string())
        } else {
            Some(format!("0{}", national))
        }
    } else {
        Some(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  x ".to_string())), Some("x".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("abcdef@example.com"), "ab***@example.com");
        assert_eq!(mask_email("a@b.com"), "a***@b.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_normalize_korean_phone() {
        assert_eq!(normalize_korean_phone("+82 10-1234-5678"), Some("01012345678".to_string()));
        assert_eq!(normalize_korean_phone("010-1234-5678"), Some("01012345678".to_string()));
        assert_eq!(normalize_korean_phone("01012345678"), Some("01012345678".to_string()));
        assert_eq!(normalize_korean_phone(" - "), None);
    }
}
