//! 자체 가입/로그인 요청 DTO
//!
//! 필드 이름은 camelCase 로 주고받습니다. 이메일/전화번호/비밀번호의 형식 규칙은
//! `CredentialValidator`가 검사하고, 여기서는 필수값 누락만 확인합니다.
use serde::Deserialize;
use validator::Validate;

use crate::config::Platform;
use crate::utils::string_utils::deserialize_optional_string;

/// 회원가입 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "전화번호를 입력해주세요"))]
    pub phone: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,

    #[validate(length(min = 1, message = "비밀번호 확인을 입력해주세요"))]
    pub password_check: String,
}

/// [웹 전용] 회원가입 추가 정보 입력 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalJoinInfoRequest {
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, max = 30, message = "이름은 1~30자여야 합니다"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub birthday: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub gender: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub university_name: Option<String>,
}

/// 자체 로그인 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,

    pub platform: Platform,
}

/// 이메일 중복 확인 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DuplicateEmailRequest {
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,
}

/// 전화번호 중복 확인 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DuplicatePhoneRequest {
    #[validate(length(min = 1, message = "전화번호를 입력해주세요"))]
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_request_uses_camel_case() {
        let request: JoinRequest = serde_json::from_str(
            r#"{"email":"a@b.com","phone":"01012345678","password":"Passw0rd!23","passwordCheck":"Passw0rd!23"}"#,
        )
        .unwrap();

        assert_eq!(request.password_check, "Passw0rd!23");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_additional_info_blank_fields_become_none() {
        let request: AdditionalJoinInfoRequest = serde_json::from_str(
            r#"{"email":"a@b.com","name":"홍길동","gender":"  ","universityName":"한국대학교"}"#,
        )
        .unwrap();

        assert_eq!(request.gender, None);
        assert_eq!(request.birthday, None);
        assert_eq!(request.university_name.as_deref(), Some("한국대학교"));
    }

    #[test]
    fn test_login_request_rejects_empty_password() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.com","password":"","platform":"WEB"}"#).unwrap();

        assert_eq!(request.platform, Platform::Web);
        assert!(request.validate().is_err());
    }
}
