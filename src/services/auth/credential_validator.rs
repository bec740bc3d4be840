//! 가입 정보 형식 검증과 중복 확인
//!
//! 형식 규칙:
//! - 이메일: `local@domain.tld` (영문/숫자/`_+&*-`, 점으로 구분된 local, TLD 2~7자)
//! - 전화번호: 숫자 10~11자리
//! - 비밀번호: 9~22자, 숫자/소문자/대문자/특수문자(`@#$%^&+=!`) 각 1자 이상, 공백 불가

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::LoginType;
use crate::domain::entities::users::Identity;
use crate::errors::{AppError, AppResult, DuplicateField};
use crate::repositories::users::AccountStore;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_+&*-]+(?:\.[a-zA-Z0-9_+&*-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,7}$")
        .expect("email pattern is valid")
});

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10,11}$").expect("phone pattern is valid"));

const PASSWORD_SPECIAL_CHARS: &str = "@#$%^&+=!";
const PASSWORD_MIN_LEN: usize = 9;
const PASSWORD_MAX_LEN: usize = 22;

/// 중복 확인 결과
#[derive(Debug, Clone)]
pub enum DuplicateCheck {
    /// 같은 값으로 가입된 계정이 있음
    Found(Identity),
    NotFound,
}

impl DuplicateCheck {
    /// 충돌한 계정의 가입 경로
    pub fn origin(&self) -> Option<LoginType> {
        match self {
            DuplicateCheck::Found(identity) => Some(identity.login_type),
            DuplicateCheck::NotFound => None,
        }
    }

    /// 중복이면 가입 경로를 담은 `DuplicateAccount` 에러로 바꿉니다.
    pub fn ensure_absent(&self, field: DuplicateField) -> AppResult<()> {
        match self.origin() {
            Some(origin) => Err(AppError::DuplicateAccount { origin, field }),
            None => Ok(()),
        }
    }
}

pub struct CredentialValidator {
    accounts: Arc<dyn AccountStore>,
}

impl CredentialValidator {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub fn validate_email(email: &str) -> AppResult<()> {
        if EMAIL_REGEX.is_match(email) {
            Ok(())
        } else {
            Err(AppError::ValidationError("이메일 형식이 올바르지 않습니다".to_string()))
        }
    }

    pub fn validate_phone(phone: &str) -> AppResult<()> {
        if PHONE_REGEX.is_match(phone) {
            Ok(())
        } else {
            Err(AppError::ValidationError(
                "전화번호는 숫자 10~11자리여야 합니다".to_string(),
            ))
        }
    }

    pub fn validate_password(password: &str) -> AppResult<()> {
        let length = password.chars().count();
        if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&length) {
            return Err(AppError::ValidationError(format!(
                "비밀번호는 {}~{}자여야 합니다",
                PASSWORD_MIN_LEN, PASSWORD_MAX_LEN
            )));
        }

        if password.chars().any(char::is_whitespace) {
            return Err(AppError::ValidationError("비밀번호에 공백을 사용할 수 없습니다".to_string()));
        }

        let rules: [(&str, fn(char) -> bool); 4] = [
            ("숫자", |c| c.is_ascii_digit()),
            ("영문 소문자", |c| c.is_ascii_lowercase()),
            ("영문 대문자", |c| c.is_ascii_uppercase()),
            ("특수문자(@#$%^&+=!)", |c| PASSWORD_SPECIAL_CHARS.contains(c)),
        ];

        for (label, rule) in rules {
            if !password.chars().any(rule) {
                return Err(AppError::ValidationError(format!(
                    "비밀번호에 {}를 1자 이상 포함해야 합니다",
                    label
                )));
            }
        }

        Ok(())
    }

    pub async fn check_email_duplicate(&self, email: &str) -> AppResult<DuplicateCheck> {
        Ok(match self.accounts.find_by_email(email).await? {
            Some(identity) => DuplicateCheck::Found(identity),
            None => DuplicateCheck::NotFound,
        })
    }

    pub async fn check_phone_duplicate(&self, phone: &str) -> AppResult<DuplicateCheck> {
        Ok(match self.accounts.find_by_phone(phone).await? {
            Some(identity) => DuplicateCheck::Found(identity),
            None => DuplicateCheck::NotFound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::MemoryAccountStore;

    #[test]
    fn test_password_rules() {
        assert!(CredentialValidator::validate_password("Passw0rd!23").is_ok());

        // 대문자/특수문자 없음
        assert!(CredentialValidator::validate_password("password1").is_err());
        // 길이 미달
        assert!(CredentialValidator::validate_password("Pa0!abcd").is_err());
        // 길이 초과
        assert!(CredentialValidator::validate_password("Passw0rd!23Passw0rd!234").is_err());
        // 공백 포함
        assert!(CredentialValidator::validate_password("Passw0rd !23").is_err());
        // 허용되지 않은 특수문자만 사용
        assert!(CredentialValidator::validate_password("Passw0rd?23").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(CredentialValidator::validate_email("a@b.com").is_ok());
        assert!(CredentialValidator::validate_email("first.last+tag@mail.example.co").is_ok());

        assert!(CredentialValidator::validate_email("a@b").is_err());
        assert!(CredentialValidator::validate_email("a..b@c.com").is_err());
        assert!(CredentialValidator::validate_email("@b.com").is_err());
        assert!(CredentialValidator::validate_email("a@b.c").is_err());
    }

    #[test]
    fn test_phone_rules() {
        assert!(CredentialValidator::validate_phone("01012345678").is_ok());
        assert!(CredentialValidator::validate_phone("0212345678").is_ok());

        assert!(CredentialValidator::validate_phone("010-1234-5678").is_err());
        assert!(CredentialValidator::validate_phone("010123456").is_err());
        assert!(CredentialValidator::validate_phone("010123456789").is_err());
    }

    #[actix_web::test]
    async fn test_duplicate_check_reports_origin() {
        let store = Arc::new(MemoryAccountStore::new());
        let mut identity = Identity::new_native(
            "kim@naver.com".to_string(),
            "hash".to_string(),
            "01012345678".to_string(),
            "kim@1234567".to_string(),
        );
        identity.login_type = LoginType::Naver;
        store.save(identity).await.unwrap();

        let validator = CredentialValidator::new(store);

        let email = validator.check_email_duplicate("kim@naver.com").await.unwrap();
        assert_eq!(email.origin(), Some(LoginType::Naver));
        assert!(matches!(
            email.ensure_absent(DuplicateField::Email),
            Err(AppError::DuplicateAccount { origin: LoginType::Naver, field: DuplicateField::Email })
        ));

        let phone = validator.check_phone_duplicate("01099999999").await.unwrap();
        assert!(matches!(phone, DuplicateCheck::NotFound));
        assert!(phone.ensure_absent(DuplicateField::Phone).is_ok());
    }
}
