//! Identity Entity Implementation
//!
//! 계정 레코드의 핵심 구현체입니다.
//! 자체 로그인과 소셜 로그인 계정을 하나의 모델로 표현하며,
//! 이메일이 프로바이더 간 계정을 연결하는 유일한 키입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::LoginType;
use crate::domain::models::oauth::NormalizedProviderIdentity;

/// 계정 권한
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountRole {
    #[default]
    User,
    Admin,
}

/// 계정 엔티티
///
/// 유니크 제약: `email`, `nickname`, `phone`(값이 있을 때만)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// 소셜 전용 계정은 비밀번호가 없음
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,
    pub login_type: LoginType,
    pub role: AccountRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Identity {
    /// 이메일/비밀번호 자체 가입 계정
    pub fn new_native(email: String, password_hash: String, phone: String, nickname: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            phone: Some(phone),
            password_hash: Some(password_hash),
            name: None,
            nickname,
            birthday: None,
            gender: None,
            university_name: None,
            login_type: LoginType::Native,
            role: AccountRole::User,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 소셜 로그인으로 처음 가입하는 계정
    pub fn new_federated(profile: NormalizedProviderIdentity, nickname: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email: profile.email,
            phone: profile.phone,
            password_hash: None,
            name: profile.name,
            nickname,
            birthday: profile.birthday,
            gender: None,
            university_name: None,
            login_type: profile.provider,
            role: AccountRole::User,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }

    /// 로그인 시각을 기록합니다.
    pub fn touch_login(&mut self) {
        let now = DateTime::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// 가입 후 추가 정보 입력
    pub fn update_additional_info(
        &mut self,
        name: String,
        birthday: Option<String>,
        gender: Option<String>,
        university_name: Option<String>,
    ) {
        self.name = Some(name);
        self.birthday = birthday;
        self.gender = gender;
        self.university_name = university_name;
        self.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kakao_profile() -> NormalizedProviderIdentity {
        NormalizedProviderIdentity {
            email: "kim@kakao.com".to_string(),
            name: Some("김철수".to_string()),
            birthday: Some("1995-03-21".to_string()),
            phone: Some("01012345678".to_string()),
            provider: LoginType::Kakao,
        }
    }

    #[test]
    fn test_new_native_defaults() {
        let identity = Identity::new_native(
            "a@b.com".to_string(),
            "$2b$04$hash".to_string(),
            "01012345678".to_string(),
            "a@b.1234567".to_string(),
        );

        assert_eq!(identity.login_type, LoginType::Native);
        assert_eq!(identity.role, AccountRole::User);
        assert!(identity.password_hash.is_some());
        assert!(identity.id.is_none());
    }

    #[test]
    fn test_new_federated_copies_profile() {
        let identity = Identity::new_federated(kakao_profile(), "kim@1234567".to_string());

        assert_eq!(identity.email, "kim@kakao.com");
        assert_eq!(identity.login_type, LoginType::Kakao);
        assert_eq!(identity.phone.as_deref(), Some("01012345678"));
        assert!(identity.password_hash.is_none());
    }

    #[test]
    fn test_absent_optional_fields_are_not_serialized() {
        let mut profile = kakao_profile();
        profile.phone = None;
        let identity = Identity::new_federated(profile, "kim@1234567".to_string());

        let doc = mongodb::bson::to_document(&identity).unwrap();
        assert!(!doc.contains_key("phone"));
        assert!(!doc.contains_key("password_hash"));
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("login_type").unwrap(), "KAKAO");
    }
}
