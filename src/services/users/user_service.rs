//! # 계정 관리 서비스 구현
//!
//! 계정 레코드의 생성과 조회, 비밀번호 검증, 소셜 로그인 계정 연결을 담당합니다.
//!
//! ## 서비스 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       AccountService                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────┐  │
//! │  │   Registration  │  │  Authentication │  │  Federation │  │
//! │  │ • Password Hash │  │ • bcrypt verify │  │ • find by   │  │
//! │  │ • Nickname Gen  │  │ • Social-only   │  │   email     │  │
//! │  │ • Entity Create │  │   account check │  │ • create or │  │
//! │  │                 │  │                 │  │   re-read   │  │
//! │  └─────────────────┘  └─────────────────┘  └─────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//!                                │
//!                                ▼
//!                   AccountStore (MongoDB / Memory)
//! ```
//!
//! ## 계정 연결 규칙
//!
//! 이메일이 유일한 연결 키입니다. 같은 이메일로 다른 프로바이더 로그인을 하면
//! 기존 계정에 로그인되고 새 계정을 만들지 않습니다.
//! 가입 경로(`login_type`)는 자체 가입 계정이 처음 소셜 로그인을 할 때만 해당 프로바이더로 바뀝니다.

use std::sync::Arc;
use std::time::Instant;

use bcrypt::hash;
use uuid::Uuid;

use crate::config::LoginType;
use crate::domain::dto::users::request::AdditionalJoinInfoRequest;
use crate::domain::entities::users::Identity;
use crate::domain::models::oauth::NormalizedProviderIdentity;
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::users::AccountStore;
use crate::utils::string_utils::mask_email;

/// 닉네임 접두사로 사용할 이메일 앞부분 길이
const NICKNAME_PREFIX_LEN: usize = 4;
const NICKNAME_DIGITS_MODULUS: u128 = 10_000_000;
const NICKNAME_MAX_ATTEMPTS: usize = 10;

/// 계정 관리 서비스
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    bcrypt_cost: u32,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountStore>, bcrypt_cost: u32) -> Self {
        Self { accounts, bcrypt_cost }
    }

    /// 자체 가입 계정 생성
    ///
    /// 형식/중복 검증은 호출자가 먼저 수행해야 합니다.
    /// 비밀번호는 bcrypt 해시로만 저장됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 동시 가입 경쟁으로 유니크 제약 위반
    /// * `AppError::InternalError` - 해싱 실패
    pub async fn create_native_account(&self, email: &str, phone: &str, password: &str) -> AppResult<Identity> {
        let start_time = Instant::now();

        let password_hash = hash(password, self.bcrypt_cost)
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", start_time.elapsed());

        let nickname = self.generate_unique_nickname(email).await?;
        let identity = Identity::new_native(email.to_string(), password_hash, phone.to_string(), nickname);

        let created = self.accounts.save(identity).await?;
        log::info!("자체 가입 계정 생성: {} ({:?})", mask_email(email), start_time.elapsed());

        Ok(created)
    }

    /// 이메일/비밀번호 검증
    ///
    /// 계정이 없거나 비밀번호가 다르면 같은 에러를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Unauthenticated` - 잘못된 이메일/비밀번호, 소셜 전용 계정
    pub async fn verify_password(&self, email: &str, password: &str) -> AppResult<Identity> {
        let identity = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthenticated("잘못된 이메일 또는 비밀번호입니다".to_string()))?;

        let Some(password_hash) = identity.password_hash.as_deref() else {
            return Err(AppError::Unauthenticated(format!(
                "{} 로그인으로 가입된 계정입니다. 해당 프로바이더로 로그인해주세요",
                identity.login_type.display_name()
            )));
        };

        let verify_start = Instant::now();
        let is_valid = bcrypt::verify(password, password_hash)
            .context("비밀번호 검증 실패")?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            return Err(AppError::Unauthenticated("잘못된 이메일 또는 비밀번호입니다".to_string()));
        }

        Ok(identity)
    }

    /// 소셜 프로필로 계정을 찾거나 만듭니다.
    ///
    /// 생성 중 유니크 제약 충돌이 나면 다른 요청이 먼저 만든 것이므로
    /// 이메일로 다시 읽어 그 계정으로 진행합니다.
    pub async fn find_or_create_federated(&self, profile: NormalizedProviderIdentity) -> AppResult<Identity> {
        if let Some(existing) = self.accounts.find_by_email(&profile.email).await? {
            return self.link_provider(existing, profile.provider).await;
        }

        let email = profile.email.clone();
        let profile = self.drop_taken_phone(profile).await?;
        let nickname = self.generate_unique_nickname(&email).await?;

        match self.accounts.save(Identity::new_federated(profile, nickname)).await {
            Ok(created) => {
                log::info!("소셜 계정 생성: {} ({})", mask_email(&created.email), created.login_type);
                Ok(created)
            }
            Err(AppError::ConflictError(reason)) => {
                log::warn!("소셜 계정 동시 생성 감지, 재조회: {} - {}", mask_email(&email), reason);
                self.accounts
                    .find_by_email(&email)
                    .await?
                    .ok_or(AppError::ConflictError(reason))
            }
            Err(e) => Err(e),
        }
    }

    /// 자체 가입 계정이 처음 소셜 로그인을 하면 가입 경로를 해당 프로바이더로 바꿉니다.
    async fn link_provider(&self, mut existing: Identity, provider: LoginType) -> AppResult<Identity> {
        if existing.login_type != LoginType::Native || !provider.is_federated() {
            return Ok(existing);
        }

        log::info!(
            "자체 가입 계정 소셜 연결: {} ({} → {})",
            mask_email(&existing.email),
            existing.login_type,
            provider
        );
        existing.login_type = provider;
        self.accounts.save(existing).await
    }

    /// 다른 계정이 이미 쓰는 전화번호는 새 소셜 계정에 저장하지 않습니다.
    async fn drop_taken_phone(&self, mut profile: NormalizedProviderIdentity) -> AppResult<NormalizedProviderIdentity> {
        if let Some(phone) = profile.phone.as_deref() {
            if self.accounts.find_by_phone(phone).await?.is_some() {
                log::warn!("소셜 프로필 전화번호가 다른 계정에 등록되어 있어 생략: {}", mask_email(&profile.email));
                profile.phone = None;
            }
        }
        Ok(profile)
    }

    /// 로그인 시각 기록. 실패해도 로그인은 계속됩니다.
    pub async fn record_login(&self, mut identity: Identity) -> Identity {
        identity.touch_login();
        match self.accounts.save(identity.clone()).await {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("로그인 시각 기록 실패: {} - {}", mask_email(&identity.email), e);
                identity
            }
        }
    }

    /// 가입 후 추가 정보 입력
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 이메일에 해당하는 계정 없음
    pub async fn update_additional_info(&self, request: AdditionalJoinInfoRequest) -> AppResult<Identity> {
        let mut identity = self
            .accounts
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("가입되지 않은 이메일입니다".to_string()))?;

        identity.update_additional_info(
            request.name.trim().to_string(),
            request.birthday,
            request.gender,
            request.university_name,
        );

        self.accounts.save(identity).await
    }

    /// 이메일 앞 4자 + 7자리 숫자 형태의 닉네임을 만듭니다.
    pub async fn generate_unique_nickname(&self, email: &str) -> AppResult<String> {
        let local_part = email.split('@').next().unwrap_or(email);
        let prefix: String = local_part.chars().take(NICKNAME_PREFIX_LEN).collect();

        for _ in 0..NICKNAME_MAX_ATTEMPTS {
            let digits = Uuid::new_v4().as_u128() % NICKNAME_DIGITS_MODULUS;
            let candidate = format!("{}{:07}", prefix, digits);

            if !self.accounts.exists_by_nickname(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(AppError::InternalError(format!(
            "닉네임 생성 실패: {}회 시도 모두 중복",
            NICKNAME_MAX_ATTEMPTS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::repositories::users::MemoryAccountStore;

    const TEST_BCRYPT_COST: u32 = 4;

    fn service() -> (AccountService, Arc<MemoryAccountStore>) {
        let store = Arc::new(MemoryAccountStore::new());
        (AccountService::new(store.clone(), TEST_BCRYPT_COST), store)
    }

    fn profile(email: &str, provider: LoginType) -> NormalizedProviderIdentity {
        NormalizedProviderIdentity {
            email: email.to_string(),
            name: Some("홍길동".to_string()),
            birthday: None,
            phone: Some("01055556666".to_string()),
            provider,
        }
    }

    #[actix_web::test]
    async fn test_native_account_stores_only_hash() {
        let (service, store) = service();
        let created = service
            .create_native_account("hong@example.com", "01012345678", "Passw0rd!23")
            .await
            .unwrap();

        let stored = store.find_by_email("hong@example.com").await.unwrap().unwrap();
        let hash = stored.password_hash.unwrap();
        assert_ne!(hash, "Passw0rd!23");
        assert!(bcrypt::verify("Passw0rd!23", &hash).unwrap());
        assert_eq!(created.login_type, LoginType::Native);
        assert!(created.nickname.starts_with("hong"));
        assert_eq!(created.nickname.len(), 4 + 7);
    }

    #[actix_web::test]
    async fn test_verify_password() {
        let (service, _) = service();
        service
            .create_native_account("hong@example.com", "01012345678", "Passw0rd!23")
            .await
            .unwrap();

        assert!(service.verify_password("hong@example.com", "Passw0rd!23").await.is_ok());
        assert!(matches!(
            service.verify_password("hong@example.com", "Wrong!Pass99").await,
            Err(AppError::Unauthenticated(_))
        ));
        assert!(matches!(
            service.verify_password("nobody@example.com", "Passw0rd!23").await,
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[actix_web::test]
    async fn test_social_only_account_cannot_use_password() {
        let (service, _) = service();
        service
            .find_or_create_federated(profile("kim@kakao.com", LoginType::Kakao))
            .await
            .unwrap();

        assert!(matches!(
            service.verify_password("kim@kakao.com", "Passw0rd!23").await,
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[actix_web::test]
    async fn test_same_email_links_to_one_account() {
        let (service, store) = service();
        let first = service
            .find_or_create_federated(profile("same@mail.com", LoginType::Kakao))
            .await
            .unwrap();
        let second = service
            .find_or_create_federated(profile("same@mail.com", LoginType::Naver))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        // 소셜 가입 경로는 바뀌지 않음
        assert_eq!(second.login_type, LoginType::Kakao);
        assert_eq!(store.count().await, 1);
    }

    #[actix_web::test]
    async fn test_native_account_migrates_on_first_social_login() {
        let (service, _) = service();
        let native = service
            .create_native_account("hong@example.com", "01012345678", "Passw0rd!23")
            .await
            .unwrap();

        let linked = service
            .find_or_create_federated(profile("hong@example.com", LoginType::Google))
            .await
            .unwrap();

        assert_eq!(linked.id, native.id);
        assert_eq!(linked.login_type, LoginType::Google);
        // 비밀번호 로그인은 계속 가능
        assert!(service.verify_password("hong@example.com", "Passw0rd!23").await.is_ok());
    }

    #[actix_web::test]
    async fn test_taken_phone_is_dropped_from_new_social_account() {
        let (service, _) = service();
        service
            .create_native_account("owner@example.com", "01055556666", "Passw0rd!23")
            .await
            .unwrap();

        let created = service
            .find_or_create_federated(profile("other@kakao.com", LoginType::Kakao))
            .await
            .unwrap();

        assert_eq!(created.phone, None);
    }

    /// 첫 삽입 직전에 같은 이메일의 계정을 먼저 넣어 동시 생성 경쟁을 재현합니다.
    struct RacingAccountStore {
        inner: MemoryAccountStore,
        raced: AtomicBool,
    }

    #[async_trait]
    impl AccountStore for RacingAccountStore {
        async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
            self.inner.find_by_email(email).await
        }

        async fn find_by_phone(&self, phone: &str) -> AppResult<Option<Identity>> {
            self.inner.find_by_phone(phone).await
        }

        async fn save(&self, identity: Identity) -> AppResult<Identity> {
            if identity.id.is_none() && !self.raced.swap(true, Ordering::SeqCst) {
                let mut winner = identity.clone();
                winner.nickname = "winner0000000".to_string();
                winner.phone = None;
                self.inner.save(winner).await?;
            }
            self.inner.save(identity).await
        }

        async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool> {
            self.inner.exists_by_nickname(nickname).await
        }
    }

    #[actix_web::test]
    async fn test_create_conflict_recovers_by_reading_winner() {
        let store = Arc::new(RacingAccountStore {
            inner: MemoryAccountStore::new(),
            raced: AtomicBool::new(false),
        });
        let service = AccountService::new(store.clone(), TEST_BCRYPT_COST);

        let identity = service
            .find_or_create_federated(profile("race@naver.com", LoginType::Naver))
            .await
            .unwrap();

        assert_eq!(identity.nickname, "winner0000000");
        assert_eq!(store.inner.count().await, 1);
    }

    #[actix_web::test]
    async fn test_update_additional_info() {
        let (service, _) = service();
        service
            .create_native_account("hong@example.com", "01012345678", "Passw0rd!23")
            .await
            .unwrap();

        let updated = service
            .update_additional_info(AdditionalJoinInfoRequest {
                email: "hong@example.com".to_string(),
                name: " 홍길동 ".to_string(),
                birthday: Some("1995-03-21".to_string()),
                gender: None,
                university_name: Some("한국대학교".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(updated.name.as_deref(), Some("홍길동"));
        assert_eq!(updated.university_name.as_deref(), Some("한국대학교"));

        assert!(matches!(
            service
                .update_additional_info(AdditionalJoinInfoRequest {
                    email: "nobody@example.com".to_string(),
                    name: "x".to_string(),
                    birthday: None,
                    gender: None,
                    university_name: None,
                })
                .await,
            Err(AppError::NotFound(_))
        ));
    }
}
