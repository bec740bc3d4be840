//! 인증 흐름 조율 서비스
//!
//! 가입, 자체 로그인, 소셜 로그인(앱/웹), 로그아웃, 액세스 토큰 재발급을
//! 검증기, 계정 서비스, 토큰 서비스, 세션 저장소, 프로바이더 레지스트리를 조합해 처리합니다.
//!
//! ## 세션 규칙
//!
//! ```text
//! 로그인 ──► 토큰 쌍 발급 ──► RT:<email> = refresh (TTL = refresh 남은 수명)
//!                              (이전 세션 덮어씀: 계정당 활성 세션 하나)
//!
//! 재발급 ──► refresh 서명/플랫폼 검증 ──► RT:<email> 와 일치? ──► 새 access
//!                                          (리프레시 토큰은 교체하지 않음)
//!
//! 로그아웃 ──► access 검증 ──► RT:<email> 삭제 ──► access = "logout" (TTL = access 남은 수명)
//! ```
//!
//! 세션 저장소 장애는 항상 `SessionStoreUnavailable`로 드러나며 인증 성공으로 처리되지 않습니다.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::config::{LoginType, Platform};
use crate::domain::dto::users::request::{AdditionalJoinInfoRequest, JoinRequest};
use crate::domain::entities::users::Identity;
use crate::domain::models::oauth::ProviderUserInfo;
use crate::domain::models::token::{IssuedToken, TokenPair};
use crate::errors::{AppError, AppResult, DuplicateField};
use crate::repositories::tokens::TokenRepository;
use crate::repositories::users::AccountStore;
use crate::services::auth::providers::{OAuthProvider, ProviderRegistry};
use crate::services::auth::{CredentialValidator, TokenService};
use crate::services::users::AccountService;
use crate::utils::string_utils::mask_email;

/// 로그인 결과: 계정과 새로 발급된 토큰 쌍
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub tokens: TokenPair,
}

pub struct AuthService {
    validator: CredentialValidator,
    account_service: AccountService,
    token_service: Arc<TokenService>,
    token_repo: TokenRepository,
    providers: ProviderRegistry,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        token_service: Arc<TokenService>,
        token_repo: TokenRepository,
        providers: ProviderRegistry,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            validator: CredentialValidator::new(accounts.clone()),
            account_service: AccountService::new(accounts, bcrypt_cost),
            token_service,
            token_repo,
            providers,
        }
    }

    /// 자체 가입
    ///
    /// 검증 순서: 이메일 형식 → 비밀번호 형식 → 전화번호 형식 → 비밀번호 확인 일치
    /// → 전화번호 중복 → 이메일 중복. 첫 번째 실패에서 중단합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 형식 오류 또는 비밀번호 확인 불일치
    /// * `AppError::DuplicateAccount` - 이미 가입된 전화번호/이메일 (기존 가입 경로 포함)
    pub async fn register(&self, request: &JoinRequest) -> AppResult<Identity> {
        let email = request.email.trim();
        let phone = request.phone.trim();

        CredentialValidator::validate_email(email)?;
        CredentialValidator::validate_password(&request.password)?;
        CredentialValidator::validate_phone(phone)?;

        if request.password != request.password_check {
            return Err(AppError::ValidationError("비밀번호가 일치하지 않습니다".to_string()));
        }

        self.validator
            .check_phone_duplicate(phone)
            .await?
            .ensure_absent(DuplicateField::Phone)?;
        self.validator
            .check_email_duplicate(email)
            .await?
            .ensure_absent(DuplicateField::Email)?;

        self.account_service
            .create_native_account(email, phone, &request.password)
            .await
    }

    /// 가입 후 추가 정보 입력
    pub async fn complete_profile(&self, request: AdditionalJoinInfoRequest) -> AppResult<Identity> {
        self.account_service.update_additional_info(request).await
    }

    /// 이메일 사용 가능 여부 확인
    pub async fn ensure_email_available(&self, email: &str) -> AppResult<()> {
        let email = email.trim();
        CredentialValidator::validate_email(email)?;
        self.validator
            .check_email_duplicate(email)
            .await?
            .ensure_absent(DuplicateField::Email)
    }

    /// 전화번호 사용 가능 여부 확인
    pub async fn ensure_phone_available(&self, phone: &str) -> AppResult<()> {
        let phone = phone.trim();
        CredentialValidator::validate_phone(phone)?;
        self.validator
            .check_phone_duplicate(phone)
            .await?
            .ensure_absent(DuplicateField::Phone)
    }

    /// 자체 로그인
    ///
    /// # Errors
    ///
    /// * `AppError::Unauthenticated` - 잘못된 이메일/비밀번호
    /// * `AppError::SessionStoreUnavailable` - 세션 레코드 저장 실패
    pub async fn login(&self, platform: Platform, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let identity = self.account_service.verify_password(email.trim(), password).await?;
        let identity = self.account_service.record_login(identity).await;

        self.establish_session(platform, identity).await
    }

    /// 앱 소셜 로그인: 앱이 프로바이더 SDK로 받은 액세스 토큰을 그대로 전달합니다.
    pub async fn app_federated_login(
        &self,
        platform: Platform,
        login_type: LoginType,
        provider_access_token: &str,
    ) -> AppResult<LoginOutcome> {
        if provider_access_token.trim().is_empty() {
            return Err(AppError::ValidationError("프로바이더 액세스 토큰이 없습니다".to_string()));
        }

        let adapter = self.providers.get(login_type)?;
        let info = adapter.request_user_info_for_app(provider_access_token.trim()).await?;

        self.finish_federated_login(platform, adapter.as_ref(), info).await
    }

    /// 웹 클라이언트용 인가 페이지 주소와 state 값을 만듭니다.
    pub fn authorization_url(&self, login_type: LoginType) -> AppResult<(String, String)> {
        let state = Uuid::new_v4().simple().to_string();
        let url = self.providers.get(login_type)?.authorization_url(&state)?;
        Ok((url, state))
    }

    /// 웹 소셜 로그인: 인가 코드를 서버에서 교환합니다.
    pub async fn web_federated_login(&self, platform: Platform, login_type: LoginType, code: &str) -> AppResult<LoginOutcome> {
        if code.trim().is_empty() {
            return Err(AppError::ValidationError("인가 코드가 없습니다".to_string()));
        }

        let adapter = self.providers.get(login_type)?;
        let provider_token = adapter.request_access_token(code.trim()).await?;
        let info = adapter.request_user_info(&provider_token).await?;

        self.finish_federated_login(platform, adapter.as_ref(), info).await
    }

    async fn finish_federated_login(
        &self,
        platform: Platform,
        adapter: &dyn OAuthProvider,
        info: ProviderUserInfo,
    ) -> AppResult<LoginOutcome> {
        let profile = adapter.normalize(info)?;
        log::info!("{} 로그인 프로필 수신: {}", adapter.provider_tag(), mask_email(&profile.email));

        let identity = self.account_service.find_or_create_federated(profile).await?;
        let identity = self.account_service.record_login(identity).await;

        self.establish_session(platform, identity).await
    }

    /// 토큰 쌍을 발급하고 세션 레코드를 덮어씁니다.
    async fn establish_session(&self, platform: Platform, identity: Identity) -> AppResult<LoginOutcome> {
        let tokens = self.token_service.issue(platform, &identity.email)?;
        let ttl = Duration::from_secs(tokens.refresh.remaining_seconds(Utc::now()) as u64);

        self.token_repo
            .store_session(&identity.email, &tokens.refresh.token, ttl)
            .await?;

        log::info!("로그인 성공: {} ({})", mask_email(&identity.email), platform);
        Ok(LoginOutcome { identity, tokens })
    }

    /// 로그아웃
    ///
    /// 세션 레코드를 지우고 액세스 토큰을 남은 수명 동안 폐기 목록에 올립니다.
    /// 리프레시 토큰이 함께 오면 같은 계정의 것이어야 합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Unauthenticated` - 액세스 토큰 검증 실패, 다른 계정의 리프레시 토큰
    /// * `AppError::SessionStoreUnavailable` - 세션 저장소 장애
    pub async fn logout(&self, access_token: &str, refresh_token: Option<&str>) -> AppResult<()> {
        let email = self
            .token_service
            .verify_access(access_token)
            .await
            .map_err(AppError::into_unauthenticated)?;

        if let Some(refresh_token) = refresh_token {
            let subject = self
                .token_service
                .subject_of(refresh_token)
                .map_err(AppError::into_unauthenticated)?;
            if subject != email {
                return Err(AppError::Unauthenticated(
                    "액세스 토큰과 리프레시 토큰의 계정이 다릅니다".to_string(),
                ));
            }
        }

        self.token_repo.delete_session(&email).await?;

        let remaining = self.token_service.remaining_lifetime(access_token)?;
        self.token_repo.revoke_access_token(access_token, remaining).await?;

        log::info!("로그아웃: {}", mask_email(&email));
        Ok(())
    }

    /// 액세스 토큰 재발급
    ///
    /// 제출된 리프레시 토큰이 현재 세션 레코드와 같아야 합니다. 다른 기기에서 다시 로그인해
    /// 세션이 덮어써졌거나 로그아웃으로 삭제되었다면 거부됩니다.
    /// 리프레시 토큰 자체는 교체하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Unauthenticated` - 서명/만료/플랫폼 불일치, 세션 없음 또는 불일치
    /// * `AppError::SessionStoreUnavailable` - 세션 저장소 장애
    pub async fn refresh(&self, platform: Platform, refresh_token: &str) -> AppResult<IssuedToken> {
        if !self.token_service.verify_refresh(refresh_token, platform) {
            return Err(AppError::Unauthenticated("리프레시 토큰이 유효하지 않습니다".to_string()));
        }

        let email = self
            .token_service
            .subject_of(refresh_token)
            .map_err(AppError::into_unauthenticated)?;

        match self.token_repo.find_session(&email).await? {
            Some(current) if current == refresh_token => {}
            Some(_) => {
                log::warn!("다른 세션으로 대체된 리프레시 토큰 사용: {}", mask_email(&email));
                return Err(AppError::Unauthenticated("다른 기기에서 다시 로그인했습니다".to_string()));
            }
            None => {
                return Err(AppError::Unauthenticated("세션이 만료되었거나 로그아웃되었습니다".to_string()));
            }
        }

        let access = self
            .token_service
            .rotate(refresh_token)
            .map_err(AppError::into_unauthenticated)?;

        log::debug!("액세스 토큰 재발급: {} ({})", mask_email(&email), platform);
        Ok(access)
    }
}
