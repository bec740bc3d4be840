use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::domain::entities::users::Identity;
use crate::errors::AppError;

/// 인증 미들웨어가 검증 후 요청 범위에 바인딩한 계정
///
/// 요청마다 새로 해석되며 요청이 끝나면 사라집니다. 핸들러는 인자로 받아 사용합니다.
///
/// ```rust,ignore
/// #[get("/mypage/profile")]
/// async fn profile(account: AuthenticatedAccount) -> HttpResponse {
///     HttpResponse::Ok().json(ProfileResponse::from(account.into_inner()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount(pub Identity);

impl AuthenticatedAccount {
    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn into_inner(self) -> Identity {
        self.0
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 미들웨어를 거치지 않은 라우트에서 사용하면 401을 반환합니다.
impl FromRequest for AuthenticatedAccount {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedAccount>() {
            Some(account) => ready(Ok(account.clone())),
            None => ready(Err(AppError::Unauthenticated(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}
