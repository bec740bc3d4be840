//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::config::ACCESS_TOKEN_HEADER;
use crate::domain::models::auth::AuthenticatedAccount;
use crate::errors::AppError;
use crate::services::auth::AccountResolver;
use crate::utils::string_utils::mask_email;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let resolver = req.app_data::<web::Data<AccountResolver>>().cloned();
            let authorization = req
                .headers()
                .get(ACCESS_TOKEN_HEADER)
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            let result = match resolver {
                Some(resolver) => resolver.resolve(authorization.as_deref()).await,
                None => Err(AppError::InternalError("AccountResolver가 등록되지 않았습니다".to_string())),
            };

            match result {
                Ok(identity) => {
                    log::debug!("인증 성공: {}", mask_email(&identity.email));
                    req.extensions_mut().insert(AuthenticatedAccount(identity));
                }
                Err(err) => {
                    log::warn!("인증 실패: {} {} - {}", req.method(), req.path(), err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
