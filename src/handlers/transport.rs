//! 토큰 전달용 헤더와 쿠키 처리
//!
//! 로그인/재발급 응답에 토큰을 헤더와 httpOnly 쿠키로 함께 실어 보내고,
//! 요청에서 토큰을 꺼내는 공통 함수들입니다.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{HttpRequest, HttpResponseBuilder};
use chrono::Utc;

use crate::config::{ACCESS_TOKEN_COOKIE, ACCESS_TOKEN_HEADER, REFRESH_TOKEN_COOKIE, REFRESH_TOKEN_HEADER};
use crate::domain::models::token::{IssuedToken, TokenPair};
use crate::errors::{AppError, AppResult};
use crate::services::auth::TokenService;

fn token_cookie(name: &'static str, issued: &IssuedToken) -> Cookie<'static> {
    let max_age = issued.remaining_seconds(Utc::now());

    Cookie::build(name, issued.token.clone())
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::seconds(max_age))
        .finish()
}

/// 액세스 토큰을 `Authorization` 헤더와 `accessToken` 쿠키로 붙입니다.
pub fn attach_access_token(builder: &mut HttpResponseBuilder, access: &IssuedToken) {
    builder
        .insert_header((ACCESS_TOKEN_HEADER, format!("Bearer {}", access.token)))
        .cookie(token_cookie(ACCESS_TOKEN_COOKIE, access));
}

/// 토큰 쌍 전체를 헤더와 쿠키로 붙입니다.
pub fn attach_token_pair(builder: &mut HttpResponseBuilder, tokens: &TokenPair) {
    attach_access_token(builder, &tokens.access);
    builder
        .insert_header((REFRESH_TOKEN_HEADER, tokens.refresh.token.clone()))
        .cookie(token_cookie(REFRESH_TOKEN_COOKIE, &tokens.refresh));
}

/// 로그아웃 응답에서 토큰 쿠키를 비웁니다.
pub fn expire_token_cookies(builder: &mut HttpResponseBuilder) {
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        let mut cookie = Cookie::build(name, "").path("/").http_only(true).finish();
        cookie.make_removal();
        builder.cookie(cookie);
    }
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// `Authorization: Bearer <token>` 에서 액세스 토큰을 꺼냅니다.
pub fn access_token_from(req: &HttpRequest) -> AppResult<String> {
    let header = header_value(req, ACCESS_TOKEN_HEADER)
        .ok_or_else(|| AppError::MissingCredentials("Authorization 헤더가 없습니다".to_string()))?;

    TokenService::extract_bearer_token(header).map(str::to_owned)
}

/// `Refresh-Token` 헤더의 리프레시 토큰 (쿠키는 보지 않음)
pub fn refresh_token_header(req: &HttpRequest) -> Option<String> {
    header_value(req, REFRESH_TOKEN_HEADER).map(str::to_owned)
}

/// 재발급용 리프레시 토큰: `Refresh-Token` 헤더 우선, 없으면 `refreshToken` 쿠키
pub fn refresh_token_from(req: &HttpRequest) -> Option<String> {
    refresh_token_header(req)
        .or_else(|| {
            req.cookie(REFRESH_TOKEN_COOKIE)
                .map(|c| c.value().trim().to_string())
                .filter(|value| !value.is_empty())
        })
}
