//! # 인증 미들웨어
//!
//! JWT(HS256) 기반 로그인 세션을 처리합니다.
//!
//! 토큰은 두 곳에서 찾습니다:
//! 1. `Authorization: Bearer <token>` 헤더 (API 클라이언트, 테스트)
//! 2. `access_token` 쿠키 (브라우저 — 로그인 시 서버가 설정)
//!
//! ## 추출자(Extractor)
//! - `AuthUser`: 로그인 필수. 토큰이 없거나 잘못되면 401 JSON 응답으로 거부
//! - `Option<AuthUser>`: 로그인 선택. 토큰이 없거나 잘못되면 익명(None)으로 처리
//!
//! 토큰 서명이 맞아도 탈퇴한 사용자의 토큰이면 거부합니다(`unknown_user`).

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use cookie::{time, Cookie, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{db::users as db_users, routes::AppState};

/// 로그인 세션 쿠키 이름
pub const SESSION_COOKIE: &str = "access_token";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub name: String, // username (화면 표시용)
    pub exp: i64,
    pub iat: i64,
}

/// 요청을 보낸 로그인 사용자
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts)?;
        let claims = verify_access_token(&token, &state.jwt_secret)?;

        let exists = db_users::user_exists(&state.pool, &claims.sub)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to look up token owner");
                AuthError::Lookup
            })?;
        if !exists {
            return Err(AuthError::UnknownUser);
        }

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.name,
        })
    }
}

// `Option<AuthUser>`를 핸들러 인자로 쓸 수 있게 합니다.
// 공개 페이지에서는 만료된 토큰도 에러가 아니라 "로그인 안 함"으로 봅니다.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let user = <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .ok();
        Ok(user)
    }
}

/// 헤더 또는 쿠키에서 토큰 문자열을 꺼냅니다. Authorization 헤더가 우선입니다.
fn token_from_parts(parts: &Parts) -> Result<String, AuthError> {
    if let Some(value) = parts.headers.get(AUTHORIZATION) {
        let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;
        return value
            .strip_prefix("Bearer ")
            .map(str::to_string)
            .ok_or(AuthError::InvalidToken);
    }

    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    /// 서명은 맞지만 사용자가 더 이상 없음 (탈퇴)
    UnknownUser,
    /// 사용자 조회 중 DB 오류
    Lookup,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "missing_token",
                "Authorization token is required",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid authorization token",
            ),
            AuthError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "expired_token",
                "Authorization token has expired",
            ),
            AuthError::UnknownUser => (
                StatusCode::UNAUTHORIZED,
                "unknown_user",
                "The account for this token no longer exists",
            ),
            AuthError::Lookup => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

pub fn create_access_token(
    user_id: &str,
    username: &str,
    secret: &str,
    ttl_minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        name: username.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// 로그인 시 내려보낼 세션 쿠키
pub fn session_cookie(token: &str, ttl_minutes: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(ttl_minutes))
        .build()
}

/// 로그아웃/탈퇴 시 세션 쿠키를 지우는 쿠키
pub fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .expires(time::OffsetDateTime::UNIX_EPOCH)
        .build()
}
