//! # 인증 라우트 핸들러 (JSON)
//!
//! ## 엔드포인트
//! - `POST   /auth/register` → 회원가입, 토큰 발급
//! - `POST   /auth/login`    → 로그인, 토큰 발급
//! - `POST   /auth/logout`   → 세션 쿠키 삭제
//! - `GET    /auth/me`       → 내 정보
//! - `DELETE /auth/me`       → 회원 탈퇴 (작성한 게시글과 댓글도 함께 삭제)
//!
//! 발급한 토큰은 JSON 응답 본문과 `access_token` 쿠키 양쪽으로 내려보냅니다.
//! 브라우저는 쿠키로, API 클라이언트는 `Authorization: Bearer` 헤더로 씁니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    db::users as db_users,
    error::AppError,
    middleware::auth::{cleared_session_cookie, create_access_token, session_cookie, AuthUser},
    models::user::*,
    routes::AppState,
};

/// 토큰을 발급하고 응답 본문과 쿠키를 함께 만듭니다.
fn issue_session(state: &AppState, user: User) -> Result<impl IntoResponse, AppError> {
    let access_token = create_access_token(
        &user.id,
        &user.username,
        &state.jwt_secret,
        state.token_ttl_minutes,
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;
    let cookie = session_cookie(&access_token, state.token_ttl_minutes);

    Ok((
        [(SET_COOKIE, cookie.to_string())],
        Json(AuthResponse {
            user: user.into(),
            access_token,
        }),
    ))
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let registration = req.validate()?;

    // Argon2id, 사용자마다 새 salt
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(registration.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    let user_id = uuid::Uuid::now_v7().to_string();
    // 이름/이메일 중복은 UNIQUE 제약이 409 Conflict로 돌려줍니다.
    let user = db_users::create_user(&state.pool, &user_id, &registration, &password_hash).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "user registered");

    issue_session(&state, user)
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = db_users::find_by_username(&state.pool, req.username.trim())
        .await?
        .ok_or(AppError::Unauthorized("Invalid username or password".to_string()))?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("Invalid username or password".to_string()))?;

    tracing::info!(user_id = %user.id, "user logged in");
    issue_session(&state, user)
}

/// 토큰은 서버에 저장하지 않으므로 쿠키만 지웁니다.
pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, cleared_session_cookie().to_string())],
        Json(json!({ "message": "Logged out successfully" })),
    )
}

pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = db_users::find_by_id(&state.pool, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user.into()))
}

/// 회원 탈퇴 — 사용자의 게시글과 댓글은 FK CASCADE로 함께 삭제됩니다.
pub async fn delete_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if !db_users::delete_user(&state.pool, &auth_user.user_id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(user_id = %auth_user.user_id, "user deleted");

    Ok((
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, cleared_session_cookie().to_string())],
    ))
}
