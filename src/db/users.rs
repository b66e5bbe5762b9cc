//! 사용자 조회/생성/삭제
//!
//! 이름과 이메일의 중복은 UNIQUE 제약이 최종 판단합니다. 동시에 같은 이름으로
//! 가입해도 한쪽은 500이 아니라 409 Conflict를 받습니다.

use crate::db::is_unique_violation;
use crate::error::AppError;
use crate::models::user::{Registration, User};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at";

/// UNIQUE 위반 메시지(`UNIQUE constraint failed: users.email`)에서 충돌한 항목을 고릅니다.
fn conflict_of(err: sqlx::Error) -> AppError {
    if !is_unique_violation(&err) {
        return AppError::Database(err);
    }
    let on_email = matches!(&err, sqlx::Error::Database(db_err) if db_err.message().contains("users.email"));
    if on_email {
        AppError::Conflict("Email already exists".to_string())
    } else {
        AppError::Conflict("Username already exists".to_string())
    }
}

pub async fn create_user(
    pool: &SqlitePool,
    id: &str,
    registration: &Registration<'_>,
    password_hash: &str,
) -> Result<User, AppError> {
    sqlx::query("INSERT INTO users (id, username, email, password_hash) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(registration.username)
        .bind(registration.email)
        .bind(password_hash)
        .execute(pool)
        .await
        .map_err(conflict_of)?;

    find_by_id(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// 토큰의 주인이 아직 남아 있는지 확인합니다.
pub async fn user_exists(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// 사용자를 삭제합니다. 작성한 게시글과 댓글은 외래키 CASCADE로 함께 삭제됩니다.
pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
