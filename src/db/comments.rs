//! # 댓글 데이터베이스 쿼리 모듈
//!
//! 댓글의 상태 변화: 없음 → 생성 → (수정)* → 삭제.
//! 삭제된 댓글의 ID로 다시 조회하면 None이 되어 핸들러에서 404가 됩니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

const COMMENT_SELECT: &str = r#"
    SELECT cm.id, cm.post_id, cm.text, cm.author_id, u.username AS author_username,
           cm.created_at, cm.modified_at
    FROM comments cm
    JOIN users u ON u.id = cm.author_id
"#;

/// 게시글의 댓글을 작성순(오래된 것 먼저)으로 조회합니다.
pub async fn list_post_comments(pool: &SqlitePool, post_id: i64) -> Result<Vec<Comment>, AppError> {
    let comments = sqlx::query_as::<_, Comment>(&format!(
        "{} WHERE cm.post_id = ? ORDER BY cm.created_at, cm.id",
        COMMENT_SELECT
    ))
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

pub async fn get_comment(pool: &SqlitePool, id: i64) -> Result<Option<Comment>, AppError> {
    let comment = sqlx::query_as::<_, Comment>(&format!("{} WHERE cm.id = ?", COMMENT_SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(comment)
}

/// 댓글을 생성합니다. 생성 시각과 수정 시각은 DB 기본값(현재 시각)으로 같게 설정됩니다.
pub async fn create_comment(
    pool: &SqlitePool,
    post_id: i64,
    author_id: &str,
    text: &str,
) -> Result<Comment, AppError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO comments (post_id, text, author_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(post_id)
    .bind(text)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    get_comment(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created comment".to_string()))
}

/// 댓글 본문을 수정합니다. `modified_at`만 갱신하고 `created_at`은 그대로 둡니다.
pub async fn update_comment_text(
    pool: &SqlitePool,
    id: i64,
    text: &str,
) -> Result<Option<Comment>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET text = ?, modified_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(text)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_comment(pool, id).await
}

pub async fn delete_comment(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
pub async fn count_post_comments(pool: &SqlitePool, post_id: i64) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
