//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 조회와 게시글-태그 관계를 관리하는 SQL 쿼리 함수들입니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, name, slug)
//! - `post_tags`: 게시글과 태그의 다대다(N:M) 관계 테이블
//!
//! 태그 연결은 게시글 작성/수정 트랜잭션 안에서 실행되므로
//! 쓰기 함수는 `&SqlitePool` 대신 `&mut SqliteConnection`을 받습니다.
//! (`&mut *tx`로 트랜잭션을 넘길 수 있습니다.)

use std::collections::HashMap;

use crate::error::AppError;
use crate::models::*;
use crate::services::slug::slugify;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

pub async fn find_tag_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Tag>, AppError> {
    let tag = sqlx::query_as::<_, Tag>("SELECT id, name, slug FROM tags WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(tag)
}

/// 이름으로 태그를 찾고, 없으면 새로 만듭니다.
///
/// 이름이 다르지만 slug가 같은 태그(예: "Bad Guy"와 "bad guy")는
/// 같은 태그로 취급하여 기존 태그를 돌려줍니다.
pub async fn get_or_create_tag(conn: &mut SqliteConnection, name: &str) -> Result<Tag, AppError> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Tag name has no usable characters: {}",
            name
        )));
    }

    let existing = sqlx::query_as::<_, Tag>(
        "SELECT id, name, slug FROM tags WHERE name = ? OR slug = ?",
    )
    .bind(name)
    .bind(&slug)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(tag) = existing {
        return Ok(tag);
    }

    let tag = sqlx::query_as::<_, Tag>(
        "INSERT INTO tags (name, slug) VALUES (?, ?) RETURNING id, name, slug",
    )
    .bind(name)
    .bind(&slug)
    .fetch_one(&mut *conn)
    .await?;

    tracing::info!("Created tag {:?} ({})", tag.name, tag.slug);
    Ok(tag)
}

/// 게시글의 태그 집합을 `tags`로 교체합니다.
///
/// 기존 연결을 모두 지운 뒤 새로 연결합니다.
/// `INSERT OR IGNORE`: 같은 태그가 두 번 들어와도 복합 PK 충돌 없이 무시됩니다.
pub async fn set_post_tags(
    conn: &mut SqliteConnection,
    post_id: i64,
    tags: &[Tag],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    for tag in tags {
        sqlx::query("INSERT OR IGNORE INTO post_tags (post_id, tag_id) VALUES (?, ?)")
            .bind(post_id)
            .bind(tag.id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// 특정 게시글에 연결된 태그를 이름순으로 조회합니다.
///
/// ```sql
/// tags ←── post_tags ──→ posts
///  (1)       (N:M)        (1)
/// ```
pub async fn get_post_tags(pool: &SqlitePool, post_id: i64) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name, t.slug
        FROM tags t
        JOIN post_tags pt ON pt.tag_id = t.id
        WHERE pt.post_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// 목록 페이지용: 여러 게시글의 태그를 한 번의 쿼리로 가져와 게시글 ID별로 묶습니다.
///
/// 게시글마다 `get_post_tags`를 부르면 N+1 쿼리가 되므로
/// `WHERE pt.post_id IN (...)`으로 한 번에 조회합니다.
pub async fn get_tags_for_posts(
    pool: &SqlitePool,
    post_ids: &[i64],
) -> Result<HashMap<i64, Vec<Tag>>, AppError> {
    let mut by_post: HashMap<i64, Vec<Tag>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(by_post);
    }

    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT pt.post_id, t.id, t.name, t.slug \
         FROM tags t JOIN post_tags pt ON pt.tag_id = t.id \
         WHERE pt.post_id IN (",
    );
    let mut separated = qb.separated(", ");
    for id in post_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY t.name");

    let rows: Vec<(i64, i64, String, String)> = qb.build_query_as().fetch_all(pool).await?;
    for (post_id, id, name, slug) in rows {
        by_post
            .entry(post_id)
            .or_default()
            .push(Tag { id, name, slug });
    }

    Ok(by_post)
}
