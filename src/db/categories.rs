//! # 카테고리 데이터베이스 쿼리 모듈
//!
//! ## 테이블 구조
//! - `categories`: 카테고리 엔티티 (id, name, description, slug)
//! - `posts.category_id`: 게시글 → 카테고리 (NULL = 미분류, 카테고리 삭제 시 SET NULL)

use crate::db::is_unique_violation;
use crate::error::AppError;
use crate::models::*;
use crate::services::slug::slugify;
use sqlx::SqlitePool;

/// 사이드바 카드용: 모든 카테고리와 각 카테고리의 게시글 수를 이름순으로 조회합니다.
///
/// `LEFT JOIN`을 쓰는 이유: 게시글이 하나도 없는 카테고리도 `(0)`으로 보여야 하기 때문입니다.
/// `COUNT(p.id)`는 NULL을 세지 않으므로 JOIN되지 않은 카테고리는 0이 됩니다.
pub async fn list_categories_with_counts(
    pool: &SqlitePool,
) -> Result<Vec<CategoryCount>, AppError> {
    let categories = sqlx::query_as::<_, CategoryCount>(
        r#"
        SELECT c.id, c.name, c.slug, COUNT(p.id) AS post_count
        FROM categories c
        LEFT JOIN posts p ON p.category_id = c.id
        GROUP BY c.id, c.name, c.slug
        ORDER BY c.name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// 카테고리가 없는(미분류) 게시글 수
pub async fn count_uncategorized_posts(pool: &SqlitePool) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE category_id IS NULL")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// 게시글 폼의 카테고리 선택 목록용: 모든 카테고리를 이름순으로 조회합니다.
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, AppError> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, slug FROM categories ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> Result<Option<Category>, AppError> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, slug FROM categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

pub async fn find_category_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<Category>, AppError> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, slug FROM categories WHERE slug = ?",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// 새 카테고리를 생성합니다. slug는 이름에서 만듭니다.
///
/// ## 에러
/// - 이름이 비었거나 25자를 넘거나, slug로 쓸 글자가 하나도 없으면 `BadRequest`
/// - 같은 이름 또는 같은 slug가 이미 있으면 `Conflict`
pub async fn create_category(
    pool: &SqlitePool,
    name: &str,
    description: &str,
) -> Result<Category, AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > CATEGORY_NAME_MAX_CHARS {
        return Err(AppError::BadRequest(format!(
            "Category name must be 1 to {} characters",
            CATEGORY_NAME_MAX_CHARS
        )));
    }
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Category name has no usable characters: {}",
            name
        )));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO categories (name, description, slug) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(description.trim())
    .bind(&slug)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict(format!("Category already exists: {}", name))
        } else {
            AppError::Database(e)
        }
    })?;

    get_category(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created category".to_string()))
}

/// 카테고리를 삭제합니다. 소속 게시글은 남고 미분류가 됩니다 (ON DELETE SET NULL).
#[cfg(test)]
pub async fn delete_category(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
