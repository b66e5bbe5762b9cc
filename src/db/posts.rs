//! # 게시글 데이터베이스 쿼리 모듈
//!
//! 게시글 목록은 네 가지 방식으로 조회됩니다: 전체, 카테고리별, 태그별, 검색.
//! 이 네 가지를 각각의 SQL로 따로 쓰지 않고, **필터 조건 트리(`PostFilter`)** 하나로
//! 표현한 뒤 `sqlx::QueryBuilder`로 WHERE 절을 조립합니다.
//!
//! ```text
//! 검색 "hungry" = Or(TitleContains("hungry"), ContentContains("hungry"))
//!   → WHERE (p.title LIKE ? ESCAPE '\' OR p.content LIKE ? ESCAPE '\')
//! ```
//!
//! 정렬 순서도 암묵적인 기본값이 아니라 모든 조회 함수의 인자(`PostOrder`)로 받습니다.

use crate::error::AppError;
use crate::models::*;
use crate::services::pagination::{Page, PageWindow};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// 게시글 + 작성자 이름 + 카테고리 정보를 한 번에 가져오는 SELECT 절
///
/// 카테고리는 없을 수 있으므로 `LEFT JOIN`입니다.
const POST_SELECT: &str = r#"
    SELECT p.id, p.title, p.content, p.head_image, p.created_at,
           p.author_id, u.username AS author_username,
           p.category_id, c.name AS category_name, c.slug AS category_slug
    FROM posts p
    JOIN users u ON u.id = p.author_id
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// 게시글 목록 필터 — WHERE 절로 변환되는 조건 트리
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    /// 조건 없음 (전체 게시글)
    All,
    /// 제목에 부분 문자열 포함
    TitleContains(String),
    /// 본문에 부분 문자열 포함
    ContentContains(String),
    /// 카테고리가 일치 (`None` = 미분류)
    CategoryIs(Option<i64>),
    /// 해당 태그가 붙어 있음
    HasTag(i64),
    /// 두 조건 중 하나라도 만족
    Or(Box<PostFilter>, Box<PostFilter>),
}

impl PostFilter {
    /// 제목 또는 본문에 `term`이 포함된 게시글
    pub fn search(term: &str) -> Self {
        Self::TitleContains(term.to_string()).or(Self::ContentContains(term.to_string()))
    }

    pub fn or(self, other: PostFilter) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// 조건을 SQL로 이어 붙입니다. 값은 모두 `push_bind`로 바인딩합니다.
    fn push_sql(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            PostFilter::All => {
                qb.push("1 = 1");
            }
            PostFilter::TitleContains(term) => {
                qb.push("p.title LIKE ");
                qb.push_bind(like_pattern(term));
                qb.push(r" ESCAPE '\'");
            }
            PostFilter::ContentContains(term) => {
                qb.push("p.content LIKE ");
                qb.push_bind(like_pattern(term));
                qb.push(r" ESCAPE '\'");
            }
            PostFilter::CategoryIs(None) => {
                qb.push("p.category_id IS NULL");
            }
            PostFilter::CategoryIs(Some(id)) => {
                qb.push("p.category_id = ");
                qb.push_bind(*id);
            }
            PostFilter::HasTag(tag_id) => {
                qb.push("EXISTS (SELECT 1 FROM post_tags pt WHERE pt.post_id = p.id AND pt.tag_id = ");
                qb.push_bind(*tag_id);
                qb.push(")");
            }
            PostFilter::Or(left, right) => {
                qb.push("(");
                left.push_sql(qb);
                qb.push(" OR ");
                right.push_sql(qb);
                qb.push(")");
            }
        }
    }
}

/// `%term%` LIKE 패턴을 만듭니다. 검색어 안의 `%`, `_`, `\`는 글자 그대로 찾도록 이스케이프합니다.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// 게시글 정렬 순서
///
/// 같은 밀리초에 생성된 게시글도 순서가 흔들리지 않도록 id를 보조 정렬 키로 씁니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {
    NewestFirst,
}

impl PostOrder {
    fn sql(self) -> &'static str {
        match self {
            PostOrder::NewestFirst => "p.created_at DESC, p.id DESC",
        }
    }
}

/// 필터에 맞는 게시글 수
pub async fn count_posts(pool: &SqlitePool, filter: &PostFilter) -> Result<i64, AppError> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM posts p WHERE ");
    filter.push_sql(&mut qb);

    let count: i64 = qb.build_query_scalar().fetch_one(pool).await?;
    Ok(count)
}

/// 필터에 맞는 게시글을 정렬하여 `limit`개까지 조회합니다.
pub async fn list_posts(
    pool: &SqlitePool,
    filter: &PostFilter,
    order: PostOrder,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, AppError> {
    let mut qb = QueryBuilder::<Sqlite>::new(POST_SELECT);
    qb.push(" WHERE ");
    filter.push_sql(&mut qb);
    qb.push(" ORDER BY ");
    qb.push(order.sql());
    qb.push(" LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);

    let posts = qb.build_query_as::<Post>().fetch_all(pool).await?;
    Ok(posts)
}

/// 필터에 맞는 게시글 중 요청한 페이지 하나를 조회합니다.
///
/// 1. 전체 개수를 세고
/// 2. 요청 페이지 번호를 유효 범위로 보정한 뒤 (`PageWindow`)
/// 3. 해당 범위만 `LIMIT/OFFSET`으로 가져옵니다.
pub async fn list_post_page(
    pool: &SqlitePool,
    filter: &PostFilter,
    order: PostOrder,
    requested_page: i64,
    page_size: i64,
) -> Result<Page<Post>, AppError> {
    let total = count_posts(pool, filter).await?;
    let window = PageWindow::new(requested_page, total, page_size);
    let items = list_posts(pool, filter, order, window.limit, window.offset).await?;

    Ok(Page { items, window })
}

pub async fn get_post(pool: &SqlitePool, id: i64) -> Result<Option<Post>, AppError> {
    let mut qb = QueryBuilder::<Sqlite>::new(POST_SELECT);
    qb.push(" WHERE p.id = ");
    qb.push_bind(id);

    let post = qb.build_query_as::<Post>().fetch_optional(pool).await?;
    Ok(post)
}

/// 새 게시글을 만들고 태그를 연결합니다.
///
/// 게시글 INSERT, 태그 get-or-create, 태그 연결을 하나의 트랜잭션으로 묶어
/// 중간에 실패하면 아무것도 남지 않게 합니다.
pub async fn create_post(
    pool: &SqlitePool,
    author_id: &str,
    input: &PostInput,
) -> Result<Post, AppError> {
    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO posts (title, content, head_image, author_id, category_id)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(&input.head_image)
    .bind(author_id)
    .bind(input.category_id)
    .fetch_one(&mut *tx)
    .await?;

    attach_tags(&mut tx, id, &input.tag_names).await?;
    tx.commit().await?;

    get_post(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created post".to_string()))
}

/// 게시글 내용을 수정하고 태그 집합을 교체합니다.
///
/// 작성자와 생성 시각은 바꾸지 않습니다.
///
/// ## 반환값
/// - `Ok(Some(Post))`: 수정 성공
/// - `Ok(None)`: 해당 ID의 게시글이 없음
pub async fn update_post(
    pool: &SqlitePool,
    id: i64,
    input: &PostInput,
) -> Result<Option<Post>, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE posts
        SET title = ?, content = ?, head_image = ?, category_id = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(&input.head_image)
    .bind(input.category_id)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        // 트랜잭션은 drop될 때 자동으로 롤백됩니다.
        return Ok(None);
    }

    attach_tags(&mut tx, id, &input.tag_names).await?;
    tx.commit().await?;

    get_post(pool, id).await
}

async fn attach_tags(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    post_id: i64,
    tag_names: &[String],
) -> Result<(), AppError> {
    let mut tags = Vec::with_capacity(tag_names.len());
    for name in tag_names {
        tags.push(crate::db::get_or_create_tag(&mut **tx, name).await?);
    }
    crate::db::set_post_tags(&mut **tx, post_id, &tags).await
}
