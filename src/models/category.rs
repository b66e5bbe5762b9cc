//! # 카테고리 모델 정의
//!
//! 게시글은 카테고리를 하나 가지거나 아예 가지지 않을 수 있습니다(미분류).
//! 미분류 게시글은 URL에서 특수한 slug `_none`으로 표현합니다.

use serde::{Deserialize, Serialize};

/// 미분류 게시글을 가리키는 카테고리 slug
///
/// slug 생성 규칙(`services::slug::slugify`)은 `_`를 `-`로 바꾸므로
/// 실제 카테고리의 slug가 이 값과 겹치는 일은 없습니다.
pub const UNCATEGORIZED_SLUG: &str = "_none";

/// 미분류 게시글을 화면에 표시할 때의 이름
pub const UNCATEGORIZED_LABEL: &str = "미분류";

/// 카테고리 이름의 최대 길이 (문자 수 기준)
pub const CATEGORY_NAME_MAX_CHARS: usize = 25;

/// 카테고리 엔티티 — DB의 `categories` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    /// 카테고리 이름 (UNIQUE, 예: "정치/사회")
    pub name: String,
    /// 설명 (비어 있을 수 있음)
    pub description: String,
    /// URL용 식별자 (UNIQUE, 예: "정치사회")
    pub slug: String,
}

impl Category {
    /// 이 카테고리로 필터링된 게시글 목록의 URL
    pub fn absolute_url(&self) -> String {
        category_url(&self.slug)
    }
}

/// slug로 카테고리 목록 URL을 만듭니다. 미분류는 `category_url(UNCATEGORIZED_SLUG)`.
pub fn category_url(slug: &str) -> String {
    format!("/blog/category/{}/", slug)
}

/// 사이드바의 카테고리 카드에 표시할 "이름 (게시글 수)" 한 줄
///
/// `categories LEFT JOIN posts`를 GROUP BY 한 결과를 매핑합니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryCount {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub post_count: i64,
}

/// 카테고리 생성 폼 — `POST /blog/category/`의 본문
#[derive(Debug, Deserialize)]
pub struct CreateCategoryForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
