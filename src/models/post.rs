//! # 게시글 모델 정의
//!
//! ## 구조체 역할
//! - `Post`: 게시글 한 건 + 목록/상세 화면에 필요한 작성자 이름과 카테고리 정보
//! - `PostForm`: 작성/수정 폼에서 넘어오는 원본 입력 (`application/x-www-form-urlencoded`)
//! - `PostInput`: 검증을 통과한 입력. DB 계층은 이 타입만 받습니다.

use crate::error::AppError;
use crate::models::tag::{parse_tag_names, TAG_NAME_MAX_CHARS};
use serde::{Deserialize, Serialize};

/// 게시글 제목의 최대 길이 (문자 수 기준)
pub const POST_TITLE_MAX_CHARS: usize = 30;

/// 게시글 — `posts`에 `users`와 `categories`를 JOIN한 한 행입니다.
///
/// 카테고리가 없는 게시글(미분류)은 `category_*` 필드가 모두 None입니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    /// 마크다운 본문
    pub content: String,
    /// 대표 이미지 경로 (업로드 저장소는 다루지 않으므로 URL 문자열만 저장)
    pub head_image: Option<String>,
    /// 생성 시각 (ISO 8601, UTC)
    pub created_at: String,
    pub author_id: String,
    pub author_username: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
}

impl Post {
    /// 상세 페이지 URL (`/blog/{id}/`)
    pub fn absolute_url(&self) -> String {
        post_url(self.id)
    }

    /// 수정 페이지 URL (상세 URL + `update/`)
    pub fn update_url(&self) -> String {
        format!("{}update/", self.absolute_url())
    }
}

/// 게시글 ID로 상세 페이지 URL을 만듭니다.
pub fn post_url(id: i64) -> String {
    format!("/blog/{}/", id)
}

/// 작성/수정 폼 입력
///
/// HTML 폼은 빈 입력란도 빈 문자열로 보내므로,
/// 선택 항목(`head_image`, `category`, `tags`)은 빈 문자열을 "없음"으로 해석합니다.
#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub head_image: Option<String>,
    /// 카테고리 ID (빈 문자열 = 미분류)
    #[serde(default)]
    pub category: Option<String>,
    /// 태그 이름 목록 (`,` 또는 `;`로 구분)
    #[serde(default)]
    pub tags: Option<String>,
}

/// 검증된 게시글 입력
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub head_image: Option<String>,
    pub category_id: Option<i64>,
    pub tag_names: Vec<String>,
}

/// `Some("")`, `Some("  ")`를 None으로 정규화합니다.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl PostForm {
    /// 폼 입력을 검증하여 `PostInput`으로 변환합니다.
    ///
    /// # 에러 (`AppError::BadRequest`)
    /// - 제목 또는 본문이 비어 있음
    /// - 제목이 30자를 넘음
    /// - 카테고리 값이 정수가 아님
    /// - 태그 이름이 40자를 넘음
    ///
    /// 카테고리가 실제로 존재하는지는 DB 조회가 필요하므로 핸들러에서 확인합니다.
    pub fn validate(&self) -> Result<PostInput, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        if title.chars().count() > POST_TITLE_MAX_CHARS {
            return Err(AppError::BadRequest(format!(
                "Title must be at most {} characters",
                POST_TITLE_MAX_CHARS
            )));
        }
        if self.content.trim().is_empty() {
            return Err(AppError::BadRequest("Content is required".to_string()));
        }

        let category_id = non_blank(&self.category)
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid category: {}", raw)))
            })
            .transpose()?;

        let tag_names = parse_tag_names(self.tags.as_deref().unwrap_or(""));
        if let Some(long) = tag_names
            .iter()
            .find(|name| name.chars().count() > TAG_NAME_MAX_CHARS)
        {
            return Err(AppError::BadRequest(format!("Tag name is too long: {}", long)));
        }

        Ok(PostInput {
            title: title.to_string(),
            content: self.content.clone(),
            head_image: non_blank(&self.head_image).map(str::to_string),
            category_id,
            tag_names,
        })
    }
}
