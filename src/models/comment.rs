//! # 댓글 모델 정의
//!
//! 댓글은 게시글 하나에 속하며, 게시글이 삭제되면 함께 삭제됩니다(CASCADE).
//! 수정과 삭제는 작성자 본인만 할 수 있습니다 (`services::permission`).

use crate::error::AppError;
use crate::models::post::post_url;
use serde::{Deserialize, Serialize};

/// 댓글 — `comments`에 작성자 이름을 JOIN한 한 행입니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    /// 마크다운 본문
    pub text: String,
    pub author_id: String,
    pub author_username: String,
    pub created_at: String,
    /// 마지막 수정 시각. 생성 직후에는 created_at과 같습니다.
    pub modified_at: String,
}

impl Comment {
    /// 게시글 상세 페이지 안의 댓글 앵커 (`/blog/{post_id}/#comment-id-{id}`)
    pub fn absolute_url(&self) -> String {
        format!("{}#comment-id-{}", post_url(self.post_id), self.id)
    }

    pub fn edit_url(&self) -> String {
        format!("/blog/edit_comment/{}/", self.id)
    }

    pub fn delete_url(&self) -> String {
        format!("/blog/delete_comment/{}", self.id)
    }
}

/// 댓글 작성/수정 폼 — 입력란은 `text` 하나뿐입니다.
#[derive(Debug, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    /// 공백뿐인 댓글은 거부합니다. 통과하면 원문 그대로 돌려줍니다.
    pub fn validated_text(&self) -> Result<&str, AppError> {
        if self.text.trim().is_empty() {
            return Err(AppError::BadRequest("Comment text cannot be empty".to_string()));
        }
        Ok(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_urls() {
        let comment = Comment {
            id: 7,
            post_id: 3,
            text: "a comment".to_string(),
            author_id: "u1".to_string(),
            author_username: "benny".to_string(),
            created_at: String::new(),
            modified_at: String::new(),
        };
        assert_eq!(comment.absolute_url(), "/blog/3/#comment-id-7");
        assert_eq!(comment.edit_url(), "/blog/edit_comment/7/");
        assert_eq!(comment.delete_url(), "/blog/delete_comment/7");
    }

    #[test]
    fn empty_comment_is_rejected() {
        let blank = CommentForm {
            text: " \n ".to_string(),
        };
        assert!(matches!(blank.validated_text(), Err(AppError::BadRequest(_))));

        let ok = CommentForm {
            text: "hello".to_string(),
        };
        assert_eq!(ok.validated_text().unwrap(), "hello");
    }
}
