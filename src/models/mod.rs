//! # 데이터 모델 모듈
//!
//! 블로그에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 엔티티의 데이터 타입을 담당합니다:
//! - `category`: 카테고리와 사이드바용 게시글 수 집계
//! - `comment`: 댓글과 댓글 폼
//! - `post`: 게시글과 작성/수정 폼
//! - `tag`: 태그
//! - `user`: 사용자(User)와 인증 요청/응답
//!
//! `pub use X::*;`로 재공개하므로 `crate::models::Post`처럼 짧게 접근할 수 있습니다.

pub mod category;
pub mod comment;
pub mod post;
pub mod tag;
pub mod user;

pub use category::*;
pub use comment::*;
pub use post::*;
pub use tag::*;
pub use user::*;
