//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `categories`: 카테고리 조회/생성과 사이드바용 게시글 수 집계
//! - `comments`: 댓글 CRUD
//! - `posts`: 게시글 조회(필터 조합 + 정렬 + 페이지)와 작성/수정
//! - `tags`: 태그 조회, get-or-create, 게시글-태그 연결
//! - `users`: 사용자 조회/생성

pub mod categories;
pub mod comments;
pub mod posts;
pub mod tags;
pub mod users;

pub use categories::*;
pub use comments::*;
pub use posts::*;
pub use tags::*;

/// UNIQUE 제약 위반인지 확인합니다.
///
/// 이름 중복 같은 "사용자 입력 문제"를 500이 아닌 409 Conflict로
/// 돌려주기 위해 사용합니다.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
