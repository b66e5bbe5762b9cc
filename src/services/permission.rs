//! # 권한 검사
//!
//! 이 블로그의 권한 규칙은 하나뿐입니다: **리소스의 작성자 본인만 수정/삭제할 수 있다.**
//! 댓글 수정과 댓글 삭제가 똑같은 검사를 사용합니다.

use crate::error::AppError;
use crate::middleware::auth::AuthUser;

/// 로그인한 사용자가 `author_id`의 리소스를 수정할 수 있는가
///
/// 익명 사용자(`None`)는 항상 false입니다.
pub fn can_modify(actor: Option<&AuthUser>, author_id: &str) -> bool {
    actor.is_some_and(|user| user.user_id == author_id)
}

/// `can_modify`가 false면 `AppError::PermissionDenied`를 반환합니다.
///
/// 조용히 무시하지 않고 에러로 요청을 중단시킵니다 (HTTP 403).
/// `action`은 에러 메시지에 들어갈 동작 설명입니다 (예: "edit this comment").
pub fn ensure_can_modify(
    actor: Option<&AuthUser>,
    author_id: &str,
    action: &str,
) -> Result<(), AppError> {
    if can_modify(actor, author_id) {
        return Ok(());
    }

    let who = actor.map_or("anonymous", |user| user.username.as_str());
    Err(AppError::PermissionDenied(format!(
        "{} is not allowed to {}",
        who, action
    )))
}
