//! # 댓글 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /blog/{id}/new_comment/`     → 댓글 작성 (로그인 필요)
//! - `GET  /blog/edit_comment/{id}/`    → 댓글 수정 폼 (작성자만)
//! - `POST /blog/edit_comment/{id}/`    → 댓글 수정 (작성자만)
//! - `GET  /blog/delete_comment/{id}`   → 댓글 삭제 (작성자만)
//!
//! 수정/삭제 권한이 없으면 `AppError::PermissionDenied`(403)로 거부합니다.

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{redirect_to, AppState},
    services::permission::ensure_can_modify,
    views::{
        self,
        context::{CommentFormPage, Viewer},
    },
};

async fn find_comment(state: &AppState, id: i64) -> Result<Comment, AppError> {
    db::get_comment(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)
}

/// `POST /blog/{id}/new_comment/` — 작성 후 새 댓글 위치로 이동합니다.
pub async fn new_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, AppError> {
    let post = db::get_post(&state.pool, post_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let text = form.validated_text()?;

    let comment = db::create_comment(&state.pool, post.id, &user.user_id, text).await?;
    tracing::info!(comment_id = comment.id, post_id = post.id, author = %user.username, "comment created");

    Ok(redirect_to(&comment.absolute_url()))
}

/// `GET /blog/edit_comment/{id}/`
pub async fn edit_comment_form(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let comment = find_comment(&state, id).await?;
    ensure_can_modify(actor.as_ref(), &comment.author_id, "edit this comment")?;

    let page = CommentFormPage {
        page_title: "Edit Comment - Blog".to_string(),
        viewer: Viewer::from_actor(actor.as_ref()),
        action: comment.edit_url(),
        post_url: post_url(comment.post_id),
        text: comment.text,
    };
    views::render("comment_form.html", &page)
}

/// `POST /blog/edit_comment/{id}/` — 본문과 수정 시각만 바뀝니다.
pub async fn edit_comment_submit(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, AppError> {
    let comment = find_comment(&state, id).await?;
    ensure_can_modify(actor.as_ref(), &comment.author_id, "edit this comment")?;
    let text = form.validated_text()?;

    let updated = db::update_comment_text(&state.pool, id, text)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(comment_id = id, "comment updated");

    Ok(redirect_to(&updated.absolute_url()))
}

/// `GET /blog/delete_comment/{id}` — 삭제 후 게시글의 댓글 목록으로 이동합니다.
pub async fn delete_comment(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let comment = find_comment(&state, id).await?;
    ensure_can_modify(actor.as_ref(), &comment.author_id, "delete this comment")?;

    if !db::delete_comment(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(comment_id = id, post_id = comment.post_id, "comment deleted");

    Ok(redirect_to(&format!("{}#comment-list", post_url(comment.post_id))))
}
