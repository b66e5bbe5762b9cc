//! # 소개 페이지
//!
//! 내비게이션 바의 "About Me" 링크가 가리키는 정적 페이지입니다.

use axum::response::Html;

use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    views::{
        self,
        context::{AboutPage, Viewer},
    },
};

/// `GET /about_me/`
pub async fn about_me(actor: Option<AuthUser>) -> Result<Html<String>, AppError> {
    let page = AboutPage {
        page_title: "About Me - Blog".to_string(),
        viewer: Viewer::from_actor(actor.as_ref()),
        message: "글과 댓글로 생각을 나누는 작은 블로그입니다.".to_string(),
    };
    views::render("about.html", &page)
}
