//! # 화면 렌더링
//!
//! 서버 사이드 HTML 렌더링을 담당합니다. 템플릿은 바이너리에 포함되어 있고
//! (`include_str!`), 핸들러는 `context`의 뷰 모델 구조체를 만들어 `render`에 넘깁니다.
//!
//! 템플릿 환경은 불변이므로 전역 `LazyLock` 하나를 공유합니다.
//! 에러 응답(`AppError::into_response`)도 상태 없이 에러 페이지를 그릴 수 있습니다.

pub mod context;

use std::sync::LazyLock;

use axum::{http::StatusCode, response::Html};
use chrono::DateTime;
use minijinja::{default_auto_escape_callback, Environment};
use serde::Serialize;

use crate::error::AppError;
use context::ErrorPage;

static TEMPLATES: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_auto_escape_callback(default_auto_escape_callback);
    env.set_loader(embedded_template_loader);
    env
});

fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let source = match name {
        "base.html" => Some(include_str!("templates/base.html")),
        "sidebar.html" => Some(include_str!("templates/sidebar.html")),
        "post_list.html" => Some(include_str!("templates/post_list.html")),
        "post_detail.html" => Some(include_str!("templates/post_detail.html")),
        "post_form.html" => Some(include_str!("templates/post_form.html")),
        "comment_form.html" => Some(include_str!("templates/comment_form.html")),
        "error.html" => Some(include_str!("templates/error.html")),
        "about.html" => Some(include_str!("templates/about.html")),
        _ => None,
    };

    Ok(source.map(str::to_string))
}

/// 뷰 모델을 템플릿에 넣어 HTML 응답을 만듭니다.
pub fn render<S: Serialize>(template: &str, context: &S) -> Result<Html<String>, AppError> {
    let html = TEMPLATES.get_template(template)?.render(context)?;
    Ok(Html(html))
}

pub fn render_error_page(status: StatusCode, message: &str) -> Result<String, minijinja::Error> {
    let page = ErrorPage {
        page_title: format!("{} - Blog", status.as_u16()),
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Error").to_string(),
        message: message.to_string(),
    };
    TEMPLATES.get_template("error.html")?.render(&page)
}

/// DB에 저장된 ISO 8601 타임스탬프를 화면용 `YYYY-MM-DD HH:MM`으로 바꿉니다.
/// 해석할 수 없는 값은 그대로 보여줍니다.
pub fn display_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
