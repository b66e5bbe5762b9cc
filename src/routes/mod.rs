//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 URL 라우팅 테이블입니다.
//! 화면(HTML) 핸들러는 뷰 모델을 만들어 `views::render`에 넘기고,
//! 쓰기 요청은 처리 후 결과 페이지로 리다이렉트합니다.
//!
//! 각 하위 모듈:
//! - `about`: 소개 페이지
//! - `auth`: 회원가입, 로그인, 로그아웃, 내 정보 (JSON)
//! - `categories`: 카테고리 생성
//! - `comments`: 댓글 작성/수정/삭제
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `post_edit`: 게시글 작성/수정 폼
//! - `posts`: 게시글 목록(전체, 검색, 카테고리, 태그)과 상세

pub mod about;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod health;
pub mod post_edit;
pub mod posts;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;

use crate::{db, error::AppError, services::slug::encode_url_path, views::context::Sidebar};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc이므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// JWT 토큰 서명용 비밀키
    pub jwt_secret: String,
    /// 로그인 토큰(과 쿠키)의 유효 시간
    pub token_ttl_minutes: i64,
}

/// URL 라우팅 테이블
///
/// 경로 파라미터는 axum 0.8 문법(`{id}`)을 씁니다. 같은 위치의 고정 경로
/// (`/blog/create/`, `/blog/category/`)는 `{id}`보다 먼저 매칭됩니다.
pub fn router(state: AppState) -> Router {
    let blog_routes = Router::new()
        .route("/blog/", get(posts::post_list))
        .route("/blog/search/{term}/", get(posts::post_search))
        .route("/blog/category/", post(categories::create_category))
        .route("/blog/category/{slug}/", get(posts::posts_by_category))
        .route("/blog/tag/{slug}/", get(posts::posts_by_tag))
        .route(
            "/blog/create/",
            get(post_edit::create_form).post(post_edit::create_submit),
        )
        .route("/blog/{id}/", get(posts::post_detail))
        .route(
            "/blog/{id}/update/",
            get(post_edit::update_form).post(post_edit::update_submit),
        )
        .route("/blog/{id}/new_comment/", post(comments::new_comment))
        .route(
            "/blog/edit_comment/{id}/",
            get(comments::edit_comment_form).post(comments::edit_comment_submit),
        )
        .route("/blog/delete_comment/{id}", get(comments::delete_comment));

    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me).delete(auth::delete_me));

    Router::new()
        .route("/", get(|| async { Redirect::permanent("/blog/") }))
        .route("/blog", get(|| async { Redirect::permanent("/blog/") }))
        .route("/about_me/", get(about::about_me))
        .route("/health", get(health::health_check))
        .merge(blog_routes)
        .merge(auth_routes)
        .with_state(state)
}

/// 모든 블로그 화면 옆에 붙는 카테고리 카드 데이터를 읽습니다.
pub(crate) async fn load_sidebar(pool: &SqlitePool) -> Result<Sidebar, AppError> {
    let counts = db::list_categories_with_counts(pool).await?;
    let uncategorized = db::count_uncategorized_posts(pool).await?;
    Ok(Sidebar::new(counts, uncategorized))
}

/// 쓰기 요청 후 결과 페이지로 보내는 303 리다이렉트
///
/// 한글 slug가 들어간 경로도 `Location` 헤더에 넣을 수 있게 인코딩합니다.
pub(crate) fn redirect_to(path: &str) -> Redirect {
    Redirect::to(&encode_url_path(path))
}
