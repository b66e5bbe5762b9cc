//! # 게시글 작성/수정 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET  /blog/create/`      → 작성 폼 (로그인 필요)
//! - `POST /blog/create/`      → 작성 처리 (로그인 필요)
//! - `GET  /blog/{id}/update/` → 수정 폼
//! - `POST /blog/{id}/update/` → 수정 처리
//!
//! 로그인하지 않은 사용자가 작성 화면에 오면 에러 대신 목록으로 돌려보냅니다.
//!
//! 수정은 작성자 확인을 하지 않습니다. 누구든 수정할 수 있으며,
//! 작성자가 아닌 사람이 수정하면 경고 로그만 남깁니다.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{load_sidebar, redirect_to, AppState},
    services::permission::can_modify,
    views::{
        self,
        context::{PostFormPage, PostFormValues, Viewer},
    },
};

/// 선택한 카테고리가 실제로 있는지 확인합니다.
async fn ensure_category_exists(state: &AppState, input: &PostInput) -> Result<(), AppError> {
    if let Some(id) = input.category_id {
        db::get_category(&state.pool, id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("Unknown category: {}", id)))?;
    }
    Ok(())
}

async fn render_form(
    state: &AppState,
    actor: Option<&AuthUser>,
    heading: &str,
    action: String,
    values: PostFormValues,
    selected_category: Option<i64>,
) -> Result<Html<String>, AppError> {
    let categories = db::list_categories(&state.pool).await?;
    let page = PostFormPage {
        page_title: format!("{} - Blog", heading),
        heading: heading.to_string(),
        action,
        viewer: Viewer::from_actor(actor),
        sidebar: load_sidebar(&state.pool).await?,
        values,
        categories: PostFormPage::category_options(categories, selected_category),
    };
    views::render("post_form.html", &page)
}

/// `GET /blog/create/`
pub async fn create_form(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
) -> Result<Response, AppError> {
    let Some(user) = actor else {
        return Ok(Redirect::to("/blog/").into_response());
    };

    let html = render_form(
        &state,
        Some(&user),
        "Create New Post",
        "/blog/create/".to_string(),
        PostFormValues::default(),
        None,
    )
    .await?;
    Ok(html.into_response())
}

/// `POST /blog/create/` — 작성자는 현재 로그인한 사용자입니다.
pub async fn create_submit(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    let Some(user) = actor else {
        return Ok(Redirect::to("/blog/"));
    };

    let input = form.validate()?;
    ensure_category_exists(&state, &input).await?;

    let post = db::create_post(&state.pool, &user.user_id, &input).await?;
    tracing::info!(post_id = post.id, author = %user.username, "post created");

    Ok(redirect_to(&post.absolute_url()))
}

/// `GET /blog/{id}/update/` — 기존 값이 채워진 폼
pub async fn update_form(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let post = db::get_post(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let tags = db::get_post_tags(&state.pool, id).await?;

    render_form(
        &state,
        actor.as_ref(),
        "Edit Post",
        post.update_url(),
        PostFormValues::from_post(&post, &tags),
        post.category_id,
    )
    .await
}

/// `POST /blog/{id}/update/` — 제목/본문/대표 이미지/카테고리/태그를 교체합니다.
///
/// 작성자와 작성 시각은 그대로 유지됩니다.
pub async fn update_submit(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
    Path(id): Path<i64>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    let existing = db::get_post(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let input = form.validate()?;
    ensure_category_exists(&state, &input).await?;

    if !can_modify(actor.as_ref(), &existing.author_id) {
        tracing::warn!(
            post_id = id,
            author = %existing.author_username,
            editor = actor.as_ref().map_or("anonymous", |u| u.username.as_str()),
            "post updated by someone other than its author"
        );
    }

    let post = db::update_post(&state.pool, id, &input)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(post_id = post.id, "post updated");

    Ok(redirect_to(&post.absolute_url()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::db;
    use crate::test_support::*;

    #[tokio::test]
    async fn anonymous_visitors_are_sent_back_to_the_list() {
        let pool = test_pool().await;
        let app = test_app(&pool);

        let res = get(&app, "/blog/create/", None).await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location(), "/blog/");

        let res = post_form(&app, "/blog/create/", None, &[("title", "t"), ("content", "c")]).await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location(), "/blog/");
        assert_eq!(db::count_posts(&pool, &db::PostFilter::All).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn deleted_account_token_counts_as_anonymous() {
        let pool = test_pool().await;
        let app = test_app(&pool);
        let benny = insert_user(&pool, "benny").await;
        assert!(db::users::delete_user(&pool, &benny.id).await.unwrap());

        let res = post_form(&app, "/blog/create/", Some(&benny), &[("title", "t"), ("content", "c")]).await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location(), "/blog/");
        assert_eq!(db::count_posts(&pool, &db::PostFilter::All).await.unwrap(), 0);

        let page = get(&app, "/blog/", Some(&benny)).await.html();
        assert!(!element_by_id(&page, "navbar").unwrap().contains("benny"));
    }

    #[tokio::test]
    async fn logged_in_user_creates_a_post_with_category_and_tags() {
        let pool = test_pool().await;
        let app = test_app(&pool);
        let smith = insert_user(&pool, "smith").await;
        let politics = db::create_category(&pool, "정치/사회", "").await.unwrap();

        let form = get(&app, "/blog/create/", Some(&smith)).await;
        assert_eq!(form.status, StatusCode::OK);
        assert!(form.html().contains("Create New Post"));
        assert!(form.html().contains("정치/사회"));

        let category = politics.id.to_string();
        let res = post_form(
            &app,
            "/blog/create/",
            Some(&smith),
            &[
                ("title", "Post Form 만들기"),
                ("content", "Post Form 페이지를 만듭시다."),
                ("category", category.as_str()),
                ("tags", "america; 한국어"),
            ],
        )
        .await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);

        let posts = db::list_posts(&pool, &db::PostFilter::All, db::PostOrder::NewestFirst, 10, 0)
            .await
            .unwrap();
        assert_eq!(posts.len(), 1);
        let post = &posts[0];
        assert_eq!(res.location(), format!("/blog/{}/", post.id));
        assert_eq!(post.title, "Post Form 만들기");
        assert_eq!(post.author_username, "smith");
        assert_eq!(post.category_id, Some(politics.id));

        let tags: Vec<String> = db::get_post_tags(&pool, post.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert!(tags.contains(&"america".to_string()));
        assert!(tags.contains(&"한국어".to_string()));
    }

    #[tokio::test]
    async fn invalid_submissions_are_rejected() {
        let pool = test_pool().await;
        let app = test_app(&pool);
        let smith = insert_user(&pool, "smith").await;

        let res = post_form(&app, "/blog/create/", Some(&smith), &[("title", ""), ("content", "c")]).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);

        let res = post_form(
            &app,
            "/blog/create/",
            Some(&smith),
            &[("title", "t"), ("content", "c"), ("category", "42")],
        )
        .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(db::count_posts(&pool, &db::PostFilter::All).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_form_has_no_metadata_and_keeps_author() {
        let pool = test_pool().await;
        let app = test_app(&pool);
        let smith = insert_user(&pool, "smith").await;
        let post = insert_post(&pool, &smith, "Original", None).await;
        let url = format!("/blog/{}/update/", post.id);

        let form = get(&app, &url, Some(&smith)).await;
        assert_eq!(form.status, StatusCode::OK);
        let html = form.html();
        let main = element_by_id(&html, "main-div").unwrap();
        assert!(main.contains("Edit Post"));
        assert!(main.contains(r#"value="Original""#));
        assert!(!main.contains("Created"));
        assert!(!main.contains("Author"));

        let res = post_form(
            &app,
            &url,
            Some(&smith),
            &[("title", "Revised"), ("content", "new body"), ("tags", "rust")],
        )
        .await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location(), format!("/blog/{}/", post.id));

        let updated = db::get_post(&pool, post.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "Revised");
        assert_eq!(updated.content, "new body");
        assert_eq!(updated.author_id, smith.id);
        assert_eq!(updated.created_at, post.created_at);
    }

    #[tokio::test]
    async fn update_is_not_restricted_to_the_author() {
        let pool = test_pool().await;
        let app = test_app(&pool);
        let smith = insert_user(&pool, "smith").await;
        let benny = insert_user(&pool, "benny").await;
        let post = insert_post(&pool, &smith, "Original", None).await;
        let url = format!("/blog/{}/update/", post.id);

        let res = post_form(&app, &url, Some(&benny), &[("title", "by benny"), ("content", "x")]).await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);

        let res = post_form(&app, &url, None, &[("title", "by nobody"), ("content", "y")]).await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);

        let updated = db::get_post(&pool, post.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "by nobody");
        assert_eq!(updated.author_id, smith.id);
    }

    #[tokio::test]
    async fn updating_a_missing_post_is_not_found() {
        let pool = test_pool().await;
        let app = test_app(&pool);

        assert_eq!(get(&app, "/blog/7/update/", None).await.status, StatusCode::NOT_FOUND);
        let res = post_form(&app, "/blog/7/update/", None, &[("title", "t"), ("content", "c")]).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }
}
