//! # 카테고리 라우트 핸들러
//!
//! - `POST /blog/category/` → 카테고리 생성 후 해당 카테고리 목록으로 이동 (로그인 필요)

use axum::{extract::State, response::Redirect, Form};

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{redirect_to, AppState},
};

pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Form(form): Form<CreateCategoryForm>,
) -> Result<Redirect, AppError> {
    let category = db::create_category(&state.pool, &form.name, &form.description).await?;
    tracing::info!(category = %category.name, slug = %category.slug, by = %user.username, "category created");

    Ok(redirect_to(&category.absolute_url()))
}
