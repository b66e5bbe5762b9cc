//! # 게시글 조회 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET /blog/`                  → 전체 게시글 목록
//! - `GET /blog/search/{term}/`    → 제목 또는 본문에 검색어가 포함된 게시글
//! - `GET /blog/category/{slug}/`  → 카테고리별 목록 (`_none` = 미분류)
//! - `GET /blog/tag/{slug}/`       → 태그별 목록
//! - `GET /blog/{id}/`             → 게시글 상세 + 댓글
//!
//! 네 가지 목록은 모두 `PostFilter` 하나만 다르고, 나머지(최신순 정렬,
//! 5개씩 페이지 나누기, 사이드바, 렌더링)는 `render_post_list`가 공통으로 처리합니다.

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::Html,
};

use crate::{
    db::{self, PostFilter, PostOrder},
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{load_sidebar, AppState},
    services::{
        pagination::{PageQuery, PAGE_SIZE},
        permission::can_modify,
    },
    views::{
        self,
        context::{CommentView, Pagination, PostCard, PostDetailPage, PostListPage, PostView, Viewer},
    },
};

/// 목록 페이지 하나를 그리는 데 필요한 것
struct ListDefinition {
    filter: PostFilter,
    page_title: String,
    list_title: String,
}

/// 필터에 맞는 게시글을 최신순으로 한 페이지 조회해 목록 화면을 그립니다.
///
/// `uri`의 경로는 Older/Newer 링크(`{path}?page=N`)를 만드는 데 씁니다.
async fn render_post_list(
    state: &AppState,
    actor: Option<&AuthUser>,
    uri: &Uri,
    query: &PageQuery,
    list: ListDefinition,
) -> Result<Html<String>, AppError> {
    let page = db::list_post_page(
        &state.pool,
        &list.filter,
        PostOrder::NewestFirst,
        query.number(),
        PAGE_SIZE,
    )
    .await?;

    let ids: Vec<i64> = page.items.iter().map(|post| post.id).collect();
    let tags = db::get_tags_for_posts(&state.pool, &ids).await?;

    let view = PostListPage {
        page_title: list.page_title,
        list_title: list.list_title,
        viewer: Viewer::from_actor(actor),
        sidebar: load_sidebar(&state.pool).await?,
        posts: PostCard::from_posts(&page.items, &tags),
        pagination: Pagination::for_window(uri.path(), &page.window),
    };
    views::render("post_list.html", &view)
}

/// `GET /blog/`
pub async fn post_list(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
    uri: Uri,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let list = ListDefinition {
        filter: PostFilter::All,
        page_title: "Blog".to_string(),
        list_title: "Blog".to_string(),
    };
    render_post_list(&state, actor.as_ref(), &uri, &query, list).await
}

/// `GET /blog/search/{term}/` — 제목 OR 본문 부분 문자열 검색
pub async fn post_search(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
    uri: Uri,
    Path(term): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let list = ListDefinition {
        filter: PostFilter::search(&term),
        page_title: "Blog".to_string(),
        list_title: format!("Search: \"{}\"", term),
    };
    render_post_list(&state, actor.as_ref(), &uri, &query, list).await
}

/// `GET /blog/category/{slug}/`
///
/// `_none`은 미분류 게시글입니다. 없는 slug는 404입니다.
pub async fn posts_by_category(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
    uri: Uri,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let list = if slug == UNCATEGORIZED_SLUG {
        ListDefinition {
            filter: PostFilter::CategoryIs(None),
            page_title: "Blog".to_string(),
            list_title: UNCATEGORIZED_LABEL.to_string(),
        }
    } else {
        let category = db::find_category_by_slug(&state.pool, &slug)
            .await?
            .ok_or(AppError::NotFound)?;
        ListDefinition {
            filter: PostFilter::CategoryIs(Some(category.id)),
            page_title: format!("Blog - {}", category.name),
            list_title: category.name,
        }
    };
    render_post_list(&state, actor.as_ref(), &uri, &query, list).await
}

/// `GET /blog/tag/{slug}/` — 없는 slug는 404입니다.
pub async fn posts_by_tag(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
    uri: Uri,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let tag = db::find_tag_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::NotFound)?;

    let list = ListDefinition {
        filter: PostFilter::HasTag(tag.id),
        page_title: "Blog".to_string(),
        list_title: format!("#{}", tag.name),
    };
    render_post_list(&state, actor.as_ref(), &uri, &query, list).await
}

/// `GET /blog/{id}/` — 게시글 본문과 댓글 목록
///
/// EDIT 버튼은 게시글 작성자에게만, 댓글의 edit/delete 버튼은
/// 그 댓글의 작성자에게만 보입니다.
pub async fn post_detail(
    State(state): State<AppState>,
    actor: Option<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let post = db::get_post(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let tags = db::get_post_tags(&state.pool, id).await?;
    let comments = db::list_post_comments(&state.pool, id).await?;

    let view = PostDetailPage {
        page_title: format!("{} - Blog", post.title),
        viewer: Viewer::from_actor(actor.as_ref()),
        sidebar: load_sidebar(&state.pool).await?,
        can_edit_post: can_modify(actor.as_ref(), &post.author_id),
        comments: comments
            .iter()
            .map(|comment| CommentView::from_comment(comment, actor.as_ref()))
            .collect(),
        comment_action: format!("{}new_comment/", post.absolute_url()),
        post: PostView::from_post(&post, &tags),
    };
    views::render("post_detail.html", &view)
}
