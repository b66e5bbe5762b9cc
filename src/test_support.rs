//! 테스트 공용 도우미: 메모리 DB, 사용자/게시글 픽스처, 라우터 호출.

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

use crate::{
    db,
    middleware::auth::create_access_token,
    models::{Post, PostInput, Registration, User},
    routes::{self, AppState},
    services::slug::encode_url_path,
};

pub const TEST_SECRET: &str = "test-jwt-secret";

/// 마이그레이션이 적용된 빈 메모리 DB
///
/// `sqlite::memory:`는 연결마다 별개의 DB이므로 연결을 하나로 고정하고,
/// 유휴 연결이 닫혀 데이터가 사라지지 않도록 timeout을 끕니다.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

pub fn test_state(pool: SqlitePool) -> AppState {
    AppState {
        pool,
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_minutes: 60,
    }
}

pub fn test_app(pool: &SqlitePool) -> Router {
    routes::router(test_state(pool.clone()))
}

/// 비밀번호 해시 검증이 필요 없는 테스트용 사용자
pub async fn insert_user(pool: &SqlitePool, username: &str) -> User {
    let id = uuid::Uuid::now_v7().to_string();
    let registration = Registration {
        username,
        email: None,
        password: "not-a-real-password",
    };
    db::users::create_user(pool, &id, &registration, "not-a-real-hash")
        .await
        .expect("create user")
}

pub async fn insert_post(
    pool: &SqlitePool,
    author: &User,
    title: &str,
    category_id: Option<i64>,
) -> Post {
    let input = PostInput {
        title: title.to_string(),
        content: format!("{} content", title),
        head_image: None,
        category_id,
        tag_names: Vec::new(),
    };
    db::create_post(pool, &author.id, &input)
        .await
        .expect("create post")
}

pub fn bearer(user: &User) -> String {
    let token = create_access_token(&user.id, &user.username, TEST_SECRET, 60).expect("token");
    format!("Bearer {}", token)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// 템플릿 자동 이스케이프가 `/`를 `&#x2f;`로 바꾸므로 되돌린 본문
    pub fn html(&self) -> String {
        self.body.replace("&#x2f;", "/")
    }

    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    }
}

pub async fn get(app: &Router, uri: &str, user: Option<&User>) -> TestResponse {
    let mut builder = Request::builder().method("GET").uri(encode_url_path(uri));
    if let Some(user) = user {
        builder = builder.header(header::AUTHORIZATION, bearer(user));
    }
    send(app, builder.body(Body::empty()).expect("request")).await
}

/// `application/x-www-form-urlencoded` POST
pub async fn post_form(
    app: &Router,
    uri: &str,
    user: Option<&User>,
    fields: &[(&str, &str)],
) -> TestResponse {
    let body = serde_urlencoded::to_string(fields).expect("form body");
    let mut builder = Request::builder()
        .method("POST")
        .uri(encode_url_path(uri))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(user) = user {
        builder = builder.header(header::AUTHORIZATION, bearer(user));
    }
    send(app, builder.body(Body::from(body)).expect("request")).await
}

/// HTML에서 `id="..."` 요소부터 같은 깊이의 닫는 태그까지를 대략 잘라냅니다.
///
/// 템플릿이 만드는 `<div id=...>` 구조만 다루면 되므로 div 중첩만 셉니다.
pub fn element_by_id<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    let marker = format!("id=\"{}\"", id);
    let attr = html.find(&marker)?;
    let start = html[..attr].rfind('<')?;
    let mut depth = 0usize;
    let mut cursor = start;
    while cursor < html.len() {
        let rest = &html[cursor..];
        if rest.starts_with("<div") {
            depth += 1;
        } else if rest.starts_with("</div") {
            depth -= 1;
            if depth == 0 {
                let end = cursor + rest.find('>')? + 1;
                return Some(&html[start..end]);
            }
        }
        cursor += rest.chars().next()?.len_utf8();
    }
    None
}
