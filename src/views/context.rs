//! # 뷰 모델
//!
//! 템플릿 하나가 그리는 데이터를 정확히 담는 `Serialize` 구조체들입니다.
//! DB 모델을 템플릿에 그대로 넘기지 않고, URL 계산이나 권한 판단처럼
//! 화면에 필요한 값은 여기서 미리 계산해 둡니다.

use std::collections::HashMap;

use serde::Serialize;

use crate::middleware::auth::AuthUser;
use crate::models::*;
use crate::services::{
    markdown::{excerpt, render_markdown, EXCERPT_CHARS},
    pagination::PageWindow,
    permission::can_modify,
};
use crate::views::display_time;

/// 로그인한 방문자
#[derive(Debug, Clone, Serialize)]
pub struct Viewer {
    pub username: String,
}

impl Viewer {
    pub fn from_actor(actor: Option<&AuthUser>) -> Option<Self> {
        actor.map(|user| Viewer {
            username: user.username.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryLink {
    pub name: String,
    pub url: String,
    pub count: i64,
}

/// 사이드바 카테고리 카드: 모든 카테고리와 미분류 게시글 수
#[derive(Debug, Clone, Serialize)]
pub struct Sidebar {
    pub categories: Vec<CategoryLink>,
    pub uncategorized: CategoryLink,
}

impl Sidebar {
    pub fn new(counts: Vec<CategoryCount>, uncategorized_count: i64) -> Self {
        let categories = counts
            .into_iter()
            .map(|c| CategoryLink {
                url: category_url(&c.slug),
                name: c.name,
                count: c.post_count,
            })
            .collect();

        Self {
            categories,
            uncategorized: CategoryLink {
                name: UNCATEGORIZED_LABEL.to_string(),
                url: category_url(UNCATEGORIZED_SLUG),
                count: uncategorized_count,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkView {
    pub name: String,
    pub url: String,
}

fn category_badge(post: &Post) -> LinkView {
    match (&post.category_name, &post.category_slug) {
        (Some(name), Some(slug)) => LinkView {
            name: name.clone(),
            url: category_url(slug),
        },
        _ => LinkView {
            name: UNCATEGORIZED_LABEL.to_string(),
            url: category_url(UNCATEGORIZED_SLUG),
        },
    }
}

fn tag_links(tags: &[Tag]) -> Vec<LinkView> {
    tags.iter()
        .map(|tag| LinkView {
            name: tag.name.clone(),
            url: tag.absolute_url(),
        })
        .collect()
}

/// 목록 페이지의 게시글 카드 하나
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub excerpt: String,
    pub head_image: Option<String>,
    pub author: String,
    pub created: String,
    pub category: LinkView,
    pub tags: Vec<LinkView>,
}

impl PostCard {
    pub fn from_post(post: &Post, tags: &[Tag]) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            url: post.absolute_url(),
            excerpt: excerpt(&post.content, EXCERPT_CHARS),
            head_image: post.head_image.clone(),
            author: post.author_username.clone(),
            created: display_time(&post.created_at),
            category: category_badge(post),
            tags: tag_links(tags),
        }
    }

    /// 게시글마다 태그 목록을 찾아 카드를 만듭니다. 태그가 없으면 빈 목록입니다.
    pub fn from_posts(posts: &[Post], tags: &HashMap<i64, Vec<Tag>>) -> Vec<Self> {
        posts
            .iter()
            .map(|post| {
                let post_tags = tags.get(&post.id).map(Vec::as_slice).unwrap_or(&[]);
                Self::from_post(post, post_tags)
            })
            .collect()
    }
}

/// Older/Newer 이동 링크. 해당 방향에 페이지가 없으면 None입니다.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub older_url: Option<String>,
    pub newer_url: Option<String>,
}

impl Pagination {
    /// 페이지가 하나뿐이면 None (이동 버튼을 그리지 않음)
    pub fn for_window(path: &str, window: &PageWindow) -> Option<Self> {
        if !window.is_paginated() {
            return None;
        }

        let link = |number: i64| format!("{}?page={}", path, number);
        Some(Self {
            older_url: window.has_older().then(|| link(window.number + 1)),
            newer_url: window.has_newer().then(|| link(window.number - 1)),
        })
    }
}

/// 목록 페이지 (전체, 카테고리, 태그, 검색)
#[derive(Debug, Serialize)]
pub struct PostListPage {
    pub page_title: String,
    pub list_title: String,
    pub viewer: Option<Viewer>,
    pub sidebar: Sidebar,
    pub posts: Vec<PostCard>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub update_url: String,
    pub author: String,
    pub created: String,
    pub head_image: Option<String>,
    pub content_html: String,
    pub category: LinkView,
    pub tags: Vec<LinkView>,
}

impl PostView {
    pub fn from_post(post: &Post, tags: &[Tag]) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            url: post.absolute_url(),
            update_url: post.update_url(),
            author: post.author_username.clone(),
            created: display_time(&post.created_at),
            head_image: post.head_image.clone(),
            content_html: render_markdown(&post.content),
            category: category_badge(post),
            tags: tag_links(tags),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub author: String,
    pub created: String,
    /// 수정된 적이 있을 때만 수정 시각
    pub modified: Option<String>,
    pub text_html: String,
    pub edit_url: String,
    pub delete_url: String,
    /// 보는 사람이 이 댓글의 작성자인가 (수정/삭제 버튼 표시)
    pub can_modify: bool,
}

impl CommentView {
    pub fn from_comment(comment: &Comment, actor: Option<&AuthUser>) -> Self {
        Self {
            id: comment.id,
            author: comment.author_username.clone(),
            created: display_time(&comment.created_at),
            modified: (comment.modified_at != comment.created_at)
                .then(|| display_time(&comment.modified_at)),
            text_html: render_markdown(&comment.text),
            edit_url: comment.edit_url(),
            delete_url: comment.delete_url(),
            can_modify: can_modify(actor, &comment.author_id),
        }
    }
}

/// 게시글 상세 페이지
#[derive(Debug, Serialize)]
pub struct PostDetailPage {
    pub page_title: String,
    pub viewer: Option<Viewer>,
    pub sidebar: Sidebar,
    pub post: PostView,
    /// 보는 사람이 게시글 작성자인가 (EDIT 버튼 표시)
    pub can_edit_post: bool,
    pub comments: Vec<CommentView>,
    pub comment_action: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

/// 작성/수정 폼에 미리 채워 넣을 값
#[derive(Debug, Default, Serialize)]
pub struct PostFormValues {
    pub title: String,
    pub content: String,
    pub head_image: String,
    pub tags: String,
}

impl PostFormValues {
    pub fn from_post(post: &Post, tags: &[Tag]) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            head_image: post.head_image.clone().unwrap_or_default(),
            tags: tags
                .iter()
                .map(|tag| tag.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// 게시글 작성/수정 폼 페이지
#[derive(Debug, Serialize)]
pub struct PostFormPage {
    pub page_title: String,
    pub heading: String,
    pub action: String,
    pub viewer: Option<Viewer>,
    pub sidebar: Sidebar,
    pub values: PostFormValues,
    pub categories: Vec<CategoryOption>,
}

impl PostFormPage {
    pub fn category_options(categories: Vec<Category>, selected: Option<i64>) -> Vec<CategoryOption> {
        categories
            .into_iter()
            .map(|c| CategoryOption {
                selected: Some(c.id) == selected,
                id: c.id,
                name: c.name,
            })
            .collect()
    }
}

/// 댓글 수정 폼 페이지
#[derive(Debug, Serialize)]
pub struct CommentFormPage {
    pub page_title: String,
    pub viewer: Option<Viewer>,
    pub action: String,
    pub post_url: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AboutPage {
    pub page_title: String,
    pub viewer: Option<Viewer>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorPage {
    pub page_title: String,
    pub status: u16,
    pub reason: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(category: Option<(&str, &str)>) -> Post {
        Post {
            id: 3,
            title: "Hello".to_string(),
            content: "word ".repeat(50),
            head_image: None,
            created_at: "2026-01-01T10:00:00.000Z".to_string(),
            author_id: "u1".to_string(),
            author_username: "smith".to_string(),
            category_id: category.map(|_| 1),
            category_name: category.map(|(name, _)| name.to_string()),
            category_slug: category.map(|(_, slug)| slug.to_string()),
        }
    }

    #[test]
    fn uncategorized_posts_get_the_none_badge() {
        let card = PostCard::from_post(&post(None), &[]);
        assert_eq!(card.category.name, "미분류");
        assert_eq!(card.category.url, "/blog/category/_none/");

        let card = PostCard::from_post(&post(Some(("정치/사회", "정치사회"))), &[]);
        assert_eq!(card.category.name, "정치/사회");
        assert_eq!(card.category.url, "/blog/category/정치사회/");
        assert!(card.excerpt.ends_with('…'));
    }

    #[test]
    fn pagination_links_only_when_more_than_one_page() {
        assert!(Pagination::for_window("/blog/", &PageWindow::new(1, 5, 5)).is_none());

        let first = Pagination::for_window("/blog/", &PageWindow::new(1, 6, 5)).unwrap();
        assert_eq!(first.older_url.as_deref(), Some("/blog/?page=2"));
        assert_eq!(first.newer_url, None);

        let last = Pagination::for_window("/blog/", &PageWindow::new(2, 6, 5)).unwrap();
        assert_eq!(last.older_url, None);
        assert_eq!(last.newer_url.as_deref(), Some("/blog/?page=1"));
    }

    #[test]
    fn comment_controls_follow_authorship() {
        let comment = Comment {
            id: 1,
            post_id: 3,
            text: "nice".to_string(),
            author_id: "u2".to_string(),
            author_username: "benny".to_string(),
            created_at: "2026-01-01T10:00:00.000Z".to_string(),
            modified_at: "2026-01-01T10:00:00.000Z".to_string(),
        };
        let benny = AuthUser {
            user_id: "u2".to_string(),
            username: "benny".to_string(),
        };
        let smith = AuthUser {
            user_id: "u1".to_string(),
            username: "smith".to_string(),
        };

        assert!(CommentView::from_comment(&comment, Some(&benny)).can_modify);
        assert!(!CommentView::from_comment(&comment, Some(&smith)).can_modify);
        assert!(!CommentView::from_comment(&comment, None).can_modify);
        assert_eq!(CommentView::from_comment(&comment, None).modified, None);
    }
}
