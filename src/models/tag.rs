//! # 태그 모델 정의
//!
//! 태그는 게시글에 붙는 라벨입니다. 게시글과 다대다(N:M) 관계이며
//! `post_tags` 중간 테이블로 연결됩니다.
//!
//! 태그는 별도의 생성 화면 없이, 게시글 작성/수정 폼의 `tags` 입력에
//! 처음 등장할 때 만들어집니다 (get-or-create).

use serde::{Deserialize, Serialize};

/// 태그 이름의 최대 길이 (문자 수 기준)
pub const TAG_NAME_MAX_CHARS: usize = 40;

/// 태그 엔티티 — DB의 `tags` 테이블 한 행(row)에 대응합니다.
///
/// `name`과 `slug`는 모두 UNIQUE 제약이 걸려 있습니다.
/// slug는 이름에서 파생되며 URL(`/blog/tag/{slug}/`)에 사용됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    /// 태그 고유 식별자 (AUTOINCREMENT 정수)
    pub id: i64,
    /// 태그 이름 (예: "america", "bad guy")
    pub name: String,
    /// URL용 식별자 (예: "bad-guy")
    pub slug: String,
}

impl Tag {
    /// 이 태그로 필터링된 게시글 목록의 URL
    pub fn absolute_url(&self) -> String {
        format!("/blog/tag/{}/", self.slug)
    }
}

/// 폼에 입력된 태그 문자열을 태그 이름 목록으로 나눕니다.
///
/// 구분자는 `,`와 `;`이며, 앞뒤 공백은 제거하고 빈 항목과 중복은 버립니다.
/// 입력 순서는 유지됩니다.
///
/// ```text
/// "america, bad guy; america" → ["america", "bad guy"]
/// ```
pub fn parse_tag_names(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw.split([',', ';']).map(str::trim) {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_url_uses_slug() {
        let tag = Tag {
            id: 3,
            name: "bad guy".to_string(),
            slug: "bad-guy".to_string(),
        };
        assert_eq!(tag.absolute_url(), "/blog/tag/bad-guy/");
    }

    #[test]
    fn tag_names_split_on_both_separators() {
        assert_eq!(
            parse_tag_names(" america, bad guy;america ;; "),
            vec!["america".to_string(), "bad guy".to_string()]
        );
        assert!(parse_tag_names("  ").is_empty());
    }
}
