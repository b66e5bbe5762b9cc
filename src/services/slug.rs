//! # slug 생성
//!
//! 카테고리/태그 이름을 URL에 쓸 수 있는 식별자로 바꾸고, 그 경로를 헤더용으로 인코딩합니다.
//!
//! 한글 이름이 많으므로 유니코드 글자는 그대로 둡니다.
//! (`slug` 크레이트는 한글을 로마자로 음역하기 때문에 쓰지 않습니다.)
//!
//! ```text
//! "bad guy"   → "bad-guy"
//! "정치/사회" → "정치사회"
//! "Rust_Lang" → "rust-lang"
//! ```

/// 이름을 slug로 변환합니다.
///
/// - 글자와 숫자는 소문자로 유지
/// - 공백, `-`, `_`는 `-` 하나로 합침
/// - 그 밖의 문장부호(`/`, `?`, `#` 등)는 제거
/// - 앞뒤의 `-`는 제거
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
        }
    }

    slug
}

/// URL 경로의 각 세그먼트를 퍼센트 인코딩합니다.
///
/// 한글 slug가 들어간 경로를 `Location` 헤더에 넣을 때 사용합니다.
/// 헤더 값은 ASCII만 허용되기 때문입니다. `/` 구분자와 `?`, `#` 뒤의
/// 쿼리/프래그먼트는 그대로 둡니다.
pub fn encode_url_path(url: &str) -> String {
    let split = url.find(['?', '#']).unwrap_or(url.len());
    let (path, rest) = url.split_at(split);

    let path = path
        .split('/')
        .map(|segment| urlencoding::encode(segment))
        .collect::<Vec<_>>()
        .join("/");
    path + rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_names() {
        assert_eq!(slugify("bad guy"), "bad-guy");
        assert_eq!(slugify("  Stay  Hungry -- Stay Foolish "), "stay-hungry-stay-foolish");
        assert_eq!(slugify("Rust_Lang"), "rust-lang");
    }

    #[test]
    fn keeps_hangul_and_drops_punctuation() {
        assert_eq!(slugify("정치/사회"), "정치사회");
        assert_eq!(slugify("나의 첫 글!"), "나의-첫-글");
    }

    #[test]
    fn encodes_path_segments() {
        assert_eq!(encode_url_path("/blog/category/rust/"), "/blog/category/rust/");
        assert_eq!(
            encode_url_path("/blog/category/정치사회/"),
            "/blog/category/%EC%A0%95%EC%B9%98%EC%82%AC%ED%9A%8C/"
        );
        assert_eq!(encode_url_path("/blog/search/a b/"), "/blog/search/a%20b/");
        assert_eq!(encode_url_path("/blog/category/_none/"), "/blog/category/_none/");
    }

    #[test]
    fn leaves_query_and_fragment_alone() {
        assert_eq!(encode_url_path("/blog/?page=2"), "/blog/?page=2");
        assert_eq!(encode_url_path("/blog/3/#comment-id-7"), "/blog/3/#comment-id-7");
        assert_eq!(
            encode_url_path("/blog/tag/한국어/?page=2"),
            "/blog/tag/%ED%95%9C%EA%B5%AD%EC%96%B4/?page=2"
        );
    }

    #[test]
    fn never_collides_with_uncategorized_sentinel() {
        assert_eq!(slugify("_none"), "none");
    }
}
