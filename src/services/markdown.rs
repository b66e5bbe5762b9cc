//! # 마크다운 렌더링 서비스
//!
//! 게시글 본문과 댓글은 마크다운으로 저장되고, 화면에 보여줄 때 HTML로 변환됩니다.
//!
//! 이 모듈의 함수들:
//! - `render_markdown()`: 마크다운 → HTML (본문 안의 원시 HTML은 텍스트로 취급)
//! - `excerpt()`: 목록 카드에 보여줄 미리보기 문자열

use pulldown_cmark::{html, Event, Options, Parser};

/// 목록 카드 미리보기의 최대 길이 (문자 수)
pub const EXCERPT_CHARS: usize = 100;

/// 마크다운을 HTML로 변환합니다.
///
/// 사용자가 입력한 `<script>` 같은 원시 HTML은 태그로 해석하지 않고
/// 텍스트 이벤트로 바꿔서, `push_html`이 이스케이프하게 만듭니다.
/// 템플릿에서는 이 결과를 `|safe`로 출력합니다.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    // 마크다운은 보통 원문보다 HTML이 조금 더 깁니다.
    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, events);
    output
}

/// 텍스트 앞부분을 최대 `max_chars`자까지 잘라 미리보기를 만듭니다.
///
/// 바이트가 아니라 유니코드 문자 단위로 자르므로
/// 한글(1자 = 3바이트) 중간에서 잘려 패닉하는 일이 없습니다.
/// 잘린 경우 끝에 `…`을 붙입니다.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}
