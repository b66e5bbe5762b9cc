//! # 서비스 모듈
//!
//! DB나 HTTP에 의존하지 않는 순수한 도메인 로직입니다.
//! - `markdown`: 마크다운 렌더링과 미리보기(excerpt)
//! - `pagination`: 고정 크기 페이지 계산
//! - `permission`: "작성자 본인인가" 권한 검사
//! - `slug`: 이름 → URL 식별자 변환

pub mod markdown;
pub mod pagination;
pub mod permission;
pub mod slug;
