//! # 미들웨어 모듈
//!
//! - `auth`: JWT 로그인 세션과 `AuthUser` 추출자

pub mod auth;
