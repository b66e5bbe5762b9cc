//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: 로그인 토큰 서명에 사용할 비밀키 (필수)
//! - `HOST`: 서버 바인딩 주소 (기본값 `0.0.0.0`)
//! - `PORT`: 서버 포트 번호 (기본값 3000)
//! - `ACCESS_TOKEN_TTL_MINUTES`: 로그인 유지 시간 (기본값 1440 = 하루)

use std::env;

/// 애플리케이션 전체 설정
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 `AppState`로 옮겨집니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/blog.db?mode=rwc")
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub token_ttl_minutes: i64,
}

impl Config {
    /// 환경변수에서 설정값을 읽습니다.
    ///
    /// `DATABASE_URL`과 `JWT_SECRET`이 없으면 에러입니다.
    /// 나머지는 없거나 숫자로 해석할 수 없으면 기본값을 씁니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3000),
            token_ttl_minutes: parse_or("ACCESS_TOKEN_TTL_MINUTES", 1440),
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}
