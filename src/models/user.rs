//! # 사용자 모델 정의
//!
//! 게시글과 댓글의 작성자입니다. 비밀번호는 Argon2id 해시로만 저장합니다.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const USERNAME_MIN_CHARS: usize = 3;
pub const PASSWORD_MIN_CHARS: usize = 8;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub created_at: String,
}

/// `/auth/me`, 회원가입/로그인 응답에 실리는 공개 정보 (해시 제외)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

/// 검증을 통과한 회원가입 값. 앞뒤 공백이 제거되어 있고 빈 이메일은 `None`입니다.
#[derive(Debug, PartialEq, Eq)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub password: &'a str,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<Registration<'_>, AppError> {
        let username = self.username.trim();
        if username.chars().count() < USERNAME_MIN_CHARS {
            return Err(AppError::BadRequest(format!(
                "Username must be at least {} characters",
                USERNAME_MIN_CHARS
            )));
        }
        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                PASSWORD_MIN_CHARS
            )));
        }

        let email = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
        if email.is_some_and(|e| !e.contains('@')) {
            return Err(AppError::BadRequest("Invalid email address".to_string()));
        }

        Ok(Registration {
            username,
            email,
            password: &self.password,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 회원가입/로그인 응답. 같은 토큰이 `access_token` 쿠키로도 설정됩니다.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: Option<&str>, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.map(str::to_string),
            password: password.to_string(),
        }
    }

    #[test]
    fn registration_is_trimmed_and_blank_email_dropped() {
        let req = request("  smith ", Some("  "), "password123");
        let reg = req.validate().unwrap();
        assert_eq!(reg.username, "smith");
        assert_eq!(reg.email, None);

        let req = request("benny", Some(" benny@example.com "), "password123");
        assert_eq!(req.validate().unwrap().email, Some("benny@example.com"));
    }

    #[test]
    fn short_names_weak_passwords_and_bad_emails_are_rejected() {
        for req in [
            request("ab", None, "password123"),
            request("  abc", None, "short"),
            request("smith", Some("nope"), "password123"),
        ] {
            assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
        }
        // 글자 수 기준이므로 한글 세 글자도 통과합니다.
        assert!(request("홍길동", None, "비밀번호여덟글자").validate().is_ok());
    }
}
