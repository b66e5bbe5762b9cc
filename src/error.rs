//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 상태 코드 + HTML 에러 페이지로 자동 변환
//!
//! 권한 위반(`PermissionDenied`)도 패닉이나 처리되지 않은 예외가 아니라
//! 평범한 `Err` 값으로 흘러가서 403 응답이 됩니다.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    /// 없는 게시글/댓글 ID, 없는 카테고리/태그 slug
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400) — 폼 검증 실패 등
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 리소스 작성자가 아닌 사용자의 수정/삭제 시도 (HTTP 403)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// 인증 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 리소스 충돌 (HTTP 409) — 이미 존재하는 사용자 이름, 카테고리 이름 등
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx 함수의 에러에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 템플릿 렌더링 오류 (HTTP 500)
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl AppError {
    /// 에러 종류에 맞는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) | AppError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTML 에러 페이지 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Template, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 사용자에게는 일반적인 메시지만 보여줍니다.
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound => self.to_string(),
            AppError::BadRequest(ref msg)
            | AppError::Unauthorized(ref msg)
            | AppError::Conflict(ref msg) => msg.clone(),
            AppError::PermissionDenied(ref msg) => {
                tracing::warn!("Permission denied: {}", msg);
                msg.clone()
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred".to_string()
            }
            AppError::Template(ref e) => {
                tracing::error!("Template error: {:#}", e);
                "A rendering error occurred".to_string()
            }
        };

        // 에러 페이지 자체를 렌더링하지 못하면 평문으로 대신합니다.
        match views::render_error_page(status, &message) {
            Ok(page) => (status, Html(page)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {:#}", e);
                (status, message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_maps_to_its_status() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PermissionDenied("x".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_details_are_not_rendered() {
        let response = AppError::Internal("secret stack trace".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("An internal error occurred"));
        assert!(!html.contains("secret stack trace"));
    }
}
