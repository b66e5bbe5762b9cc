//! # 헬스체크(Health Check) 핸들러
//!
//! - `GET /health` → `{ "status": "ok" }`
//!
//! 로드밸런서나 컨테이너 오케스트레이터가 서버 상태를 확인할 때 씁니다.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health` — 고정된 JSON만 반환하므로 실패하지 않습니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}
