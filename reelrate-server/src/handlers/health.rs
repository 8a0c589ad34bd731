use axum::response::Json;
use chrono::Utc;
use serde_json::{Value, json};

/// Liveness probe; carries no data-source check so it stays cheap.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}
