use axum::response::Json;
use serde_json::{json, Value};

/// GET / - static greeting
pub async fn root() -> &'static str {
    "Hello from FocusFlow Backend!"
}

/// GET /api/test - connectivity check
pub async fn api_test() -> Json<Value> {
    Json(json!({ "message": "API is working!" }))
}
