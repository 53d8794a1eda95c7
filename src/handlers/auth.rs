use axum::extract::{Extension, Json, State};
use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::RegisterRequest;
use crate::state::AppState;

/// POST /api/auth/register - create an account with the identity service and
/// mirror it as a `users` document keyed by the returned uid.
///
/// Identity-service policy failures (duplicate email and the like) come back
/// as 400 with the service's own error text.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<Value> {
    let email = body
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required field: email"))?;
    let password = body
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required field: password"))?;
    let name = body.name.unwrap_or_else(|| "Anonymous User".to_string());

    let identity = state.identity.create_user(&email, &password, &name).await?;

    let mut fields = Map::new();
    fields.insert("uid".to_string(), json!(identity.uid));
    fields.insert("email".to_string(), json!(identity.email));
    fields.insert("name".to_string(), json!(name));
    fields.insert("createdAt".to_string(), json!(Utc::now().to_rfc3339()));

    state.store.set_document("users", &identity.uid, fields).await?;

    tracing::info!(uid = %identity.uid, "registered new user");

    Ok(ApiResponse::created(json!({
        "message": format!("User {} created successfully", identity.email),
        "uid": identity.uid,
    })))
}

/// GET /api/protected - confirms the caller's verified identity.
pub async fn protected(Extension(auth_user): Extension<AuthUser>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "message": format!("Welcome! You are authenticated as user {}", auth_user.uid),
        "uid": auth_user.uid,
    })))
}
