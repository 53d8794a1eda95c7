use axum::extract::{Extension, Json, State};
use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{self, CreateProjectRequest, Project};
use crate::state::AppState;
use crate::store::DocumentStore;

/// POST /api/projects - create a project owned by the caller.
///
/// `ownerId` comes from the verified token; the request body is never
/// consulted for it.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateProjectRequest>,
) -> ApiResult<Project> {
    let name = body
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required field: name"))?;

    let created_at = Utc::now().to_rfc3339();
    let mut fields = Map::new();
    fields.insert("name".to_string(), json!(name));
    fields.insert("ownerId".to_string(), json!(auth_user.uid));
    fields.insert("createdAt".to_string(), json!(created_at));

    let id = state.store.add_document("projects", fields).await?;

    Ok(ApiResponse::created(Project {
        id,
        name,
        owner_id: auth_user.uid,
        created_at,
    }))
}

/// GET /api/projects - list the caller's projects.
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Value> {
    let docs = state
        .store
        .query_where("projects", "ownerId", &json!(auth_user.uid))
        .await?;

    let projects = docs
        .iter()
        .map(models::from_document::<Project>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            tracing::error!("malformed project document: {}", e);
            ApiError::internal_server_error("Failed to read stored project")
        })?;

    Ok(ApiResponse::success(json!({ "projects": projects })))
}

/// Does project `project_id` exist and belong to `uid`?
///
/// Fails closed: a missing project and a mismatched owner are both `false`,
/// so callers cannot distinguish "no such project" from "not yours".
pub async fn check_project_ownership(
    store: &dyn DocumentStore,
    project_id: &str,
    uid: &str,
) -> Result<bool, crate::store::StoreError> {
    let Some(doc) = store.get_document("projects", project_id).await? else {
        return Ok(false);
    };

    Ok(doc.fields.get("ownerId").and_then(Value::as_str) == Some(uid))
}
