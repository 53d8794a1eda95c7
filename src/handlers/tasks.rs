use axum::extract::{Extension, Json, Path, State};
use chrono::Utc;
use serde_json::{json, Map, Value};

use super::projects::check_project_ownership;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{self, CreateTaskRequest, Task};
use crate::state::AppState;

/// GET /api/projects/:id/tasks - list tasks under a project the caller owns.
///
/// The ownership check runs before any task query; denial is a uniform 403.
pub async fn list(
    Path(project_id): Path<String>,
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Value> {
    if !check_project_ownership(state.store.as_ref(), &project_id, &auth_user.uid).await? {
        return Err(ApiError::forbidden("Access denied"));
    }

    let docs = state
        .store
        .query_where("tasks", "projectId", &json!(project_id))
        .await?;

    let tasks = docs
        .iter()
        .map(models::from_document::<Task>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            tracing::error!("malformed task document: {}", e);
            ApiError::internal_server_error("Failed to read stored task")
        })?;

    Ok(ApiResponse::success(json!({ "tasks": tasks })))
}

/// POST /api/projects/:id/tasks - create a task under a project the caller
/// owns. `projectId` and `ownerId` are taken from the path and the verified
/// token, never from the body.
pub async fn create(
    Path(project_id): Path<String>,
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateTaskRequest>,
) -> ApiResult<Task> {
    if !check_project_ownership(state.store.as_ref(), &project_id, &auth_user.uid).await? {
        return Err(ApiError::forbidden("Access denied"));
    }

    let title = body
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required field: title"))?;

    let mut task = Task {
        id: String::new(),
        title,
        description: body.description.unwrap_or_default(),
        status: body.status.unwrap_or_default(),
        priority: body.priority.unwrap_or_default(),
        due_date: body.due_date,
        project_id,
        owner_id: auth_user.uid,
        created_at: Utc::now().to_rfc3339(),
    };

    task.id = state.store.add_document("tasks", task_fields(&task)).await?;

    Ok(ApiResponse::created(task))
}

/// Serialize a task to stored document fields, dropping the id (the store
/// assigns it).
fn task_fields(task: &Task) -> Map<String, Value> {
    let mut fields = match serde_json::to_value(task) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    fields.remove("id");
    fields
}
