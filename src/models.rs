// Domain records and request bodies.
//
// Stored records travel as schema-less document fields; these structs are the
// shapes the API reads from and returns to clients. `ownerId` and `projectId`
// are always server-assigned from the verified token and route path, never
// read from a request body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Document;

/// Mirror of an identity-service account, written once at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub project_id: String,
    pub owner_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Rebuild a record from its stored document, folding the store-assigned id
/// back into the struct.
pub fn from_document<T: serde::de::DeserializeOwned>(doc: &Document) -> Result<T, serde_json::Error> {
    let mut fields = doc.fields.clone();
    fields.insert("id".to_string(), Value::String(doc.id.clone()));
    serde_json::from_value(Value::Object(fields))
}

// Request bodies. Required fields are Options so their absence is a handler
// decision (400 with a JSON error body) rather than an extractor rejection.

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_defaults() {
        let task: Task = serde_json::from_value(json!({
            "title": "Draft spec",
            "projectId": "p1",
            "ownerId": "U1",
            "createdAt": "2026-08-27T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task {
            id: "t1".into(),
            title: "Draft spec".into(),
            description: String::new(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            due_date: Some("2026-09-01".into()),
            project_id: "p1".into(),
            owner_id: "U1".into(),
            created_at: "2026-08-27T10:00:00Z".into(),
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["projectId"], "p1");
        assert_eq!(value["ownerId"], "U1");
        assert_eq!(value["status"], "in_progress");
        assert_eq!(value["priority"], "high");
        assert_eq!(value["dueDate"], "2026-09-01");
    }

    #[test]
    fn test_unknown_priority_rejected() {
        let result: Result<CreateTaskRequest, _> = serde_json::from_value(json!({
            "title": "x",
            "priority": "urgent"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_document_folds_in_id() {
        let mut fields = serde_json::Map::new();
        fields.insert("name".into(), json!("Launch"));
        fields.insert("ownerId".into(), json!("U1"));
        fields.insert("createdAt".into(), json!("2026-08-27T10:00:00Z"));
        let doc = crate::store::Document {
            id: "p1".into(),
            fields,
        };
        let project: Project = from_document(&doc).unwrap();
        assert_eq!(project.id, "p1");
        assert_eq!(project.owner_id, "U1");
    }
}
