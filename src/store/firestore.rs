// Firestore client over its REST API.
//
// The REST surface uses typed value wrappers ({"stringValue": ...} and
// friends) rather than plain JSON, so this module carries a small codec
// between serde_json values and Firestore values alongside the four document
// operations the handlers need.

use serde_json::{json, Map, Value};

use super::{Document, DocumentStore, StoreError};
use crate::config::StoreConfig;

const PRODUCTION_HOST: &str = "https://firestore.googleapis.com";

pub struct FirestoreStore {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    access_token: Option<String>,
}

impl FirestoreStore {
    pub fn new(config: &StoreConfig) -> Self {
        let base_url = match &config.emulator_host {
            Some(host) => format!("http://{}", host),
            None => PRODUCTION_HOST.to_string(),
        };

        Self {
            client: reqwest::Client::new(),
            base_url,
            project_id: config.project_id.clone(),
            access_token: config.access_token.clone(),
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            self.base_url, self.project_id
        )
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn backend_error(res: reqwest::Response) -> StoreError {
        let status = res.status();
        let detail = res
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| {
                body.pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| format!("status {}", status));
        StoreError::Backend(detail)
    }
}

/// Wrap a plain JSON value in Firestore's typed representation.
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // integerValue is a string on the wire
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

fn encode_fields(fields: &Map<String, Value>) -> Value {
    let mut out = Map::new();
    for (key, value) in fields {
        out.insert(key.clone(), encode_value(value));
    }
    Value::Object(out)
}

/// Unwrap a Firestore typed value back to plain JSON. Timestamps come back as
/// their RFC 3339 string form.
fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };

    if let Some(s) = obj.get("stringValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if let Some(s) = obj.get("timestampValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if let Some(s) = obj.get("integerValue").and_then(Value::as_str) {
        if let Ok(i) = s.parse::<i64>() {
            return json!(i);
        }
    }
    if let Some(f) = obj.get("doubleValue").and_then(Value::as_f64) {
        return json!(f);
    }
    if let Some(b) = obj.get("booleanValue").and_then(Value::as_bool) {
        return Value::Bool(b);
    }
    if obj.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(values) = value.pointer("/arrayValue/values").and_then(Value::as_array) {
        return Value::Array(values.iter().map(decode_value).collect());
    }
    if let Some(fields) = value.pointer("/mapValue/fields").and_then(Value::as_object) {
        return Value::Object(decode_fields(fields));
    }

    Value::Null
}

fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode_value(value)))
        .collect()
}

/// The REST API names documents `projects/.../documents/{collection}/{id}`;
/// the id is the final path segment.
fn id_from_name(name: &str) -> String {
    name.rsplit('/').next().unwrap_or(name).to_string()
}

fn document_from_response(body: &Value) -> Document {
    let id = body
        .get("name")
        .and_then(Value::as_str)
        .map(id_from_name)
        .unwrap_or_default();
    let fields = body
        .get("fields")
        .and_then(Value::as_object)
        .map(decode_fields)
        .unwrap_or_default();
    Document { id, fields }
}

#[async_trait::async_trait]
impl DocumentStore for FirestoreStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let url = format!("{}/{}/{}", self.documents_url(), collection, id);
        let res = self.with_auth(self.client.get(url)).send().await?;

        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !res.status().is_success() {
            return Err(Self::backend_error(res).await);
        }

        let body: Value = res.json().await?;
        Ok(Some(document_from_response(&body)))
    }

    async fn add_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<String, StoreError> {
        let url = format!("{}/{}", self.documents_url(), collection);
        let res = self
            .with_auth(self.client.post(url))
            .json(&json!({ "fields": encode_fields(&fields) }))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::backend_error(res).await);
        }

        let body: Value = res.json().await?;
        Ok(document_from_response(&body).id)
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let url = format!("{}/{}/{}", self.documents_url(), collection, id);
        let res = self
            .with_auth(self.client.patch(url))
            .json(&json!({ "fields": encode_fields(&fields) }))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::backend_error(res).await);
        }
        Ok(())
    }

    async fn query_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}:runQuery", self.documents_url());
        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": encode_value(value),
                    }
                }
            }
        });

        let res = self.with_auth(self.client.post(url)).json(&query).send().await?;
        if !res.status().is_success() {
            return Err(Self::backend_error(res).await);
        }

        // runQuery streams one entry per result; entries without a "document"
        // key are read-time markers and are skipped.
        let body: Vec<Value> = res.json().await?;
        Ok(body
            .iter()
            .filter_map(|entry| entry.get("document"))
            .map(document_from_response)
            .collect())
    }
}
