// Shared test harness: in-memory fakes for the two external collaborators,
// plus request/response helpers for driving the router with oneshot.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use http_body_util::BodyExt;
use serde_json::{Map, Value};

use focusflow_api::identity::{IdentityError, IdentityService, NewIdentity, TokenClaims};
use focusflow_api::store::{Document, DocumentStore, StoreError};
use focusflow_api::AppState;

/// Identity fake: a fixed token→uid table plus registration bookkeeping.
pub struct FakeIdentity {
    tokens: HashMap<String, String>,
    registered: Mutex<Vec<String>>,
    counter: AtomicUsize,
}

impl FakeIdentity {
    pub fn with_tokens(pairs: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            tokens: pairs
                .iter()
                .map(|(t, u)| (t.to_string(), u.to_string()))
                .collect(),
            registered: Mutex::new(Vec::new()),
            counter: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn create_user(
        &self,
        email: &str,
        _password: &str,
        _display_name: &str,
    ) -> Result<NewIdentity, IdentityError> {
        let mut registered = self.registered.lock().unwrap();
        if registered.iter().any(|e| e == email) {
            return Err(IdentityError::Rejected("EMAIL_EXISTS".to_string()));
        }
        registered.push(email.to_string());
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(NewIdentity {
            uid: format!("uid-{}", n),
            email: email.to_string(),
        })
    }

    async fn verify_token(&self, token: &str) -> Result<TokenClaims, IdentityError> {
        match self.tokens.get(token) {
            Some(uid) => Ok(TokenClaims {
                uid: uid.clone(),
                email: None,
            }),
            None => Err(IdentityError::InvalidToken("unknown token".to_string())),
        }
    }
}

/// Document store fake: collections in a Mutex'd map, with a query log so
/// tests can assert which collections were (not) queried.
#[derive(Default)]
pub struct FakeStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    queries: Mutex<Vec<String>>,
    counter: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed a document under a fixed id.
    pub fn seed(&self, collection: &str, id: &str, fields: Map<String, Value>) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.to_string(),
                fields,
            });
    }

    /// All documents currently in a collection.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Collections hit by query_where so far.
    pub fn queried_collections(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn add_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<String, StoreError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let id = format!("doc-{}", n);
        self.seed(collection, &id, fields);
        Ok(id)
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        docs.retain(|d| d.id != id);
        docs.push(Document {
            id: id.to_string(),
            fields,
        });
        Ok(())
    }

    async fn query_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        self.queries.lock().unwrap().push(collection.to_string());
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| d.fields.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// A router wired to fresh fakes, with `tok-u1`/`tok-u2` mapping to uids
/// `U1`/`U2`.
pub fn test_app() -> (axum::Router, Arc<FakeIdentity>, Arc<FakeStore>) {
    let identity = FakeIdentity::with_tokens(&[("tok-u1", "U1"), ("tok-u2", "U2")]);
    let store = FakeStore::new();
    let state = AppState::new(identity.clone(), store.clone());
    (focusflow_api::app(state), identity, store)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_authed(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn post_json_authed(uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Project fields the way the projects handler stores them.
pub fn project_fields(name: &str, owner_id: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("name".to_string(), Value::String(name.to_string()));
    fields.insert("ownerId".to_string(), Value::String(owner_id.to_string()));
    fields.insert(
        "createdAt".to_string(),
        Value::String("2026-08-27T10:00:00+00:00".to_string()),
    );
    fields
}
