use async_trait::async_trait;
use axum::http::{HeaderValue, Method, header};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use spaces_backend::db::DbStore;
use spaces_backend::db::models::space::{Item, Space, SpaceDraft};
use spaces_backend::db::repositories::{MemorySpaceRepo, SpaceStore, StoreError, StoreResult};
use spaces_backend::middleware::auth::Claims;
use spaces_backend::middleware::cors::CorsPolicy;
use spaces_backend::services::SpacesDispatcher;
use spaces_backend::services::context::SpaceRequest;
use std::sync::{Arc, Mutex};

pub const TEST_ORIGIN: &str = "https://d111111abcdef8.cloudfront.net";
pub const TEST_JWT_SECRET: &str = "test_jwt_secret_key";

/// Store call as observed by `RecordingStore`.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Get(String),
    Scan,
    Put(Space),
    Update(String, SpaceDraft),
    Delete(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Failure {
    None,
    Error,
    Panic,
}

/// Wraps the in-memory store, logging every call and optionally failing.
pub struct RecordingStore {
    inner: MemorySpaceRepo,
    calls: Mutex<Vec<StoreCall>>,
    failure: Failure,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<Value>) -> Self {
        Self {
            inner: MemorySpaceRepo::with_items(items.into_iter().filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })),
            calls: Mutex::new(Vec::new()),
            failure: Failure::None,
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) -> StoreResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Failure::None => Ok(()),
            Failure::Error => Err(StoreError::Unavailable("connection refused".into())),
            Failure::Panic => panic!("store exploded"),
        }
    }
}

#[async_trait]
impl SpaceStore for RecordingStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Item>> {
        self.record(StoreCall::Get(id.to_string()))?;
        self.inner.get(id).await
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        self.record(StoreCall::Scan)?;
        self.inner.scan().await
    }

    async fn put(&self, space: &Space) -> StoreResult<()> {
        self.record(StoreCall::Put(space.clone()))?;
        self.inner.put(space).await
    }

    async fn update(&self, id: &str, changes: &SpaceDraft) -> StoreResult<Item> {
        self.record(StoreCall::Update(id.to_string(), changes.clone()))?;
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.record(StoreCall::Delete(id.to_string()))?;
        self.inner.delete(id).await
    }
}

pub fn dispatcher_with(store: Arc<RecordingStore>) -> SpacesDispatcher {
    let store: DbStore = store;
    SpacesDispatcher::new(store, CorsPolicy::new(Some(TEST_ORIGIN.to_string())))
}

/// Request with the browser origin set, the way the web client sends it.
pub fn request(method: Method) -> SpaceRequest {
    SpaceRequest::new(method).with_header(header::ORIGIN, HeaderValue::from_static(TEST_ORIGIN))
}

pub fn admin_claims() -> Claims {
    Claims::from(json!({"sub": "admin-1", "cognito:groups": ["admins"]}))
}

pub fn user_claims() -> Claims {
    Claims::from(json!({"sub": "user-1", "cognito:groups": ["users"]}))
}

/// Signs `claims` with the test secret, adding a one hour expiry.
pub fn create_test_jwt(mut claims: Value) -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    claims["exp"] = json!(now + 3600);
    claims["iat"] = json!(now);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_ref()),
    )
    .unwrap()
}
