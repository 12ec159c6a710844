//! Shared helpers for the pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header::CONTENT_TYPE},
};
use chrono::Utc;
use hubs_api::{
    app::build_app,
    config::Config,
    models::{
        hub::{Hub, HubId, HubPatch, HubQuery, NewHub},
        message::{Message, NewMessage},
    },
    services::{HubStore, StoreError, memory::MemoryHubStore},
    state::AppState,
};
use serde_json::{Map, Value};
use tower::ServiceExt as _;

pub struct TestApp {
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl TestApp {
    /// Pipeline over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_store(MemoryHubStore::new())
    }

    pub fn with_store(store: impl HubStore + 'static) -> Self {
        Self::with_store_and_config(store, &Config::default())
    }

    pub fn with_store_and_config(store: impl HubStore + 'static, config: &Config) -> Self {
        Self {
            router: build_app(AppState::new(store), config),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    /// Create a hub and return its JSON representation.
    pub async fn create_hub(&self, body: Value) -> Value {
        let response = self.request(Method::POST, "/api/hubs", Some(body)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.json()
    }
}

pub fn sample_hub(id: HubId) -> Hub {
    let now = Utc::now();
    Hub {
        id,
        name: format!("hub-{id}"),
        description: None,
        created_at: now,
        updated_at: now,
        attributes: Map::new(),
    }
}

fn offline() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

/// A store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl HubStore for FailingStore {
    async fn find(&self, _query: &HubQuery) -> Result<Vec<Hub>, StoreError> {
        Err(offline())
    }

    async fn find_by_id(&self, _id: HubId) -> Result<Option<Hub>, StoreError> {
        Err(offline())
    }

    async fn add(&self, _hub: NewHub) -> Result<Hub, StoreError> {
        Err(offline())
    }

    async fn update(&self, _id: HubId, _patch: HubPatch) -> Result<Option<Hub>, StoreError> {
        Err(offline())
    }

    async fn remove(&self, _id: HubId) -> Result<u64, StoreError> {
        Err(offline())
    }

    async fn find_hub_messages(&self, _hub_id: HubId) -> Result<Vec<Message>, StoreError> {
        Err(offline())
    }

    async fn add_message(&self, _message: NewMessage) -> Result<Message, StoreError> {
        Err(offline())
    }
}

/// A store that resolves one hub by id but fails every other call.
///
/// Lets requests pass `require_hub` so the handler's own failure mapping runs.
pub struct LookupOnlyStore {
    pub hub: Hub,
}

#[async_trait]
impl HubStore for LookupOnlyStore {
    async fn find(&self, _query: &HubQuery) -> Result<Vec<Hub>, StoreError> {
        Err(offline())
    }

    async fn find_by_id(&self, id: HubId) -> Result<Option<Hub>, StoreError> {
        Ok((id == self.hub.id).then(|| self.hub.clone()))
    }

    async fn add(&self, _hub: NewHub) -> Result<Hub, StoreError> {
        Err(offline())
    }

    async fn update(&self, _id: HubId, _patch: HubPatch) -> Result<Option<Hub>, StoreError> {
        Err(offline())
    }

    async fn remove(&self, _id: HubId) -> Result<u64, StoreError> {
        Err(offline())
    }

    async fn find_hub_messages(&self, _hub_id: HubId) -> Result<Vec<Message>, StoreError> {
        Err(offline())
    }

    async fn add_message(&self, _message: NewMessage) -> Result<Message, StoreError> {
        Err(offline())
    }
}
