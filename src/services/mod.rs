//! Hub persistence.
//!
//! Handlers and preconditions only see the [`HubStore`] trait. Two
//! implementations exist:
//! - [`postgres::PgHubStore`] backed by sqlx
//! - [`memory::MemoryHubStore`] used when no database is configured, and in tests

use async_trait::async_trait;

use crate::models::{
    hub::{Hub, HubId, HubPatch, HubQuery, NewHub},
    message::{Message, NewMessage},
};

pub mod memory;
pub mod postgres;

/// Errors raised by a hub store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed (connection error, query error, constraint violation).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The record violates a store rule (missing name, duplicate name, unknown hub).
    #[error("Constraint violated: {0}")]
    Constraint(String),
}

/// Asynchronous access to hubs and their messages.
///
/// Every method may fail with a [`StoreError`]; callers decide how a failure
/// is reported.
#[async_trait]
pub trait HubStore: Send + Sync {
    /// List hubs ordered and paged per `query`.
    async fn find(&self, query: &HubQuery) -> Result<Vec<Hub>, StoreError>;

    async fn find_by_id(&self, id: HubId) -> Result<Option<Hub>, StoreError>;

    /// Insert a hub and return it with its generated id.
    async fn add(&self, hub: NewHub) -> Result<Hub, StoreError>;

    /// Apply `patch` to hub `id`. `None` when no such hub exists.
    async fn update(&self, id: HubId, patch: HubPatch) -> Result<Option<Hub>, StoreError>;

    /// Delete hub `id` together with its messages. Returns the number of hubs removed.
    async fn remove(&self, id: HubId) -> Result<u64, StoreError>;

    async fn find_hub_messages(&self, hub_id: HubId) -> Result<Vec<Message>, StoreError>;

    async fn add_message(&self, message: NewMessage) -> Result<Message, StoreError>;
}
