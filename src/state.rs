//! Shared application state.

use std::sync::Arc;

use crate::services::HubStore;

/// State handed to handlers and preconditions via axum's `State` extractor.
///
/// Cloning is cheap; every clone points at the same store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HubStore>,
}

impl AppState {
    pub fn new(store: impl HubStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
