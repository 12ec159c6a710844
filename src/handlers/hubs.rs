//! Hub HTTP handlers.
//!
//! This module implements the hub endpoints under `/api/hubs`:
//! - GET / - List hubs
//! - GET /{id} - Get a hub (already resolved by `require_hub`)
//! - POST / - Create a hub
//! - DELETE /{id} - Delete a hub
//! - PUT /{id} - Update a hub
//!
//! Every handler makes at most one store call and answers store failures
//! itself with a route specific message.

use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    error::{AppError, Failure},
    middleware::context::RequestBody,
    models::hub::{Hub, HubId, HubPatch, HubQuery, NewHub},
    state::AppState,
};

pub const HUB_MISSING: &str = "The hub could not be found";

/// List hubs.
///
/// # Query Parameters
///
/// - `sortby`: `id` (default), `name`, `created_at` or `updated_at`
/// - `sortdir`: `asc` (default) or `desc`
/// - `limit` / `page`: optional paging
///
/// # Response
///
/// - **Success (200 OK)**: array of hubs (may be empty)
/// - **Error (500)**: `{"message": "Error retrieving the hubs"}`
pub async fn list_hubs(
    State(state): State<AppState>,
    query: Result<Query<HubQuery>, QueryRejection>,
) -> Result<Json<Vec<Hub>>, AppError> {
    let Query(query) = query.map_err(|rejection| Failure::new(rejection.body_text()))?;

    let hubs = state
        .store
        .find(&query)
        .await
        .map_err(AppError::store("Error retrieving the hubs"))?;

    Ok(Json(hubs))
}

/// Return the hub attached by the `require_hub` precondition. No store call.
pub async fn get_hub(Extension(hub): Extension<Hub>) -> Json<Hub> {
    Json(hub)
}

/// Create a hub.
///
/// # Request Body
///
/// ```json
/// { "name": "Engineering", "description": "optional", "anything": "else" }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: the created hub
/// - **Error (500)**: `{"message": "Error adding the hub"}`, e.g. when `name` is missing
pub async fn create_hub(
    State(state): State<AppState>,
    Extension(body): Extension<RequestBody>,
) -> Result<(StatusCode, Json<Hub>), AppError> {
    let hub = state
        .store
        .add(NewHub::from_fields(body.into_fields()))
        .await
        .map_err(AppError::store("Error adding the hub"))?;

    Ok((StatusCode::CREATED, Json(hub)))
}

/// Delete a hub.
///
/// Only guarded by `require_body`; the hub's existence is judged from the
/// number of removed rows.
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "The hub has been nuked"}`
/// - **Error (404)**: `{"message": "The hub could not be found"}`
/// - **Error (500)**: `{"message": "Error removing the hub"}`
pub async fn delete_hub(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let Ok(id) = id.parse::<HubId>() else {
        return Err(AppError::NotFound(HUB_MISSING));
    };

    let removed = state
        .store
        .remove(id)
        .await
        .map_err(AppError::store("Error removing the hub"))?;

    if removed == 0 {
        return Err(AppError::NotFound(HUB_MISSING));
    }

    Ok(Json(json!({ "message": "The hub has been nuked" })))
}

/// Update a hub with the fields in the request body.
///
/// # Response
///
/// - **Success (200 OK)**: the updated hub
/// - **Error (404)**: the hub vanished between the precondition and the update
/// - **Error (500)**: `{"message": "Error updating the hub"}`
pub async fn update_hub(
    State(state): State<AppState>,
    Extension(hub): Extension<Hub>,
    Extension(body): Extension<RequestBody>,
) -> Result<Json<Hub>, AppError> {
    let updated = state
        .store
        .update(hub.id, HubPatch::from_fields(body.into_fields()))
        .await
        .map_err(AppError::store("Error updating the hub"))?
        .ok_or(AppError::NotFound(HUB_MISSING))?;

    Ok(Json(updated))
}
