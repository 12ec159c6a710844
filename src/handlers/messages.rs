//! Message handlers, nested under a hub.
//!
//! - GET /api/hubs/{id}/messages - List a hub's messages
//! - POST /api/hubs/{id}/messages - Add a message to a hub
//!
//! Both routes run behind `require_hub`, so the hub is already attached.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    error::AppError,
    middleware::context::RequestBody,
    models::{
        hub::Hub,
        message::{Message, NewMessage},
    },
    state::AppState,
};

/// Status returned when a message is created. Kept at the historical 210
/// rather than 201; clients already depend on it.
pub const MESSAGE_CREATED: u16 = 210;

/// Message returned when storing a new message fails. Shares its text with
/// the list route; clients already match on it.
pub const MESSAGE_CREATE_FAILED: &str = "Error getting the messages for the hub";

pub async fn list_hub_messages(
    State(state): State<AppState>,
    Extension(hub): Extension<Hub>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state
        .store
        .find_hub_messages(hub.id)
        .await
        .map_err(AppError::store("Error getting the messages for the hub"))?;

    Ok(Json(messages))
}

/// Add a message to the hub. The route's hub id becomes the message's `hub_id`.
///
/// # Request Body
///
/// ```json
/// { "content": "hi" }
/// ```
///
/// # Response
///
/// - **Success (210)**: the created message
/// - **Error (500)**: `{"message": "Error getting the messages for the hub"}`
pub async fn create_hub_message(
    State(state): State<AppState>,
    Extension(hub): Extension<Hub>,
    Extension(body): Extension<RequestBody>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let message = state
        .store
        .add_message(NewMessage::for_hub(hub.id, body.into_fields()))
        .await
        .map_err(AppError::store(MESSAGE_CREATE_FAILED))?;

    let status = StatusCode::from_u16(MESSAGE_CREATED).unwrap_or(StatusCode::CREATED);

    Ok((status, Json(message)))
}
