//! Per-route precondition middleware.
//!
//! Attached with `route_layer` in `app::hubs_router`, in the order the
//! route declares them. A precondition either lets the request through or
//! signals a [`Failure`] that skips the rest of the chain.

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, Failure},
    middleware::context::RequestBody,
    models::hub::HubId,
    state::AppState,
};

pub const HUB_NOT_FOUND: &str = "Hub not found; invalid id";
pub const BODY_REQUIRED: &str = "Please include request body";
pub const LOOKUP_FAILED: &str = "Failed to process request";

/// Resolve the `{id}` path parameter to a hub and attach it to the request.
///
/// # Outcomes
///
/// - Hub found: inserted as an `Extension<Hub>`, request continues
/// - No such hub (or an id that is not a number): signals `HUB_NOT_FOUND`
/// - Store rejects the lookup: responds 500 directly, skipping the error responder
pub async fn require_hub(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Ok(id) = id.parse::<HubId>() else {
        return Err(Failure::new(HUB_NOT_FOUND).into());
    };

    let hub = state
        .store
        .find_by_id(id)
        .await
        .map_err(AppError::store(LOOKUP_FAILED))?
        .ok_or_else(|| Failure::new(HUB_NOT_FOUND))?;

    req.extensions_mut().insert(hub);

    Ok(next.run(req).await)
}

/// Reject requests whose JSON body is absent or has no fields.
pub async fn require_body(req: Request, next: Next) -> Result<Response, AppError> {
    let has_fields = req
        .extensions()
        .get::<RequestBody>()
        .is_some_and(RequestBody::has_fields);

    if !has_fields {
        return Err(Failure::new(BODY_REQUIRED).into());
    }

    Ok(next.run(req).await)
}
