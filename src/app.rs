//! Request pipeline assembly.
//!
//! [`build_app`] builds the whole pipeline once: the global middleware chain,
//! the welcome route, and the hubs router with its per-route preconditions.
//! The returned `Router` is immutable and is handed straight to `axum::serve`.
//!
//! # Global chain (outermost first)
//!
//! 1. Security headers
//! 2. Access log (`TraceLayer`)
//! 3. `"<METHOD> Request"` trace line
//! 4. Display name annotation
//! 5. JSON body parsing
//!
//! Signaled failures from any stage are rendered by `Failure`'s
//! `IntoResponse`, the centralized error responder.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    LatencyUnit,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    config::Config,
    handlers,
    middleware::{
        context::{self, BodyLimit, DisplayName},
        logging, preconditions, security,
    },
    state::AppState,
};

/// Path prefix of the hubs resource family.
pub const HUBS_PREFIX: &str = "/api/hubs";

/// Build the complete HTTP application.
pub fn build_app(state: AppState, config: &Config) -> Router {
    let global = ServiceBuilder::new()
        .layer(from_fn(security::security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(from_fn(logging::log_request_method))
        .layer(from_fn_with_state(
            DisplayName(config.display_name.clone()),
            context::assign_display_name,
        ))
        .layer(from_fn_with_state(
            BodyLimit(config.body_limit_bytes),
            context::parse_json_body,
        ));

    Router::new()
        .route("/", get(handlers::root::welcome))
        .nest(HUBS_PREFIX, hubs_router(state.clone()))
        .layer(global)
        .with_state(state)
}

/// Routes under [`HUBS_PREFIX`].
///
/// Preconditions run in the order listed in each `ServiceBuilder`.
///
/// | Method | Path | Chain |
/// |---|---|---|
/// | GET | `/` | list |
/// | POST | `/` | create |
/// | GET | `/{id}` | require_hub → get |
/// | DELETE | `/{id}` | require_body → delete |
/// | PUT | `/{id}` | require_hub → require_body → update |
/// | GET | `/{id}/messages` | require_hub → list messages |
/// | POST | `/{id}/messages` | require_hub → require_body → create message |
pub fn hubs_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::hubs::list_hubs))
        .route("/", post(handlers::hubs::create_hub))
        .route(
            "/{id}",
            get(handlers::hubs::get_hub)
                .route_layer(from_fn_with_state(state.clone(), preconditions::require_hub)),
        )
        .route(
            "/{id}",
            delete(handlers::hubs::delete_hub).route_layer(from_fn(preconditions::require_body)),
        )
        .route(
            "/{id}",
            put(handlers::hubs::update_hub).route_layer(
                ServiceBuilder::new()
                    .layer(from_fn_with_state(state.clone(), preconditions::require_hub))
                    .layer(from_fn(preconditions::require_body)),
            ),
        )
        .route(
            "/{id}/messages",
            get(handlers::messages::list_hub_messages)
                .route_layer(from_fn_with_state(state.clone(), preconditions::require_hub)),
        )
        .route(
            "/{id}/messages",
            post(handlers::messages::create_hub_message).route_layer(
                ServiceBuilder::new()
                    .layer(from_fn_with_state(state, preconditions::require_hub))
                    .layer(from_fn(preconditions::require_body)),
            ),
        )
        .layer(from_fn(logging::log_hubs_router))
}
