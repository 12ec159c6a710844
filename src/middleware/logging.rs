//! Request logging.
//!
//! Access logging (method, path, status, latency) is handled by
//! `tower_http::trace::TraceLayer` in `app::build_app`. The functions here are
//! the lighter trace lines emitted alongside it.

use axum::{extract::Request, middleware::Next, response::Response};

/// Log the request method for every request.
pub async fn log_request_method(req: Request, next: Next) -> Response {
    tracing::info!("{} Request", req.method());
    next.run(req).await
}

/// Log every request that reaches the hubs router.
pub async fn log_hubs_router(req: Request, next: Next) -> Response {
    tracing::info!(path = %req.uri().path(), "hubs router");
    next.run(req).await
}
