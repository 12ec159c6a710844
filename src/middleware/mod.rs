//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Harden responses with security headers
//! - Log requests
//! - Attach values to the request context
//! - Short-circuit requests (missing hub, missing body)

/// Request context annotation: display name and parsed JSON body
pub mod context;
/// Trace logging
pub mod logging;
/// Per-route preconditions: hub exists, body present
pub mod preconditions;
/// Security response headers
pub mod security;
