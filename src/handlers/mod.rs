//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives request data (path, query, values attached by middleware)
//! 2. Makes at most one hub store call
//! 3. Maps the outcome to a status code and JSON body

/// Hub endpoints
pub mod hubs;
/// Messages nested under a hub
pub mod messages;
/// Welcome page
pub mod root;
