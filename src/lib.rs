//! Hubs API
//!
//! A REST API for hubs and the messages posted to them, built around an
//! explicit request pipeline.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: PostgreSQL with sqlx, or an in-memory store when no database is configured
//! - **Format**: JSON requests/responses
//!
//! # Request Flow
//!
//! 1. Global middleware chain (`app::build_app`)
//! 2. Route match under `/api/hubs`
//! 3. Per-route preconditions (`middleware::preconditions`)
//! 4. Handler (`handlers`)
//! 5. Any signaled failure is rendered by the error responder (`error::Failure`)

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
