//! Data models for hubs and their messages.
//!
//! This module contains the records handed to and returned by the hub store.

/// Hub records, store inputs and list filters
pub mod hub;
/// Messages nested under a hub
pub mod message;
