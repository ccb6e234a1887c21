//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - reqwest-based analytics server client
//! - Tokio runtime bridge for async operations

pub mod api;
pub mod runtime;
