//! gcs-upload API library
//!
//! This crate provides the HTTP handlers, middleware, and application setup
//! for the upload gateway.

mod telemetry;

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::HttpAppError;
pub use state::AppState;
