//! Alertlink gateway — the HTTP webhook surface.
//!
//! This crate provides:
//! - **routes**: declarative links turned into live GET+POST routes
//! - **handlers**: the liveness banner, link probe, and alert delivery path
//! - **error**: per-request error mapping (400 payload, 502 delivery)
//! - **server**: TCP or Unix-socket binding with graceful shutdown

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{GatewayError, GatewayResult};
pub use routes::build_router;
