//! Alertlink core — configuration, alert payloads, formatting, and the
//! healthbeat task.
//!
//! Everything in this crate is independent of a concrete chat backend or
//! HTTP server:
//! - **config**: declarative bots/links schema and the fatal-on-error loader
//! - **alert** / **format**: webhook payload types and deterministic rendering
//! - **healthbeat**: the optional periodic pinger
//! - **error**: startup error taxonomy

pub mod alert;
pub mod config;
pub mod error;
pub mod format;
pub mod healthbeat;
pub mod utils;
