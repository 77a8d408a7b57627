//! Alertlink chat — backend clients and per-bot state.
//!
//! This crate provides:
//! - **base**: the `ChatClient` trait, `RoomHandle`, and `ChatError`
//! - **matrix**: the Matrix client-server backend
//! - **rooms**: the join-once `RoomCache`
//! - **registry**: `BotRegistry`, built once from config at startup

pub mod base;
pub mod matrix;
pub mod registry;
pub mod rooms;

pub use base::{ChatClient, ChatError, RoomHandle};
pub use matrix::MatrixClient;
pub use registry::{Bot, BotRegistry};
pub use rooms::RoomCache;
