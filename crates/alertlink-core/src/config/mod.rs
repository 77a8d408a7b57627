//! Configuration system — schema and loading.
//!
//! # Usage
//! ```no_run
//! use alertlink_core::config;
//!
//! let cfg = config::load_config(None).expect("config");
//! println!("{} bots, {} links", cfg.bots.len(), cfg.links.len());
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{get_config_path, load_config};
pub use schema::{BotConfig, BotKind, Config, LinkConfig};
