//! Startup error taxonomy.
//!
//! Every variant here is fatal: configuration problems stop the process
//! before the HTTP port binds, instead of surfacing on the first alert.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or wiring bots and routes.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        /// Path that was attempted.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected schema.
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        /// Path that was attempted.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two bots share the same name.
    #[error("duplicate bot name: {0}")]
    DuplicateBot(String),

    /// A link references a bot that is not configured.
    #[error("link {url} references unknown bot: {bot}")]
    UnknownBot {
        /// URL path of the offending link.
        url: String,
        /// Bot name the link asked for.
        bot: String,
    },

    /// A link claims the root path, which is reserved for the liveness banner.
    #[error("link path / is reserved for the liveness banner (bot {bot})")]
    ReservedPath {
        /// Bot name the link asked for.
        bot: String,
    },

    /// Two links register the same URL path.
    #[error("duplicate link path: {0}")]
    DuplicateLink(String),

    /// The configured bot kind has no usable backend.
    #[error("bot {bot} uses unsupported backend: {kind}")]
    UnsupportedBackend {
        /// Bot name.
        bot: String,
        /// The rejected backend tag.
        kind: String,
    },
}
