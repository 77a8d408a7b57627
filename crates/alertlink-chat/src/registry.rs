//! BotRegistry — one live client and room cache per configured bot.
//!
//! Built once at startup. Unsupported backends and duplicate names fail
//! here, before the HTTP port binds, instead of on the first alert.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use alertlink_core::config::{BotKind, Config};
use alertlink_core::error::StartupError;

use crate::base::ChatClient;
use crate::matrix::MatrixClient;
use crate::rooms::RoomCache;

/// A bot's live state: its provider client plus the join-once room cache.
pub struct Bot {
    /// Provider client, stateless after construction.
    pub client: Arc<dyn ChatClient>,
    /// Per-bot channel → room handle cache.
    pub rooms: RoomCache,
}

/// Configured bots, keyed by name.
#[derive(Default)]
pub struct BotRegistry {
    bots: HashMap<String, Arc<Bot>>,
}

impl std::fmt::Debug for BotRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotRegistry")
            .field("bots", &self.bots.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BotRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bots: HashMap::new(),
        }
    }

    /// Build the registry from config, constructing one client per bot.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let mut registry = Self::new();

        for bot in &config.bots {
            let client: Arc<dyn ChatClient> = match bot.kind {
                BotKind::Matrix => Arc::new(MatrixClient::new(bot)),
                // The Rocket.Chat backend was retired; old configs naming it
                // must fail at startup, not at first delivery.
                BotKind::Rocket => {
                    return Err(StartupError::UnsupportedBackend {
                        bot: bot.name.clone(),
                        kind: bot.kind.as_str().to_string(),
                    });
                }
            };
            registry.insert(&bot.name, client)?;
        }

        Ok(registry)
    }

    /// Register a client under `name`. Duplicate names are a startup error.
    pub fn insert(
        &mut self,
        name: &str,
        client: Arc<dyn ChatClient>,
    ) -> Result<(), StartupError> {
        if self.bots.contains_key(name) {
            return Err(StartupError::DuplicateBot(name.to_string()));
        }

        info!(bot = %name, backend = %client.name(), "registered bot");
        self.bots.insert(
            name.to_string(),
            Arc::new(Bot {
                client,
                rooms: RoomCache::new(),
            }),
        );
        Ok(())
    }

    /// Look up a bot by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Bot>> {
        self.bots.get(name)
    }

    /// Sorted bot names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bots.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered bots.
    pub fn len(&self) -> usize {
        self.bots.len()
    }

    /// Whether no bots are registered.
    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
