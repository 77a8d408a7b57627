//! RoomCache — join-once bookkeeping per bot.
//!
//! The first alert for a channel triggers a join; every later alert reuses
//! the cached handle. Entries are created lazily, never evicted, and live
//! until the process exits.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::debug;

use crate::base::{ChatClient, ChatError, RoomHandle};

/// Channel → joined-room handle map.
#[derive(Default)]
pub struct RoomCache {
    rooms: Mutex<HashMap<String, RoomHandle>>,
}

impl RoomCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Return the handle for `channel`, joining on first use.
    ///
    /// The cache lock is held across the join on purpose: losers of a
    /// first-request race wait for the winner's result instead of issuing
    /// duplicate joins, which some providers turn into duplicate membership
    /// events. Join failures propagate to the caller and are never cached.
    pub async fn ensure_joined(
        &self,
        client: &dyn ChatClient,
        channel: &str,
    ) -> Result<RoomHandle, ChatError> {
        let mut rooms = self.rooms.lock().await;

        if let Some(handle) = rooms.get(channel) {
            return Ok(handle.clone());
        }

        let handle = client.join(channel).await?;
        debug!(channel = %channel, room = %handle.room_id, "room cached");
        rooms.insert(channel.to_string(), handle.clone());
        Ok(handle)
    }

    /// Number of joined channels.
    pub async fn len(&self) -> usize {
        self.rooms.lock().await.len()
    }

    /// Whether no channel has been joined yet.
    pub async fn is_empty(&self) -> bool {
        self.rooms.lock().await.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
