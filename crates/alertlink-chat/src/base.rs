//! ChatClient trait — the abstract capability every chat backend implements.
//!
//! The gateway only ever talks to `dyn ChatClient`:
//! - authenticate once at construction
//! - `join()` a channel and get back a room handle
//! - `send()` text plus optional HTML to a joined room

use async_trait::async_trait;
use thiserror::Error;

/// Handle to a joined room, as returned by the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomHandle {
    /// Provider-assigned room identifier (e.g. `!abc123:example.org`).
    pub room_id: String,
}

impl RoomHandle {
    /// Create a handle from a provider room id.
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
        }
    }
}

/// Errors from chat-provider calls.
#[derive(Debug, Error)]
pub enum ChatError {
    /// HTTP transport failure (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with an API-level error.
    #[error("{endpoint} failed: {message}")]
    Api {
        /// Which call failed (`join`, `send`).
        endpoint: &'static str,
        /// Provider error message, or the HTTP status when none was given.
        message: String,
    },

    /// A join succeeded at the HTTP level but returned no usable room id.
    /// Caching such a handle would wedge the channel, so it is an error.
    #[error("join of {channel} returned no room id")]
    MissingRoomId {
        /// The channel that was joined.
        channel: String,
    },
}

/// Every chat backend implements this trait.
///
/// The registry holds `Arc<dyn ChatClient>`; route handlers share the same
/// instance, which is read-only after construction apart from its own
/// session internals.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Backend name for logging (e.g. `"matrix"`).
    fn name(&self) -> &str;

    /// Join `channel` and return a handle to the room.
    ///
    /// Callers go through `RoomCache::ensure_joined`, which guarantees at
    /// most one join per channel for the process lifetime.
    async fn join(&self, channel: &str) -> Result<RoomHandle, ChatError>;

    /// Send a message to a joined room. `html` carries the formatted body.
    async fn send(
        &self,
        room: &RoomHandle,
        text: &str,
        html: Option<&str>,
    ) -> Result<(), ChatError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// A mock backend for testing.
    struct MockClient {
        joins: Arc<AtomicUsize>,
        sent: Arc<tokio::sync::Mutex<Vec<(String, Option<String>)>>>,
    }

    impl MockClient {
        fn new() -> Self {
            Self {
                joins: Arc::new(AtomicUsize::new(0)),
                sent: Arc::new(tokio::sync::Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl ChatClient for MockClient {
        fn name(&self) -> &str {
            "mock"
        }

        async fn join(&self, channel: &str) -> Result<RoomHandle, ChatError> {
            self.joins.fetch_add(1, Ordering::SeqCst);
            Ok(RoomHandle::new(format!("!{channel}")))
        }

        async fn send(
            &self,
            _room: &RoomHandle,
            text: &str,
            html: Option<&str>,
        ) -> Result<(), ChatError> {
            let mut sent = self.sent.lock().await;
            sent.push((text.to_string(), html.map(str::to_string)));
            Ok(())
        }
    }

    #[test]
    fn test_mock_client_name() {
        let client = MockClient::new();
        assert_eq!(client.name(), "mock");
    }

    #[tokio::test]
    async fn test_mock_client_join() {
        let client = MockClient::new();
        let handle = client.join("#ops").await.unwrap();
        assert_eq!(handle.room_id, "!#ops");
        assert_eq!(client.joins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mock_client_send() {
        let client = MockClient::new();
        let room = RoomHandle::new("!room:example.org");
        client.send(&room, "hello", Some("<b>hello</b>")).await.unwrap();

        let sent = client.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "hello");
        assert_eq!(sent[0].1.as_deref(), Some("<b>hello</b>"));
    }

    #[test]
    fn test_room_handle_equality() {
        assert_eq!(RoomHandle::new("!a"), RoomHandle::new("!a"));
        assert_ne!(RoomHandle::new("!a"), RoomHandle::new("!b"));
    }

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::Api {
            endpoint: "join",
            message: "M_FORBIDDEN".into(),
        };
        assert_eq!(err.to_string(), "join failed: M_FORBIDDEN");

        let err = ChatError::MissingRoomId {
            channel: "#ops".into(),
        };
        assert_eq!(err.to_string(), "join of #ops returned no room id");
    }
}
