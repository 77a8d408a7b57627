//! Matrix chat backend — plain client-server API over REST.
//!
//! No SDK: the relay only needs two calls, join and send, both available as
//! simple authenticated JSON endpoints. The access token is obtained out of
//! band and fixed at construction.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use alertlink_core::config::BotConfig;

use crate::base::{ChatClient, ChatError, RoomHandle};

// ─────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────

/// Client-server API prefix.
const CLIENT_API: &str = "_matrix/client/v3";

/// Timeout applied to each provider call, so a slow homeserver cannot
/// exhaust the server's request workers. Expiry is a delivery failure, not
/// a retry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ─────────────────────────────────────────────
// MatrixClient
// ─────────────────────────────────────────────

/// Matrix backend bound to (server, user id, access token).
pub struct MatrixClient {
    /// Homeserver base URL, without trailing slash.
    server: String,
    /// Bot user id, kept for logging.
    user_id: String,
    /// Access token, sent as a bearer header.
    token: String,
    /// HTTP client shared across calls.
    http: reqwest::Client,
    /// Per-process counter for event transaction ids.
    txn_counter: AtomicU64,
    /// Transaction id prefix, seeded from the construction time so ids stay
    /// unique across restarts.
    txn_prefix: String,
}

impl MatrixClient {
    /// Create a client from a bot config entry.
    pub fn new(config: &BotConfig) -> Self {
        Self::with_credentials(&config.server, &config.user_id, &config.token)
    }

    /// Create a client from raw credentials.
    pub fn with_credentials(server: &str, user_id: &str, token: &str) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
            token: token.to_string(),
            http: reqwest::Client::new(),
            txn_counter: AtomicU64::new(0),
            txn_prefix: format!("alertlink{}", chrono::Utc::now().timestamp_millis()),
        }
    }

    fn endpoint(&self, tail: &str) -> String {
        format!("{}/{}/{}", self.server, CLIENT_API, tail)
    }

    /// Next unique transaction id for an event PUT.
    fn next_txn_id(&self) -> String {
        let n = self.txn_counter.fetch_add(1, Ordering::Relaxed);
        format!("{}.{}", self.txn_prefix, n)
    }

    /// Turn a non-2xx response into an API error with the server's message.
    async fn api_error(endpoint: &'static str, resp: reqwest::Response) -> ChatError {
        let status = resp.status();
        let message = match resp.json::<Value>().await {
            Ok(body) => body["error"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        };
        ChatError::Api { endpoint, message }
    }
}

#[async_trait]
impl ChatClient for MatrixClient {
    fn name(&self) -> &str {
        "matrix"
    }

    async fn join(&self, channel: &str) -> Result<RoomHandle, ChatError> {
        // Aliases like "#ops:example.org" need their '#' and ':' escaped.
        let url = self.endpoint(&format!("join/{}", urlencoding::encode(channel)));
        debug!(user = %self.user_id, channel = %channel, "joining room");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({}))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::api_error("join", resp).await);
        }

        let body: Value = resp.json().await?;
        let room_id = body["room_id"].as_str().unwrap_or("");
        if room_id.is_empty() {
            return Err(ChatError::MissingRoomId {
                channel: channel.to_string(),
            });
        }

        info!(channel = %channel, room = %room_id, "joined room");
        Ok(RoomHandle::new(room_id))
    }

    async fn send(
        &self,
        room: &RoomHandle,
        text: &str,
        html: Option<&str>,
    ) -> Result<(), ChatError> {
        let url = self.endpoint(&format!(
            "rooms/{}/send/m.room.message/{}",
            urlencoding::encode(&room.room_id),
            self.next_txn_id(),
        ));

        let mut body = json!({
            "msgtype": "m.text",
            "body": text,
        });
        if let Some(html) = html {
            body["format"] = json!("org.matrix.custom.html");
            body["formatted_body"] = json!(html);
        }

        let resp = self
            .http
            .put(&url)
            .bearer_auth(&self.token)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::api_error("send", resp).await);
        }

        debug!(room = %room.room_id, chars = text.len(), "message sent");
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
