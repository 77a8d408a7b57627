//! HTTP request handlers for the webhook surface.
//!
//! Each link route shares the same pair of handlers; the per-link state is
//! an explicit `LinkEndpoint` attached as axum route state, not a hidden
//! closure capture.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use alertlink_chat::Bot;
use alertlink_core::alert::AlertBatch;
use alertlink_core::format;
use alertlink_core::utils::truncate_string;

use crate::error::{GatewayError, GatewayResult};

/// Liveness banner served on `/`.
pub const BANNER: &str = "alertlink is up and running";

/// Static body for GET on a link route. Lets operators and probes verify an
/// endpoint exists without posting a chat message.
pub const LINK_INFO: &str = "this is just an endpoint for the alertmanager";

/// Longest rejected-payload prefix that gets logged.
const LOG_PAYLOAD_CHARS: usize = 512;

/// Per-link handler state: everything one delivery needs.
pub struct LinkEndpoint {
    /// The bot that posts into the channel (client + room cache).
    pub bot: Arc<Bot>,
    /// Provider-specific channel identifier.
    pub channel: String,
    /// Normalized URL path, kept for logging.
    pub path: String,
}

/// Acknowledgement body for a delivered alert.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always `"ok"` on the success path.
    pub status: String,
}

/// Handle GET `/` — liveness banner, no side effects.
pub async fn banner() -> &'static str {
    BANNER
}

/// Handle GET on a link route — static info text, no side effects.
pub async fn link_probe() -> &'static str {
    LINK_INFO
}

/// Handle POST on a link route — parse, format, join once, send.
pub async fn deliver_alert(
    State(endpoint): State<Arc<LinkEndpoint>>,
    body: Bytes,
) -> GatewayResult<Json<StatusResponse>> {
    let batch: AlertBatch = serde_json::from_slice(&body).map_err(|e| {
        // The raw body never goes back to the caller; log a prefix of it
        // server-side so rejected payloads stay debuggable.
        warn!(
            path = %endpoint.path,
            payload = %truncate_string(&String::from_utf8_lossy(&body), LOG_PAYLOAD_CHARS),
            error = %e,
            "rejected malformed alert payload"
        );
        GatewayError::Payload(e)
    })?;

    let room = endpoint
        .bot
        .rooms
        .ensure_joined(endpoint.bot.client.as_ref(), &endpoint.channel)
        .await?;

    let text = format::render(&batch, false);
    let html = format::render(&batch, true);
    endpoint.bot.client.send(&room, &text, Some(&html)).await?;

    info!(
        path = %endpoint.path,
        channel = %endpoint.channel,
        alerts = batch.alerts.len(),
        "alerts delivered"
    );

    Ok(Json(StatusResponse {
        status: "ok".into(),
    }))
}
