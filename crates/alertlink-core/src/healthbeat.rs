//! Healthbeat service — periodic best-effort ping of an external URL.
//!
//! Deployments point this at a dead-man's-switch monitor, so the absence
//! of pings raises its own alert. Ping failures are logged and swallowed;
//! the loop never takes the process down.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing::{debug, info, warn};

/// Fixed ping interval: 5 minutes.
pub const HEALTHBEAT_INTERVAL_S: u64 = 5 * 60;

/// Timeout applied to each ping request.
const PING_TIMEOUT: Duration = Duration::from_secs(30);

/// Periodic pinger for the configured healthcheck URL.
pub struct HealthbeatService {
    /// Target URL, hit with a plain GET; the response body is ignored.
    url: String,
    /// Interval in seconds between pings.
    interval_s: u64,
    /// HTTP client for the outbound GET.
    http: reqwest::Client,
    /// Shutdown signal.
    shutdown: Arc<Notify>,
}

impl HealthbeatService {
    /// Create a new healthbeat service for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_interval(url, HEALTHBEAT_INTERVAL_S)
    }

    /// Create with a custom interval (shorter intervals are used in tests).
    pub fn with_interval(url: impl Into<String>, interval_s: u64) -> Self {
        Self {
            url: url.into(),
            interval_s,
            http: reqwest::Client::new(),
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Start the ping loop (blocking async loop).
    ///
    /// Returns when `stop()` is called.
    pub async fn start(&self) -> anyhow::Result<()> {
        info!(url = %self.url, interval_s = self.interval_s, "healthbeat started");

        loop {
            let sleep_duration = Duration::from_secs(self.interval_s);

            tokio::select! {
                _ = tokio::time::sleep(sleep_duration) => {
                    self.tick().await;
                }
                _ = self.shutdown.notified() => {
                    info!("healthbeat shutting down");
                    return Ok(());
                }
            }
        }
    }

    /// Stop the ping loop.
    pub fn stop(&self) {
        self.shutdown.notify_waiters();
    }

    /// Issue a single best-effort ping.
    async fn tick(&self) {
        match self
            .http
            .get(&self.url)
            .timeout(PING_TIMEOUT)
            .send()
            .await
        {
            Ok(resp) => debug!(status = %resp.status(), "healthbeat ping"),
            Err(e) => warn!(error = %e, "healthbeat ping failed"),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
