//! Route construction — declarative links turned into live HTTP routes.
//!
//! The root path serves a liveness banner and is reserved; every configured
//! link contributes one GET+POST route bound to its own `LinkEndpoint`.

use std::collections::HashSet;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use alertlink_chat::BotRegistry;
use alertlink_core::config::Config;
use alertlink_core::error::StartupError;

use crate::handlers::{banner, deliver_alert, link_probe, LinkEndpoint};

/// Build the full router from the loaded config and the live registry.
///
/// Link paths are validated here as well as at config load, so routers
/// assembled from hand-built parts in tests hit the same checks.
pub fn build_router(config: &Config, registry: &BotRegistry) -> Result<Router, StartupError> {
    // The liveness banner is registered outside the link loop; no link may
    // claim the root path.
    let mut router = Router::new().route("/", get(banner));

    let mut seen = HashSet::new();
    for link in &config.links {
        let bot = registry
            .get(&link.bot)
            .ok_or_else(|| StartupError::UnknownBot {
                url: link.url.clone(),
                bot: link.bot.clone(),
            })?;

        if link.url == "/" {
            return Err(StartupError::ReservedPath {
                bot: link.bot.clone(),
            });
        }
        if !seen.insert(link.url.clone()) {
            return Err(StartupError::DuplicateLink(link.url.clone()));
        }

        let endpoint = Arc::new(LinkEndpoint {
            bot: bot.clone(),
            channel: link.channel.clone(),
            path: link.url.clone(),
        });

        router = router.route(
            &link.url,
            get(link_probe).post(deliver_alert).with_state(endpoint),
        );
        info!(path = %link.url, bot = %link.bot, channel = %link.channel, "added route");
    }

    Ok(router.layer(TraceLayer::new_for_http()))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
