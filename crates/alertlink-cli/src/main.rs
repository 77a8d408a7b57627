//! Alertlink — entry point.
//!
//! Single binary, fully config-driven: load the config, build one chat
//! client per bot, register one route per link, serve until Ctrl-C.
//!
//! Startup sequence:
//! 1. Load config (fatal on any problem, before the port binds)
//! 2. Build the bot registry (one client + room cache per bot)
//! 3. Build the router (one GET+POST route per link, banner on `/`)
//! 4. Spawn the healthbeat task if a healthcheck URL is configured
//! 5. Serve on TCP or the Unix socket until Ctrl-C

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use alertlink_chat::BotRegistry;
use alertlink_core::config::load_config;
use alertlink_core::healthbeat::HealthbeatService;
use alertlink_gateway::{build_router, server};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Relay alert webhooks into chat rooms.
#[derive(Parser)]
#[command(name = "alertlink", version, about, long_about = None)]
struct Cli {
    /// Path to the config file (default: ~/.alertlink/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    logs: bool,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    // 1. Load config — fatal on any problem, before the port binds.
    let config = load_config(cli.config.as_deref()).context("configuration error")?;

    // 2. One chat client per bot.
    let registry = BotRegistry::from_config(&config).context("bot registry error")?;

    // 3. One route per link.
    let router = build_router(&config, &registry).context("route registration error")?;

    info!(
        bots = ?registry.names(),
        links = config.links.len(),
        "alertlink starting"
    );

    println!();
    println!("  alertlink");
    println!("  Bots:   {}", registry.names().join(", "));
    println!("  Links:  {}", config.links.len());
    if config.unix_socket {
        println!("  Listen: {}", server::SOCKET_PATH);
    } else {
        println!("  Listen: {}:{}", config.host, config.port);
    }
    if let Some(url) = &config.healthcheck {
        println!("  Healthbeat: {url} every 5m");
    }
    println!();
    println!("  Ctrl+C to stop");
    println!();

    // 4. Healthbeat, if configured.
    let healthbeat = config
        .healthcheck
        .as_ref()
        .map(|url| Arc::new(HealthbeatService::new(url.clone())));
    let beat_handle = healthbeat.as_ref().map(|beat| {
        let beat = beat.clone();
        tokio::spawn(async move {
            if let Err(e) = beat.start().await {
                tracing::error!(error = %e, "healthbeat error");
            }
        })
    });

    // 5. Serve until Ctrl-C.
    server::serve(router, &config, shutdown_signal()).await?;

    if let Some(beat) = &healthbeat {
        beat.stop();
    }
    if let Some(handle) = beat_handle {
        let _ = handle.await;
    }

    println!("  alertlink stopped. Goodbye!");
    Ok(())
}

/// Resolve when Ctrl-C arrives.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
