//! Server — binds the webhook surface to TCP or a Unix domain socket.

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use axum::Router;
use tokio::net::{TcpListener, UnixListener};
use tracing::info;

use alertlink_core::config::Config;

/// Well-known socket path used when `unix-socket` is set.
pub const SOCKET_PATH: &str = "/tmp/alertlink.sock";

/// Serve `router` on the configured transport until `shutdown` completes.
pub async fn serve<F>(router: Router, config: &Config, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if config.unix_socket {
        serve_unix(router, Path::new(SOCKET_PATH), shutdown).await
    } else {
        let addr: SocketAddr = format!("{}:{}", config.host, config.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
        serve_tcp(router, addr, shutdown).await
    }
}

/// Serve on a TCP listener with graceful shutdown.
pub async fn serve_tcp<F>(router: Router, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("server shut down");
    Ok(())
}

/// Serve on a Unix domain socket; the socket file is removed again on
/// controlled shutdown.
pub async fn serve_unix<F>(router: Router, path: &Path, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    // A stale socket left by an unclean exit would block the bind.
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("failed to remove stale socket {}", path.display()))?;
    }

    let listener = UnixListener::bind(path)
        .with_context(|| format!("failed to bind {}", path.display()))?;
    info!(socket = %path.display(), "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    let _ = std::fs::remove_file(path);
    info!("server shut down");
    Ok(())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
