// Touchline entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Read proxy settings from the environment
// 3. Spawn the reverse-proxy server task
// 4. Build the API client pointed at the local proxy
// 5. Restore any saved session identity
// 6. Run the TUI event loop (blocking until the user quits)
// 7. Abort the proxy task on exit

use touchline::app::AppState;
use touchline::client::ApiClient;
use touchline::config::{self, ProxyConfig};
use touchline::proxy::{self, ProxyState};
use touchline::session::SessionStore;
use touchline::tui;

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not the terminal)
    init_tracing()?;
    info!("Touchline starting up");

    // 2. Proxy settings
    let proxy_config = ProxyConfig::from_env().context("failed to read proxy settings")?;
    info!(
        "proxy config: port={}, upstream={}",
        proxy_config.port, proxy_config.upstream
    );

    // 3. Spawn the proxy server task
    let proxy_state = Arc::new(
        ProxyState::new(proxy_config.upstream.clone())
            .context("failed to build proxy http client")?,
    );
    let serve_config = proxy_config.clone();
    let proxy_handle = tokio::spawn(async move {
        if let Err(e) = proxy::serve(&serve_config, proxy_state).await {
            error!("proxy server error: {e}");
        }
    });

    // 4. API client, routed through the local proxy
    let client = ApiClient::new(format!("http://127.0.0.1:{}/api", proxy_config.port))
        .context("failed to build api client")?;

    // 5. Session store and app state (restores a saved identity, if any)
    let store = SessionStore::new(config::SESSION_FILE);
    let app_state = AppState::new(client, store);

    // 6. Run the TUI (blocks until the user quits)
    if let Err(e) = tui::run(app_state).await {
        error!("TUI error: {e}");
    }

    // 7. The proxy loops forever; stop it explicitly.
    proxy_handle.abort();

    info!("Touchline shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("touchline.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("touchline=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
