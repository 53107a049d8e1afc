//! Single gateway entry point. `DEVELOPMENT=true|false` selects the dev or
//! prod profile (port 8001 with reload vs. 8000 without); individual fields
//! can be overridden through the environment.

use bb_core::BinBotConfig;
use bb_server::{app_with_state, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BinBotConfig::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        host = %config.server.host,
        port = config.server.port,
        reload = config.server.reload_enabled,
        watch_paths = ?config.server.watch_paths,
        session_ttl_minutes = config.session.ttl_minutes,
        "starting binbot gateway"
    );
    if config.server.reload_enabled {
        // Reload-on-change is the supervisor's job; the flag is surfaced so
        // operators can see which profile is running.
        info!("reload-on-change enabled (handled by external supervisor)");
    }

    let state = AppState::from_config(&config);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "binbot gateway listening");
    axum::serve(listener, app_with_state(state)).await?;
    Ok(())
}
