//! Headless lucky-wheel server binary.
//!
//! Starts the axum web server and the history rollover loop, then waits for
//! Ctrl+C.

use tracing_subscriber::EnvFilter;

use wheel_server::app::SharedState;
use wheel_server::background;
use wheel_server::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting lucky-wheel server");

    let (db, config, dir) = wheel_server::init_foundation()?;
    let state = SharedState::new(db, config, dir);

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    let s = state.clone();
    tokio::spawn(async move { background::history_rollover_loop(s).await });

    tracing::info!(
        port = state.server_port(),
        "Server running. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    state.shutdown_token().cancel();
    let _ = server_handle.await;
    Ok(())
}
