//! HTTP server binary for the matching venue.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use venue_core::Engine;
use venue_server::config::Config;
use venue_server::state::AppState;
use venue_server::{demo, routes, stats_task};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    tracing::info!(
        addr = %config.socket_addr_string(),
        demo = config.demo,
        "starting venue-server"
    );

    // One engine instance owns all per-symbol state; the API layer and
    // background tasks share it by reference.
    let engine = Arc::new(Engine::new());
    let state = AppState::new(engine.clone());

    tokio::spawn(stats_task::run_throughput_task(
        engine.clone(),
        Duration::from_millis(config.stats_interval_ms),
    ));

    if config.demo {
        tokio::spawn(demo::run_demo_flow(engine.clone()));
    }

    let app = routes::router(state);
    let listener = TcpListener::bind(config.socket_addr_string()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
