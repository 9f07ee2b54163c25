use std::net::SocketAddr;

use scribe::metrics::Metrics;
use scribe::store::Store;
use scribe::{AppState, app};

const BIND_ADDR: &str = "127.0.0.1:8000";
const DATA_DIR: &str = "data";
const STATIC_DIR: &str = "static";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let store = Store::new(DATA_DIR)?;
    let metrics = Metrics::new()?;
    std::fs::create_dir_all(STATIC_DIR)?;

    let state = AppState::new(store, metrics, STATIC_DIR);
    let router = app(state);

    let addr: SocketAddr = BIND_ADDR.parse()?;
    tracing::info!(%addr, "server running");
    tracing::info!("static files: http://{addr}/");
    tracing::info!("api base:     http://{addr}/api");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
