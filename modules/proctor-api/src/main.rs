use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use proctor_api::{build_router, AppState};
use proctor_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("proctor=info".parse()?))
        .init();

    let config = Config::from_env()?;
    let state = Arc::new(AppState::new(&config));
    let app = build_router(state);

    let addr = config.bind_addr();
    info!("Proctor API starting on {addr}");
    info!("Real-time channel at ws://{addr}/ws");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
