use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use gamegraph_api::config::Config;
use gamegraph_api::db::MemoryGraph;
use gamegraph_api::routes::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gamegraph_api=debug,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let state = AppState {
        store: Arc::new(MemoryGraph::new()),
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(%addr, "gamegraph-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
