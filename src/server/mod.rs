//! Server module: shared state, request handlers, routes, and the serve loop

pub mod handlers;
pub mod router;

pub use handlers::AppState;
pub use router::build_router;

use crate::config::AppConfig;
use crate::storage::InMemoryEntryStore;
use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Bind the configured address and serve the application.
pub async fn serve(config: AppConfig) -> Result<()> {
    let bind_addr = config.bind_addr.clone();
    let store = Arc::new(InMemoryEntryStore::new());
    let state = AppState::new(config, store)?;
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "quill listening");
    axum::serve(listener, app).await?;
    Ok(())
}
