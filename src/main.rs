//! Quill server binary
//!
//! Reads configuration from the file named by `QUILL_CONFIG`, falling back
//! to development defaults when the variable is unset.

use anyhow::Result;
use quill::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quill=info,tower_http=info")),
        )
        .init();

    let config = match std::env::var("QUILL_CONFIG") {
        Ok(path) => AppConfig::from_yaml_file(&path)?,
        Err(_) => {
            tracing::warn!("QUILL_CONFIG not set, using development defaults");
            AppConfig::default_config()
        }
    };

    quill::server::serve(config).await
}
