// Entrypoint for the widget API server.

use tracing_subscriber::EnvFilter;
use widget_registry::server::{serve, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity; default to info so the listening
    // address and mutations show up.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    serve(config).await?;
    Ok(())
}
