mod config;
mod emotion;
mod error;
mod sentiment;
mod server;
mod social;
mod summary;

use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use server::ReviewInsightsServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting review-insights MCP server");

    let config = Config::from_env()?;
    info!(
        mention_count = config.mention_count,
        seeded = config.social_seed.is_some(),
        "configuration loaded"
    );

    let catalog = config.load_catalog()?;
    let reviews = config.load_reviews()?;
    info!(
        products = catalog.len(),
        reviews = reviews.len(),
        "data ready"
    );

    let server = ReviewInsightsServer::new(catalog, reviews, &config);

    info!("MCP server ready, serving on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!(error = %e, "MCP server error");
    })?;

    service.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}
