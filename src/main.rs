mod config;
mod error;
mod mcp;
mod pages;
mod project;
mod scrapbox;
mod search;
mod tools;

#[cfg(test)]
mod testing;

use anyhow::Result;
use config::Config;
use scrapbox::ScrapboxClient;
use std::sync::Arc;
use tools::ToolRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = Config::load()?;

    // Initialize logging (stderr; stdout belongs to the protocol)
    let mut logger = pretty_env_logger::formatted_builder();
    logger.parse_filters(&config.logging.level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    log::info!("Starting Cosense MCP server...");

    let projects = Arc::new(config.projects()?);
    log::info!(
        "Configured projects: {} (default: {})",
        projects.iter().collect::<Vec<_>>().join(", "),
        projects.default_project()
    );
    if config.scrapbox.connect_sid.is_none() {
        log::warn!("SCRAPBOX_CONNECT_SID not set; only public projects are reachable");
    }

    let client = ScrapboxClient::new(
        config.scrapbox.api_url.clone(),
        config.scrapbox.connect_sid.as_deref(),
    )?;
    let tools = ToolRegistry::new(Arc::new(client), projects);

    log::info!("Cosense MCP server running on stdio");
    mcp::serve_stdio(&tools).await?;

    log::info!("Server stopped");
    Ok(())
}
