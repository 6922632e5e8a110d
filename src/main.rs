//! Azure DevOps MCP Server
//!
//! Exposes Azure DevOps as MCP tools: Git repositories, pull requests,
//! work items, pipelines, and wiki pages.
//!
//! # Configuration
//!
//! - `AZURE_DEVOPS_ORG_URL` - organization URL, e.g. `https://dev.azure.com/contoso`
//! - `AZURE_DEVOPS_PAT` - personal access token
//! - `AZURE_DEVOPS_PROJECT` - default project (optional)
//! - `AZURE_DEVOPS_REPOSITORY` - default repository (optional)
//!
//! or the equivalent keys in `~/.config/azure-devops-mcp.toml`.
//!
//! Configure in `.mcp.json`:
//! ```json
//! {
//!   "mcpServers": {
//!     "azure-devops": {
//!       "command": "azure-devops-mcp",
//!       "env": { "AZURE_DEVOPS_ORG_URL": "...", "AZURE_DEVOPS_PAT": "..." }
//!     }
//!   }
//! }
//! ```

use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod ado;
mod aggregate;
mod config;
mod format;
mod handlers;
mod params;
mod pipeline_yaml;
mod resolve;
mod server;
mod types;

use config::AdoConfig;
use server::AzureDevOpsMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging goes to stderr; stdout carries the MCP protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive("azure_devops_mcp=info".parse()?))
        .init();

    tracing::info!("Starting Azure DevOps MCP Server");

    let config = AdoConfig::load()?;
    tracing::info!("Organization: {}", config.organization_url);

    let server = AzureDevOpsMcpServer::new(config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
