//! Azure DevOps MCP Library
//!
//! MCP-compatible tools for Azure DevOps: Git repositories, pull requests,
//! work items, pipelines, and wiki pages, over the Azure DevOps REST API.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use azure_devops_mcp::{AdoConfig, AzureDevOpsMcpServer};
//!
//! let config = AdoConfig::load()?;
//! let server = AzureDevOpsMcpServer::new(config)?;
//! // Serve via stdio or use with an in-memory transport
//! ```
//!
//! # Requirements
//! - An Azure DevOps organization URL and a personal access token, supplied
//!   via `AZURE_DEVOPS_ORG_URL` / `AZURE_DEVOPS_PAT` or a config file.

pub mod ado;
pub mod aggregate;
pub mod config;
pub mod format;
pub mod handlers;
pub mod params;
pub mod pipeline_yaml;
pub mod resolve;
pub mod server;
pub mod types;

// Re-export main entry points
pub use config::AdoConfig;
pub use server::AzureDevOpsMcpServer;

// Re-export parameter types for direct API usage
pub use params::*;
