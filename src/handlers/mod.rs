//! Handler implementations for Azure DevOps MCP tools
//!
//! Organized by domain: repo, pr, workitem, pipeline, wiki.
//!
//! Failure contract: every failure - missing configuration, not-found after
//! a full scan, fatal backend errors - is returned as a successful tool
//! result whose text starts with `Error:`. Transport-level `Err` is
//! reserved for serialization failures of our own reply.

mod pipeline;
mod pr;
mod repo;
mod wiki;
mod workitem;

pub use pipeline::*;
pub use pr::*;
pub use repo::*;
pub use wiki::*;
pub use workitem::*;

use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use serde::Serialize;

use crate::ado::AdoClient;
use crate::config::AdoConfig;
use crate::resolve::pick_identifier;

/// Shared state handed to every handler
pub struct Ctx {
    pub client: AdoClient,
    pub config: AdoConfig,
}

impl Ctx {
    pub fn new(config: AdoConfig) -> Self {
        Self {
            client: AdoClient::new(&config),
            config,
        }
    }
}

/// A plain text reply
pub fn text_reply(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// A failure reply; the `Error:` prefix is the failure marker callers key on
pub fn error_reply(message: impl std::fmt::Display) -> CallToolResult {
    text_reply(format!("Error: {}", message))
}

/// A pretty-printed JSON reply
pub fn json_reply<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(text_reply(json))
}

/// The project a call should use, or the configuration-error reply
pub(crate) fn require_project(ctx: &Ctx, explicit: Option<&str>) -> Result<String, CallToolResult> {
    pick_identifier(explicit, ctx.config.default_project.as_deref(), "project").map_err(error_reply)
}

/// The repository a call should use, or the configuration-error reply
pub(crate) fn require_repository(
    ctx: &Ctx,
    explicit: Option<&str>,
) -> Result<String, CallToolResult> {
    pick_identifier(
        explicit,
        ctx.config.default_repository.as_deref(),
        "repository",
    )
    .map_err(error_reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn reply_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(t) => t.text.clone(),
            _ => panic!("expected text content"),
        }
    }

    #[test]
    fn test_error_reply_carries_prefix() {
        let reply = error_reply("boom");
        assert_eq!(reply_text(&reply), "Error: boom");
    }

    #[test]
    fn test_require_repository_reports_configuration_error() {
        let ctx = Ctx::new(AdoConfig {
            organization_url: "https://dev.azure.com/contoso".to_string(),
            pat: "token".to_string(),
            ..Default::default()
        });
        let reply = require_repository(&ctx, None).unwrap_err();
        assert_eq!(
            reply_text(&reply),
            "Error: No repository specified and no default repository configured"
        );
    }
}
