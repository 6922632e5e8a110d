//! MCP Server implementation
//!
//! This module defines the main MCP server that exposes Azure DevOps
//! operations as tools. Handler implementations are in the handlers/
//! module; this layer only routes.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};

use crate::config::AdoConfig;
use crate::handlers::{self, Ctx};
use crate::params::*;

/// The main Azure DevOps MCP Server
#[derive(Clone)]
pub struct AzureDevOpsMcpServer {
    ctx: Arc<Ctx>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AzureDevOpsMcpServer {
    pub fn new(config: AdoConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            ctx: Arc::new(Ctx::new(config)),
            tool_router: Self::tool_router(),
        })
    }

    // ========================================================================
    // Repository Tools
    // ========================================================================

    #[tool(description = "List Git repositories in an Azure DevOps project")]
    async fn ado_repo_list(
        &self,
        Parameters(params): Parameters<RepoListParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::repo_list(&self.ctx, params).await
    }

    #[tool(description = "View a repository by name or id")]
    async fn ado_repo_get(
        &self,
        Parameters(params): Parameters<RepoGetParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::repo_get(&self.ctx, params).await
    }

    // ========================================================================
    // Pull Request Tools
    // ========================================================================

    #[tool(description = "List pull requests in a repository with optional status filter")]
    async fn ado_pr_list(
        &self,
        Parameters(params): Parameters<PrListParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::pr_list(&self.ctx, params).await
    }

    #[tool(
        description = "View a pull request with reviewers, comments, commits, and linked work items. \
                       If no repository is given, searches every repository in the project."
    )]
    async fn ado_pr_get(
        &self,
        Parameters(params): Parameters<PrGetParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::pr_get(&self.ctx, params).await
    }

    #[tool(description = "Create a pull request, optionally linking work items")]
    async fn ado_pr_create(
        &self,
        Parameters(params): Parameters<PrCreateParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::pr_create(&self.ctx, params).await
    }

    #[tool(description = "Summarize the files changed by a pull request, grouped by change type")]
    async fn ado_pr_changes(
        &self,
        Parameters(params): Parameters<PrChangesParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::pr_changes(&self.ctx, params).await
    }

    // ========================================================================
    // Work Item Tools
    // ========================================================================

    #[tool(description = "View a work item with its parent, children, and related items")]
    async fn ado_workitem_get(
        &self,
        Parameters(params): Parameters<WorkItemGetParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::workitem_get(&self.ctx, params).await
    }

    #[tool(description = "Fetch several work items by id in one call")]
    async fn ado_workitem_batch(
        &self,
        Parameters(params): Parameters<WorkItemBatchParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::workitem_batch(&self.ctx, params).await
    }

    #[tool(
        description = "Create a work item (Bug, Task, User Story, ...), optionally under a parent"
    )]
    async fn ado_workitem_create(
        &self,
        Parameters(params): Parameters<WorkItemCreateParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::workitem_create(&self.ctx, params).await
    }

    // ========================================================================
    // Pipeline Tools
    // ========================================================================

    #[tool(description = "List pipelines in a project")]
    async fn ado_pipeline_list(
        &self,
        Parameters(params): Parameters<PipelineListParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::pipeline_list(&self.ctx, params).await
    }

    #[tool(
        description = "View a pipeline with recent runs and, for YAML pipelines, its declared parameters"
    )]
    async fn ado_pipeline_get(
        &self,
        Parameters(params): Parameters<PipelineGetParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::pipeline_get(&self.ctx, params).await
    }

    #[tool(description = "Queue a pipeline run on a branch with optional template parameters")]
    async fn ado_pipeline_run(
        &self,
        Parameters(params): Parameters<PipelineRunParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::pipeline_run(&self.ctx, params).await
    }

    // ========================================================================
    // Wiki Tools
    // ========================================================================

    #[tool(description = "List wikis in a project")]
    async fn ado_wiki_list(
        &self,
        Parameters(params): Parameters<WikiListParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::wiki_list(&self.ctx, params).await
    }

    #[tool(description = "Read a wiki page with its content")]
    async fn ado_wiki_page_get(
        &self,
        Parameters(params): Parameters<WikiPageGetParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::wiki_page_get(&self.ctx, params).await
    }
}

#[tool_handler]
impl rmcp::ServerHandler for AzureDevOpsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Azure DevOps MCP Server - tools for repositories, pull requests, work items, \
                 pipelines, and wiki pages of one organization. Project and repository \
                 parameters fall back to the configured defaults. Any tool reply starting \
                 with 'Error:' is a failure."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
