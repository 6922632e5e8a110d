//! Repository handler implementations

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;

use crate::format::render_repository;
use crate::params::{RepoGetParams, RepoListParams};
use crate::resolve::{resolve_repository, Resolution};

use super::{error_reply, json_reply, require_project, require_repository, text_reply, Ctx};

/// List the Git repositories in a project
pub async fn repo_list(ctx: &Ctx, params: RepoListParams) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };

    match ctx.client.list_repositories(&project).await {
        Ok(repos) => json_reply(&repos),
        Err(e) => Ok(error_reply(e)),
    }
}

/// View a repository by name or id
pub async fn repo_get(ctx: &Ctx, params: RepoGetParams) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };
    let repo_ident = match require_repository(ctx, params.repository.as_deref()) {
        Ok(r) => r,
        Err(reply) => return Ok(reply),
    };

    match resolve_repository(&ctx.client, &project, &repo_ident).await {
        Ok(Resolution::Found(repo)) => Ok(text_reply(render_repository(&repo))),
        Ok(Resolution::NotFound { searched }) => Ok(error_reply(format!(
            "Repository '{}' not found in project '{}' ({} repositories checked)",
            repo_ident,
            project,
            searched.len()
        ))),
        Err(e) => Ok(error_reply(e)),
    }
}
