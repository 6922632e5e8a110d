//! Pull request handler implementations

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use tracing::warn;

use crate::ado::PrSearchCriteria;
use crate::aggregate::aggregate_pull_request;
use crate::format::{group_changes, render_change_summary, render_pull_request, render_pull_request_line};
use crate::params::{PrChangesParams, PrCreateParams, PrGetParams, PrListParams};
use crate::resolve::{find_pull_request, resolve_repository, Resolution};
use crate::types::{NewPullRequest, ResourceRef};

use super::{error_reply, require_project, require_repository, text_reply, Ctx};

/// A branch name as a full Git ref
fn as_ref_name(branch: &str) -> String {
    if branch.starts_with("refs/") {
        branch.to_string()
    } else {
        format!("refs/heads/{}", branch)
    }
}

/// List pull requests in a repository
pub async fn pr_list(ctx: &Ctx, params: PrListParams) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };
    let repo_ident = match require_repository(ctx, params.repository.as_deref()) {
        Ok(r) => r,
        Err(reply) => return Ok(reply),
    };

    let repo = match resolve_repository(&ctx.client, &project, &repo_ident).await {
        Ok(Resolution::Found(repo)) => repo,
        Ok(Resolution::NotFound { .. }) => {
            return Ok(error_reply(format!("Repository '{}' not found", repo_ident)))
        }
        Err(e) => return Ok(error_reply(e)),
    };

    let criteria = PrSearchCriteria {
        status: params.status,
        target_ref: params.target_branch.as_deref().map(as_ref_name),
        top: params.top,
        skip: params.skip,
    };

    match ctx
        .client
        .list_pull_requests(&project, &repo.id, &criteria)
        .await
    {
        Ok(prs) if prs.is_empty() => Ok(text_reply(format!(
            "No pull requests found in '{}'",
            repo.name
        ))),
        Ok(prs) => {
            let mut out = format!("# Pull requests in {} ({})\n\n", repo.name, prs.len());
            for pr in &prs {
                out.push_str(&render_pull_request_line(pr));
                out.push('\n');
            }
            Ok(text_reply(out))
        }
        Err(e) => Ok(error_reply(e)),
    }
}

/// View a pull request with its comments, commits, and linked work items.
///
/// When no repository is given (and none is configured), every repository
/// in the project is searched in listing order; the first match wins.
pub async fn pr_get(ctx: &Ctx, params: PrGetParams) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };

    // Explicit repository first, configured default second; with neither
    // the resolver scans every repository in the project.
    let repo_ident = params
        .repository
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .or(ctx.config.default_repository.as_deref());

    match find_pull_request(&ctx.client, &project, repo_ident, params.pull_request_id).await {
        Ok(Resolution::Found((repo, pr))) => {
            let view = aggregate_pull_request(&ctx.client, &project, repo, pr).await;
            Ok(text_reply(render_pull_request(&view)))
        }
        Ok(Resolution::NotFound { searched }) => Ok(error_reply(format!(
            "Pull request !{} not found (searched {} repositories: {})",
            params.pull_request_id,
            searched.len(),
            searched.join(", ")
        ))),
        Err(e) => Ok(error_reply(e)),
    }
}

/// Create a pull request
pub async fn pr_create(ctx: &Ctx, params: PrCreateParams) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };
    let repo_ident = match require_repository(ctx, params.repository.as_deref()) {
        Ok(r) => r,
        Err(reply) => return Ok(reply),
    };

    let repo = match resolve_repository(&ctx.client, &project, &repo_ident).await {
        Ok(Resolution::Found(repo)) => repo,
        Ok(Resolution::NotFound { .. }) => {
            return Ok(error_reply(format!("Repository '{}' not found", repo_ident)))
        }
        Err(e) => return Ok(error_reply(e)),
    };

    let target_ref = params
        .target_branch
        .as_deref()
        .map(as_ref_name)
        .or_else(|| repo.default_branch.clone());
    let Some(target_ref) = target_ref else {
        return Ok(error_reply(
            "No target branch specified and the repository has no default branch",
        ));
    };

    let body = NewPullRequest {
        source_ref_name: as_ref_name(&params.source_branch),
        target_ref_name: target_ref,
        title: params.title,
        description: params.description,
        is_draft: params.draft.unwrap_or(false),
        work_item_refs: params
            .work_item_ids
            .unwrap_or_default()
            .iter()
            .map(|id| ResourceRef {
                id: id.to_string(),
                url: None,
            })
            .collect(),
    };

    match ctx.client.create_pull_request(&project, &repo.id, &body).await {
        Ok(pr) => Ok(text_reply(format!(
            "Created pull request !{}: {}",
            pr.pull_request_id, pr.title
        ))),
        Err(e) => Ok(error_reply(e)),
    }
}

/// Summarize the files changed by a pull request, grouped by change type
pub async fn pr_changes(ctx: &Ctx, params: PrChangesParams) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };
    let repo_ident = match require_repository(ctx, params.repository.as_deref()) {
        Ok(r) => r,
        Err(reply) => return Ok(reply),
    };

    let repo = match resolve_repository(&ctx.client, &project, &repo_ident).await {
        Ok(Resolution::Found(repo)) => repo,
        Ok(Resolution::NotFound { .. }) => {
            return Ok(error_reply(format!("Repository '{}' not found", repo_ident)))
        }
        Err(e) => return Ok(error_reply(e)),
    };

    let iterations = match ctx
        .client
        .list_pr_iterations(&project, &repo.id, params.pull_request_id)
        .await
    {
        Ok(iterations) => iterations,
        Err(e) if e.is_lookup_miss() => {
            return Ok(error_reply(format!(
                "Pull request !{} not found in '{}'",
                params.pull_request_id, repo.name
            )))
        }
        Err(e) => return Ok(error_reply(e)),
    };

    let Some(latest) = iterations.last() else {
        return Ok(text_reply(format!(
            "Pull request !{} has no iterations yet",
            params.pull_request_id
        )));
    };

    match ctx
        .client
        .get_pr_iteration_changes(&project, &repo.id, params.pull_request_id, latest.id)
        .await
    {
        Ok(entries) => {
            let summary = group_changes(&entries, repo.web_url.as_deref());
            Ok(text_reply(render_change_summary(&summary)))
        }
        Err(e) => {
            warn!(error = %e, "change listing failed");
            Ok(error_reply(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_ref_name() {
        assert_eq!(as_ref_name("feature/login"), "refs/heads/feature/login");
        assert_eq!(as_ref_name("refs/heads/main"), "refs/heads/main");
        assert_eq!(as_ref_name("refs/tags/v1"), "refs/tags/v1");
    }
}
