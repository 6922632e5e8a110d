//! Pull request parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PrListParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
    #[schemars(description = "Repository name or id (defaults to the configured repository)")]
    pub repository: Option<String>,
    #[schemars(description = "Status filter (active, completed, abandoned, all)")]
    pub status: Option<String>,
    #[schemars(description = "Filter by target branch name")]
    pub target_branch: Option<String>,
    #[schemars(description = "Maximum number of pull requests to return")]
    pub top: Option<u32>,
    #[schemars(description = "Number of pull requests to skip")]
    pub skip: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PrGetParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
    #[schemars(description = "Pull request id")]
    pub pull_request_id: u32,
    #[schemars(
        description = "Repository name or id. When omitted, every repository in the project is searched"
    )]
    pub repository: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PrCreateParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
    #[schemars(description = "Repository name or id (defaults to the configured repository)")]
    pub repository: Option<String>,
    #[schemars(description = "Pull request title")]
    pub title: String,
    #[schemars(description = "Pull request description in markdown")]
    pub description: Option<String>,
    #[schemars(description = "Source branch name (e.g. feature/login)")]
    pub source_branch: String,
    #[schemars(description = "Target branch name (defaults to the repository default branch)")]
    pub target_branch: Option<String>,
    #[schemars(description = "Create as draft")]
    pub draft: Option<bool>,
    #[schemars(description = "Work item ids to link to the pull request")]
    pub work_item_ids: Option<Vec<u64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PrChangesParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
    #[schemars(description = "Repository name or id (defaults to the configured repository)")]
    pub repository: Option<String>,
    #[schemars(description = "Pull request id")]
    pub pull_request_id: u32,
}
