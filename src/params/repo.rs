//! Repository parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RepoListParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RepoGetParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
    #[schemars(description = "Repository name or id (defaults to the configured repository)")]
    pub repository: Option<String>,
}
