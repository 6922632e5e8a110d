//! Work item parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkItemGetParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
    #[schemars(description = "Work item id")]
    pub id: u64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkItemBatchParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
    #[schemars(description = "Work item ids to fetch")]
    pub ids: Vec<u64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkItemCreateParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
    #[schemars(description = "Work item type (Bug, Task, User Story, ...)")]
    pub work_item_type: String,
    #[schemars(description = "Work item title")]
    pub title: String,
    #[schemars(description = "Work item description")]
    pub description: Option<String>,
    #[schemars(
        description = "Id of a parent work item to link after creation (best-effort; the create succeeds even if linking fails)"
    )]
    pub parent_id: Option<u64>,
}
