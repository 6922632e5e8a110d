//! Pipeline parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PipelineListParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PipelineGetParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
    #[schemars(description = "Pipeline id or name")]
    pub pipeline: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PipelineRunParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
    #[schemars(description = "Pipeline id or name")]
    pub pipeline: String,
    #[schemars(description = "Branch to run on (defaults to the pipeline's default branch)")]
    pub branch: Option<String>,
    #[schemars(description = "Template parameter values by name")]
    pub parameters: Option<BTreeMap<String, String>>,
}
