//! Wiki parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WikiListParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WikiPageGetParams {
    #[schemars(description = "Project name or id (defaults to the configured project)")]
    pub project: Option<String>,
    #[schemars(description = "Wiki name or id")]
    pub wiki: String,
    #[schemars(description = "Page path, e.g. /Onboarding/Setup")]
    pub path: String,
}
