//! Git repository type definitions

use serde::{Deserialize, Serialize};

/// Represents a Git repository in a project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Repository GUID
    pub id: String,

    /// Repository display name
    pub name: String,

    /// Default branch ref (e.g. `refs/heads/main`)
    #[serde(default)]
    pub default_branch: Option<String>,

    /// Browser URL of the repository
    #[serde(default)]
    pub web_url: Option<String>,

    /// Owning project
    #[serde(default)]
    pub project: Option<ProjectRef>,

    /// Whether the repository is disabled
    #[serde(default)]
    pub is_disabled: Option<bool>,
}

/// Shallow project reference embedded in repository payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}
