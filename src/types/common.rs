//! Common types shared across Azure DevOps entities

use serde::{Deserialize, Serialize};

/// List responses come back as `{ "count": n, "value": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// An identity (author, reviewer, assignee)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRef {
    /// Display name shown in reports
    #[serde(default)]
    pub display_name: String,

    /// Account name (usually an email address)
    #[serde(default)]
    pub unique_name: Option<String>,

    #[serde(default)]
    pub id: Option<String>,
}

/// A shallow reference to another entity: an id plus the URL it lives at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,

    #[serde(default)]
    pub url: Option<String>,
}
