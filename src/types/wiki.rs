//! Wiki type definitions

use serde::{Deserialize, Serialize};

/// Represents a wiki in a project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wiki {
    pub id: String,

    pub name: String,

    /// projectWiki or codeWiki
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub remote_url: Option<String>,
}

/// A wiki page with its content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPage {
    pub path: String,

    #[serde(default)]
    pub content: Option<String>,

    /// Paths of direct sub-pages
    #[serde(default)]
    pub sub_pages: Vec<WikiPageRef>,
}

/// Shallow reference to a sub-page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiPageRef {
    pub path: String,
}
