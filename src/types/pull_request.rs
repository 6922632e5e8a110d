//! Pull request type definitions
//!
//! Structs representing pull requests and their secondary collections
//! (comment threads, commits, iteration changes) as returned by the
//! Azure DevOps Git API.

use serde::{Deserialize, Serialize};

use super::common::IdentityRef;
use super::repo::Repository;

/// Represents a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    /// PR id (unique within the organization)
    pub pull_request_id: u32,

    /// PR title
    pub title: String,

    /// PR description (markdown)
    #[serde(default)]
    pub description: Option<String>,

    /// PR status (active, completed, abandoned)
    #[serde(default)]
    pub status: Option<String>,

    /// PR author
    #[serde(default)]
    pub created_by: Option<IdentityRef>,

    /// Creation timestamp (ISO 8601)
    #[serde(default)]
    pub creation_date: Option<String>,

    /// Source branch ref (e.g. `refs/heads/feature/x`)
    #[serde(default)]
    pub source_ref_name: Option<String>,

    /// Target branch ref
    #[serde(default)]
    pub target_ref_name: Option<String>,

    /// Merge status (succeeded, conflicts, queued, ...)
    #[serde(default)]
    pub merge_status: Option<String>,

    /// Whether the PR is in draft mode
    #[serde(default)]
    pub is_draft: bool,

    /// Reviewers with their votes
    #[serde(default)]
    pub reviewers: Vec<Reviewer>,

    /// Repository the PR lives in
    #[serde(default)]
    pub repository: Option<Repository>,
}

/// A reviewer and their current vote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reviewer {
    #[serde(default)]
    pub display_name: String,

    /// 10 approved, 5 approved with suggestions, 0 no vote,
    /// -5 waiting for author, -10 rejected
    #[serde(default)]
    pub vote: i32,

    #[serde(default)]
    pub is_required: bool,
}

impl Reviewer {
    /// Human-readable vote label
    pub fn vote_label(&self) -> &'static str {
        match self.vote {
            v if v >= 10 => "approved",
            v if v > 0 => "approved with suggestions",
            0 => "no vote",
            v if v > -10 => "waiting for author",
            _ => "rejected",
        }
    }
}

/// A comment thread on a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    #[serde(default)]
    pub id: Option<u64>,

    /// Thread status (active, fixed, closed, ...)
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A single comment within a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub content: Option<String>,

    /// "text" for user comments, "system" for auto-generated ones
    #[serde(default)]
    pub comment_type: Option<String>,

    #[serde(default)]
    pub author: Option<IdentityRef>,
}

impl Comment {
    /// User-authored comments with content; system noise is excluded
    /// from both rendering and counts.
    pub fn is_displayable(&self) -> bool {
        let has_content = self
            .content
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty());
        let is_system = self
            .comment_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("system"));
        has_content && !is_system
    }
}

/// A commit reachable from a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitCommitRef {
    pub commit_id: String,

    /// Commit message
    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub author: Option<GitUser>,
}

/// Commit author/committer signature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitUser {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub date: Option<String>,
}

/// A pull request iteration (one push of the source branch)
#[derive(Debug, Clone, Deserialize)]
pub struct IterationRef {
    pub id: u32,
}

/// One changed file in an iteration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEntry {
    /// Raw change type string (add, edit, delete, rename, ...)
    #[serde(default)]
    pub change_type: Option<String>,

    #[serde(default)]
    pub item: Option<ChangeItem>,
}

/// The item a change applies to
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeItem {
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub is_folder: Option<bool>,
}

/// Request body for creating a pull request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPullRequest {
    pub source_ref_name: String,
    pub target_ref_name: String,
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub is_draft: bool,

    /// Work items to link at creation time
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub work_item_refs: Vec<super::common::ResourceRef>,
}
