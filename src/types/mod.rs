//! Type definitions for Azure DevOps entities
//!
//! Rust structs for the REST API payloads this server consumes and
//! produces. List responses arrive wrapped in a `{count, value}` envelope.

pub mod common;
pub mod pipeline;
pub mod pull_request;
pub mod repo;
pub mod wiki;
pub mod work_item;

pub use common::{IdentityRef, ListEnvelope, ResourceRef};
pub use pipeline::{Pipeline, PipelineRun, RunPipelineRequest};
pub use pull_request::{
    ChangeEntry, Comment, CommentThread, GitCommitRef, IterationRef, NewPullRequest, PullRequest,
    Reviewer,
};
pub use repo::Repository;
pub use wiki::{Wiki, WikiPage};
pub use work_item::{PatchOp, WorkItem, WorkItemRelation};
