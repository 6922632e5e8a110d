//! Composite-view assembly
//!
//! Builds the multi-part views behind the `get` tools: the primary entity
//! fetch is fatal, every secondary fetch is best-effort. A failed secondary
//! fetch degrades its collection to empty and is logged; it never blocks or
//! cancels the others and never aborts the view.

use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use crate::ado::{AdoClient, AdoError};
use crate::pipeline_yaml::{extract_parameters, PipelineParameter};
use crate::types::{
    CommentThread, GitCommitRef, Pipeline, PipelineRun, PullRequest, Repository, WorkItem,
    WorkItemRelation,
};

/// A pull request with its secondary collections
#[derive(Debug)]
pub struct PullRequestView {
    pub repository: Repository,
    pub pull_request: PullRequest,
    /// Threads holding at least one displayable comment
    pub threads: Vec<CommentThread>,
    pub commits: Vec<GitCommitRef>,
    pub work_items: Vec<WorkItem>,
}

/// A work item with its resolved relation categories
#[derive(Debug)]
pub struct WorkItemView {
    pub work_item: WorkItem,
    pub parents: Vec<WorkItem>,
    pub children: Vec<WorkItem>,
    pub related: Vec<WorkItem>,
}

/// A pipeline with its recent runs and declared parameters
#[derive(Debug)]
pub struct PipelineView {
    pub pipeline: Pipeline,
    pub runs: Vec<PipelineRun>,
    pub parameters: Vec<PipelineParameter>,
}

fn or_empty<T>(result: Result<Vec<T>, AdoError>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "{} fetch failed, continuing without it", what);
            Vec::new()
        }
    }
}

/// Keep only displayable comments, dropping threads left empty.
///
/// One consistent rule: suppressed comments never contribute to any
/// rendered count.
pub fn filter_threads(threads: Vec<CommentThread>) -> Vec<CommentThread> {
    threads
        .into_iter()
        .map(|mut thread| {
            thread.comments.retain(|c| c.is_displayable());
            thread
        })
        .filter(|thread| !thread.comments.is_empty())
        .collect()
}

/// Assemble the composite view for an already-resolved pull request.
///
/// The repository id needed by every secondary call comes from the
/// resolved primary; the three independent fetches then run concurrently.
pub async fn aggregate_pull_request(
    client: &AdoClient,
    project: &str,
    repository: Repository,
    pull_request: PullRequest,
) -> PullRequestView {
    let repo_id = repository.id.as_str();
    let id = pull_request.pull_request_id;

    let (threads, commits, work_item_refs) = tokio::join!(
        client.list_pr_threads(project, repo_id, id),
        client.list_pr_commits(project, repo_id, id),
        client.list_pr_work_item_refs(project, repo_id, id),
    );

    let threads = filter_threads(or_empty(threads, "comment thread"));
    let commits = or_empty(commits, "commit");

    // The refs only carry ids; details come from one batch fetch, which
    // either resolves the whole collection or reports it empty.
    let ids: Vec<u64> = or_empty(work_item_refs, "work item link")
        .iter()
        .filter_map(|r| r.id.parse().ok())
        .collect();
    let work_items = if ids.is_empty() {
        Vec::new()
    } else {
        or_empty(
            client.get_work_items_batch(project, &ids).await,
            "linked work item",
        )
    };

    PullRequestView {
        repository,
        pull_request,
        threads,
        commits,
        work_items,
    }
}

/// Relation type tags used for the parent/child/related categories
pub const REL_PARENT: &str = "System.LinkTypes.Hierarchy-Reverse";
pub const REL_CHILD: &str = "System.LinkTypes.Hierarchy-Forward";
pub const REL_RELATED: &str = "System.LinkTypes.Related";

fn trailing_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/(\d+)$").expect("valid regex"))
}

/// Ids of the relations carrying the given type tag, in relation order.
///
/// The referenced id is the trailing numeric segment of the relation URL;
/// relations whose URL does not end in one are skipped.
pub fn relation_ids(relations: &[WorkItemRelation], rel: &str) -> Vec<u64> {
    relations
        .iter()
        .filter(|r| r.rel == rel)
        .filter_map(|r| {
            trailing_id_re()
                .captures(r.url.trim_end_matches('/'))
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok())
        })
        .collect()
}

async fn fetch_relation_category(
    client: &AdoClient,
    project: &str,
    relations: &[WorkItemRelation],
    rel: &str,
) -> Vec<WorkItem> {
    let ids = relation_ids(relations, rel);
    if ids.is_empty() {
        return Vec::new();
    }
    // All-or-nothing per category: a batch failure empties the whole
    // category rather than yielding a partial one.
    or_empty(
        client.get_work_items_batch(project, &ids).await,
        "related work item",
    )
}

/// Assemble the composite view for an already-fetched work item.
pub async fn aggregate_work_item(
    client: &AdoClient,
    project: &str,
    work_item: WorkItem,
) -> WorkItemView {
    let (parents, children, related) = tokio::join!(
        fetch_relation_category(client, project, &work_item.relations, REL_PARENT),
        fetch_relation_category(client, project, &work_item.relations, REL_CHILD),
        fetch_relation_category(client, project, &work_item.relations, REL_RELATED),
    );

    WorkItemView {
        work_item,
        parents,
        children,
        related,
    }
}

/// Assemble the composite view for an already-resolved pipeline.
///
/// The parameter schema only exists for YAML-defined pipelines; for those,
/// the definition text is fetched from its repository and pattern-matched.
/// Both steps are best-effort.
pub async fn aggregate_pipeline(
    client: &AdoClient,
    project: &str,
    pipeline: Pipeline,
) -> PipelineView {
    let runs = or_empty(
        client.list_pipeline_runs(project, pipeline.id).await,
        "pipeline run",
    );

    let parameters = match pipeline.configuration.as_ref() {
        Some(config) if config.is_yaml() => {
            let repo_id = config.repository.as_ref().and_then(|r| r.id.as_deref());
            match (repo_id, config.path.as_deref()) {
                (Some(repo), Some(path)) => {
                    match client.get_item_text(project, repo, path).await {
                        Ok(text) => extract_parameters(&text),
                        Err(e) => {
                            warn!(error = %e, "pipeline definition fetch failed, reporting no parameters");
                            Vec::new()
                        }
                    }
                }
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    };

    PipelineView {
        pipeline,
        runs,
        parameters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Comment, CommentThread};

    fn comment(content: &str, comment_type: &str) -> Comment {
        Comment {
            content: Some(content.to_string()),
            comment_type: Some(comment_type.to_string()),
            author: None,
        }
    }

    #[test]
    fn test_filter_threads_drops_system_and_empty() {
        let threads = vec![
            CommentThread {
                id: Some(1),
                status: Some("active".to_string()),
                comments: vec![
                    comment("please rename this", "text"),
                    comment("", "text"),
                    comment("Policy status updated", "system"),
                ],
            },
            CommentThread {
                id: Some(2),
                status: None,
                comments: vec![comment("Vote changed", "system")],
            },
        ];

        let filtered = filter_threads(threads);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].comments.len(), 1);
        assert_eq!(
            filtered[0].comments[0].content.as_deref(),
            Some("please rename this")
        );
    }

    #[test]
    fn test_relation_ids_filters_by_tag_and_extracts_trailing_number() {
        let relations = vec![
            WorkItemRelation {
                rel: REL_PARENT.to_string(),
                url: "https://dev.azure.com/o/_apis/wit/workItems/101".to_string(),
                attributes: None,
            },
            WorkItemRelation {
                rel: REL_CHILD.to_string(),
                url: "https://dev.azure.com/o/_apis/wit/workItems/202".to_string(),
                attributes: None,
            },
            WorkItemRelation {
                rel: REL_CHILD.to_string(),
                url: "https://dev.azure.com/o/_apis/wit/workItems/203/".to_string(),
                attributes: None,
            },
            WorkItemRelation {
                rel: "AttachedFile".to_string(),
                url: "https://dev.azure.com/o/_apis/wit/attachments/abc".to_string(),
                attributes: None,
            },
            WorkItemRelation {
                rel: REL_CHILD.to_string(),
                url: "https://example.invalid/not-numeric".to_string(),
                attributes: None,
            },
        ];

        assert_eq!(relation_ids(&relations, REL_PARENT), vec![101]);
        assert_eq!(relation_ids(&relations, REL_CHILD), vec![202, 203]);
        assert!(relation_ids(&relations, REL_RELATED).is_empty());
    }
}
