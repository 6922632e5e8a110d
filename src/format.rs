//! Markdown rendering of composite views
//!
//! Pure formatting: everything here takes already-aggregated data and
//! produces report text. The only logic worth noting is the stable change
//! grouping and the optional file links.

use std::fmt::Write as _;

use crate::aggregate::{PipelineView, PullRequestView, WorkItemView};
use crate::types::{ChangeEntry, PullRequest, Repository, WorkItem};

/// Change classification used for the grouped summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Edit,
    Delete,
    Rename,
    Unknown,
}

impl ChangeKind {
    /// Parse the backend's changeType string. Combined values such as
    /// "edit, rename" count as renames.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return ChangeKind::Unknown;
        };
        let lower = raw.to_ascii_lowercase();
        if lower.contains("rename") {
            ChangeKind::Rename
        } else if lower.trim() == "add" {
            ChangeKind::Add
        } else if lower.trim() == "edit" {
            ChangeKind::Edit
        } else if lower.trim() == "delete" {
            ChangeKind::Delete
        } else {
            ChangeKind::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Add => "Added",
            ChangeKind::Edit => "Edited",
            ChangeKind::Delete => "Deleted",
            ChangeKind::Rename => "Renamed",
            ChangeKind::Unknown => "Other",
        }
    }
}

/// One rendered line of the change summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLine {
    pub path: String,
    /// Browsable link; empty when it cannot be built
    pub link: String,
}

/// Change entries partitioned by kind, original order preserved per group
#[derive(Debug, Default)]
pub struct ChangeSummary {
    pub adds: Vec<ChangeLine>,
    pub edits: Vec<ChangeLine>,
    pub deletes: Vec<ChangeLine>,
    pub renames: Vec<ChangeLine>,
    pub others: Vec<ChangeLine>,
}

impl ChangeSummary {
    pub fn total(&self) -> usize {
        self.adds.len() + self.edits.len() + self.deletes.len() + self.renames.len() + self.others.len()
    }
}

/// A browsable link for a changed file, or empty when either the
/// repository web URL or the path is missing. Never an error.
pub fn file_link(web_url: Option<&str>, path: Option<&str>) -> String {
    match (web_url, path) {
        (Some(web_url), Some(path)) if !web_url.is_empty() && !path.is_empty() => {
            format!("{}?path={}", web_url.trim_end_matches('/'), path)
        }
        _ => String::new(),
    }
}

/// Partition change entries by kind. The partition is stable: entries keep
/// their backend-returned relative order within each group.
pub fn group_changes(entries: &[ChangeEntry], repo_web_url: Option<&str>) -> ChangeSummary {
    let mut summary = ChangeSummary::default();
    for entry in entries {
        let path = entry
            .item
            .as_ref()
            .and_then(|i| i.path.clone())
            .unwrap_or_default();
        let line = ChangeLine {
            link: file_link(repo_web_url, Some(path.as_str()).filter(|p| !p.is_empty())),
            path,
        };
        match ChangeKind::parse(entry.change_type.as_deref()) {
            ChangeKind::Add => summary.adds.push(line),
            ChangeKind::Edit => summary.edits.push(line),
            ChangeKind::Delete => summary.deletes.push(line),
            ChangeKind::Rename => summary.renames.push(line),
            ChangeKind::Unknown => summary.others.push(line),
        }
    }
    summary
}

fn branch(ref_name: Option<&str>) -> &str {
    ref_name
        .map(|r| r.strip_prefix("refs/heads/").unwrap_or(r))
        .unwrap_or("?")
}

fn short_sha(sha: &str) -> &str {
    &sha[..sha.len().min(8)]
}

// ============================================================================
// Renderers
// ============================================================================

pub fn render_repository(repo: &Repository) -> String {
    let mut out = format!("# Repository: {}\n\n", repo.name);
    let _ = writeln!(out, "- Id: {}", repo.id);
    if let Some(ref default_branch) = repo.default_branch {
        let _ = writeln!(out, "- Default branch: {}", branch(Some(default_branch)));
    }
    if let Some(ref project) = repo.project {
        let _ = writeln!(out, "- Project: {}", project.name);
    }
    if let Some(ref web_url) = repo.web_url {
        let _ = writeln!(out, "- Web: {}", web_url);
    }
    out
}

pub fn render_pull_request_line(pr: &PullRequest) -> String {
    format!(
        "- !{} [{}] {} ({} -> {})",
        pr.pull_request_id,
        pr.status.as_deref().unwrap_or("unknown"),
        pr.title,
        branch(pr.source_ref_name.as_deref()),
        branch(pr.target_ref_name.as_deref()),
    )
}

pub fn render_pull_request(view: &PullRequestView) -> String {
    let pr = &view.pull_request;
    let mut out = format!("# PR !{}: {}\n\n", pr.pull_request_id, pr.title);

    let _ = writeln!(out, "- Repository: {}", view.repository.name);
    let _ = writeln!(out, "- Status: {}", pr.status.as_deref().unwrap_or("unknown"));
    if pr.is_draft {
        let _ = writeln!(out, "- Draft: yes");
    }
    if let Some(ref author) = pr.created_by {
        let _ = writeln!(out, "- Author: {}", author.display_name);
    }
    let _ = writeln!(
        out,
        "- Branch: {} -> {}",
        branch(pr.source_ref_name.as_deref()),
        branch(pr.target_ref_name.as_deref())
    );
    if let Some(ref merge_status) = pr.merge_status {
        let _ = writeln!(out, "- Merge status: {}", merge_status);
    }
    if let Some(ref date) = pr.creation_date {
        let _ = writeln!(out, "- Created: {}", date);
    }

    if let Some(ref description) = pr.description {
        if !description.trim().is_empty() {
            let _ = write!(out, "\n## Description\n\n{}\n", description.trim());
        }
    }

    if !pr.reviewers.is_empty() {
        let _ = write!(out, "\n## Reviewers\n\n");
        for reviewer in &pr.reviewers {
            let required = if reviewer.is_required { " (required)" } else { "" };
            let _ = writeln!(
                out,
                "- {}: {}{}",
                reviewer.display_name,
                reviewer.vote_label(),
                required
            );
        }
    }

    if !view.work_items.is_empty() {
        let _ = write!(out, "\n## Linked Work Items\n\n");
        for item in &view.work_items {
            let _ = writeln!(out, "- #{} [{}] {}", item.id, item.state(), item.title());
        }
    }

    if !view.commits.is_empty() {
        let _ = write!(out, "\n## Commits ({})\n\n", view.commits.len());
        for commit in &view.commits {
            let message = commit
                .comment
                .as_deref()
                .unwrap_or("")
                .lines()
                .next()
                .unwrap_or("");
            let _ = writeln!(out, "- {} {}", short_sha(&commit.commit_id), message);
        }
    }

    if !view.threads.is_empty() {
        let comment_count: usize = view.threads.iter().map(|t| t.comments.len()).sum();
        let _ = write!(
            out,
            "\n## Comment Threads ({} threads, {} comments)\n\n",
            view.threads.len(),
            comment_count
        );
        for thread in &view.threads {
            let status = thread.status.as_deref().unwrap_or("unknown");
            let _ = writeln!(out, "### Thread [{}]", status);
            for comment in &thread.comments {
                let author = comment
                    .author
                    .as_ref()
                    .map(|a| a.display_name.as_str())
                    .unwrap_or("unknown");
                let _ = writeln!(out, "- {}: {}", author, comment.content.as_deref().unwrap_or(""));
            }
        }
    }

    out
}

pub fn render_change_summary(summary: &ChangeSummary) -> String {
    let mut out = format!(
        "# Changes ({} files: {} added, {} edited, {} deleted, {} renamed)\n",
        summary.total(),
        summary.adds.len(),
        summary.edits.len(),
        summary.deletes.len(),
        summary.renames.len(),
    );

    let groups = [
        ("Added", &summary.adds),
        ("Edited", &summary.edits),
        ("Deleted", &summary.deletes),
        ("Renamed", &summary.renames),
        ("Other", &summary.others),
    ];
    for (label, lines) in groups {
        if lines.is_empty() {
            continue;
        }
        let _ = write!(out, "\n## {}\n\n", label);
        for line in lines {
            if line.link.is_empty() {
                let _ = writeln!(out, "- {}", line.path);
            } else {
                let _ = writeln!(out, "- [{}]({})", line.path, line.link);
            }
        }
    }
    out
}

pub fn render_work_item_line(item: &WorkItem) -> String {
    format!("- #{} [{}] {}", item.id, item.state(), item.title())
}

pub fn render_work_item(view: &WorkItemView) -> String {
    let item = &view.work_item;
    let mut out = format!(
        "# {} #{}: {}\n\n",
        item.work_item_type(),
        item.id,
        item.title()
    );
    let _ = writeln!(out, "- State: {}", item.state());
    if let Some(assigned) = item.assigned_to() {
        let _ = writeln!(out, "- Assigned to: {}", assigned);
    }

    let sections = [
        ("Parent", &view.parents),
        ("Children", &view.children),
        ("Related", &view.related),
    ];
    for (label, items) in sections {
        if items.is_empty() {
            continue;
        }
        let _ = write!(out, "\n## {}\n\n", label);
        for related in items {
            let _ = writeln!(out, "{}", render_work_item_line(related));
        }
    }
    out
}

pub fn render_pipeline(view: &PipelineView) -> String {
    let pipeline = &view.pipeline;
    let mut out = format!("# Pipeline {}: {}\n\n", pipeline.id, pipeline.name);
    if let Some(ref folder) = pipeline.folder {
        let _ = writeln!(out, "- Folder: {}", folder);
    }
    if let Some(ref config) = pipeline.configuration {
        if let Some(ref kind) = config.kind {
            let _ = writeln!(out, "- Configuration: {}", kind);
        }
        if let Some(ref path) = config.path {
            let _ = writeln!(out, "- Definition: {}", path);
        }
    }

    if !view.parameters.is_empty() {
        let _ = write!(out, "\n## Parameters\n\n");
        for param in &view.parameters {
            let requirement = if param.required() {
                "required".to_string()
            } else {
                format!("default: {}", param.default_value)
            };
            let _ = writeln!(
                out,
                "- {} ({}, {}) - {}",
                param.name, param.param_type, requirement, param.display_name
            );
        }
    }

    if !view.runs.is_empty() {
        let _ = write!(out, "\n## Recent Runs\n\n");
        for run in &view.runs {
            let outcome = run
                .result
                .as_deref()
                .or(run.state.as_deref())
                .unwrap_or("unknown");
            let _ = writeln!(
                out,
                "- Run {} [{}] {}",
                run.id,
                outcome,
                run.created_date.as_deref().unwrap_or("")
            );
        }
    }
    out
}
