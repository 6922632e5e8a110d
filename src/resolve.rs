//! Identifier resolution
//!
//! Turns partial, possibly ambiguous user-supplied identifiers into
//! concrete backend entities: explicit input wins over the configured
//! default, a direct lookup wins over scanning, and a pull request with no
//! repository is searched for across every repository in the project.

use thiserror::Error;
use tracing::{debug, warn};

use crate::ado::{AdoClient, AdoResult};
use crate::types::{Pipeline, PullRequest, Repository};

/// Neither an explicit identifier nor a configured default was available.
///
/// Reported as a user error; nothing is retried and no backend call is made.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("No {entity} specified and no default {entity} configured")]
pub struct NotConfigured {
    pub entity: &'static str,
}

/// Outcome of resolving an identifier against the backend
#[derive(Debug)]
pub enum Resolution<T> {
    Found(T),
    /// Nothing matched after exhausting every candidate; `searched` lists
    /// the candidate collections that were scanned, in scan order.
    NotFound { searched: Vec<String> },
}

impl<T> Resolution<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Resolution::Found(v) => Some(v),
            Resolution::NotFound { .. } => None,
        }
    }
}

/// Pick the identifier a tool call should use: explicit input first, the
/// configured default second, otherwise a terminal "not configured" error.
pub fn pick_identifier(
    explicit: Option<&str>,
    configured: Option<&str>,
    entity: &'static str,
) -> Result<String, NotConfigured> {
    explicit
        .filter(|s| !s.trim().is_empty())
        .or(configured)
        .map(str::to_string)
        .ok_or(NotConfigured { entity })
}

/// Resolve a repository by id or display name.
///
/// Direct lookup first (the identifier may be a GUID or a name the backend
/// accepts verbatim). A lookup miss falls back to listing the project's
/// repositories and matching the display name case-insensitively.
pub async fn resolve_repository(
    client: &AdoClient,
    project: &str,
    id_or_name: &str,
) -> AdoResult<Resolution<Repository>> {
    match client.get_repository(project, id_or_name).await {
        Ok(repo) => return Ok(Resolution::Found(repo)),
        Err(e) if e.is_lookup_miss() => {
            debug!(identifier = %id_or_name, "direct repository lookup missed, scanning list");
        }
        Err(e) => return Err(e),
    }

    let repos = client.list_repositories(project).await?;
    let searched: Vec<String> = repos.iter().map(|r| r.name.clone()).collect();
    match repos
        .into_iter()
        .find(|r| r.name.eq_ignore_ascii_case(id_or_name))
    {
        Some(repo) => Ok(Resolution::Found(repo)),
        None => Ok(Resolution::NotFound { searched }),
    }
}

/// Resolve a pipeline by numeric id or display name.
pub async fn resolve_pipeline(
    client: &AdoClient,
    project: &str,
    id_or_name: &str,
) -> AdoResult<Resolution<Pipeline>> {
    if let Ok(id) = id_or_name.parse::<u32>() {
        match client.get_pipeline(project, id).await {
            Ok(pipeline) => return Ok(Resolution::Found(pipeline)),
            Err(e) if e.is_lookup_miss() => {
                debug!(identifier = %id_or_name, "direct pipeline lookup missed, scanning list");
            }
            Err(e) => return Err(e),
        }
    }

    let pipelines = client.list_pipelines(project).await?;
    let searched: Vec<String> = pipelines.iter().map(|p| p.name.clone()).collect();
    match pipelines
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(id_or_name))
    {
        // The list payload is shallow; re-fetch for the configuration block.
        // The entity is known to exist here, so failure is fatal.
        Some(pipeline) => Ok(Resolution::Found(
            client.get_pipeline(project, pipeline.id).await?,
        )),
        None => Ok(Resolution::NotFound { searched }),
    }
}

/// Locate a pull request, searching across repositories when none is named.
///
/// With a repository identifier the lookup is direct. Without one, every
/// repository in the project is tried in backend listing order and the
/// first match wins; a lookup miss in one repository never aborts the scan,
/// while permission or transport failures propagate immediately.
pub async fn find_pull_request(
    client: &AdoClient,
    project: &str,
    repository: Option<&str>,
    id: u32,
) -> AdoResult<Resolution<(Repository, PullRequest)>> {
    if let Some(repo_ident) = repository {
        let repo = match resolve_repository(client, project, repo_ident).await? {
            Resolution::Found(repo) => repo,
            Resolution::NotFound { searched } => return Ok(Resolution::NotFound { searched }),
        };
        return match client.get_pull_request(project, &repo.id, id).await {
            Ok(pr) => Ok(Resolution::Found((repo, pr))),
            Err(e) if e.is_lookup_miss() => Ok(Resolution::NotFound {
                searched: vec![repo.name],
            }),
            Err(e) => Err(e),
        };
    }

    let repos = client.list_repositories(project).await?;
    let mut searched = Vec::with_capacity(repos.len());
    for repo in repos {
        match client.get_pull_request(project, &repo.id, id).await {
            Ok(pr) => {
                debug!(repository = %repo.name, pull_request = id, "found in scan");
                return Ok(Resolution::Found((repo, pr)));
            }
            Err(e) if e.is_lookup_miss() => {
                searched.push(repo.name);
            }
            Err(e) => {
                warn!(repository = %repo.name, error = %e, "aborting repository scan");
                return Err(e);
            }
        }
    }
    Ok(Resolution::NotFound { searched })
}
