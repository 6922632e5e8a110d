//! Authenticated client for the Azure DevOps REST API
//!
//! One method per backend operation, each a single HTTP call. Status codes
//! map onto the [`AdoError`] taxonomy; mutating calls are bounded by the
//! configured timeout. No retries, no caching.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::error::{AdoError, AdoResult};
use crate::config::AdoConfig;
use crate::types::{
    ChangeEntry, CommentThread, GitCommitRef, IterationRef, ListEnvelope, NewPullRequest,
    PatchOp, Pipeline, PipelineRun, PullRequest, Repository, ResourceRef, RunPipelineRequest,
    Wiki, WikiPage, WorkItem,
};

/// Filters for listing pull requests; passed straight through to the
/// backend's own searchCriteria / $top / $skip parameters.
#[derive(Debug, Clone, Default)]
pub struct PrSearchCriteria {
    /// active, completed, abandoned, all
    pub status: Option<String>,
    /// Target branch filter (full ref name)
    pub target_ref: Option<String>,
    pub top: Option<u32>,
    pub skip: Option<u32>,
}

/// Thin accessor over the Azure DevOps REST API
#[derive(Clone)]
pub struct AdoClient {
    http: Client,
    base_url: String,
    pat: String,
    api_version: String,
    mutation_timeout: Duration,
}

impl AdoClient {
    pub fn new(config: &AdoConfig) -> Self {
        let http = Client::builder()
            .user_agent("azure-devops-mcp/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.organization_url.trim_end_matches('/').to_string(),
            pat: config.pat.clone(),
            api_version: config.api_version.clone(),
            mutation_timeout: Duration::from_secs(config.mutation_timeout_secs),
        }
    }

    fn url(&self, project: &str, rest: &str) -> String {
        format!("{}/{}/_apis/{}", self.base_url, project, rest)
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .basic_auth("", Some(&self.pat))
            .query(&[("api-version", self.api_version.as_str())])
    }

    /// Map a non-success response to an error, pulling the backend's
    /// `message` field out of the body when there is one.
    async fn check(&self, response: Response) -> AdoResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str().map(String::from)))
            .unwrap_or(body);

        debug!(status = %status, %message, "backend returned an error");

        Err(match status {
            StatusCode::NOT_FOUND => AdoError::NotFound,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AdoError::Unauthorized {
                status: status.as_u16(),
            },
            StatusCode::BAD_REQUEST => AdoError::InvalidRequest { message },
            _ => AdoError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AdoResult<T> {
        debug!(%url, "GET");
        let response = self
            .request(self.http.get(url))
            .query(query)
            .send()
            .await?;
        Ok(self.check(response).await?.json().await?)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AdoResult<Vec<T>> {
        let envelope: ListEnvelope<T> = self.get_json(url, query).await?;
        Ok(envelope.value)
    }

    /// Bound a mutating call by the configured timeout. A timeout is its
    /// own failure kind, never conflated with not-found.
    async fn bounded<T>(&self, fut: impl Future<Output = AdoResult<T>>) -> AdoResult<T> {
        match tokio::time::timeout(self.mutation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AdoError::Timeout),
        }
    }

    // ========================================================================
    // Repositories
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn list_repositories(&self, project: &str) -> AdoResult<Vec<Repository>> {
        self.get_list(&self.url(project, "git/repositories"), &[])
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_repository(&self, project: &str, repo: &str) -> AdoResult<Repository> {
        self.get_json(&self.url(project, &format!("git/repositories/{}", repo)), &[])
            .await
    }

    // ========================================================================
    // Pull requests
    // ========================================================================

    #[instrument(skip(self, criteria))]
    pub async fn list_pull_requests(
        &self,
        project: &str,
        repo: &str,
        criteria: &PrSearchCriteria,
    ) -> AdoResult<Vec<PullRequest>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(ref status) = criteria.status {
            query.push(("searchCriteria.status", status.clone()));
        }
        if let Some(ref target) = criteria.target_ref {
            query.push(("searchCriteria.targetRefName", target.clone()));
        }
        if let Some(top) = criteria.top {
            query.push(("$top", top.to_string()));
        }
        if let Some(skip) = criteria.skip {
            query.push(("$skip", skip.to_string()));
        }

        self.get_list(
            &self.url(project, &format!("git/repositories/{}/pullrequests", repo)),
            &query,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_pull_request(
        &self,
        project: &str,
        repo: &str,
        id: u32,
    ) -> AdoResult<PullRequest> {
        self.get_json(
            &self.url(project, &format!("git/repositories/{}/pullrequests/{}", repo, id)),
            &[],
        )
        .await
    }

    #[instrument(skip(self, body), fields(title = %body.title))]
    pub async fn create_pull_request(
        &self,
        project: &str,
        repo: &str,
        body: &NewPullRequest,
    ) -> AdoResult<PullRequest> {
        let url = self.url(project, &format!("git/repositories/{}/pullrequests", repo));
        self.bounded(async {
            debug!(%url, "POST");
            let response = self.request(self.http.post(&url)).json(body).send().await?;
            Ok(self.check(response).await?.json().await?)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_pr_threads(
        &self,
        project: &str,
        repo: &str,
        id: u32,
    ) -> AdoResult<Vec<CommentThread>> {
        self.get_list(
            &self.url(project, &format!("git/repositories/{}/pullRequests/{}/threads", repo, id)),
            &[],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_pr_commits(
        &self,
        project: &str,
        repo: &str,
        id: u32,
    ) -> AdoResult<Vec<GitCommitRef>> {
        self.get_list(
            &self.url(project, &format!("git/repositories/{}/pullRequests/{}/commits", repo, id)),
            &[],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_pr_work_item_refs(
        &self,
        project: &str,
        repo: &str,
        id: u32,
    ) -> AdoResult<Vec<ResourceRef>> {
        self.get_list(
            &self.url(project, &format!("git/repositories/{}/pullRequests/{}/workitems", repo, id)),
            &[],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_pr_iterations(
        &self,
        project: &str,
        repo: &str,
        id: u32,
    ) -> AdoResult<Vec<IterationRef>> {
        self.get_list(
            &self.url(
                project,
                &format!("git/repositories/{}/pullRequests/{}/iterations", repo, id),
            ),
            &[],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_pr_iteration_changes(
        &self,
        project: &str,
        repo: &str,
        id: u32,
        iteration: u32,
    ) -> AdoResult<Vec<ChangeEntry>> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Changes {
            #[serde(default)]
            change_entries: Vec<ChangeEntry>,
        }

        let changes: Changes = self
            .get_json(
                &self.url(
                    project,
                    &format!(
                        "git/repositories/{}/pullRequests/{}/iterations/{}/changes",
                        repo, id, iteration
                    ),
                ),
                &[],
            )
            .await?;
        Ok(changes.change_entries)
    }

    // ========================================================================
    // Work items
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn get_work_item(&self, project: &str, id: u64) -> AdoResult<WorkItem> {
        self.get_json(
            &self.url(project, &format!("wit/workitems/{}", id)),
            &[("$expand", "relations".to_string())],
        )
        .await
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_work_items_batch(
        &self,
        project: &str,
        ids: &[u64],
    ) -> AdoResult<Vec<WorkItem>> {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.get_list(
            &self.url(project, "wit/workitems"),
            &[("ids", joined)],
        )
        .await
    }

    #[instrument(skip(self, ops))]
    pub async fn create_work_item(
        &self,
        project: &str,
        work_item_type: &str,
        ops: &[PatchOp],
    ) -> AdoResult<WorkItem> {
        let url = self.url(project, &format!("wit/workitems/${}", work_item_type));
        self.bounded(self.send_patch_document(self.http.post(&url), ops))
            .await
    }

    #[instrument(skip(self, ops))]
    pub async fn update_work_item(
        &self,
        project: &str,
        id: u64,
        ops: &[PatchOp],
    ) -> AdoResult<WorkItem> {
        let url = self.url(project, &format!("wit/workitems/{}", id));
        self.bounded(self.send_patch_document(self.http.patch(&url), ops))
            .await
    }

    /// Work item writes use JSON-patch documents with their own media type.
    async fn send_patch_document(
        &self,
        builder: RequestBuilder,
        ops: &[PatchOp],
    ) -> AdoResult<WorkItem> {
        let body = serde_json::to_string(ops)?;
        let response = self
            .request(builder)
            .header("Content-Type", "application/json-patch+json")
            .body(body)
            .send()
            .await?;
        Ok(self.check(response).await?.json().await?)
    }

    // ========================================================================
    // Pipelines
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn list_pipelines(&self, project: &str) -> AdoResult<Vec<Pipeline>> {
        self.get_list(&self.url(project, "pipelines"), &[]).await
    }

    #[instrument(skip(self))]
    pub async fn get_pipeline(&self, project: &str, id: u32) -> AdoResult<Pipeline> {
        self.get_json(&self.url(project, &format!("pipelines/{}", id)), &[])
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_pipeline_runs(&self, project: &str, id: u32) -> AdoResult<Vec<PipelineRun>> {
        self.get_list(&self.url(project, &format!("pipelines/{}/runs", id)), &[])
            .await
    }

    #[instrument(skip(self, body))]
    pub async fn run_pipeline(
        &self,
        project: &str,
        id: u32,
        body: &RunPipelineRequest,
    ) -> AdoResult<PipelineRun> {
        let url = self.url(project, &format!("pipelines/{}/runs", id));
        self.bounded(async {
            debug!(%url, "POST");
            let response = self.request(self.http.post(&url)).json(body).send().await?;
            Ok(self.check(response).await?.json().await?)
        })
        .await
    }

    /// Raw text of a file in a Git repository (pipeline YAML definitions).
    #[instrument(skip(self))]
    pub async fn get_item_text(&self, project: &str, repo: &str, path: &str) -> AdoResult<String> {
        let url = self.url(project, &format!("git/repositories/{}/items", repo));
        debug!(%url, %path, "GET (raw)");
        let response = self
            .request(self.http.get(&url))
            .query(&[
                ("path", path),
                ("includeContent", "true"),
                ("$format", "text"),
            ])
            .header("Accept", "text/plain")
            .send()
            .await?;
        Ok(self.check(response).await?.text().await?)
    }

    // ========================================================================
    // Wikis
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn list_wikis(&self, project: &str) -> AdoResult<Vec<Wiki>> {
        self.get_list(&self.url(project, "wiki/wikis"), &[]).await
    }

    #[instrument(skip(self))]
    pub async fn get_wiki_page(
        &self,
        project: &str,
        wiki: &str,
        path: &str,
    ) -> AdoResult<WikiPage> {
        self.get_json(
            &self.url(project, &format!("wiki/wikis/{}/pages", wiki)),
            &[
                ("path", path.to_string()),
                ("includeContent", "true".to_string()),
            ],
        )
        .await
    }
}
