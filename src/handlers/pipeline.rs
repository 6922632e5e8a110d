//! Pipeline handler implementations

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use std::collections::BTreeMap;

use crate::aggregate::aggregate_pipeline;
use crate::format::render_pipeline;
use crate::params::{PipelineGetParams, PipelineListParams, PipelineRunParams};
use crate::resolve::{resolve_pipeline, Resolution};
use crate::types::RunPipelineRequest;

use super::{error_reply, json_reply, require_project, text_reply, Ctx};

/// List the pipelines in a project
pub async fn pipeline_list(
    ctx: &Ctx,
    params: PipelineListParams,
) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };

    match ctx.client.list_pipelines(&project).await {
        Ok(pipelines) => json_reply(&pipelines),
        Err(e) => Ok(error_reply(e)),
    }
}

/// View a pipeline with its recent runs and declared parameters
pub async fn pipeline_get(
    ctx: &Ctx,
    params: PipelineGetParams,
) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };

    match resolve_pipeline(&ctx.client, &project, &params.pipeline).await {
        Ok(Resolution::Found(pipeline)) => {
            let view = aggregate_pipeline(&ctx.client, &project, pipeline).await;
            Ok(text_reply(render_pipeline(&view)))
        }
        Ok(Resolution::NotFound { searched }) => Ok(error_reply(format!(
            "Pipeline '{}' not found in project '{}' ({} pipelines checked)",
            params.pipeline,
            project,
            searched.len()
        ))),
        Err(e) => Ok(error_reply(e)),
    }
}

/// Queue a pipeline run
pub async fn pipeline_run(
    ctx: &Ctx,
    params: PipelineRunParams,
) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };

    let pipeline = match resolve_pipeline(&ctx.client, &project, &params.pipeline).await {
        Ok(Resolution::Found(pipeline)) => pipeline,
        Ok(Resolution::NotFound { .. }) => {
            return Ok(error_reply(format!(
                "Pipeline '{}' not found",
                params.pipeline
            )))
        }
        Err(e) => return Ok(error_reply(e)),
    };

    let body = RunPipelineRequest::new(
        params.branch.as_deref(),
        params.parameters.unwrap_or_else(BTreeMap::new),
    );

    match ctx.client.run_pipeline(&project, pipeline.id, &body).await {
        Ok(run) => Ok(text_reply(format!(
            "Queued run {} of pipeline '{}' ({})",
            run.id,
            pipeline.name,
            run.state.as_deref().unwrap_or("queued")
        ))),
        Err(e) => Ok(error_reply(e)),
    }
}
