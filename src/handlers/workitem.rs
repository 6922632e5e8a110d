//! Work item handler implementations

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde_json::json;
use tracing::warn;

use crate::aggregate::{aggregate_work_item, REL_PARENT};
use crate::format::{render_work_item, render_work_item_line};
use crate::params::{WorkItemBatchParams, WorkItemCreateParams, WorkItemGetParams};
use crate::types::PatchOp;

use super::{error_reply, require_project, text_reply, Ctx};

/// View a work item with its parent, children, and related items
pub async fn workitem_get(
    ctx: &Ctx,
    params: WorkItemGetParams,
) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };

    match ctx.client.get_work_item(&project, params.id).await {
        Ok(item) => {
            let view = aggregate_work_item(&ctx.client, &project, item).await;
            Ok(text_reply(render_work_item(&view)))
        }
        Err(e) if e.is_lookup_miss() => {
            Ok(error_reply(format!("Work item #{} not found", params.id)))
        }
        Err(e) => Ok(error_reply(e)),
    }
}

/// Fetch several work items in one call
pub async fn workitem_batch(
    ctx: &Ctx,
    params: WorkItemBatchParams,
) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };
    if params.ids.is_empty() {
        return Ok(error_reply("No work item ids given"));
    }

    match ctx.client.get_work_items_batch(&project, &params.ids).await {
        Ok(items) => {
            let mut out = format!("# Work items ({})\n\n", items.len());
            for item in &items {
                out.push_str(&render_work_item_line(item));
                out.push('\n');
            }
            Ok(text_reply(out))
        }
        Err(e) => Ok(error_reply(e)),
    }
}

/// Create a work item, optionally linking it under a parent.
///
/// The create is the primary operation; the parent link afterwards is
/// best-effort, so a linking failure or timeout still reports the created
/// item.
pub async fn workitem_create(
    ctx: &Ctx,
    params: WorkItemCreateParams,
) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };

    let mut ops = vec![PatchOp::add_field("System.Title", params.title.clone())];
    if let Some(ref description) = params.description {
        ops.push(PatchOp::add_field("System.Description", description.clone()));
    }

    let item = match ctx
        .client
        .create_work_item(&project, &params.work_item_type, &ops)
        .await
    {
        Ok(item) => item,
        Err(e) => return Ok(error_reply(e)),
    };

    let mut message = format!(
        "Created {} #{}: {}",
        item.work_item_type(),
        item.id,
        item.title()
    );

    if let Some(parent_id) = params.parent_id {
        let parent_url = format!(
            "{}/{}/_apis/wit/workItems/{}",
            ctx.config.organization_url.trim_end_matches('/'),
            project,
            parent_id
        );
        let link = PatchOp::add(
            "/relations/-",
            json!({ "rel": REL_PARENT, "url": parent_url }),
        );
        match ctx.client.update_work_item(&project, item.id, &[link]).await {
            Ok(_) => message.push_str(&format!("\nLinked under parent #{}", parent_id)),
            Err(e) => {
                warn!(error = %e, parent = parent_id, "parent link failed after create");
                message.push_str(&format!(
                    "\nNote: could not link under parent #{} ({})",
                    parent_id, e
                ));
            }
        }
    }

    Ok(text_reply(message))
}
