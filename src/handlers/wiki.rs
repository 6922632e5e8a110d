//! Wiki handler implementations

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;

use crate::params::{WikiListParams, WikiPageGetParams};

use super::{error_reply, json_reply, require_project, text_reply, Ctx};

/// List the wikis in a project
pub async fn wiki_list(ctx: &Ctx, params: WikiListParams) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };

    match ctx.client.list_wikis(&project).await {
        Ok(wikis) => json_reply(&wikis),
        Err(e) => Ok(error_reply(e)),
    }
}

/// Read a wiki page with its content
pub async fn wiki_page_get(
    ctx: &Ctx,
    params: WikiPageGetParams,
) -> Result<CallToolResult, McpError> {
    let project = match require_project(ctx, params.project.as_deref()) {
        Ok(p) => p,
        Err(reply) => return Ok(reply),
    };

    match ctx
        .client
        .get_wiki_page(&project, &params.wiki, &params.path)
        .await
    {
        Ok(page) => {
            let mut out = format!("# Wiki page {}\n\n", page.path);
            match page.content {
                Some(ref content) if !content.is_empty() => out.push_str(content),
                _ => out.push_str("(page has no content)"),
            }
            if !page.sub_pages.is_empty() {
                out.push_str("\n\n## Sub-pages\n\n");
                for sub in &page.sub_pages {
                    out.push_str(&format!("- {}\n", sub.path));
                }
            }
            Ok(text_reply(out))
        }
        Err(e) if e.is_lookup_miss() => Ok(error_reply(format!(
            "Wiki page '{}' not found in wiki '{}'",
            params.path, params.wiki
        ))),
        Err(e) => Ok(error_reply(e)),
    }
}
