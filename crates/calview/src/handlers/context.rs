use axum::Json;
use serde::Serialize;

use calview_core::context::RequestContext;

use crate::context::ResolvedContext;

/// JSON view of a resolved request context.
#[derive(Debug, Serialize)]
pub struct ContextView {
    pub request_id: String,
    pub base_url: String,
    #[serde(flatten)]
    pub context: RequestContext,
}

/// Show the resolved context for the current request (GET /).
///
/// Stands in for the page renderer: everything a view needs to decide what
/// to draw is in the response.
pub async fn show_context(resolved: ResolvedContext) -> Json<ContextView> {
    let ResolvedContext {
        context,
        request_id,
    } = resolved;

    Json(ContextView {
        request_id: request_id.to_string(),
        base_url: context.transport().base_url(),
        context,
    })
}
