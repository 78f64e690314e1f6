//! Axum extractor for ResolvedContext.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, uri::Authority, HeaderMap},
};
use calview_core::context::{ContextRequest, RequestParams, TransportMeta};
use uuid::Uuid;

use super::types::{RequestId, ResolvedContext};
use crate::{handlers::AppError, state::AppState};

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects the transport metadata the resolver needs from the request head.
fn extract_transport(parts: &Parts) -> TransportMeta {
    let authority = parts.uri.authority().cloned().or_else(|| {
        parts
            .headers
            .get("host")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Authority>().ok())
    });

    TransportMeta {
        script_name: parts.uri.path().to_string(),
        server_name: authority
            .as_ref()
            .map(|a| a.host().to_string())
            .unwrap_or_default(),
        server_port: authority.as_ref().and_then(Authority::port_u16),
        tls: parts.uri.scheme_str() == Some("https"),
        forwarded_proto: header_value(&parts.headers, "x-forwarded-proto"),
        forwarded_ssl: header_value(&parts.headers, "x-forwarded-ssl"),
        accept_language: header_value(&parts.headers, "accept-language"),
    }
}

fn extract_context_request(parts: &Parts, session_header: &str) -> ContextRequest {
    ContextRequest {
        params: RequestParams::from_query(parts.uri.query().unwrap_or_default()),
        session_user: header_value(&parts.headers, session_header),
        transport: extract_transport(parts),
    }
}

impl FromRequestParts<AppState> for ResolvedContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let request_id = extract_request_id(&parts.headers);
        let request = extract_context_request(parts, &state.session_header);

        let context = state.resolver.resolve(&request).await.map_err(|err| {
            tracing::info!(request_id = %request_id, error = %err, "Context resolution failed");
            AppError::from(err)
        })?;

        tracing::debug!(
            request_id = %request_id,
            calendar_id = %context.calendar().id,
            anonymous = context.user().is_anonymous(),
            "Resolved request context"
        );

        Ok(ResolvedContext {
            context,
            request_id,
        })
    }
}
