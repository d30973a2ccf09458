//! Request plumbing shared by the per-generation clients.

use std::time::Instant;

use serde_json::Value;
use tracing::debug;

use crate::constants::OP_GET_WATCH;
use crate::metrics;
use crate::BackendVersion;
use crate::ErrorDetails;
use crate::Request;
use crate::Response;
use crate::Transport;
use crate::TransportError;

pub(crate) async fn send(
    transport: &dyn Transport,
    version: BackendVersion,
    operation: &'static str,
    request: Request,
) -> Result<Response, TransportError> {
    debug!(
        "[{}] {} {} /{}",
        version.as_label(),
        operation,
        request.method,
        request.segments.join("/")
    );

    let started = Instant::now();
    let result = transport.perform(request).await;
    metrics::observe_backend_call(version, operation, call_outcome(operation, &result), started.elapsed());

    result
}

/// Metric outcome label of one call.
///
/// Only a lookup may end in `not_found`; a 404 on any other operation is a failure.
pub(crate) fn call_outcome(
    operation: &str,
    result: &Result<Response, TransportError>,
) -> &'static str {
    match result {
        Ok(response) if response.is_success() => "ok",
        Ok(response) if response.status == 404 && operation == OP_GET_WATCH => "not_found",
        _ => "error",
    }
}

/// Builds `<prefix>/watch/<id>[/<action>]`.
pub(crate) fn watch_segments<'a>(
    prefix: &[&'a str],
    watch_id: &'a str,
    action: Option<&'a str>,
) -> Vec<&'a str> {
    let mut segments = prefix.to_vec();
    segments.push("watch");
    segments.push(watch_id);
    if let Some(action) = action {
        segments.push(action);
    }
    segments
}

/// Extracts error details from an Elasticsearch error body.
///
/// Handles the structured `{"error": {"type", "reason"}}` form, the plain string form
/// older clusters send, and the `{"found": false}` body of document-style 404s.
pub(crate) fn error_details(
    status: u16,
    body: &str,
) -> ErrorDetails {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    match parsed.as_ref().and_then(|v| v.get("error")) {
        Some(Value::Object(error)) => ErrorDetails {
            kind: error.get("type").and_then(Value::as_str).map(str::to_string),
            reason: error
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or("unknown reason")
                .to_string(),
        },
        Some(Value::String(reason)) => ErrorDetails {
            kind: None,
            reason: reason.clone(),
        },
        _ => {
            let found = parsed.as_ref().and_then(|v| v.get("found")).and_then(Value::as_bool);
            let reason = match found {
                Some(false) => "not found".to_string(),
                _ if body.trim().is_empty() => format!("HTTP status {}", status),
                _ => body.trim().to_string(),
            };
            ErrorDetails { kind: None, reason }
        }
    }
}
