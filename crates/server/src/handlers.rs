//! HTTP request handlers for the snapshot API

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use snapshot::{Aggregator, MarketSnapshot};
use std::sync::Arc;
use tracing::error;

/// Shared state for snapshot handlers
pub struct SnapshotState {
    pub aggregator: Aggregator,
}

impl SnapshotState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self { aggregator }
    }
}

/// GET /data - the snapshot document as pure JSON
pub async fn data_handler(State(state): State<Arc<SnapshotState>>) -> Response {
    match build_snapshot(&state).await {
        Ok(doc) => Json(doc).into_response(),
        Err(response) => response,
    }
}

/// GET /data/page - the identical JSON wrapped in an HTML `<pre>` block
/// for text-scraping consumers
pub async fn page_handler(State(state): State<Arc<SnapshotState>>) -> Response {
    let doc = match build_snapshot(&state).await {
        Ok(doc) => doc,
        Err(response) => return response,
    };

    match serde_json::to_string_pretty(&doc) {
        Ok(json) => Html(format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head><meta charset=\"UTF-8\"><title>Dashboard Data</title></head>\n\
             <body>\n\
             <pre id=\"dashboard-data\">\n{json}\n</pre>\n\
             </body>\n\
             </html>"
        ))
        .into_response(),
        Err(err) => {
            error!(%err, "failed to serialize snapshot");
            service_unavailable()
        }
    }
}

/// Build one snapshot on its own task.
///
/// The aggregator itself never fails, so the only way to reach the error
/// arm is a programming fault (panic) outside the per-block isolation
/// boundary. That fault surfaces as the fixed 500 response rather than a
/// dropped connection.
async fn build_snapshot(state: &SnapshotState) -> Result<MarketSnapshot, Response> {
    let aggregator = state.aggregator.clone();
    match tokio::spawn(async move { aggregator.snapshot().await }).await {
        Ok(doc) => Ok(doc),
        Err(err) => {
            error!(%err, "snapshot task failed");
            Err(service_unavailable())
        }
    }
}

/// The fixed top-level failure response
pub fn service_unavailable() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html("<p>Service temporarily unavailable.</p>"),
    )
        .into_response()
}
