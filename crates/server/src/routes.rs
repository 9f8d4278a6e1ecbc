//! Route definitions for the snapshot API

use crate::handlers::{self, SnapshotState};
use crate::health::{self, HealthState};
use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the full application router.
///
/// # Routes
///
/// - `GET /data` - snapshot document as JSON
/// - `GET /data/page` - the same JSON inside an HTML `<pre>` wrapper
/// - `GET /health` - service health
/// - `OPTIONS *` - CORS preflight (204)
pub fn router(state: Arc<SnapshotState>, health_state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/data", get(handlers::data_handler))
        .route("/data/page", get(handlers::page_handler))
        .with_state(state)
        .merge(health::health_routes(health_state))
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
}

/// CORS for browser consumers: a 204 preflight for OPTIONS requests and a
/// wildcard allow-origin header on every other response.
async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return (
            StatusCode::NO_CONTENT,
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
                (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            ],
        )
            .into_response();
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}
