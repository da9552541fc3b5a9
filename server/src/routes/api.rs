use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Tile origin and version for the browser client. Never cached, so a bumped
/// tile version reaches every client on its next page load.
pub async fn get_viewer_config(State(state): State<AppState>) -> Response {
    state.observability.record_viewer_config_request();
    let mut response = Json(state.viewer_config.as_ref().clone()).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "tile_url": state.viewer_config.tile_source().url_template(),
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "observability": {
            "viewer_config_requests_total": observability.viewer_config_requests_total,
        }
    }))
}
