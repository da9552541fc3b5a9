use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState, client_dist: &Path) -> Router {
    let static_assets = Router::new()
        .fallback_service(
            ServeDir::new(client_dist)
                .precompressed_br()
                .precompressed_gzip(),
        )
        .layer(middleware::from_fn(set_static_cache_control));

    let app = Router::new()
        .route(
            "/api/viewer-config",
            axum::routing::get(routes::api::get_viewer_config),
        )
        .route("/api/health", axum::routing::get(routes::api::health));

    app.layer(CompressionLayer::new())
        .fallback_service(static_assets)
        .with_state(state)
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = cache_control_for_path(&path)
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

fn cache_control_for_path(path: &str) -> Option<&'static str> {
    if is_hashed_bundle_asset(path) {
        return Some("public, max-age=31536000, immutable");
    }

    None
}

/// Trunk emits `name-<hash>.ext` for every bundle file it fingerprints.
fn is_hashed_bundle_asset(path: &str) -> bool {
    let Some(ext) = Path::new(path).extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }

    let Some(filename) = Path::new(path).file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    filename
        .split(['-', '_', '.'])
        .any(|segment| segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cadastre_shared::ViewerConfig;
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    fn test_app() -> (Router, AppState, TempDir) {
        let dist = TempDir::new().expect("create dist dir");
        fs::write(dist.path().join("index.html"), "<!doctype html><div id=\"app\"></div>")
            .expect("write index.html");
        fs::write(
            dist.path().join("cadastre-client-71578f6b278221f3_bg.wasm"),
            b"\0asm",
        )
        .expect("write wasm bundle");

        let state = AppState::new(ViewerConfig {
            tile_origin: "https://tiles.example.mx".into(),
            tile_version: "v1.2".into(),
        });
        (build_app(state.clone(), dist.path()), state, dist)
    }

    async fn get(app: &Router, uri: &str) -> Response<Body> {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn viewer_config_is_served_uncached() {
        let (app, state, _dist) = test_app();

        let response = get(&app, "/api/viewer-config").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-cache"
        );
        let config: ViewerConfig = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(config.tile_origin, "https://tiles.example.mx");
        assert_eq!(config.tile_version, "v1.2");
        assert_eq!(
            state.observability.snapshot().viewer_config_requests_total,
            1
        );
    }

    #[tokio::test]
    async fn health_reports_the_resolved_tile_template() {
        let (app, _state, _dist) = test_app();

        let response = get(&app, "/api/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(
            json["tile_url"],
            "https://tiles.example.mx/tiles/{z}/{x}/{y}.pbf?v=v1.2"
        );
    }

    #[tokio::test]
    async fn static_files_fall_back_to_the_client_bundle() {
        let (app, _state, _dist) = test_app();

        let index = get(&app, "/").await;
        assert_eq!(index.status(), StatusCode::OK);
        assert!(index.headers().get(header::CACHE_CONTROL).is_none());

        let wasm = get(&app, "/cadastre-client-71578f6b278221f3_bg.wasm").await;
        assert_eq!(wasm.status(), StatusCode::OK);
        assert_eq!(
            wasm.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=31536000, immutable"
        );

        let missing = get(&app, "/nope.js").await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert!(missing.headers().get(header::CACHE_CONTROL).is_none());
    }

    #[test]
    fn immutable_cache_for_hashed_bundle_assets() {
        assert_eq!(
            cache_control_for_path("/cadastre-client-71578f6b278221f3_bg.wasm"),
            Some("public, max-age=31536000, immutable")
        );
        assert_eq!(
            cache_control_for_path("/input-a93762ff3bf6d63a.css"),
            Some("public, max-age=31536000, immutable")
        );
    }

    #[test]
    fn unhashed_assets_keep_default_caching() {
        assert_eq!(cache_control_for_path("/style.css"), None);
        assert_eq!(cache_control_for_path("/vendor/maplibre-gl.js"), None);
    }

    #[test]
    fn no_cache_header_override_for_html() {
        assert_eq!(cache_control_for_path("/"), None);
        assert_eq!(cache_control_for_path("/index.html"), None);
        assert_eq!(cache_control_for_path("/app.js"), None);
    }
}
