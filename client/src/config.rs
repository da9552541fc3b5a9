use cadastre_shared::ViewerConfig;

const VIEWER_CONFIG_URL: &str = "/api/viewer-config";

pub async fn fetch_viewer_config() -> Result<ViewerConfig, String> {
    let resp = gloo_net::http::Request::get(VIEWER_CONFIG_URL)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<ViewerConfig>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// The host's configuration, or the built-in defaults when it is unreachable
/// (e.g. the bundle is served by `trunk serve` alone).
pub async fn load_viewer_config() -> ViewerConfig {
    match fetch_viewer_config().await {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Viewer config unavailable ({e}); using defaults").into(),
            );
            ViewerConfig::default()
        }
    }
}
