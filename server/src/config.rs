use std::path::PathBuf;

use cadastre_shared::ViewerConfig;
use cadastre_shared::viewer_config::{DEFAULT_TILE_ORIGIN, DEFAULT_TILE_VERSION};

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_CLIENT_DIST_DIR: &str = "client/dist";

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Origin of the vector tile backend, without a trailing `/tiles`.
pub fn tile_origin() -> String {
    non_empty_env("TILE_ORIGIN").unwrap_or_else(|| DEFAULT_TILE_ORIGIN.to_string())
}

/// Cache-busting tag appended to every tile URL. Bump it whenever the tile
/// schema changes.
pub fn tile_version() -> String {
    non_empty_env("TILE_VERSION").unwrap_or_else(|| DEFAULT_TILE_VERSION.to_string())
}

pub fn server_port() -> u16 {
    non_empty_env("SERVER_PORT")
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn client_dist_dir() -> PathBuf {
    non_empty_env("CLIENT_DIST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CLIENT_DIST_DIR))
}

pub fn viewer_config() -> ViewerConfig {
    ViewerConfig {
        tile_origin: tile_origin(),
        tile_version: tile_version(),
    }
}
