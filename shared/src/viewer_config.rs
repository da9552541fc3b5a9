use serde::{Deserialize, Serialize};

use crate::tile_source::TileSource;

pub const DEFAULT_TILE_ORIGIN: &str = "http://localhost:8000";
pub const DEFAULT_TILE_VERSION: &str = "v1";

/// Runtime configuration handed from the host to the browser client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub tile_origin: String,
    pub tile_version: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tile_origin: DEFAULT_TILE_ORIGIN.to_string(),
            tile_version: DEFAULT_TILE_VERSION.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn tile_source(&self) -> TileSource {
        TileSource::new(self.tile_origin.clone(), self.tile_version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerConfig;

    #[test]
    fn missing_fields_take_defaults() {
        let config: ViewerConfig = serde_json::from_str(r#"{"tile_version":"v7"}"#).unwrap();
        assert_eq!(config.tile_origin, "http://localhost:8000");
        assert_eq!(config.tile_version, "v7");
    }

    #[test]
    fn converts_into_tile_source() {
        let config = ViewerConfig::default();
        assert_eq!(
            config.tile_source().url_template(),
            "http://localhost:8000/tiles/{z}/{x}/{y}.pbf?v=v1"
        );
    }
}
