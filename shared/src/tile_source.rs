use std::ops::RangeInclusive;

/// Name of the single layer inside every cadastre vector tile.
pub const CADASTRE_SOURCE_LAYER: &str = "cadastre";

/// Zoom levels at which the viewer requests cadastre tiles. Parcels are too
/// small to read below 14; above 18 the engine overzooms the z18 tiles.
pub const CADASTRE_ZOOM_RANGE: RangeInclusive<u8> = 14..=18;

pub const BASEMAP_TILE_URLS: [&str; 3] = [
    "https://a.tile.openstreetmap.org/{z}/{x}/{y}.png",
    "https://b.tile.openstreetmap.org/{z}/{x}/{y}.png",
    "https://c.tile.openstreetmap.org/{z}/{x}/{y}.png",
];
pub const BASEMAP_TILE_SIZE: u32 = 256;
pub const BASEMAP_MAX_ZOOM: u8 = 19;
pub const BASEMAP_ATTRIBUTION: &str = "&copy; OpenStreetMap Contributors";

/// Vector tile URL template for an origin and a cache-busting version tag.
///
/// Bump the version tag whenever the tile schema changes (property names,
/// geometry encoding): every tile URL changes with it, so browser and CDN
/// caches miss without a server-side purge. The origin is used verbatim.
pub fn build_tile_url(origin: &str, version_tag: &str) -> String {
    format!("{origin}/tiles/{{z}}/{{x}}/{{y}}.pbf?v={version_tag}")
}

/// Where cadastre tiles come from. Resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    pub origin: String,
    pub version_tag: String,
}

impl TileSource {
    pub fn new(origin: impl Into<String>, version_tag: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            version_tag: version_tag.into(),
        }
    }

    pub fn url_template(&self) -> String {
        build_tile_url(&self.origin, &self.version_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::{TileSource, build_tile_url};

    #[test]
    fn builds_versioned_template() {
        assert_eq!(
            build_tile_url("http://localhost:8000", "v1.2"),
            "http://localhost:8000/tiles/{z}/{x}/{y}.pbf?v=v1.2"
        );
    }

    #[test]
    fn bumping_the_version_changes_every_url() {
        let before = TileSource::new("https://tiles.example.mx", "2024-01");
        let after = TileSource::new("https://tiles.example.mx", "2024-02");
        assert_ne!(before.url_template(), after.url_template());
        assert!(after.url_template().ends_with(".pbf?v=2024-02"));
    }

    #[test]
    fn origin_is_not_normalized() {
        assert_eq!(
            build_tile_url("", "v1"),
            "/tiles/{z}/{x}/{y}.pbf?v=v1"
        );
        assert_eq!(
            build_tile_url("http://host/", "v1"),
            "http://host//tiles/{z}/{x}/{y}.pbf?v=v1"
        );
    }
}
