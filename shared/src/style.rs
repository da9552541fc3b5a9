//! Startup style document for the map engine (MapLibre style version 8).

use serde_json::{Value, json};

use crate::expression::{expression_for, extrusion_base_value, extrusion_height_value};
use crate::tile_source::{
    BASEMAP_ATTRIBUTION, BASEMAP_MAX_ZOOM, BASEMAP_TILE_SIZE, BASEMAP_TILE_URLS,
    CADASTRE_SOURCE_LAYER, CADASTRE_ZOOM_RANGE, TileSource,
};
use crate::view::{ViewState, visibility_value};

pub const BASEMAP_SOURCE: &str = "osm";
pub const CADASTRE_SOURCE: &str = "cadastre";

pub const BASEMAP_LAYER: &str = "osm";
pub const FILL_LAYER: &str = "cadastre-lots-fill";
pub const OUTLINE_LAYER: &str = "cadastre-lots-outline";
pub const EXTRUSION_LAYER: &str = "cadastre-lots-extrusion";

pub const VISIBILITY_PROPERTY: &str = "visibility";
pub const FILL_COLOR_PROPERTY: &str = "fill-color";
pub const EXTRUSION_COLOR_PROPERTY: &str = "fill-extrusion-color";

const FILL_OPACITY: f64 = 0.4;
const OUTLINE_COLOR: &str = "#003";
const OUTLINE_WIDTH: f64 = 0.5;
const EXTRUSION_OPACITY: f64 = 0.8;

/// Mexico City, `[lng, lat]`.
pub const INITIAL_CENTER: [f64; 2] = [-99.1332, 19.4326];
pub const INITIAL_ZOOM: f64 = 14.0;

/// Full style for `state`. Layer visibility and colors match what
/// [`crate::view::sync_commands`] would set for the same state.
pub fn build_style(tiles: &TileSource, state: &ViewState) -> Value {
    let flat = state.mode.flat_layers_visible();
    let colors = expression_for(state.attribute).to_style_value();

    json!({
        "version": 8,
        "sources": {
            BASEMAP_SOURCE: {
                "type": "raster",
                "tiles": BASEMAP_TILE_URLS,
                "tileSize": BASEMAP_TILE_SIZE,
                "attribution": BASEMAP_ATTRIBUTION,
                "maxzoom": BASEMAP_MAX_ZOOM,
            },
            CADASTRE_SOURCE: {
                "type": "vector",
                "tiles": [tiles.url_template()],
                "minzoom": *CADASTRE_ZOOM_RANGE.start(),
                "maxzoom": *CADASTRE_ZOOM_RANGE.end(),
            },
        },
        "layers": [
            {
                "id": BASEMAP_LAYER,
                "type": "raster",
                "source": BASEMAP_SOURCE,
                "paint": {},
            },
            {
                "id": FILL_LAYER,
                "type": "fill",
                "source": CADASTRE_SOURCE,
                "source-layer": CADASTRE_SOURCE_LAYER,
                "layout": { VISIBILITY_PROPERTY: visibility_value(flat) },
                "paint": {
                    FILL_COLOR_PROPERTY: colors.clone(),
                    "fill-opacity": FILL_OPACITY,
                },
            },
            {
                "id": OUTLINE_LAYER,
                "type": "line",
                "source": CADASTRE_SOURCE,
                "source-layer": CADASTRE_SOURCE_LAYER,
                "layout": { VISIBILITY_PROPERTY: visibility_value(flat) },
                "paint": {
                    "line-color": OUTLINE_COLOR,
                    "line-width": OUTLINE_WIDTH,
                },
            },
            {
                "id": EXTRUSION_LAYER,
                "type": "fill-extrusion",
                "source": CADASTRE_SOURCE,
                "source-layer": CADASTRE_SOURCE_LAYER,
                "layout": { VISIBILITY_PROPERTY: visibility_value(!flat) },
                "paint": {
                    EXTRUSION_COLOR_PROPERTY: colors,
                    "fill-extrusion-height": extrusion_height_value(),
                    "fill-extrusion-base": extrusion_base_value(),
                    "fill-extrusion-opacity": EXTRUSION_OPACITY,
                },
            },
        ],
    })
}

/// Constructor options for the engine's map object.
pub fn map_options(container: &str, style: Value) -> Value {
    let camera = crate::view::ViewMode::Flat.camera();
    json!({
        "container": container,
        "style": style,
        "center": INITIAL_CENTER,
        "zoom": INITIAL_ZOOM,
        "pitch": camera.pitch,
        "bearing": camera.bearing,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::attribute::ColoringAttribute;
    use crate::view::{EngineCommand, ViewMode, sync_commands};

    fn layer<'a>(style: &'a Value, id: &str) -> &'a Value {
        style["layers"]
            .as_array()
            .unwrap()
            .iter()
            .find(|layer| layer["id"] == id)
            .unwrap_or_else(|| panic!("layer {id} missing"))
    }

    #[test]
    fn vector_source_uses_the_versioned_template() {
        let style = build_style(
            &TileSource::new("http://localhost:8000", "v1.2"),
            &ViewState::default(),
        );
        let source = &style["sources"][CADASTRE_SOURCE];
        assert_eq!(
            source["tiles"],
            json!(["http://localhost:8000/tiles/{z}/{x}/{y}.pbf?v=v1.2"])
        );
        assert_eq!(source["minzoom"], json!(14));
        assert_eq!(source["maxzoom"], json!(18));
    }

    #[test]
    fn layers_are_stacked_basemap_first() {
        let style = build_style(&TileSource::new("", "v1"), &ViewState::default());
        let ids: Vec<&str> = style["layers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|layer| layer["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, [BASEMAP_LAYER, FILL_LAYER, OUTLINE_LAYER, EXTRUSION_LAYER]);
        for id in [FILL_LAYER, OUTLINE_LAYER, EXTRUSION_LAYER] {
            assert_eq!(layer(&style, id)["source-layer"], json!("cadastre"));
        }
    }

    #[test]
    fn extrusion_height_is_derived_from_level_count() {
        let style = build_style(&TileSource::new("", "v1"), &ViewState::default());
        let paint = &layer(&style, EXTRUSION_LAYER)["paint"];
        assert_eq!(
            paint["fill-extrusion-height"],
            json!(["*", ["coalesce", ["get", "niveles"], 1], 3.5])
        );
        assert_eq!(paint["fill-extrusion-base"], json!(0));
    }

    #[test]
    fn style_agrees_with_sync_commands_for_every_state() {
        for mode in [ViewMode::Flat, ViewMode::Extruded] {
            for attribute in ColoringAttribute::ALL {
                let state = ViewState { mode, attribute };
                let style = build_style(&TileSource::new("", "v1"), &state);

                for command in sync_commands(state) {
                    match command {
                        EngineCommand::SetLayoutProperty {
                            layer: id,
                            property,
                            value,
                        } => assert_eq!(layer(&style, id)["layout"][property], value),
                        EngineCommand::SetPaintProperty {
                            layer: id,
                            property,
                            value,
                        } => assert_eq!(layer(&style, id)["paint"][property], value),
                        _ => {}
                    }
                }
            }
        }
    }

    #[test]
    fn map_options_start_over_mexico_city_looking_down() {
        let options = map_options("map", json!({}));
        assert_eq!(options["container"], json!("map"));
        assert_eq!(options["center"], json!([-99.1332, 19.4326]));
        assert_eq!(options["zoom"], json!(14.0));
        assert_eq!(options["pitch"], json!(0.0));
    }
}
