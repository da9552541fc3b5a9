//! Bindings to the page-global `maplibregl` engine and the adapter that
//! turns state-machine commands into engine calls.

use std::cell::Cell;

use cadastre_shared::EngineCommand;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = maplibregl)]
    pub type Map;

    #[wasm_bindgen(constructor, js_namespace = maplibregl, catch)]
    fn new(options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setLayoutProperty, catch)]
    fn set_layout_property(
        this: &Map,
        layer: &str,
        name: &str,
        value: &JsValue,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = setPaintProperty, catch)]
    fn set_paint_property(
        this: &Map,
        layer: &str,
        name: &str,
        value: &JsValue,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = easeTo)]
    fn ease_to(this: &Map, options: &JsValue);

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &Map) -> f64;

    #[wasm_bindgen(method)]
    fn on(this: &Map, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = addControl)]
    fn add_control(this: &Map, control: &NavigationControl);

    #[wasm_bindgen(js_namespace = maplibregl)]
    pub type NavigationControl;

    #[wasm_bindgen(constructor, js_namespace = maplibregl)]
    fn new() -> NavigationControl;
}

#[derive(Serialize)]
struct EaseOptions {
    pitch: f64,
    bearing: f64,
    duration: u32,
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("serialize error: {e}"))
}

fn js_error_text(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

/// A live map instance plus the event closures it holds on to.
pub struct MapEngine {
    map: Map,
    /// Property mutations are rejected by the engine until its style has
    /// loaded; until then commands are dropped and the load handler resyncs.
    style_loaded: Cell<bool>,
    /// Kept alive for as long as the map can call them.
    handlers: Vec<Closure<dyn FnMut()>>,
}

impl MapEngine {
    pub fn create(options: &serde_json::Value) -> Result<Self, String> {
        let options = to_js(options)?;
        let map = Map::new(&options).map_err(|e| js_error_text(&e))?;
        map.add_control(&NavigationControl::new());
        Ok(Self {
            map,
            style_loaded: Cell::new(false),
            handlers: Vec::new(),
        })
    }

    pub fn on(&mut self, event: &str, handler: impl FnMut() + 'static) {
        let closure = Closure::<dyn FnMut()>::new(handler);
        self.map.on(event, closure.as_ref().unchecked_ref());
        self.handlers.push(closure);
    }

    pub fn mark_style_loaded(&self) {
        self.style_loaded.set(true);
    }

    pub fn zoom(&self) -> f64 {
        self.map.get_zoom()
    }

    /// Forward one engine-bound command. Page-bound commands are ignored;
    /// callers route them with `route_commands` first.
    pub fn apply(&self, command: &EngineCommand) {
        if !self.style_loaded.get() {
            return;
        }

        let result = match command {
            EngineCommand::SetLayoutProperty {
                layer,
                property,
                value,
            } => to_js(value).and_then(|value| {
                self.map
                    .set_layout_property(layer, property, &value)
                    .map_err(|e| js_error_text(&e))
            }),
            EngineCommand::SetPaintProperty {
                layer,
                property,
                value,
            } => to_js(value).and_then(|value| {
                self.map
                    .set_paint_property(layer, property, &value)
                    .map_err(|e| js_error_text(&e))
            }),
            EngineCommand::EaseCamera {
                pitch,
                bearing,
                duration_ms,
            } => to_js(&EaseOptions {
                pitch: *pitch,
                bearing: *bearing,
                duration: *duration_ms,
            })
            .map(|options| self.map.ease_to(&options)),
            EngineCommand::SetToggleLabel { .. } | EngineCommand::RenderLegend { .. } => Ok(()),
        };

        if let Err(e) = result {
            web_sys::console::error_1(&format!("map command failed: {e}").into());
        }
    }
}
