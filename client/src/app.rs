use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use cadastre_shared::legend::{check_registry, render_legend};
use cadastre_shared::style::{build_style, map_options};
use cadastre_shared::view::toggle_label;
use cadastre_shared::{
    ConfigError, EngineCommand, LegendDefinition, PageUpdate, ViewController, ViewEvent,
    ViewState, ViewerConfig, route_commands,
};

use crate::config::load_viewer_config;
use crate::maplibre::MapEngine;
use crate::panel::{AttributeSelect, LegendPanel, ViewToggle, ZoomReadout};

pub(crate) const MAP_CONTAINER_ID: &str = "map";

/// Page regions the view state machine writes to.
#[derive(Clone, Copy)]
pub(crate) struct PageRegions {
    pub state: RwSignal<ViewState>,
    pub toggle_label: RwSignal<&'static str>,
    pub legend: RwSignal<LegendDefinition>,
    pub zoom: RwSignal<Option<f64>>,
}

/// Sole writer of the view state, the engine's layer properties and the page
/// regions. Handlers run one at a time on the event loop, so plain `RefCell`s
/// are enough.
#[derive(Clone)]
pub(crate) struct Dispatcher {
    controller: Rc<RefCell<ViewController>>,
    engine: Rc<RefCell<Option<MapEngine>>>,
    page: PageRegions,
}

impl Dispatcher {
    pub fn dispatch(&self, event: ViewEvent) {
        let commands = self.controller.borrow_mut().dispatch(event);
        self.run(commands);
    }

    pub fn select_key(&self, key: &str) -> Result<(), ConfigError> {
        let commands = self.controller.borrow_mut().select_key(key)?;
        self.run(commands);
        Ok(())
    }

    fn on_style_loaded(&self) {
        if let Some(engine) = self.engine.borrow().as_ref() {
            engine.mark_style_loaded();
        }
        let commands = self.controller.borrow().sync();
        self.run(commands);
        self.refresh_zoom();
    }

    fn refresh_zoom(&self) {
        let zoom = self.engine.borrow().as_ref().map(MapEngine::zoom);
        self.page.zoom.set(zoom);
    }

    fn run(&self, commands: Vec<EngineCommand>) {
        self.page.state.set(self.controller.borrow().state());
        let routed = route_commands(commands);
        for update in routed.page {
            match update {
                PageUpdate::ToggleLabel(label) => self.page.toggle_label.set(label),
                PageUpdate::Legend(legend) => self.page.legend.set(legend),
            }
        }
        if let Some(engine) = self.engine.borrow().as_ref() {
            for command in &routed.engine {
                engine.apply(command);
            }
        }
    }
}

fn require_element(id: &str) -> Result<web_sys::Element, ConfigError> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
        .ok_or_else(|| ConfigError::MissingElement(id.to_string()))
}

fn create_engine(dispatcher: &Dispatcher, config: &ViewerConfig) {
    if let Err(e) = require_element(MAP_CONTAINER_ID) {
        panic!("{e}");
    }

    let state = dispatcher.controller.borrow().state();
    let tiles = config.tile_source();
    web_sys::console::info_1(&format!("cadastre tiles: {}", tiles.url_template()).into());
    let options = map_options(MAP_CONTAINER_ID, build_style(&tiles, &state));

    let mut engine = match MapEngine::create(&options) {
        Ok(engine) => engine,
        Err(reason) => panic!("{}", ConfigError::EngineUnavailable(reason)),
    };
    engine.on("load", {
        let dispatcher = dispatcher.clone();
        move || dispatcher.on_style_loaded()
    });
    engine.on("move", {
        let dispatcher = dispatcher.clone();
        move || dispatcher.refresh_zoom()
    });
    *dispatcher.engine.borrow_mut() = Some(engine);
}

#[component]
pub fn App() -> impl IntoView {
    let controller = ViewController::new();
    let initial = controller.state();
    let page = PageRegions {
        state: RwSignal::new(initial),
        toggle_label: RwSignal::new(toggle_label(initial.mode)),
        legend: RwSignal::new(render_legend(initial.attribute)),
        zoom: RwSignal::new(None),
    };
    let dispatcher = Dispatcher {
        controller: Rc::new(RefCell::new(controller)),
        engine: Rc::new(RefCell::new(None)),
        page,
    };

    for mismatch in check_registry() {
        web_sys::console::warn_1(&format!("legend mismatch: {mismatch}").into());
    }

    let viewer_config: RwSignal<Option<ViewerConfig>> = RwSignal::new(None);
    spawn_local(async move {
        viewer_config.set(Some(load_viewer_config().await));
    });

    // Build the map once the container is mounted and the config is known.
    Effect::new({
        let dispatcher = dispatcher.clone();
        move || {
            let Some(config) = viewer_config.get() else {
                return;
            };
            if dispatcher.engine.borrow().is_some() {
                return;
            }
            create_engine(&dispatcher, &config);
        }
    });

    view! {
        <div class="viewer">
            <div id=MAP_CONTAINER_ID class="map"></div>
            <aside class="panel">
                <ViewToggle dispatcher=dispatcher.clone() page=page />
                <AttributeSelect dispatcher=dispatcher page=page />
                <ZoomReadout page=page />
                <LegendPanel page=page />
            </aside>
        </div>
    }
}
