//! The view state machine.
//!
//! [`ViewState`] is the cross product of dimensionality and coloring
//! attribute. Every transition is a pure function returning the next state
//! and the commands that bring the map engine and the page in line with it.
//! Nothing here talks to the engine directly.

use serde::Serialize;
use serde_json::{Value, json};

use crate::attribute::ColoringAttribute;
use crate::error::ConfigError;
use crate::expression::expression_for;
use crate::legend::{LegendDefinition, render_legend};
use crate::style::{
    EXTRUSION_COLOR_PROPERTY, EXTRUSION_LAYER, FILL_COLOR_PROPERTY, FILL_LAYER, OUTLINE_LAYER,
    VISIBILITY_PROPERTY,
};

/// Camera ease duration for a dimensionality switch.
pub const TOGGLE_DURATION_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Flat,
    Extruded,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub pitch: f64,
    pub bearing: f64,
}

impl ViewMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Flat => Self::Extruded,
            Self::Extruded => Self::Flat,
        }
    }

    pub const fn camera(self) -> CameraPose {
        match self {
            Self::Flat => CameraPose {
                pitch: 0.0,
                bearing: 0.0,
            },
            Self::Extruded => CameraPose {
                pitch: 60.0,
                bearing: -20.0,
            },
        }
    }

    /// Fill and outline are shown together; extrusion is always the opposite.
    pub const fn flat_layers_visible(self) -> bool {
        matches!(self, Self::Flat)
    }

    pub const fn extrusion_visible(self) -> bool {
        !self.flat_layers_visible()
    }
}

/// Label of the toggle control: it names the action a click performs.
pub const fn toggle_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Flat => "Switch to 3D",
        ViewMode::Extruded => "Switch to 2D",
    }
}

pub(crate) fn visibility_value(visible: bool) -> Value {
    json!(if visible { "visible" } else { "none" })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ViewState {
    pub mode: ViewMode,
    pub attribute: ColoringAttribute,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Flat,
            attribute: ColoringAttribute::initial(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    ToggleDimensionality,
    SelectAttribute(ColoringAttribute),
}

/// A declarative instruction for the map engine or the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineCommand {
    SetLayoutProperty {
        layer: &'static str,
        property: &'static str,
        value: Value,
    },
    SetPaintProperty {
        layer: &'static str,
        property: &'static str,
        value: Value,
    },
    /// Fire-and-forget: the engine animates on its own scheduler and a later
    /// ease simply retargets the camera.
    EaseCamera {
        pitch: f64,
        bearing: f64,
        duration_ms: u32,
    },
    SetToggleLabel {
        label: &'static str,
    },
    RenderLegend {
        legend: LegendDefinition,
    },
}

impl EngineCommand {
    /// Page-bound commands become a [`PageUpdate`]; engine-bound ones come
    /// back unchanged.
    pub fn into_page_update(self) -> Result<PageUpdate, EngineCommand> {
        match self {
            Self::SetToggleLabel { label } => Ok(PageUpdate::ToggleLabel(label)),
            Self::RenderLegend { legend } => Ok(PageUpdate::Legend(legend)),
            engine_bound => Err(engine_bound),
        }
    }
}

/// A write to one of the page regions.
#[derive(Debug, Clone, PartialEq)]
pub enum PageUpdate {
    ToggleLabel(&'static str),
    Legend(LegendDefinition),
}

/// Commands split by target. Relative order is kept on each side.
#[derive(Debug, Default, PartialEq)]
pub struct RoutedCommands {
    pub engine: Vec<EngineCommand>,
    pub page: Vec<PageUpdate>,
}

pub fn route_commands(commands: Vec<EngineCommand>) -> RoutedCommands {
    let mut routed = RoutedCommands::default();
    for command in commands {
        match command.into_page_update() {
            Ok(update) => routed.page.push(update),
            Err(command) => routed.engine.push(command),
        }
    }
    routed
}

fn visibility_commands(mode: ViewMode) -> [EngineCommand; 3] {
    let flat = mode.flat_layers_visible();
    let layout = |layer, visible| EngineCommand::SetLayoutProperty {
        layer,
        property: VISIBILITY_PROPERTY,
        value: visibility_value(visible),
    };
    [
        layout(FILL_LAYER, flat),
        layout(OUTLINE_LAYER, flat),
        layout(EXTRUSION_LAYER, !flat),
    ]
}

fn camera_command(mode: ViewMode, duration_ms: u32) -> EngineCommand {
    let CameraPose { pitch, bearing } = mode.camera();
    EngineCommand::EaseCamera {
        pitch,
        bearing,
        duration_ms,
    }
}

/// Both the fill and the extrusion layer carry the active attribute's colors,
/// so whichever one becomes visible next is never stale.
fn color_commands(attribute: ColoringAttribute) -> [EngineCommand; 2] {
    let value = expression_for(attribute).to_style_value();
    [
        EngineCommand::SetPaintProperty {
            layer: FILL_LAYER,
            property: FILL_COLOR_PROPERTY,
            value: value.clone(),
        },
        EngineCommand::SetPaintProperty {
            layer: EXTRUSION_LAYER,
            property: EXTRUSION_COLOR_PROPERTY,
            value,
        },
    ]
}

/// Pure transition. Each event moves along exactly one axis of the state.
pub fn transition(state: ViewState, event: ViewEvent) -> (ViewState, Vec<EngineCommand>) {
    match event {
        ViewEvent::ToggleDimensionality => {
            let mode = state.mode.toggled();
            let mut commands = Vec::with_capacity(5);
            commands.push(camera_command(mode, TOGGLE_DURATION_MS));
            commands.extend(visibility_commands(mode));
            commands.push(EngineCommand::SetToggleLabel {
                label: toggle_label(mode),
            });
            (ViewState { mode, ..state }, commands)
        }
        ViewEvent::SelectAttribute(attribute) => {
            let mut commands = Vec::with_capacity(3);
            commands.extend(color_commands(attribute));
            commands.push(EngineCommand::RenderLegend {
                legend: render_legend(attribute),
            });
            (ViewState { attribute, ..state }, commands)
        }
    }
}

/// Every command needed to make the engine and page match `state` from
/// scratch, with an instant camera move.
pub fn sync_commands(state: ViewState) -> Vec<EngineCommand> {
    let mut commands = Vec::with_capacity(8);
    commands.push(camera_command(state.mode, 0));
    commands.extend(visibility_commands(state.mode));
    commands.extend(color_commands(state.attribute));
    commands.push(EngineCommand::SetToggleLabel {
        label: toggle_label(state.mode),
    });
    commands.push(EngineCommand::RenderLegend {
        legend: render_legend(state.attribute),
    });
    commands
}

/// Owner of the single view state.
#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn dispatch(&mut self, event: ViewEvent) -> Vec<EngineCommand> {
        let (next, commands) = transition(self.state, event);
        self.state = next;
        commands
    }

    /// Selector entry point: the key must name a registered attribute.
    pub fn select_key(&mut self, key: &str) -> Result<Vec<EngineCommand>, ConfigError> {
        let attribute = ColoringAttribute::from_key(key)?;
        Ok(self.dispatch(ViewEvent::SelectAttribute(attribute)))
    }

    pub fn sync(&self) -> Vec<EngineCommand> {
        sync_commands(self.state)
    }
}

/// Zoom readout text.
pub fn format_zoom(zoom: f64) -> String {
    format!("{zoom:.2}")
}
