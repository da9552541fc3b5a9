pub mod attribute;
pub mod color;
pub mod error;
pub mod expression;
pub mod legend;
pub mod style;
pub mod tile_source;
pub mod view;
pub mod viewer_config;

pub use attribute::ColoringAttribute;
pub use color::Color;
pub use error::ConfigError;
pub use expression::{ColorExpression, color_for, expression_for};
pub use legend::{LegendDefinition, LegendEntry, render_legend};
pub use tile_source::{TileSource, build_tile_url};
pub use view::{
    EngineCommand, PageUpdate, RoutedCommands, ViewController, ViewEvent, ViewMode, ViewState,
    route_commands,
};
pub use viewer_config::ViewerConfig;
