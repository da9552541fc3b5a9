use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Optional numeric feature property holding the number of built levels.
pub const LEVEL_COUNT_PROPERTY: &str = "niveles";

/// The feature property currently driving parcel fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColoringAttribute {
    LandUse,
    Borough,
}

impl ColoringAttribute {
    /// Registration order. The first entry is the attribute active at startup.
    pub const ALL: [ColoringAttribute; 2] = [ColoringAttribute::LandUse, ColoringAttribute::Borough];

    pub const fn initial() -> Self {
        Self::ALL[0]
    }

    /// Stable key used by the coloring-mode selector.
    pub const fn key(self) -> &'static str {
        match self {
            Self::LandUse => "land_use",
            Self::Borough => "borough",
        }
    }

    /// Vector-tile feature property carrying the categorical value.
    pub const fn property(self) -> &'static str {
        match self {
            Self::LandUse => "uso_suelo",
            Self::Borough => "alcaldia",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LandUse => "Land use",
            Self::Borough => "Borough",
        }
    }

    pub fn from_key(key: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.key() == key)
            .ok_or_else(|| ConfigError::UnknownAttribute(key.to_string()))
    }
}
