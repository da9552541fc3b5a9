use serde::Serialize;

use crate::attribute::ColoringAttribute;
use crate::color::Color;
use crate::error::ConfigError;
use crate::expression::{ColorExpression, borough, expression_for, land_use};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Color,
}

/// Title plus ordered entries for one coloring attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendDefinition {
    pub title: &'static str,
    pub entries: &'static [LegendEntry],
}

const fn entry(label: &'static str, color: Color) -> LegendEntry {
    LegendEntry { label, color }
}

static LAND_USE_LEGEND: LegendDefinition = LegendDefinition {
    title: "Land use",
    entries: &[
        entry("Habitacional (H)", land_use::H),
        entry("Habitacional con Comercio (HC)", land_use::HC),
        entry("Habitacional con Oficinas (HO)", land_use::HO),
        entry("Habitacional Mixto (HM)", land_use::HM),
        entry("Centro de Barrio (CB)", land_use::CB),
        entry("Equipamiento (E)", land_use::E),
        entry("Industria (I)", land_use::I),
        entry("Espacio Abierto (EA)", land_use::EA),
        entry("Áreas Verdes (AV)", land_use::AV),
    ],
};

static BOROUGH_LEGEND: LegendDefinition = LegendDefinition {
    title: "Borough",
    entries: &[
        entry("Álvaro Obregón", borough::ALVARO_OBREGON),
        entry("Azcapotzalco", borough::AZCAPOTZALCO),
        entry("Benito Juárez", borough::BENITO_JUAREZ),
        entry("Coyoacán", borough::COYOACAN),
        entry("Cuajimalpa de Morelos", borough::CUAJIMALPA),
        entry("Cuauhtémoc", borough::CUAUHTEMOC),
        entry("Gustavo A. Madero", borough::GUSTAVO_A_MADERO),
        entry("Iztacalco", borough::IZTACALCO),
        entry("Iztapalapa", borough::IZTAPALAPA),
        entry("La Magdalena Contreras", borough::MAGDALENA_CONTRERAS),
        entry("Miguel Hidalgo", borough::MIGUEL_HIDALGO),
        entry("Milpa Alta", borough::MILPA_ALTA),
        entry("Tláhuac", borough::TLAHUAC),
        entry("Tlalpan", borough::TLALPAN),
        entry("Venustiano Carranza", borough::VENUSTIANO_CARRANZA),
        entry("Xochimilco", borough::XOCHIMILCO),
    ],
};

pub fn legend_for(attribute: ColoringAttribute) -> &'static LegendDefinition {
    match attribute {
        ColoringAttribute::LandUse => &LAND_USE_LEGEND,
        ColoringAttribute::Borough => &BOROUGH_LEGEND,
    }
}

/// Registry lookup by selector key. An unknown key never yields an empty
/// legend.
pub fn legend_for_key(key: &str) -> Result<&'static LegendDefinition, ConfigError> {
    ColoringAttribute::from_key(key).map(legend_for)
}

/// The full replacement contents of the legend panel.
pub fn render_legend(attribute: ColoringAttribute) -> LegendDefinition {
    legend_for(attribute).clone()
}

pub fn render_legend_for_key(key: &str) -> Result<LegendDefinition, ConfigError> {
    legend_for_key(key).cloned()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegendMismatch {
    /// A categorical value whose color has no legend entry.
    MissingEntry {
        attribute: ColoringAttribute,
        value: &'static str,
        color: Color,
    },
    /// A legend entry showing a color the expression never produces.
    OrphanEntry {
        attribute: ColoringAttribute,
        label: &'static str,
        color: Color,
    },
}

impl std::fmt::Display for LegendMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEntry {
                attribute,
                value,
                color,
            } => write!(
                f,
                "{}: value `{value}` is drawn in {color} but has no legend entry",
                attribute.key()
            ),
            Self::OrphanEntry {
                attribute,
                label,
                color,
            } => write!(
                f,
                "{}: legend entry `{label}` shows {color}, which no value is drawn in",
                attribute.key()
            ),
        }
    }
}

/// Compare a color table against a legend. Mismatches are reported, never
/// corrected.
pub fn check_consistency(
    expression: &ColorExpression,
    legend: &LegendDefinition,
) -> Vec<LegendMismatch> {
    let attribute = expression.attribute;
    let mut mismatches = Vec::new();

    for (value, color) in expression.stops {
        if !legend.entries.iter().any(|entry| entry.color == *color) {
            mismatches.push(LegendMismatch::MissingEntry {
                attribute,
                value: *value,
                color: *color,
            });
        }
    }

    for entry in legend.entries {
        if !expression.colors().any(|color| color == entry.color) {
            mismatches.push(LegendMismatch::OrphanEntry {
                attribute,
                label: entry.label,
                color: entry.color,
            });
        }
    }

    mismatches
}

/// Check every registered attribute.
pub fn check_registry() -> Vec<LegendMismatch> {
    ColoringAttribute::ALL
        .into_iter()
        .flat_map(|attribute| check_consistency(expression_for(attribute), legend_for(attribute)))
        .collect()
}
