//! Categorical color tables and the engine expressions generated from them.
//!
//! Each table is plain data: ordered `(value, color)` stops plus a fallback.
//! [`ColorExpression::color_for`] is the reference evaluator; the map engine
//! receives the equivalent `match` expression from
//! [`ColorExpression::to_style_value`].

use serde_json::{Value, json};

use crate::attribute::{ColoringAttribute, LEVEL_COUNT_PROPERTY};
use crate::color::Color;

/// Height of one built level, in engine height units (meters).
pub const FLOOR_HEIGHT: f64 = 3.5;

/// Color for unmatched and missing categorical values.
pub const FALLBACK_COLOR: Color = Color::from_u32(0x9e9e9e);

pub(crate) mod land_use {
    use crate::color::Color;

    pub const H: Color = Color::from_u32(0xf4d35e);
    pub const HC: Color = Color::from_u32(0xee964b);
    pub const HO: Color = Color::from_u32(0xf95738);
    pub const HM: Color = Color::from_u32(0xd1495b);
    pub const CB: Color = Color::from_u32(0x8e44ad);
    pub const E: Color = Color::from_u32(0x3d5a80);
    pub const I: Color = Color::from_u32(0x5c4d7d);
    pub const EA: Color = Color::from_u32(0x2a9d8f);
    pub const AV: Color = Color::from_u32(0x57cc99);
}

pub(crate) mod borough {
    use crate::color::Color;

    pub const ALVARO_OBREGON: Color = Color::from_u32(0x1f77b4);
    pub const AZCAPOTZALCO: Color = Color::from_u32(0xaec7e8);
    pub const BENITO_JUAREZ: Color = Color::from_u32(0xff7f0e);
    pub const COYOACAN: Color = Color::from_u32(0xffbb78);
    pub const CUAJIMALPA: Color = Color::from_u32(0x2ca02c);
    pub const CUAUHTEMOC: Color = Color::from_u32(0x98df8a);
    pub const GUSTAVO_A_MADERO: Color = Color::from_u32(0xd62728);
    pub const IZTACALCO: Color = Color::from_u32(0xff9896);
    pub const IZTAPALAPA: Color = Color::from_u32(0x9467bd);
    pub const MAGDALENA_CONTRERAS: Color = Color::from_u32(0xc5b0d5);
    pub const MIGUEL_HIDALGO: Color = Color::from_u32(0x8c564b);
    pub const MILPA_ALTA: Color = Color::from_u32(0xc49c94);
    pub const TLAHUAC: Color = Color::from_u32(0xe377c2);
    pub const TLALPAN: Color = Color::from_u32(0xf7b6d2);
    pub const VENUSTIANO_CARRANZA: Color = Color::from_u32(0xbcbd22);
    pub const XOCHIMILCO: Color = Color::from_u32(0x17becf);
}

/// Zoning codes as published in the Mexico City cadastre.
const LAND_USE_STOPS: &[(&str, Color)] = &[
    ("H", land_use::H),
    ("HC", land_use::HC),
    ("HO", land_use::HO),
    ("HM", land_use::HM),
    ("CB", land_use::CB),
    ("E", land_use::E),
    ("I", land_use::I),
    ("EA", land_use::EA),
    ("AV", land_use::AV),
];

const BOROUGH_STOPS: &[(&str, Color)] = &[
    ("ALVARO OBREGON", borough::ALVARO_OBREGON),
    ("AZCAPOTZALCO", borough::AZCAPOTZALCO),
    ("BENITO JUAREZ", borough::BENITO_JUAREZ),
    ("COYOACAN", borough::COYOACAN),
    ("CUAJIMALPA DE MORELOS", borough::CUAJIMALPA),
    ("CUAUHTEMOC", borough::CUAUHTEMOC),
    ("GUSTAVO A. MADERO", borough::GUSTAVO_A_MADERO),
    ("IZTACALCO", borough::IZTACALCO),
    ("IZTAPALAPA", borough::IZTAPALAPA),
    ("LA MAGDALENA CONTRERAS", borough::MAGDALENA_CONTRERAS),
    ("MIGUEL HIDALGO", borough::MIGUEL_HIDALGO),
    ("MILPA ALTA", borough::MILPA_ALTA),
    ("TLAHUAC", borough::TLAHUAC),
    ("TLALPAN", borough::TLALPAN),
    ("VENUSTIANO CARRANZA", borough::VENUSTIANO_CARRANZA),
    ("XOCHIMILCO", borough::XOCHIMILCO),
];

static LAND_USE: ColorExpression = ColorExpression {
    attribute: ColoringAttribute::LandUse,
    stops: LAND_USE_STOPS,
    fallback: FALLBACK_COLOR,
};

static BOROUGH: ColorExpression = ColorExpression {
    attribute: ColoringAttribute::Borough,
    stops: BOROUGH_STOPS,
    fallback: FALLBACK_COLOR,
};

/// Ordered categorical stops plus exactly one fallback, bound to one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorExpression {
    pub attribute: ColoringAttribute,
    pub stops: &'static [(&'static str, Color)],
    pub fallback: Color,
}

impl ColorExpression {
    /// First-match lookup. Absent values and values without a stop resolve to
    /// the fallback.
    pub fn color_for(&self, value: Option<&str>) -> Color {
        value
            .and_then(|value| {
                self.stops
                    .iter()
                    .find(|(candidate, _)| *candidate == value)
                    .map(|(_, color)| *color)
            })
            .unwrap_or(self.fallback)
    }

    /// Engine `match` expression over the attribute's feature property.
    ///
    /// Repeated values keep only their first stop so the engine agrees with
    /// [`Self::color_for`]. A table without stops becomes the plain fallback
    /// literal, since the engine rejects a `match` with no labels.
    pub fn to_style_value(&self) -> Value {
        let mut seen: Vec<&str> = Vec::with_capacity(self.stops.len());
        let mut expr = vec![
            json!("match"),
            json!(["get", self.attribute.property()]),
        ];
        for (value, color) in self.stops {
            if seen.contains(value) {
                continue;
            }
            seen.push(*value);
            expr.push(json!(value));
            expr.push(json!(color.hex()));
        }

        if seen.is_empty() {
            return json!(self.fallback.hex());
        }
        expr.push(json!(self.fallback.hex()));
        Value::Array(expr)
    }

    /// Every color this expression can produce, fallback included.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.stops
            .iter()
            .map(|(_, color)| *color)
            .chain(std::iter::once(self.fallback))
    }
}

/// Registered table for an attribute. Every attribute has one.
pub fn expression_for(attribute: ColoringAttribute) -> &'static ColorExpression {
    match attribute {
        ColoringAttribute::LandUse => &LAND_USE,
        ColoringAttribute::Borough => &BOROUGH,
    }
}

pub fn color_for(attribute: ColoringAttribute, value: Option<&str>) -> Color {
    expression_for(attribute).color_for(value)
}

/// Extrusion height: `coalesce(levels, 1) * FLOOR_HEIGHT`.
pub fn extrusion_height(level_count: Option<f64>) -> f64 {
    level_count.unwrap_or(1.0) * FLOOR_HEIGHT
}

pub fn extrusion_height_value() -> Value {
    json!([
        "*",
        ["coalesce", ["get", LEVEL_COUNT_PROPERTY], 1],
        FLOOR_HEIGHT
    ])
}

pub fn extrusion_base_value() -> Value {
    json!(0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn mapped_values_resolve_to_their_stop() {
        for attribute in ColoringAttribute::ALL {
            let expr = expression_for(attribute);
            assert_eq!(expr.attribute, attribute);
            for (value, color) in expr.stops {
                assert_eq!(color_for(attribute, Some(*value)), *color, "{value}");
            }
        }
    }

    #[test]
    fn unmapped_and_missing_values_resolve_to_fallback() {
        for attribute in ColoringAttribute::ALL {
            let fallback = expression_for(attribute).fallback;
            assert_eq!(color_for(attribute, None), fallback);
            assert_eq!(color_for(attribute, Some("")), fallback);
            assert_eq!(color_for(attribute, Some("NOT A CATEGORY")), fallback);
        }
        // Matching is exact, not case-folded.
        assert_eq!(color_for(ColoringAttribute::LandUse, Some("h")), FALLBACK_COLOR);
        assert_eq!(
            color_for(ColoringAttribute::Borough, Some("Coyoacan")),
            FALLBACK_COLOR
        );
    }

    #[test]
    fn stop_values_are_unique_within_each_table() {
        for attribute in ColoringAttribute::ALL {
            let stops = expression_for(attribute).stops;
            for (i, (value, _)) in stops.iter().enumerate() {
                assert!(
                    stops[i + 1..].iter().all(|(other, _)| other != value),
                    "{value} repeated in {attribute:?}"
                );
            }
        }
    }

    #[test]
    fn first_match_wins_for_repeated_values() {
        const STOPS: &[(&str, Color)] = &[
            ("A", Color::from_u32(0x111111)),
            ("B", Color::from_u32(0x222222)),
            ("A", Color::from_u32(0x333333)),
        ];
        let expr = ColorExpression {
            attribute: ColoringAttribute::LandUse,
            stops: STOPS,
            fallback: Color::from_u32(0x000000),
        };

        assert_eq!(expr.color_for(Some("A")), Color::from_u32(0x111111));
        assert_eq!(
            expr.to_style_value(),
            json!([
                "match",
                ["get", "uso_suelo"],
                "A",
                "#111111",
                "B",
                "#222222",
                "#000000"
            ])
        );
    }

    #[test]
    fn empty_table_generates_fallback_literal() {
        let expr = ColorExpression {
            attribute: ColoringAttribute::Borough,
            stops: &[],
            fallback: Color::from_u32(0x123456),
        };
        assert_eq!(expr.to_style_value(), json!("#123456"));
        assert_eq!(expr.color_for(Some("anything")), Color::from_u32(0x123456));
    }

    #[test]
    fn generated_match_mirrors_table_order() {
        let value = expression_for(ColoringAttribute::LandUse).to_style_value();
        let items = value.as_array().unwrap();
        assert_eq!(items[0], json!("match"));
        assert_eq!(items[1], json!(["get", "uso_suelo"]));
        assert_eq!(items[2], json!("H"));
        assert_eq!(items[3], json!("#f4d35e"));
        assert_eq!(items.last().unwrap(), &json!("#9e9e9e"));
        // match + input + (label, output) pairs + fallback
        assert_eq!(items.len(), 2 + LAND_USE_STOPS.len() * 2 + 1);
    }

    #[test]
    fn extrusion_height_defaults_to_one_level() {
        assert_eq!(extrusion_height(None), 3.5);
        assert_eq!(extrusion_height(Some(4.0)), 14.0);
        assert_eq!(extrusion_height(Some(0.0)), 0.0);
        assert_eq!(
            extrusion_height_value(),
            json!(["*", ["coalesce", ["get", "niveles"], 1], 3.5])
        );
        assert_eq!(extrusion_base_value(), json!(0));
    }
}
