use std::fmt;

use serde::{Serialize, Serializer};

/// An opaque sRGB color. Serialized as a lowercase `#rrggbb` string, which is
/// what the map engine accepts in paint properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` literal.
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        assert_eq!(Color::rgb(0, 10, 255).hex(), "#000aff");
        assert_eq!(Color::from_u32(0x3d5a80).to_string(), "#3d5a80");
    }

    #[test]
    fn from_u32_unpacks_channels() {
        assert_eq!(Color::from_u32(0x3d5a80), Color::rgb(0x3d, 0x5a, 0x80));
        assert_eq!(Color::from_u32(0xffffff), Color::rgb(255, 255, 255));
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(8, 136, 136)).unwrap();
        assert_eq!(json, "\"#088888\"");
    }
}
