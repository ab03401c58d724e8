// src/color.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TerrainError;

/// Linear RGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parses any CSS color: `#RRGGBB`, `#RGB`, `rgb(...)` or a name like `green`.
    /// Alpha is dropped.
    pub fn from_hex(text: &str) -> Result<Self, TerrainError> {
        let color = colorgrad::Color::from_html(text)
            .map_err(|e| TerrainError::InvalidConfig(format!("bad color '{text}': {e}")))?;
        let [r, g, b, _] = color.to_rgba8();
        Ok(Self::from_rgb8([r, g, b]))
    }

    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Exactly `a` at `t = 0` and exactly `b` at `t = 1`.
    pub fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
        let s = 1.0 - t;
        Rgb {
            r: a.r * s + b.r * t,
            g: a.g * s + b.g * t,
            b: a.b * s + b.b * t,
        }
    }

    pub fn scaled(&self, k: f32) -> Rgb {
        Rgb::new(self.r * k, self.g * k, self.b * k)
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

// Colors appear as hex strings in config files.
impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Grass.
pub const GROUND_COLOR: Rgb = Rgb::new(46.0 / 255.0, 139.0 / 255.0, 87.0 / 255.0);
/// Packed dirt.
pub const PATH_COLOR: Rgb = Rgb::new(92.0 / 255.0, 64.0 / 255.0, 51.0 / 255.0);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hex_round_trips_defaults() {
        assert_eq!(Rgb::from_hex("#2E8B57").unwrap(), GROUND_COLOR);
        assert_eq!(PATH_COLOR.to_hex(), "#5C4033");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#GG0000").is_err());
        assert!(Rgb::from_hex("grassy").is_err());
    }

    #[test]
    fn accepts_short_hex_and_names() {
        assert_eq!(Rgb::from_hex("#f00").unwrap().to_hex(), "#FF0000");
        assert_eq!(Rgb::from_hex("green").unwrap().to_rgb8(), [0, 128, 0]);
    }

    #[test]
    fn lerp_hits_endpoints() {
        let mid = Rgb::lerp(Rgb::new(0.0, 0.0, 0.0), Rgb::new(1.0, 0.5, 0.25), 0.5);
        assert_relative_eq!(mid.r, 0.5);
        assert_relative_eq!(mid.g, 0.25);
        assert_relative_eq!(mid.b, 0.125);
        assert_eq!(Rgb::lerp(GROUND_COLOR, PATH_COLOR, 1.0), PATH_COLOR);
    }
}
