use serde::{Deserialize, Serialize};

pub const DEFAULT_STROKE_WIDTH: u32 = 3;
pub const DEFAULT_ERASER_RADIUS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Draw,
    Erase,
}

/// Opaque ink color. Settings and swatches carry it as a CSS-style
/// `rgb(r, g, b)` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `rgb(r, g, b)` or `#rrggbb`.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        let inner = s
            .strip_prefix("rgb(")
            .or_else(|| s.strip_prefix("RGB("))?
            .strip_suffix(')')?;
        let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>().ok());
        let r = parts.next()??;
        let g = parts.next()??;
        let b = parts.next()??;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::rgb(r, g, b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{raw}'")))
    }
}

/// Canvas-space point in raster pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeState {
    pub tool: Tool,
    pub color: Color,
    pub stroke_width: u32,
    pub eraser_radius: u32,
    pub pointer_down: bool,
}

impl Default for StrokeState {
    fn default() -> Self {
        Self {
            tool: Tool::Draw,
            color: Color::WHITE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            eraser_radius: DEFAULT_ERASER_RADIUS,
            pointer_down: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_rgb_strings() {
        assert_eq!(Color::parse("rgb(255, 255, 255)"), Some(Color::WHITE));
        assert_eq!(Color::parse("rgb(238,51,51)"), Some(Color::rgb(238, 51, 51)));
        assert_eq!(Color::parse("#1e90ff"), Some(Color::rgb(30, 144, 255)));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert_eq!(Color::parse("rgb(256, 0, 0)"), None);
        assert_eq!(Color::parse("rgb(1, 2)"), None);
        assert_eq!(Color::parse("rgb(1, 2, 3, 4)"), None);
        assert_eq!(Color::parse("white"), None);
    }

    #[test]
    fn color_serializes_as_rgb_string() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "\"rgb(1, 2, 3)\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(1, 2, 3));
    }
}
