//! Colors and palettes
//!
//! Colors travel through the option tree as CSS strings. Explicit colors
//! come from data options; everything else falls back to an indexed palette.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color representation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (fully opaque)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a hex string ("#a1a1a1", "a1a1a1", "#abc" or "#a1a1a180")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Some(Self::rgba(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    /// Parse a hex color or a CSS `rgb(...)`/`rgba(...)` function
    pub fn from_css(css: &str) -> Option<Self> {
        let css = css.trim();
        let args = css
            .strip_prefix("rgba(")
            .or_else(|| css.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'));
        let Some(args) = args else {
            return Self::from_hex(css);
        };

        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let channel = |s: &str| s.parse::<u8>().ok();
        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(channel(r)?, channel(g)?, channel(b)?)),
            [r, g, b, a] => {
                let alpha = a.parse::<f64>().ok()?.clamp(0.0, 1.0);
                Some(Self::rgba(
                    channel(r)?,
                    channel(g)?,
                    channel(b)?,
                    (alpha * 255.0).round() as u8,
                ))
            }
            _ => None,
        }
    }

    /// Convert to a lowercase hex string with `#` prefix
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Convert to CSS color string
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            self.to_hex()
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }

    /// Same color with the given opacity (0.0 to 1.0)
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Blend two colors together; `ratio` 0.0 keeps `self`, 1.0 yields `other`
    pub fn blend(self, other: Color, ratio: f64) -> Self {
        let ratio = ratio.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 * (1.0 - ratio) + b as f64 * ratio).round() as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_css(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

/// Color of the aggregated "Other" slice produced by pie convolution
pub const OTHER_SLICE_COLOR: Color = Color::rgb(0xd3, 0xd3, 0xd3);

/// Opacity applied to blurred (de-emphasized) points
pub const BLUR_OPACITY: f64 = 0.3;

/// An ordered list of fallback colors, indexed cyclically
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<Color>);

impl Palette {
    /// Create a palette; an empty list falls back to the default colors
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self(colors)
        }
    }

    /// Get a color at a specific index (cycles through colors)
    pub fn color_at(&self, index: usize) -> Color {
        match self.0.len() {
            0 => DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()],
            len => self.0[index % len],
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_PALETTE.to_vec())
    }
}

/// Default series palette
pub const DEFAULT_PALETTE: [Color; 6] = [
    Color::rgb(0x00, 0xce, 0xe6), // Cyan
    Color::rgb(0x9b, 0x9b, 0xd7), // Lavender
    Color::rgb(0x6e, 0xda, 0x55), // Green
    Color::rgb(0xfc, 0x75, 0x70), // Coral
    Color::rgb(0xfb, 0xb7, 0x55), // Amber
    Color::rgb(0x21, 0x8a, 0x8c), // Teal
];
