//! Theme settings and the compile context
//!
//! Palettes, fonts and the date formatter are injected per call instead of
//! being read from global state.

use crate::color::{Color, Palette};
use crate::date_format::{ChronoDateFormatter, DateFormatter};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Visual theme applied on top of the chart defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub palette: Palette,
    pub font_family: String,
    pub text_color: Color,
    pub secondary_text_color: Color,
    pub grid_line_color: Color,
    pub background_color: Color,
    /// Animation duration in milliseconds; zero disables animation
    pub animation_duration: u32,
    /// Anchors of the gradient used for a break-by-color measure
    pub gradient_start: Color,
    pub gradient_end: Color,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            font_family: "Open Sans".to_string(),
            text_color: Color::rgb(0x5b, 0x63, 0x72),
            secondary_text_color: Color::rgb(0x9e, 0xa2, 0xab),
            grid_line_color: Color::rgb(0xd1, 0xd1, 0xd7),
            background_color: Color::WHITE,
            animation_duration: 300,
            gradient_start: Color::rgb(0x9b, 0x9b, 0xd7),
            gradient_end: Color::rgb(0x21, 0x8a, 0x8c),
        }
    }
}

impl ThemeSettings {
    /// Parse a theme, falling back to the default theme when it is invalid
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str::<ThemeSettings>(json) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::warn!("Failed to parse chart theme, using defaults: {}", e);
                ThemeSettings::default()
            }
        }
    }
}

fn default_theme() -> &'static ThemeSettings {
    static DEFAULT_THEME: OnceLock<ThemeSettings> = OnceLock::new();
    DEFAULT_THEME.get_or_init(ThemeSettings::default)
}

/// Size of the element the chart is mounted in, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Environment of one compilation
#[derive(Clone, Copy, Default)]
pub struct CompileContext<'a> {
    pub theme: Option<&'a ThemeSettings>,
    pub date_formatter: Option<&'a dyn DateFormatter>,
    pub container_size: Option<ContainerSize>,
}

impl<'a> CompileContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: &'a ThemeSettings) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_date_formatter(mut self, formatter: &'a dyn DateFormatter) -> Self {
        self.date_formatter = Some(formatter);
        self
    }

    pub fn with_container_size(mut self, size: ContainerSize) -> Self {
        self.container_size = Some(size);
        self
    }

    /// The injected theme or the default one
    pub fn theme(&self) -> &'a ThemeSettings {
        self.theme.unwrap_or_else(|| default_theme())
    }

    pub fn palette(&self) -> &'a Palette {
        &self.theme().palette
    }

    /// The injected date formatter or the chrono-backed default
    pub fn date_formatter(&self) -> &'a dyn DateFormatter {
        self.date_formatter.unwrap_or(&ChronoDateFormatter)
    }
}

impl std::fmt::Debug for CompileContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompileContext")
            .field("theme", &self.theme)
            .field("date_formatter", &self.date_formatter.map(|_| "custom"))
            .field("container_size", &self.container_size)
            .finish()
    }
}
