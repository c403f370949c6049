//! Marker and line width translators

use crate::color::Color;
use crate::design_options::{LineWidth, MarkerFill, MarkerSize, MarkerStyle, ScatterMarkerSize};
use crate::options::MarkerSettings;

pub const SMALL_MARKER_RADIUS: f64 = 4.0;
pub const LARGE_MARKER_RADIUS: f64 = 6.0;
pub const HOLLOW_MARKER_LINE_WIDTH: f64 = 2.0;

/// Translate a marker style
pub fn get_marker_settings(style: &MarkerStyle) -> MarkerSettings {
    let radius = match style.size {
        MarkerSize::Small => SMALL_MARKER_RADIUS,
        MarkerSize::Large => LARGE_MARKER_RADIUS,
    };
    match style.fill {
        MarkerFill::Filled => MarkerSettings {
            enabled: style.enabled,
            symbol: "circle".to_string(),
            radius,
            fill_color: None,
            line_width: 0.0,
            line_color: None,
        },
        MarkerFill::Hollow => MarkerSettings {
            enabled: style.enabled,
            symbol: "circle".to_string(),
            radius,
            fill_color: Some(Color::WHITE.to_css()),
            line_width: HOLLOW_MARKER_LINE_WIDTH,
            line_color: None,
        },
    }
}

/// Line width in pixels
pub fn get_line_width(width: LineWidth) -> f64 {
    match width {
        LineWidth::Thin => 1.0,
        LineWidth::Bold => 3.0,
        LineWidth::Thick => 5.0,
    }
}

/// Fixed-size scatter marker used when no size field is bound
pub fn get_scatter_marker_settings(size: &ScatterMarkerSize) -> MarkerSettings {
    MarkerSettings {
        enabled: true,
        symbol: "circle".to_string(),
        radius: size.default_size / 2.0,
        fill_color: None,
        line_width: 0.0,
        line_color: None,
    }
}
