//! Axis translator
//!
//! Maps the chart-type independent axis description onto an axis fragment.
//! Fields the user left unset take the default of the axis role.

use crate::design_options::AxisOptions;
use crate::geometry::AxisRange;
use crate::options::{AxisSettings, AxisTitle, AxisType, TextStyle};
use crate::theme::ThemeSettings;

/// Role of an axis in a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRole {
    /// Category (or scatter x) axis
    X,
    /// Primary value axis
    Y,
    /// Secondary value axis, drawn opposite
    Y2,
}

struct RoleDefaults {
    enabled: bool,
    grid_line: bool,
    labels: bool,
    title_enabled: bool,
}

impl AxisRole {
    fn defaults(&self) -> RoleDefaults {
        match self {
            AxisRole::X => RoleDefaults {
                enabled: true,
                grid_line: false,
                labels: true,
                title_enabled: false,
            },
            AxisRole::Y => RoleDefaults {
                enabled: true,
                grid_line: true,
                labels: true,
                title_enabled: false,
            },
            AxisRole::Y2 => RoleDefaults {
                enabled: true,
                grid_line: false,
                labels: true,
                title_enabled: false,
            },
        }
    }
}

/// Translate an axis style description
pub fn get_axis_settings(style: &AxisOptions, role: AxisRole, theme: &ThemeSettings) -> AxisSettings {
    let defaults = role.defaults();
    let title_enabled = style.title_enabled.unwrap_or(defaults.title_enabled);
    let grid_line = style.grid_line.unwrap_or(defaults.grid_line);
    let label_style = TextStyle {
        font_family: Some(theme.font_family.clone()),
        color: Some(theme.secondary_text_color.to_css()),
        font_size: Some("12px".to_string()),
        ..Default::default()
    };

    let mut axis = AxisSettings {
        axis_type: if style.logarithmic {
            AxisType::Logarithmic
        } else {
            AxisType::Linear
        },
        visible: style.enabled.unwrap_or(defaults.enabled),
        title: AxisTitle {
            enabled: title_enabled,
            text: style.title.clone().filter(|_| title_enabled),
        },
        grid_line_width: if grid_line { 1.0 } else { 0.0 },
        min: style.min,
        max: style.max,
        tick_interval: style.tick_interval,
        opposite: role == AxisRole::Y2,
        ..Default::default()
    };
    axis.labels.enabled = style.labels.unwrap_or(defaults.labels);
    axis.labels.style = Some(label_style);
    if grid_line {
        axis.grid_line_dash_style = Some("Dot".to_string());
    }
    axis
}

/// Apply an auto-computed range; bounds already set on the axis are kept
pub fn apply_range(axis: &mut AxisSettings, range: AxisRange) {
    axis.min = axis.min.or(range.min);
    axis.max = axis.max.or(range.max);
    if axis.axis_type == AxisType::Logarithmic && axis.min.is_some_and(|m| m <= 0.0) {
        axis.min = None;
    }
}
