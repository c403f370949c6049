//! Tooltip formatter descriptor
//!
//! The tooltip translator captures the number format of every measure at
//! compile time. `format_tooltip` renders a hovered point from that
//! descriptor alone, so the option tree stays plain data.

use crate::data_options::{MeasureOption, ScatterDataOptions};
use crate::formatter::ScatterField;
use crate::number_format::{apply_format, NumberFormatConfig};
use crate::options::{PointCustom, TooltipSettings};
use serde::{Deserialize, Serialize};

/// Layout of the tooltip body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TooltipKind {
    /// Category header, then series name and value
    #[default]
    Cartesian,
    /// Slice name, value and share of the whole
    Categorical,
    /// One line per bound scatter field
    Scatter,
}

/// Number format captured for one measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureFormat {
    pub name: String,
    pub enabled: bool,
    pub number_format: NumberFormatConfig,
}

/// Titles of the bound scatter fields, in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterTooltipTitles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_by_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_by_color: Option<String>,
}

/// Tooltip formatting descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipFormatter {
    pub kind: TooltipKind,
    pub measures: Vec<MeasureFormat>,
    pub default_format: NumberFormatConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scatter_titles: Option<ScatterTooltipTitles>,
}

impl TooltipFormatter {
    /// Capture the number formats of a list of measures
    pub fn from_measures(kind: TooltipKind, measures: &[MeasureOption]) -> Self {
        Self {
            kind,
            measures: measures
                .iter()
                .map(|m| MeasureFormat {
                    name: m.name.clone(),
                    enabled: m.enabled,
                    number_format: m.number_format.clone().unwrap_or_default(),
                })
                .collect(),
            default_format: NumberFormatConfig::default(),
            scatter_titles: None,
        }
    }

    /// Number format for a series: exact series name, then the first
    /// enabled measure, then the global default
    pub fn resolve(&self, series_name: &str) -> &NumberFormatConfig {
        self.measures
            .iter()
            .find(|m| m.name == series_name)
            .or_else(|| self.measures.iter().find(|m| m.enabled))
            .map(|m| &m.number_format)
            .unwrap_or(&self.default_format)
    }
}

/// The hovered point
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipContext {
    pub series_name: String,
    pub category: Option<String>,
    pub value: Option<f64>,
    /// Share of the whole as supplied by the renderer (pie)
    pub percentage: Option<f64>,
    pub custom: Option<PointCustom>,
}

/// Render a tooltip body for one point
pub fn format_tooltip(formatter: &TooltipFormatter, ctx: &TooltipContext) -> String {
    let value = ctx
        .value
        .map(|v| apply_format(formatter.resolve(&ctx.series_name), v))
        .unwrap_or_default();

    match formatter.kind {
        TooltipKind::Cartesian => {
            let body = format!("{}: <b>{}</b>", ctx.series_name, value);
            match ctx.category.as_deref() {
                Some(category) if !category.is_empty() => format!("{category}<br />{body}"),
                _ => body,
            }
        }
        TooltipKind::Categorical => {
            let name = ctx.category.as_deref().unwrap_or(&ctx.series_name);
            let percent = ctx
                .custom
                .as_ref()
                .and_then(|c| c.percent)
                .or(ctx.percentage);
            match percent {
                Some(p) => format!("{name}: <b>{value}</b> ({p:.1}%)"),
                None => format!("{name}: <b>{value}</b>"),
            }
        }
        TooltipKind::Scatter => format_scatter_tooltip(formatter, ctx),
    }
}

fn format_scatter_tooltip(formatter: &TooltipFormatter, ctx: &TooltipContext) -> String {
    let (Some(titles), Some(custom)) = (&formatter.scatter_titles, &ctx.custom) else {
        return String::new();
    };

    let mut lines = Vec::new();
    if let (Some(title), Some(value)) = (&titles.break_by_point, &custom.masked_break_by_point) {
        lines.push(format!("<b>{title}: {value}</b>"));
    }
    let fields = [
        (&titles.x, ScatterField::X),
        (&titles.y, ScatterField::Y),
        (&titles.size, ScatterField::Size),
        (&titles.break_by_color, ScatterField::BreakByColor),
    ];
    for (title, field) in fields {
        if let (Some(title), Some(value)) = (title, field.masked_value(custom)) {
            lines.push(format!("{title}: {value}"));
        }
    }
    lines.join("<br />")
}

/// Tooltip settings for cartesian and categorical charts
pub fn get_tooltip_settings(kind: TooltipKind, measures: &[MeasureOption]) -> TooltipSettings {
    TooltipSettings {
        formatter: TooltipFormatter::from_measures(kind, measures),
        ..Default::default()
    }
}

/// Tooltip settings for scatter charts; titles come from the bound fields
pub fn get_scatter_tooltip_settings(data_options: &ScatterDataOptions) -> TooltipSettings {
    let measures: Vec<MeasureOption> = data_options.measures().into_iter().cloned().collect();
    let mut formatter = TooltipFormatter::from_measures(TooltipKind::Scatter, &measures);
    formatter.scatter_titles = Some(ScatterTooltipTitles {
        break_by_point: data_options.break_by_point.as_ref().map(|d| d.display_name().to_string()),
        x: data_options.x.as_ref().map(|f| f.display_name().to_string()),
        y: data_options.y.as_ref().map(|f| f.display_name().to_string()),
        size: data_options.size.as_ref().map(|m| m.display_name().to_string()),
        break_by_color: data_options
            .break_by_color
            .as_ref()
            .map(|f| f.display_name().to_string()),
    });
    TooltipSettings {
        formatter,
        ..Default::default()
    }
}
