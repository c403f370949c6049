//! Label formatter descriptors
//!
//! The option tree carries these descriptors instead of callbacks. The
//! rendering adapter resolves them at draw time with `format_label` and
//! `format_axis_label`, passing the point or tick being drawn.

use crate::date_format::{parse_date, DateFormatter};
use crate::model::RawValue;
use crate::number_format::{apply_format, NumberFormatConfig};
use crate::options::PointCustom;
use serde::{Deserialize, Serialize};

/// Fields a scatter point may display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScatterField {
    Y,
    X,
    Size,
    BreakByColor,
}

/// Order in which a single-value scatter label looks for a displayable field
pub const SCATTER_LABEL_PRIORITY: [ScatterField; 4] = [
    ScatterField::Y,
    ScatterField::X,
    ScatterField::Size,
    ScatterField::BreakByColor,
];

impl ScatterField {
    /// Masked display value of this field on a point
    pub fn masked_value<'a>(&self, custom: &'a PointCustom) -> Option<&'a str> {
        match self {
            ScatterField::Y => custom.masked_y_value.as_deref(),
            ScatterField::X => custom.masked_x_value.as_deref(),
            ScatterField::Size => custom.masked_size.as_deref(),
            ScatterField::BreakByColor => custom.masked_break_by_color.as_deref(),
        }
    }
}

/// How a data label, stack label or slice label is rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LabelFormatter {
    /// The point value with a number format
    Value { number_format: NumberFormatConfig },
    /// Category, value and percent composed for pie and funnel slices
    Composite {
        show_category: bool,
        show_value: bool,
        show_percent: bool,
        show_decimals: bool,
        number_format: NumberFormatConfig,
    },
    /// The most specific masked field of a scatter point
    ScatterValue,
}

/// The point being labelled
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelContext {
    pub category: Option<String>,
    pub value: Option<f64>,
    /// Share of the whole as supplied by the renderer (pie)
    pub percentage: Option<f64>,
    pub custom: Option<PointCustom>,
}

/// Resolve a label descriptor for one point
pub fn format_label(formatter: &LabelFormatter, ctx: &LabelContext) -> String {
    match formatter {
        LabelFormatter::Value { number_format } => ctx
            .value
            .map(|v| apply_format(number_format, v))
            .unwrap_or_default(),
        LabelFormatter::Composite {
            show_category,
            show_value,
            show_percent,
            show_decimals,
            number_format,
        } => {
            let category = ctx.category.as_deref().filter(|_| *show_category);
            let value = ctx
                .value
                .filter(|_| *show_value)
                .map(|v| apply_format(number_format, v));
            // Funnel points carry their percent of baseline; pie relies on the renderer share
            let percent = ctx
                .custom
                .as_ref()
                .and_then(|c| c.percent)
                .or(ctx.percentage)
                .filter(|_| *show_percent)
                .map(|p| format_percent(p, *show_decimals));
            compose_label(category, value.as_deref(), percent.as_deref())
        }
        LabelFormatter::ScatterValue => ctx
            .custom
            .as_ref()
            .and_then(|custom| {
                SCATTER_LABEL_PRIORITY
                    .iter()
                    .find_map(|field| field.masked_value(custom))
            })
            .unwrap_or_default()
            .to_string(),
    }
}

/// Compose category, value and percent text; a line break separates
/// value from category only when both are present
pub fn compose_label(category: Option<&str>, value: Option<&str>, percent: Option<&str>) -> String {
    let mut label = String::new();
    if let Some(category) = category {
        label.push_str(category);
    }
    if let Some(value) = value {
        if category.is_some() {
            label.push_str("<br />");
        }
        label.push_str(value);
    }
    if let Some(percent) = percent {
        if !label.is_empty() {
            label.push(' ');
        }
        label.push_str(percent);
    }
    label
}

fn format_percent(percent: f64, show_decimals: bool) -> String {
    if show_decimals {
        format!("{percent:.1}%")
    } else {
        format!("{percent:.0}%")
    }
}

/// How axis tick labels are rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AxisLabelFormatter {
    /// Ticks are epoch milliseconds formatted with a date format string
    DateTime { format: String },
    /// Ticks are numbers formatted with a number format
    Number { number_format: NumberFormatConfig },
}

/// Resolve an axis label descriptor for one tick
pub fn format_axis_label(
    formatter: &AxisLabelFormatter,
    tick: &RawValue,
    date_formatter: &dyn DateFormatter,
) -> String {
    match formatter {
        AxisLabelFormatter::DateTime { format } => parse_date(tick)
            .map(|date| date_formatter.format(date, format))
            .unwrap_or_default(),
        AxisLabelFormatter::Number { number_format } => tick
            .as_number()
            .map(|v| apply_format(number_format, v))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_format::ChronoDateFormatter;

    fn composite(show_category: bool, show_value: bool, show_percent: bool) -> LabelFormatter {
        LabelFormatter::Composite {
            show_category,
            show_value,
            show_percent,
            show_decimals: true,
            number_format: NumberFormatConfig::default(),
        }
    }

    fn slice_context() -> LabelContext {
        LabelContext {
            category: Some("Stage 2".to_string()),
            value: Some(202.2),
            percentage: None,
            custom: Some(PointCustom {
                percent: Some(66.6667),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_compose_label_all_parts() {
        let label = format_label(&composite(true, true, true), &slice_context());
        assert_eq!(label, "Stage 2<br />202.2 66.7%");
    }

    #[test]
    fn test_compose_label_no_break_without_category() {
        let label = format_label(&composite(false, true, true), &slice_context());
        assert_eq!(label, "202.2 66.7%");
    }

    #[test]
    fn test_compose_label_category_and_percent_only() {
        let label = format_label(&composite(true, false, true), &slice_context());
        assert_eq!(label, "Stage 2 66.7%");
    }

    #[test]
    fn test_compose_label_nothing_shown() {
        assert_eq!(format_label(&composite(false, false, false), &slice_context()), "");
    }

    #[test]
    fn test_pie_percentage_from_renderer() {
        let ctx = LabelContext {
            category: None,
            value: None,
            percentage: Some(25.0),
            custom: None,
        };
        let formatter = LabelFormatter::Composite {
            show_category: false,
            show_value: false,
            show_percent: true,
            show_decimals: false,
            number_format: NumberFormatConfig::default(),
        };
        assert_eq!(format_label(&formatter, &ctx), "25%");
    }

    #[test]
    fn test_scatter_label_priority() {
        let mut custom = PointCustom {
            masked_x_value: Some("x".into()),
            masked_size: Some("s".into()),
            masked_break_by_color: Some("c".into()),
            ..Default::default()
        };
        let ctx = |custom: &PointCustom| LabelContext {
            custom: Some(custom.clone()),
            ..Default::default()
        };

        assert_eq!(format_label(&LabelFormatter::ScatterValue, &ctx(&custom)), "x");
        custom.masked_y_value = Some("y".into());
        assert_eq!(format_label(&LabelFormatter::ScatterValue, &ctx(&custom)), "y");
        custom.masked_y_value = None;
        custom.masked_x_value = None;
        assert_eq!(format_label(&LabelFormatter::ScatterValue, &ctx(&custom)), "s");
    }

    #[test]
    fn test_value_formatter() {
        let formatter = LabelFormatter::Value {
            number_format: NumberFormatConfig::default(),
        };
        let ctx = LabelContext {
            value: Some(1500.0),
            ..Default::default()
        };
        assert_eq!(format_label(&formatter, &ctx), "1.5K");
    }

    #[test]
    fn test_format_axis_label_datetime() {
        let formatter = AxisLabelFormatter::DateTime {
            format: "%Y".to_string(),
        };
        let tick = RawValue::Text("2022-05-01".to_string());
        assert_eq!(format_axis_label(&formatter, &tick, &ChronoDateFormatter), "2022");
    }
}
