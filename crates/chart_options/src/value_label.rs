//! Value label translator
//!
//! Rotation, alignment and offset of value labels depend on the direction
//! of the category axis. Bar charts use the vertical table.

use crate::design_options::ValueLabelRotation;
use crate::formatter::LabelFormatter;
use crate::geometry::Orientation;
use crate::options::{Align, DataLabelsSettings, TextStyle, VerticalAlign};
use crate::theme::ThemeSettings;

/// Placement of a value label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub rotation: f64,
    pub align: Align,
    pub vertical_align: Option<VerticalAlign>,
    pub x: f64,
    pub y: f64,
}

const fn placement(rotation: f64, align: Align, x: f64, y: f64) -> LabelPlacement {
    LabelPlacement {
        rotation,
        align,
        vertical_align: None,
        x,
        y,
    }
}

/// Placement table for a horizontal category axis
pub fn horizontal_placement(rotation: ValueLabelRotation) -> LabelPlacement {
    match rotation {
        ValueLabelRotation::Horizontal => placement(0.0, Align::Center, 0.0, -5.0),
        ValueLabelRotation::Diagonal => placement(-45.0, Align::Left, 0.0, -7.0),
        ValueLabelRotation::Vertical => placement(-90.0, Align::Left, 0.0, -7.0),
    }
}

/// Placement table for a vertical category axis (bar charts)
pub fn vertical_placement(rotation: ValueLabelRotation) -> LabelPlacement {
    let middle = Some(VerticalAlign::Middle);
    match rotation {
        ValueLabelRotation::Horizontal => LabelPlacement {
            vertical_align: middle,
            ..placement(0.0, Align::Left, 5.0, 0.0)
        },
        ValueLabelRotation::Diagonal => LabelPlacement {
            vertical_align: middle,
            ..placement(-45.0, Align::Left, 5.0, 0.0)
        },
        ValueLabelRotation::Vertical => LabelPlacement {
            vertical_align: middle,
            ..placement(-90.0, Align::Center, 10.0, 0.0)
        },
    }
}

/// Translate a value label setting; `None` disables labels
pub fn get_value_label_settings(
    rotation: Option<ValueLabelRotation>,
    orientation: Orientation,
    formatter: LabelFormatter,
    theme: &ThemeSettings,
) -> DataLabelsSettings {
    let Some(rotation) = rotation else {
        return DataLabelsSettings {
            enabled: false,
            ..Default::default()
        };
    };

    let placement = match orientation {
        Orientation::Horizontal => horizontal_placement(rotation),
        Orientation::Vertical => vertical_placement(rotation),
    };

    DataLabelsSettings {
        enabled: true,
        rotation: Some(placement.rotation),
        align: Some(placement.align),
        vertical_align: placement.vertical_align,
        x: Some(placement.x),
        y: Some(placement.y),
        crop: Some(false),
        allow_overlap: Some(false),
        style: Some(TextStyle {
            font_family: Some(theme.font_family.clone()),
            color: Some(theme.text_color.to_css()),
            font_size: Some("12px".to_string()),
            font_weight: Some("normal".to_string()),
            text_outline: Some("none".to_string()),
        }),
        formatter: Some(formatter),
        distance: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number_format::NumberFormatConfig;

    fn value_formatter() -> LabelFormatter {
        LabelFormatter::Value {
            number_format: NumberFormatConfig::default(),
        }
    }

    #[test]
    fn test_disabled_value_labels() {
        let labels = get_value_label_settings(
            None,
            Orientation::Horizontal,
            value_formatter(),
            &ThemeSettings::default(),
        );
        assert!(!labels.enabled);
        assert!(labels.formatter.is_none());
    }

    #[test]
    fn test_orientation_tables_differ() {
        let theme = ThemeSettings::default();
        let column = get_value_label_settings(
            Some(ValueLabelRotation::Vertical),
            Orientation::Horizontal,
            value_formatter(),
            &theme,
        );
        let bar = get_value_label_settings(
            Some(ValueLabelRotation::Vertical),
            Orientation::Vertical,
            value_formatter(),
            &theme,
        );

        assert_eq!(column.rotation, Some(-90.0));
        assert_eq!(column.align, Some(Align::Left));
        assert_eq!(bar.align, Some(Align::Center));
        assert_eq!(bar.vertical_align, Some(VerticalAlign::Middle));
        assert_eq!(bar.x, Some(10.0));
    }

    #[test]
    fn test_horizontal_labels_centered() {
        let placement = horizontal_placement(ValueLabelRotation::Horizontal);
        assert_eq!(placement.rotation, 0.0);
        assert_eq!(placement.align, Align::Center);
        assert_eq!(placement.y, -5.0);
    }
}
