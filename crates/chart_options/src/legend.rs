//! Legend translator

use crate::color::Color;
use crate::design_options::LegendPosition;
use crate::options::{Align, LegendLayout, LegendSettings, TextStyle, VerticalAlign};
use crate::theme::ThemeSettings;

/// Translate a legend position; `None` hides the legend
pub fn get_legend_settings(position: Option<LegendPosition>, theme: &ThemeSettings) -> LegendSettings {
    let Some(position) = position else {
        return LegendSettings {
            enabled: false,
            ..Default::default()
        };
    };

    let (align, vertical_align, layout) = match position {
        LegendPosition::Top => (Align::Center, VerticalAlign::Top, LegendLayout::Horizontal),
        LegendPosition::Bottom => (Align::Center, VerticalAlign::Bottom, LegendLayout::Horizontal),
        LegendPosition::Left => (Align::Left, VerticalAlign::Middle, LegendLayout::Vertical),
        LegendPosition::Right => (Align::Right, VerticalAlign::Middle, LegendLayout::Vertical),
    };

    LegendSettings {
        enabled: true,
        align: Some(align),
        vertical_align: Some(vertical_align),
        layout: Some(layout),
        item_style: Some(TextStyle {
            font_family: Some(theme.font_family.clone()),
            color: Some(theme.text_color.to_css()),
            font_size: Some("13px".to_string()),
            font_weight: Some("normal".to_string()),
            ..Default::default()
        }),
        symbol_radius: Some(0.0),
        ..Default::default()
    }
}

/// Scatter legend: the generic legend without background or border
pub fn get_scatter_legend_settings(position: Option<LegendPosition>, theme: &ThemeSettings) -> LegendSettings {
    let mut legend = get_legend_settings(position, theme);
    if legend.enabled {
        legend.background_color = Some(Color::TRANSPARENT.to_css());
        legend.border_width = Some(0.0);
        legend.symbol_radius = None;
        if let Some(style) = legend.item_style.as_mut() {
            style.font_size = Some("12px".to_string());
            style.font_weight = Some("bold".to_string());
        }
    }
    legend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_positions() {
        let theme = ThemeSettings::default();
        let right = get_legend_settings(Some(LegendPosition::Right), &theme);
        assert!(right.enabled);
        assert_eq!(right.align, Some(Align::Right));
        assert_eq!(right.layout, Some(LegendLayout::Vertical));

        let bottom = get_legend_settings(Some(LegendPosition::Bottom), &theme);
        assert_eq!(bottom.vertical_align, Some(VerticalAlign::Bottom));
        assert_eq!(bottom.layout, Some(LegendLayout::Horizontal));
    }

    #[test]
    fn test_legend_disabled() {
        let legend = get_legend_settings(None, &ThemeSettings::default());
        assert!(!legend.enabled);
        assert!(legend.align.is_none());
    }

    #[test]
    fn test_scatter_legend_layers_on_generic() {
        let legend = get_scatter_legend_settings(Some(LegendPosition::Top), &ThemeSettings::default());
        assert_eq!(legend.align, Some(Align::Center));
        assert_eq!(legend.background_color.as_deref(), Some("rgba(0, 0, 0, 0.000)"));
        assert_eq!(legend.border_width, Some(0.0));
        assert_eq!(
            legend.item_style.and_then(|s| s.font_weight).as_deref(),
            Some("bold")
        );
    }
}
