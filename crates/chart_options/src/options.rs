//! Compiled option tree
//!
//! These types describe the declarative configuration handed to the
//! rendering engine. They serialize to the engine's camelCase vocabulary
//! and omit unset optionals. Formatters are data descriptors, never
//! closures; see `formatter` and `tooltip`.

use crate::color::Color;
use crate::formatter::{AxisLabelFormatter, LabelFormatter};
use crate::model::{RawValue, SeriesKind};
use crate::tooltip::TooltipFormatter;
use serde::{Deserialize, Serialize};

/// Combine an explicit value with a base value; the explicit side wins
pub trait Merge {
    fn merge(self, base: Self) -> Self;
}

fn merge_option<T: Merge>(explicit: Option<T>, base: Option<T>) -> Option<T> {
    match (explicit, base) {
        (Some(explicit), Some(base)) => Some(explicit.merge(base)),
        (explicit, base) => explicit.or(base),
    }
}

/// Result of a compilation: the option tree plus any truncation alerts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledChartOptions {
    pub options: ChartOptions,
    pub alerts: Vec<String>,
}

/// The complete option tree for one chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub chart: ChartSettings,
    pub title: TitleSettings,
    pub subtitle: TitleSettings,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x_axis: Vec<AxisSettings>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y_axis: Vec<AxisSettings>,
    pub legend: LegendSettings,
    pub series: Vec<SeriesOptions>,
    pub plot_options: PlotOptions,
    pub tooltip: TooltipSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigator: Option<NavigatorSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrollbar: Option<ScrollbarSettings>,
}

/// Chart-level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSettings {
    #[serde(rename = "type")]
    pub chart_type: SeriesKind,
    /// Top, right, bottom, left
    pub spacing: [f64; 4],
    pub polar: bool,
    pub align_ticks: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_type: Option<String>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            chart_type: SeriesKind::Line,
            spacing: DEFAULT_SPACING,
            polar: false,
            align_ticks: false,
            zoom_type: None,
        }
    }
}

/// Default chart spacing (top, right, bottom, left)
pub const DEFAULT_SPACING: [f64; 4] = [20.0, 20.0, 20.0, 20.0];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleSettings {
    pub text: Option<String>,
}

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Vertical alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// Text style fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_outline: Option<String>,
}

/// Axis scale type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Linear,
    Logarithmic,
    Datetime,
    Category,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    pub enabled: bool,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabels {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<AxisLabelFormatter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

/// A labelled range on the category axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotBand {
    pub from: f64,
    pub to: f64,
    pub label: PlotBandLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotBandLabel {
    pub text: String,
    pub align: Align,
    pub vertical_align: VerticalAlign,
    pub y: f64,
}

/// Totals drawn above stacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackLabels {
    pub enabled: bool,
    pub formatter: LabelFormatter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

/// Settings for one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSettings {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    pub title: AxisTitle,
    pub grid_line_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_line_dash_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_line_interpolation: Option<String>,
    pub labels: AxisLabels,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub tick_interval: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_on_tick: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_on_tick: Option<bool>,
    pub opposite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmark_placement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plot_bands: Vec<PlotBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_labels: Option<StackLabels>,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            axis_type: AxisType::Linear,
            visible: true,
            categories: None,
            title: AxisTitle::default(),
            grid_line_width: 0.0,
            grid_line_dash_style: None,
            grid_line_interpolation: None,
            labels: AxisLabels {
                enabled: true,
                ..Default::default()
            },
            min: None,
            max: None,
            tick_interval: None,
            start_on_tick: None,
            end_on_tick: None,
            opposite: false,
            tickmark_placement: None,
            line_width: None,
            plot_bands: Vec::new(),
            stack_labels: None,
        }
    }
}

/// Legend item layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendLayout {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendSettings {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LegendLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<TextStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_radius: Option<f64>,
}

/// Point marker fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSettings {
    pub enabled: bool,
    pub symbol: String,
    pub radius: f64,
    /// `None` inherits the series color
    pub fill_color: Option<String>,
    pub line_width: f64,
    /// `None` inherits the series color
    pub line_color: Option<String>,
}

/// Data label fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLabelsSettings {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_overlap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<LabelFormatter>,
}

impl Merge for DataLabelsSettings {
    fn merge(self, base: Self) -> Self {
        Self {
            enabled: self.enabled,
            rotation: self.rotation.or(base.rotation),
            align: self.align.or(base.align),
            vertical_align: self.vertical_align.or(base.vertical_align),
            x: self.x.or(base.x),
            y: self.y.or(base.y),
            crop: self.crop.or(base.crop),
            allow_overlap: self.allow_overlap.or(base.allow_overlap),
            distance: self.distance.or(base.distance),
            style: self.style.or(base.style),
            formatter: self.formatter.or(base.formatter),
        }
    }
}

/// Plot stacking mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stacking {
    Normal,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub duration: u32,
}

/// Options shared by every series type; each per-type block uses the same shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPlotOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacking: Option<Stacking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_nulls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost_threshold: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turbo_threshold: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_labels: Option<DataLabelsSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_legend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky_tracking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neck_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neck_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<f64>,
}

impl Merge for SeriesPlotOptions {
    fn merge(self, base: Self) -> Self {
        Self {
            stacking: self.stacking.or(base.stacking),
            connect_nulls: self.connect_nulls.or(base.connect_nulls),
            animation: self.animation.or(base.animation),
            boost_threshold: self.boost_threshold.or(base.boost_threshold),
            turbo_threshold: self.turbo_threshold.or(base.turbo_threshold),
            data_labels: merge_option(self.data_labels, base.data_labels),
            marker: self.marker.or(base.marker),
            line_width: self.line_width.or(base.line_width),
            point_padding: self.point_padding.or(base.point_padding),
            group_padding: self.group_padding.or(base.group_padding),
            border_width: self.border_width.or(base.border_width),
            fill_opacity: self.fill_opacity.or(base.fill_opacity),
            show_in_legend: self.show_in_legend.or(base.show_in_legend),
            sticky_tracking: self.sticky_tracking.or(base.sticky_tracking),
            inner_size: self.inner_size.or(base.inner_size),
            width: self.width.or(base.width),
            neck_width: self.neck_width.or(base.neck_width),
            neck_height: self.neck_height.or(base.neck_height),
            reversed: self.reversed.or(base.reversed),
            min_size: self.min_size.or(base.min_size),
            max_size: self.max_size.or(base.max_size),
        }
    }
}

/// Plot-level options: shared series block plus per-type blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotOptions {
    pub series: SeriesPlotOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<SeriesPlotOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<SeriesPlotOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<SeriesPlotOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar: Option<SeriesPlotOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pie: Option<SeriesPlotOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funnel: Option<SeriesPlotOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scatter: Option<SeriesPlotOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bubble: Option<SeriesPlotOptions>,
}

impl PlotOptions {
    /// Mutable access to the per-type block for a series kind, creating it on demand
    pub fn for_kind_mut(&mut self, kind: SeriesKind) -> &mut SeriesPlotOptions {
        let slot = match kind {
            SeriesKind::Line | SeriesKind::Spline => &mut self.line,
            SeriesKind::Area | SeriesKind::Areaspline => &mut self.area,
            SeriesKind::Column => &mut self.column,
            SeriesKind::Bar => &mut self.bar,
            SeriesKind::Pie => &mut self.pie,
            SeriesKind::Funnel => &mut self.funnel,
            SeriesKind::Scatter => &mut self.scatter,
            SeriesKind::Bubble => &mut self.bubble,
        };
        slot.get_or_insert_with(SeriesPlotOptions::default)
    }
}

impl Merge for PlotOptions {
    fn merge(self, base: Self) -> Self {
        Self {
            series: self.series.merge(base.series),
            line: merge_option(self.line, base.line),
            area: merge_option(self.area, base.area),
            column: merge_option(self.column, base.column),
            bar: merge_option(self.bar, base.bar),
            pie: merge_option(self.pie, base.pie),
            funnel: merge_option(self.funnel, base.funnel),
            scatter: merge_option(self.scatter, base.scatter),
            bubble: merge_option(self.bubble, base.bubble),
        }
    }
}

/// Side-channel metadata attached to a point for formatters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointCustom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_display_value: Option<String>,
    /// Percent of the series baseline (funnel)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_x_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_y_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_break_by_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_break_by_color: Option<String>,
}

/// One renderer point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// `None` serializes as `null`, which the renderer draws as a gap
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<PointCustom>,
}

impl SeriesPoint {
    pub fn y(value: Option<f64>) -> Self {
        Self {
            y: value,
            ..Default::default()
        }
    }

    pub fn xy(x: f64, y: Option<f64>) -> Self {
        Self {
            x: Some(x),
            y,
            ..Default::default()
        }
    }

    pub fn named(name: impl Into<String>, y: Option<f64>) -> Self {
        Self {
            name: Some(name.into()),
            y,
            ..Default::default()
        }
    }
}

/// One renderer series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOptions {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub series_type: Option<SeriesKind>,
    pub data: Vec<SeriesPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_legend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_nulls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_labels: Option<DataLabelsSettings>,
}

impl SeriesOptions {
    pub fn new(name: impl Into<String>, data: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            data,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipSettings {
    pub enabled: bool,
    #[serde(rename = "useHTML")]
    pub use_html: bool,
    pub formatter: TooltipFormatter,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            use_html: true,
            formatter: TooltipFormatter::default(),
        }
    }
}

/// Range selector shown under zoomable charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorSettings {
    pub enabled: bool,
    pub height: f64,
    pub margin: f64,
    pub series_type: SeriesKind,
    pub x_axis_labels_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollbarSettings {
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_plot_options_merge_explicit_wins() {
        let base = SeriesPlotOptions {
            line_width: Some(2.0),
            connect_nulls: Some(false),
            ..Default::default()
        };
        let explicit = SeriesPlotOptions {
            line_width: Some(5.0),
            ..Default::default()
        };
        let merged = explicit.merge(base);

        assert_eq!(merged.line_width, Some(5.0));
        assert_eq!(merged.connect_nulls, Some(false));
    }

    #[test]
    fn test_data_labels_merge_keeps_explicit_enabled() {
        let base = DataLabelsSettings {
            enabled: true,
            y: Some(-5.0),
            ..Default::default()
        };
        let merged = merge_option(Some(DataLabelsSettings::default()), Some(base)).unwrap();

        assert!(!merged.enabled);
        assert_eq!(merged.y, Some(-5.0));
    }

    #[test]
    fn test_plot_options_for_kind_mut() {
        let mut plot = PlotOptions::default();
        plot.for_kind_mut(SeriesKind::Spline).line_width = Some(3.0);

        assert_eq!(plot.line.as_ref().and_then(|l| l.line_width), Some(3.0));
        assert!(plot.area.is_none());
    }

    #[test]
    fn test_point_serializes_null_y() {
        let json = serde_json::to_value(SeriesPoint::y(None)).unwrap();
        assert_eq!(json, serde_json::json!({ "y": null }));
    }

    #[test]
    fn test_chart_settings_serialization() {
        let json = serde_json::to_value(ChartSettings::default()).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["alignTicks"], false);
        assert!(json.get("zoomType").is_none());
    }
}
