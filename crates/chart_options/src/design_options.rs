//! Design options
//!
//! User- and theme-configurable visual settings, one struct per chart
//! family. Every struct deserializes from partial JSON; missing fields take
//! the defaults documented on each `Default` impl.

use crate::error::{ChartOptionsError, ChartOptionsResult};
use crate::model::{ChartFamily, ChartType};
use serde::{Deserialize, Serialize};

/// Position of the legend; `None` in an `Option<LegendPosition>` disables it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Left,
    Right,
    Bottom,
}

/// Rotation class of value labels; `None` disables them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueLabelRotation {
    Horizontal,
    Diagonal,
    Vertical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineWidth {
    Thin,
    #[default]
    Bold,
    Thick,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerFill {
    #[default]
    Filled,
    Hollow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSize {
    #[default]
    Small,
    Large,
}

/// Marker style for line, area and polar charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub enabled: bool,
    pub fill: MarkerFill,
    pub size: MarkerSize,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            fill: MarkerFill::Filled,
            size: MarkerSize::Small,
        }
    }
}

/// Style description of one axis; unset fields take chart-type defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    pub enabled: Option<bool>,
    pub grid_line: Option<bool>,
    pub labels: Option<bool>,
    pub logarithmic: bool,
    pub title_enabled: Option<bool>,
    pub title: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub tick_interval: Option<f64>,
}

impl AxisOptions {
    /// An axis with a visible title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title_enabled: Some(true),
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Upper bounds on what a chart renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataLimits {
    pub series_capacity: usize,
    pub categories_capacity: usize,
}

impl Default for DataLimits {
    fn default() -> Self {
        Self {
            series_capacity: 50,
            categories_capacity: 100_000,
        }
    }
}

impl DataLimits {
    /// Scatter charts draw every category on a real axis and keep fewer
    pub fn scatter() -> Self {
        Self {
            series_capacity: 50,
            categories_capacity: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackType {
    #[default]
    Classic,
    Stacked,
    Stack100,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarType {
    #[default]
    Column,
    Area,
    Line,
}

/// Initial visible window of a zoomable x axis, in category indexes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollerLocation {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoZoom {
    pub enabled: bool,
    pub scroller_location: Option<ScrollerLocation>,
}

/// Design options for line, area, bar, column and polar charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartesianDesignOptions {
    pub legend: Option<LegendPosition>,
    pub line_width: LineWidth,
    pub value_label: Option<ValueLabelRotation>,
    pub marker: MarkerStyle,
    pub x_axis: AxisOptions,
    /// Secondary x axis: the outer grouping drawn as plot bands
    pub x2_axis: AxisOptions,
    pub y_axis: AxisOptions,
    pub y2_axis: AxisOptions,
    pub auto_zoom: AutoZoom,
    pub data_limits: DataLimits,
    pub stack_type: StackType,
    pub show_total: bool,
    pub polar_type: PolarType,
}

impl Default for CartesianDesignOptions {
    fn default() -> Self {
        Self {
            legend: Some(LegendPosition::Bottom),
            line_width: LineWidth::Bold,
            value_label: None,
            marker: MarkerStyle::default(),
            x_axis: AxisOptions::default(),
            x2_axis: AxisOptions::default(),
            y_axis: AxisOptions::default(),
            y2_axis: AxisOptions::default(),
            auto_zoom: AutoZoom::default(),
            data_limits: DataLimits::default(),
            stack_type: StackType::Classic,
            show_total: false,
            polar_type: PolarType::Column,
        }
    }
}

/// Which parts of a slice label are shown (pie and funnel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceLabels {
    pub enabled: bool,
    pub show_categories: bool,
    pub show_value: bool,
    pub show_percent: bool,
    pub show_decimals: bool,
}

impl Default for SliceLabels {
    fn default() -> Self {
        Self {
            enabled: true,
            show_categories: true,
            show_value: true,
            show_percent: true,
            show_decimals: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieType {
    #[default]
    Classic,
    Donut,
    Ring,
}

impl PieType {
    /// Inner size of the pie as a percentage string
    pub fn inner_size(&self) -> &'static str {
        match self {
            PieType::Classic => "0%",
            PieType::Donut => "40%",
            PieType::Ring => "80%",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieDesignOptions {
    pub legend: Option<LegendPosition>,
    pub pie_type: PieType,
    pub pie_labels: SliceLabels,
    pub data_limits: DataLimits,
}

impl Default for PieDesignOptions {
    fn default() -> Self {
        Self {
            legend: Some(LegendPosition::Bottom),
            pie_type: PieType::Classic,
            pie_labels: SliceLabels::default(),
            data_limits: DataLimits::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelSize {
    Wide,
    #[default]
    Regular,
    Narrow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelType {
    #[default]
    Regular,
    Pinched,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelDirection {
    #[default]
    Regular,
    Inverted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelDesignOptions {
    pub legend: Option<LegendPosition>,
    pub funnel_size: FunnelSize,
    pub funnel_type: FunnelType,
    pub funnel_direction: FunnelDirection,
    pub funnel_labels: SliceLabels,
    pub data_limits: DataLimits,
}

impl Default for FunnelDesignOptions {
    fn default() -> Self {
        Self {
            legend: Some(LegendPosition::Bottom),
            funnel_size: FunnelSize::Regular,
            funnel_type: FunnelType::Regular,
            funnel_direction: FunnelDirection::Regular,
            funnel_labels: SliceLabels::default(),
            data_limits: DataLimits::default(),
        }
    }
}

/// Marker sizes for scatter and bubble charts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterMarkerSize {
    pub default_size: f64,
    pub min_size: f64,
    pub max_size: f64,
}

impl Default for ScatterMarkerSize {
    fn default() -> Self {
        Self {
            default_size: 10.0,
            min_size: 10.0,
            max_size: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterDesignOptions {
    pub legend: Option<LegendPosition>,
    pub value_label: Option<ValueLabelRotation>,
    pub marker_size: ScatterMarkerSize,
    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,
    pub data_limits: DataLimits,
}

impl Default for ScatterDesignOptions {
    fn default() -> Self {
        Self {
            legend: Some(LegendPosition::Bottom),
            value_label: None,
            marker_size: ScatterMarkerSize::default(),
            x_axis: AxisOptions::default(),
            y_axis: AxisOptions::default(),
            data_limits: DataLimits::scatter(),
        }
    }
}

/// Design options of any chart family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum DesignOptions {
    Cartesian(CartesianDesignOptions),
    Pie(PieDesignOptions),
    Funnel(FunnelDesignOptions),
    Scatter(ScatterDesignOptions),
}

impl DesignOptions {
    /// Default design options for a chart type
    pub fn default_for(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Line
            | ChartType::Area
            | ChartType::Bar
            | ChartType::Column
            | ChartType::Polar => DesignOptions::Cartesian(CartesianDesignOptions::default()),
            ChartType::Pie => DesignOptions::Pie(PieDesignOptions::default()),
            ChartType::Funnel => DesignOptions::Funnel(FunnelDesignOptions::default()),
            ChartType::Scatter => DesignOptions::Scatter(ScatterDesignOptions::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DesignOptions::Cartesian(_) => "cartesian",
            DesignOptions::Pie(_) => "pie",
            DesignOptions::Funnel(_) => "funnel",
            DesignOptions::Scatter(_) => "scatter",
        }
    }

    pub fn data_limits(&self) -> DataLimits {
        match self {
            DesignOptions::Cartesian(o) => o.data_limits,
            DesignOptions::Pie(o) => o.data_limits,
            DesignOptions::Funnel(o) => o.data_limits,
            DesignOptions::Scatter(o) => o.data_limits,
        }
    }

    /// Parse design options from JSON
    pub fn from_json(json: &str) -> ChartOptionsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether these options can drive the given chart type
    pub(crate) fn check_chart_type(&self, chart_type: ChartType) -> ChartOptionsResult<()> {
        let fits = matches!(
            (self, chart_type.family(), chart_type),
            (DesignOptions::Cartesian(_), ChartFamily::Cartesian, _)
                | (DesignOptions::Pie(_), _, ChartType::Pie)
                | (DesignOptions::Funnel(_), _, ChartType::Funnel)
                | (DesignOptions::Scatter(_), _, ChartType::Scatter)
        );
        if fits {
            Ok(())
        } else {
            Err(ChartOptionsError::DesignOptionsMismatch {
                chart_type: chart_type.to_string(),
                found: self.name(),
            })
        }
    }
}
