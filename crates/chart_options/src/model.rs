//! Chart model types
//!
//! This module defines the chart types the compiler understands and the
//! intermediate chart data it consumes. Chart data is a tagged union keyed
//! by chart family; every series inside one variant shares the same
//! category index space.

use crate::error::{ChartOptionsError, ChartOptionsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Types of charts supported
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Area,
    /// Horizontal bars; the x axis is drawn vertically
    Bar,
    Column,
    Polar,
    Pie,
    Funnel,
    Scatter,
}

impl ChartType {
    /// The family compiler responsible for this chart type
    pub fn family(&self) -> ChartFamily {
        match self {
            ChartType::Line
            | ChartType::Area
            | ChartType::Bar
            | ChartType::Column
            | ChartType::Polar => ChartFamily::Cartesian,
            ChartType::Pie | ChartType::Funnel => ChartFamily::Categorical,
            ChartType::Scatter => ChartFamily::Scatter,
        }
    }

    /// Get the name of this chart type
    pub fn name(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Area => "area",
            ChartType::Bar => "bar",
            ChartType::Column => "column",
            ChartType::Polar => "polar",
            ChartType::Pie => "pie",
            ChartType::Funnel => "funnel",
            ChartType::Scatter => "scatter",
        }
    }

    /// Get all chart types
    pub fn all() -> Vec<ChartType> {
        vec![
            ChartType::Line,
            ChartType::Area,
            ChartType::Bar,
            ChartType::Column,
            ChartType::Polar,
            ChartType::Pie,
            ChartType::Funnel,
            ChartType::Scatter,
        ]
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartType {
    type Err = ChartOptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::all()
            .into_iter()
            .find(|chart_type| chart_type.name() == s)
            .ok_or_else(|| ChartOptionsError::UnexpectedChartType(s.to_string()))
    }
}

/// Chart families, one per family compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartFamily {
    Cartesian,
    Categorical,
    Scatter,
}

impl ChartFamily {
    pub fn name(&self) -> &'static str {
        match self {
            ChartFamily::Cartesian => "cartesian",
            ChartFamily::Categorical => "categorical",
            ChartFamily::Scatter => "scatter",
        }
    }
}

/// Renderer series types, also used as per-series overrides in mixed charts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Spline,
    Area,
    Areaspline,
    Column,
    Bar,
    Pie,
    Funnel,
    Scatter,
    Bubble,
}

/// A raw (unformatted) value as delivered by the query layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One slot on the category axis
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CategoryValue {
    /// Unique key of the slot
    pub key: String,
    /// Display value per x dimension (outer grouping last)
    pub x_values: Vec<String>,
    /// Raw value per x dimension
    pub raw_values: Vec<RawValue>,
}

impl CategoryValue {
    /// Create a single-dimension category
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            key: value.clone(),
            x_values: vec![value],
            raw_values: Vec::new(),
        }
    }

    /// Create a category with a raw value (timestamps for date dimensions)
    pub fn with_raw(value: impl Into<String>, raw: RawValue) -> Self {
        let mut category = Self::new(value);
        category.raw_values.push(raw);
        category
    }

    /// Create a two-level category (inner value, outer group)
    pub fn grouped(inner: impl Into<String>, outer: impl Into<String>) -> Self {
        let inner = inner.into();
        let outer = outer.into();
        Self {
            key: format!("{outer}/{inner}"),
            x_values: vec![inner, outer],
            raw_values: Vec::new(),
        }
    }
}

/// A single value of a series, aligned with a category slot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeriesValue {
    /// The numeric value; `None` marks a gap
    pub value: Option<f64>,
    /// Whether the point is de-emphasized (highlight filters)
    pub blur: bool,
    /// Raw value before any aggregation rounding
    pub raw_value: Option<RawValue>,
}

impl SeriesValue {
    pub fn new(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }
}

/// A named numeric series
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Series {
    /// Name of the series; the measure name or the break-by value
    pub name: String,
    /// Optional display title
    pub title: Option<String>,
    /// Values aligned with the category slots
    pub data: Vec<SeriesValue>,
    /// Plot against the secondary y axis
    pub show_on_right_axis: bool,
    /// Chart type override for mixed charts
    pub series_type: Option<SeriesKind>,
    /// Plot missing values as zero instead of gaps
    pub treat_null_as_zero: bool,
}

impl Series {
    /// Create a new series with a name and values
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: values.into_iter().map(SeriesValue::new).collect(),
            ..Default::default()
        }
    }

    /// Create a new series from optional values
    pub fn from_optional(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: values
                .into_iter()
                .map(|value| SeriesValue {
                    value,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    /// Display title, falling back to the name
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Plot on the secondary axis
    pub fn on_right_axis(mut self) -> Self {
        self.show_on_right_axis = true;
        self
    }

    /// Override the renderer type for this series
    pub fn with_series_type(mut self, kind: SeriesKind) -> Self {
        self.series_type = Some(kind);
        self
    }
}

/// Data for line, area, bar, column and polar charts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CartesianChartData {
    /// Number of x dimensions (0, 1 or 2)
    pub x_axis_count: usize,
    /// Category slots
    pub x_values: Vec<CategoryValue>,
    /// Data series
    pub series: Vec<Series>,
}

/// Data for pie and funnel charts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CategoricalChartData {
    /// Number of grouping dimensions; zero means one point per measure
    pub x_axis_count: usize,
    /// Group slots (a single empty slot when there are no groupings)
    pub x_values: Vec<CategoryValue>,
    /// One series per measure
    pub series: Vec<Series>,
}

/// A display/raw pair from the scatter data table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataCell {
    pub display_value: String,
    pub raw_value: RawValue,
}

impl DataCell {
    pub fn number(value: f64) -> Self {
        Self {
            display_value: value.to_string(),
            raw_value: RawValue::Number(value),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            display_value: value.clone(),
            raw_value: RawValue::Text(value),
        }
    }
}

/// One plotted row of a scatter chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScatterDataRow {
    pub x_axis: DataCell,
    pub y_axis: DataCell,
    #[serde(default)]
    pub size: Option<DataCell>,
    #[serde(default)]
    pub break_by_point: Option<DataCell>,
    #[serde(default)]
    pub break_by_color: Option<DataCell>,
}

impl ScatterDataRow {
    pub fn new(x_axis: DataCell, y_axis: DataCell) -> Self {
        Self {
            x_axis,
            y_axis,
            size: None,
            break_by_point: None,
            break_by_color: None,
        }
    }
}

/// Data for scatter and bubble charts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScatterChartData {
    pub scatter_data_table: Vec<ScatterDataRow>,
    /// Vocabulary of a categorical x axis
    pub x_categories: Option<Vec<String>>,
    /// Vocabulary of a categorical y axis
    pub y_categories: Option<Vec<String>>,
}

/// Intermediate chart data, tagged by chart family
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartData {
    Cartesian(CartesianChartData),
    Categorical(CategoricalChartData),
    Scatter(ScatterChartData),
}

impl ChartData {
    /// Family this data belongs to
    pub fn family(&self) -> ChartFamily {
        match self {
            ChartData::Cartesian(_) => ChartFamily::Cartesian,
            ChartData::Categorical(_) => ChartFamily::Categorical,
            ChartData::Scatter(_) => ChartFamily::Scatter,
        }
    }

    /// Parse chart data from JSON, rejecting unknown family tags
    pub fn from_json(json: &str) -> ChartOptionsResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let tag = value
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();
        match tag.as_str() {
            "cartesian" | "categorical" | "scatter" => Ok(serde_json::from_value(value)?),
            _ => Err(ChartOptionsError::UnexpectedChartType(tag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_type_family() {
        assert_eq!(ChartType::Bar.family(), ChartFamily::Cartesian);
        assert_eq!(ChartType::Polar.family(), ChartFamily::Cartesian);
        assert_eq!(ChartType::Funnel.family(), ChartFamily::Categorical);
        assert_eq!(ChartType::Scatter.family(), ChartFamily::Scatter);
    }

    #[test]
    fn test_chart_type_from_str() {
        assert_eq!("pie".parse::<ChartType>().unwrap(), ChartType::Pie);
        let err = "treemap".parse::<ChartType>().unwrap_err();
        assert!(matches!(err, ChartOptionsError::UnexpectedChartType(t) if t == "treemap"));
    }

    #[test]
    fn test_chart_data_from_json() {
        let json = r#"{"type":"cartesian","x_axis_count":1,
            "x_values":[{"key":"A","x_values":["A"]}],
            "series":[{"name":"Sales","data":[{"value":1.5}]}]}"#;
        let data = ChartData::from_json(json).unwrap();
        assert_eq!(data.family(), ChartFamily::Cartesian);
        match data {
            ChartData::Cartesian(d) => assert_eq!(d.series[0].data[0].value, Some(1.5)),
            _ => panic!("expected cartesian data"),
        }
    }

    #[test]
    fn test_chart_data_from_json_unknown_tag() {
        let err = ChartData::from_json(r#"{"type":"sankey"}"#).unwrap_err();
        assert!(matches!(err, ChartOptionsError::UnexpectedChartType(t) if t == "sankey"));
    }

    #[test]
    fn test_series_builder() {
        let series = Series::new("Revenue", vec![1.0, 2.0])
            .on_right_axis()
            .with_series_type(SeriesKind::Line);

        assert_eq!(series.data.len(), 2);
        assert!(series.show_on_right_axis);
        assert_eq!(series.series_type, Some(SeriesKind::Line));
        assert_eq!(series.display_name(), "Revenue");
    }

    #[test]
    fn test_raw_value_as_number() {
        assert_eq!(RawValue::Number(3.0).as_number(), Some(3.0));
        assert_eq!(RawValue::Text(" 4.5 ".into()).as_number(), Some(4.5));
        assert_eq!(RawValue::Text("abc".into()).as_number(), None);
    }
}
