//! Data options
//!
//! Per-axis and per-measure metadata supplied by the query builder:
//! number formats, colors, axis placement and pie convolution settings.

use crate::color::Color;
use crate::date_format::{is_valid_date_format, DateGranularity};
use crate::error::{ChartOptionsError, ChartOptionsResult};
use crate::model::{ChartFamily, SeriesKind};
use crate::number_format::NumberFormatConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Explicit series colors keyed by series (or group) name
pub type SeriesColorMap = BTreeMap<String, Color>;

/// A numeric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureOption {
    pub name: String,
    pub title: Option<String>,
    pub number_format: Option<NumberFormatConfig>,
    pub color: Option<Color>,
    pub enabled: bool,
    pub show_on_right_axis: bool,
    pub series_type: Option<SeriesKind>,
    pub treat_null_as_zero: bool,
}

impl Default for MeasureOption {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: None,
            number_format: None,
            color: None,
            enabled: true,
            show_on_right_axis: false,
            series_type: None,
            treat_null_as_zero: false,
        }
    }
}

impl MeasureOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_number_format(mut self, format: NumberFormatConfig) -> Self {
        self.number_format = Some(format);
        self
    }

    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// A grouping field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionOption {
    pub name: String,
    pub title: Option<String>,
    /// Set for date dimensions
    pub granularity: Option<DateGranularity>,
    /// Format string overriding the granularity default
    pub date_format: Option<String>,
    /// Plot dates on a continuous time axis instead of as categories
    pub continuous: bool,
}

impl DimensionOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn date(name: impl Into<String>, granularity: DateGranularity) -> Self {
        Self {
            name: name.into(),
            granularity: Some(granularity),
            ..Default::default()
        }
    }

    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Format string used for this dimension's dates; an unparseable
    /// explicit format yields to the granularity default
    pub fn date_format(&self) -> Option<&str> {
        self.date_format
            .as_deref()
            .filter(|format| is_valid_date_format(format))
            .or_else(|| self.granularity.map(|g| g.default_format()))
    }

    /// Whether this dimension is a date on a continuous axis
    pub fn is_continuous_date(&self) -> bool {
        self.continuous && self.granularity.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CartesianDataOptions {
    /// X dimensions, inner first
    pub x: Vec<DimensionOption>,
    pub y: Vec<MeasureOption>,
    pub break_by: Vec<DimensionOption>,
    pub series_to_color_map: SeriesColorMap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvolutionMode {
    #[default]
    ByPercentage,
    BySlicesCount,
}

/// Folding of small pie slices into one "Other" slice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvolutionOptions {
    pub enabled: bool,
    pub mode: ConvolutionMode,
    pub minimal_independent_slice_percentage: f64,
    pub independent_slices_count: usize,
}

impl Default for ConvolutionOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: ConvolutionMode::ByPercentage,
            minimal_independent_slice_percentage: 3.0,
            independent_slices_count: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoricalDataOptions {
    pub y: Vec<MeasureOption>,
    pub break_by: Vec<DimensionOption>,
    pub series_to_color_map: SeriesColorMap,
    pub convolution: ConvolutionOptions,
}

/// A scatter field bound to either a dimension or a measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldOption {
    Dimension(DimensionOption),
    Measure(MeasureOption),
}

impl FieldOption {
    pub fn display_name(&self) -> &str {
        match self {
            FieldOption::Dimension(d) => d.display_name(),
            FieldOption::Measure(m) => m.display_name(),
        }
    }

    pub fn as_measure(&self) -> Option<&MeasureOption> {
        match self {
            FieldOption::Measure(m) => Some(m),
            FieldOption::Dimension(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterDataOptions {
    pub x: Option<FieldOption>,
    pub y: Option<FieldOption>,
    pub size: Option<MeasureOption>,
    pub break_by_point: Option<DimensionOption>,
    pub break_by_color: Option<FieldOption>,
    pub series_to_color_map: SeriesColorMap,
}

impl ScatterDataOptions {
    /// Every bound measure, in x, y, size, break-by-color order
    pub fn measures(&self) -> Vec<&MeasureOption> {
        [
            self.x.as_ref().and_then(FieldOption::as_measure),
            self.y.as_ref().and_then(FieldOption::as_measure),
            self.size.as_ref(),
            self.break_by_color.as_ref().and_then(FieldOption::as_measure),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Data options of any chart family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum DataOptions {
    Cartesian(CartesianDataOptions),
    Categorical(CategoricalDataOptions),
    Scatter(ScatterDataOptions),
}

impl DataOptions {
    pub fn family(&self) -> ChartFamily {
        match self {
            DataOptions::Cartesian(_) => ChartFamily::Cartesian,
            DataOptions::Categorical(_) => ChartFamily::Categorical,
            DataOptions::Scatter(_) => ChartFamily::Scatter,
        }
    }

    /// Parse data options from JSON
    pub fn from_json(json: &str) -> ChartOptionsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn cartesian(&self) -> ChartOptionsResult<&CartesianDataOptions> {
        match self {
            DataOptions::Cartesian(o) => Ok(o),
            other => Err(other.mismatch(ChartFamily::Cartesian)),
        }
    }

    pub(crate) fn categorical(&self) -> ChartOptionsResult<&CategoricalDataOptions> {
        match self {
            DataOptions::Categorical(o) => Ok(o),
            other => Err(other.mismatch(ChartFamily::Categorical)),
        }
    }

    pub(crate) fn scatter(&self) -> ChartOptionsResult<&ScatterDataOptions> {
        match self {
            DataOptions::Scatter(o) => Ok(o),
            other => Err(other.mismatch(ChartFamily::Scatter)),
        }
    }

    fn mismatch(&self, expected: ChartFamily) -> ChartOptionsError {
        ChartOptionsError::DataOptionsMismatch {
            expected: expected.name(),
            found: self.family().name(),
        }
    }
}
