//! Geometry calculations
//!
//! Value axis auto-ranging, stack totals, chart spacing and funnel
//! proportions. Everything here is a pure function of its inputs.

use crate::design_options::{FunnelSize, FunnelType};
use crate::model::ChartType;
use crate::options::DEFAULT_SPACING;
use crate::theme::ContainerSize;

/// Direction of the category axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories run left to right
    Horizontal,
    /// Categories run top to bottom (bar charts)
    Vertical,
}

impl Orientation {
    pub fn for_chart_type(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Bar => Orientation::Vertical,
            _ => Orientation::Horizontal,
        }
    }
}

/// Resolved min/max of a value axis; `None` leaves the bound to the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Inputs of a value axis auto-range
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeRequest {
    pub include_zero: bool,
    pub logarithmic: bool,
    pub explicit_min: Option<f64>,
    pub explicit_max: Option<f64>,
}

/// Compute a value axis range from the plotted values
///
/// Explicit bounds always win. Logarithmic axes never receive a
/// non-positive minimum.
pub fn auto_range(values: impl IntoIterator<Item = f64>, request: RangeRequest) -> AxisRange {
    let (mut min, mut max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min > max {
        return AxisRange {
            min: request.explicit_min.filter(|m| !request.logarithmic || *m > 0.0),
            max: request.explicit_max,
        };
    }

    if request.include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }

    let min = request.explicit_min.unwrap_or(min);
    let max = request.explicit_max.unwrap_or(max);
    AxisRange {
        min: Some(min).filter(|m| !request.logarithmic || *m > 0.0),
        max: Some(max),
    }
}

/// Positive and negative stack sums at one category index
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StackTotal {
    pub positive: f64,
    pub negative: f64,
}

impl StackTotal {
    pub fn total(&self) -> f64 {
        self.positive + self.negative
    }
}

/// Sum values at each category index across series, nulls counted as zero
pub fn stack_totals<'a>(series: impl IntoIterator<Item = &'a [Option<f64>]>) -> Vec<StackTotal> {
    let mut totals: Vec<StackTotal> = Vec::new();
    for values in series {
        if totals.len() < values.len() {
            totals.resize(values.len(), StackTotal::default());
        }
        for (total, value) in totals.iter_mut().zip(values) {
            match value {
                Some(v) if *v >= 0.0 => total.positive += v,
                Some(v) => total.negative += v,
                None => {}
            }
        }
    }
    totals
}

/// Extra spacing reserved for percent labels and group bands
pub const EXTRA_SPACING: f64 = 30.0;

/// Chart spacing (top, right, bottom, left)
///
/// Percent stacking and a secondary x grouping need room along the value
/// end of the plot: the top for horizontal charts, the right for bar charts.
pub fn chart_spacing(stack_percent: bool, has_x2_grouping: bool, orientation: Orientation) -> [f64; 4] {
    let mut spacing = DEFAULT_SPACING;
    if stack_percent || has_x2_grouping {
        match orientation {
            Orientation::Horizontal => spacing[0] += EXTRA_SPACING,
            Orientation::Vertical => spacing[1] += EXTRA_SPACING,
        }
    }
    spacing
}

/// Widest funnel, in percent of the plot width
pub const FUNNEL_MAX_WIDTH: f64 = 66.6;

/// Funnel height of a pinched funnel's neck, in percent
pub const PINCHED_NECK_HEIGHT: f64 = 30.0;

/// Funnel width in percent; keeps the funnel proportional in wide containers
pub fn funnel_width(container: Option<ContainerSize>) -> f64 {
    match container {
        Some(size) if size.width > 0.0 => {
            FUNNEL_MAX_WIDTH.min(size.height * 1.5 / size.width * 100.0)
        }
        _ => FUNNEL_MAX_WIDTH,
    }
}

impl FunnelSize {
    /// Neck width as a percentage of the funnel width
    pub fn neck_ratio(&self) -> f64 {
        match self {
            FunnelSize::Wide => 60.0,
            FunnelSize::Regular => 30.0,
            FunnelSize::Narrow => 15.0,
        }
    }
}

/// Neck width in percent, rounded to a whole number
pub fn funnel_neck_width(width: f64, size: FunnelSize) -> f64 {
    (width * size.neck_ratio() / 100.0).round()
}

/// Neck height in percent
pub fn funnel_neck_height(funnel_type: FunnelType) -> f64 {
    match funnel_type {
        FunnelType::Pinched => PINCHED_NECK_HEIGHT,
        FunnelType::Regular => 0.0,
    }
}
