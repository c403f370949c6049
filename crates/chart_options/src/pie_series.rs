//! Categorical series builder and pie convolution
//!
//! Pie and funnel charts share series construction. Without groupings
//! every measure becomes one slice of a single series; with groupings every
//! measure becomes a series sliced by group.

use crate::categories::category_label;
use crate::color::{Palette, OTHER_SLICE_COLOR};
use crate::data_options::{
    ConvolutionMode, ConvolutionOptions, DimensionOption, MeasureOption, SeriesColorMap,
};
use crate::date_format::DateFormatter;
use crate::model::{CategoryValue, Series, SeriesKind};
use crate::number_format::{exact_sum, percentage};
use crate::options::{PointCustom, SeriesOptions, SeriesPoint};
use crate::series::resolve_series_color;

/// Name of the slice that collects convolved values
pub const OTHER_SLICE_NAME: &str = "Other";

/// Inputs of the categorical series builder
#[derive(Clone, Copy)]
pub struct CategoricalBuildContext<'a> {
    pub kind: SeriesKind,
    pub x_axis_count: usize,
    pub x_values: &'a [CategoryValue],
    pub break_by: &'a [DimensionOption],
    pub measures: &'a [MeasureOption],
    pub color_map: &'a SeriesColorMap,
    pub palette: &'a Palette,
    pub date_formatter: &'a dyn DateFormatter,
}

/// Build pie or funnel series
pub fn build_categorical_series(series: &[Series], ctx: &CategoricalBuildContext<'_>) -> Vec<SeriesOptions> {
    if ctx.x_axis_count == 0 {
        vec![build_measure_slices(series, ctx)]
    } else {
        series.iter().map(|s| build_group_slices(s, ctx)).collect()
    }
}

/// One series, one point per measure
fn build_measure_slices(series: &[Series], ctx: &CategoricalBuildContext<'_>) -> SeriesOptions {
    let data = series
        .iter()
        .enumerate()
        .map(|(index, s)| {
            let measure_color = ctx
                .measures
                .iter()
                .find(|m| m.name == s.name)
                .and_then(|m| m.color);
            let value = s.data.first();
            SeriesPoint {
                name: Some(s.display_name().to_string()),
                y: value.and_then(|v| v.value),
                color: Some(resolve_series_color(
                    &s.name,
                    measure_color,
                    index,
                    ctx.color_map,
                    ctx.palette,
                )),
                custom: value.and_then(|v| v.raw_value.clone()).map(|raw| PointCustom {
                    raw_value: Some(raw),
                    ..Default::default()
                }),
                ..Default::default()
            }
        })
        .collect();

    let name = series
        .iter()
        .map(|s| s.display_name())
        .collect::<Vec<_>>()
        .join(", ");
    SeriesOptions {
        series_type: Some(ctx.kind),
        ..SeriesOptions::new(name, data)
    }
}

/// One series per measure, one point per group
fn build_group_slices(series: &Series, ctx: &CategoricalBuildContext<'_>) -> SeriesOptions {
    let data = ctx
        .x_values
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let name = category_label(group, 0, ctx.break_by.first(), ctx.date_formatter);
            let value = series.data.get(index);
            SeriesPoint {
                y: value.and_then(|v| v.value),
                color: Some(resolve_series_color(
                    &name,
                    None,
                    index,
                    ctx.color_map,
                    ctx.palette,
                )),
                custom: value.and_then(|v| v.raw_value.clone()).map(|raw| PointCustom {
                    raw_value: Some(raw),
                    ..Default::default()
                }),
                name: Some(name),
                ..Default::default()
            }
        })
        .collect();

    SeriesOptions {
        series_type: Some(ctx.kind),
        ..SeriesOptions::new(series.display_name(), data)
    }
}

/// Fold small slices into one "Other" slice
///
/// Disabled convolution returns the points unchanged. Null slices are
/// never folded. The "Other" slice is appended only when at least one
/// slice was folded.
pub fn convolve(points: Vec<SeriesPoint>, options: &ConvolutionOptions) -> Vec<SeriesPoint> {
    if !options.enabled || points.is_empty() {
        return points;
    }

    let (kept, folded) = match options.mode {
        ConvolutionMode::ByPercentage => split_by_percentage(points, options.minimal_independent_slice_percentage),
        ConvolutionMode::BySlicesCount => split_by_count(points, options.independent_slices_count),
    };

    if folded.is_empty() {
        return kept;
    }

    let mut result = kept;
    result.push(SeriesPoint {
        name: Some(OTHER_SLICE_NAME.to_string()),
        y: Some(exact_sum(folded.iter().filter_map(|p| p.y))),
        color: Some(OTHER_SLICE_COLOR),
        ..Default::default()
    });
    result
}

fn split_by_percentage(points: Vec<SeriesPoint>, minimal: f64) -> (Vec<SeriesPoint>, Vec<SeriesPoint>) {
    let total = exact_sum(points.iter().filter_map(|p| p.y));
    points.into_iter().partition(|p| match p.y {
        Some(y) => percentage(y, total).is_some_and(|share| share >= minimal),
        None => true,
    })
}

fn split_by_count(points: Vec<SeriesPoint>, count: usize) -> (Vec<SeriesPoint>, Vec<SeriesPoint>) {
    let (mut sorted, nulls): (Vec<SeriesPoint>, Vec<SeriesPoint>) =
        points.into_iter().partition(|p| p.y.is_some());
    // `sort_by` is stable: equal values keep their input order
    sorted.sort_by(|a, b| {
        let a = a.y.unwrap_or(f64::NEG_INFINITY);
        let b = b.y.unwrap_or(f64::NEG_INFINITY);
        b.total_cmp(&a)
    });
    let folded = sorted.split_off(count.min(sorted.len()));
    sorted.extend(nulls);
    (sorted, folded)
}
