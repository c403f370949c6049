//! Funnel percent-of-baseline and plot options

use crate::design_options::{FunnelDesignOptions, FunnelDirection};
use crate::geometry::{funnel_neck_height, funnel_neck_width, funnel_width};
use crate::number_format::percentage;
use crate::options::{PointCustom, SeriesOptions, SeriesPlotOptions};
use crate::theme::ContainerSize;

/// Attach `custom.percent` to every point: its share of the series' first point
///
/// The percent is left unset when the baseline is zero or null.
pub fn apply_baseline_percent(series: &mut SeriesOptions) {
    let baseline = series.data.first().and_then(|p| p.y);
    for point in &mut series.data {
        let percent = baseline
            .zip(point.y)
            .and_then(|(base, value)| percentage(value, base));
        match percent {
            Some(percent) => {
                point.custom.get_or_insert_with(PointCustom::default).percent = Some(percent);
            }
            None => {
                if let Some(custom) = point.custom.as_mut() {
                    custom.percent = None;
                }
            }
        }
    }
}

fn percent_string(value: f64) -> String {
    format!("{value}%")
}

/// Funnel geometry and direction as plot options
pub fn get_funnel_plot_options(design: &FunnelDesignOptions, container: Option<ContainerSize>) -> SeriesPlotOptions {
    let width = funnel_width(container);
    SeriesPlotOptions {
        width: Some(percent_string(width)),
        neck_width: Some(percent_string(funnel_neck_width(width, design.funnel_size))),
        neck_height: Some(percent_string(funnel_neck_height(design.funnel_type))),
        reversed: Some(design.funnel_direction == FunnelDirection::Inverted),
        ..Default::default()
    }
}
