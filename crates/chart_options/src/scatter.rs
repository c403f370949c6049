//! Scatter family compiler
//!
//! Compiles scatter and bubble charts from a row table. Each axis is
//! either numeric (measure or date) or categorical with its own
//! vocabulary; the two vocabularies are truncated independently.

use crate::alerts::{Alerts, CapacityTarget};
use crate::axis::{apply_range, get_axis_settings, AxisRole};
use crate::data_options::{FieldOption, ScatterDataOptions};
use crate::defaults::default_plot_options;
use crate::design_options::{AxisOptions, ScatterDesignOptions};
use crate::formatter::{AxisLabelFormatter, LabelFormatter};
use crate::geometry::{auto_range, Orientation, RangeRequest};
use crate::legend::get_scatter_legend_settings;
use crate::marker::get_scatter_marker_settings;
use crate::model::{ChartType, ScatterChartData, SeriesKind};
use crate::options::{
    AxisSettings, AxisType, ChartOptions, ChartSettings, CompiledChartOptions, Merge, PlotOptions,
    SeriesPlotOptions,
};
use crate::scatter_series::{build_scatter_series, ScatterBuildContext};
use crate::theme::CompileContext;
use crate::tooltip::get_scatter_tooltip_settings;
use crate::value_label::get_value_label_settings;

/// Bubble when a size field is bound, scatter otherwise
pub fn scatter_series_kind(data_options: &ScatterDataOptions) -> SeriesKind {
    if data_options.size.is_some() {
        SeriesKind::Bubble
    } else {
        SeriesKind::Scatter
    }
}

/// Compile options for a scatter or bubble chart
pub fn get_scatter_chart_options(
    data: &ScatterChartData,
    design: &ScatterDesignOptions,
    data_options: &ScatterDataOptions,
    ctx: &CompileContext<'_>,
) -> CompiledChartOptions {
    tracing::debug!(
        "Compiling scatter chart: {} rows",
        data.scatter_data_table.len()
    );
    let theme = ctx.theme();
    let kind = scatter_series_kind(data_options);
    let limits = design.data_limits;
    let mut alerts = Alerts::new();

    let x_categories = data.x_categories.as_deref().map(|c| {
        alerts.enforce(c, limits.categories_capacity, CapacityTarget::AxisCategories("x".into()))
    });
    let y_categories = data.y_categories.as_deref().map(|c| {
        alerts.enforce(c, limits.categories_capacity, CapacityTarget::AxisCategories("y".into()))
    });

    let build_ctx = ScatterBuildContext {
        kind,
        data_options,
        x_categories,
        y_categories,
        palette: ctx.palette(),
        gradient: (theme.gradient_start, theme.gradient_end),
    };
    let mut series = build_scatter_series(&data.scatter_data_table, &build_ctx);
    let kept = alerts
        .enforce(&series, limits.series_capacity, CapacityTarget::Series)
        .len();
    series.truncate(kept);

    let x_values: Vec<f64> = series.iter().flat_map(|s| &s.data).filter_map(|p| p.x).collect();
    let y_values: Vec<f64> = series.iter().flat_map(|s| &s.data).filter_map(|p| p.y).collect();
    let x_axis = build_scatter_axis(
        &design.x_axis,
        AxisRole::X,
        data_options.x.as_ref(),
        x_categories,
        &x_values,
        ctx,
    );
    let y_axis = build_scatter_axis(
        &design.y_axis,
        AxisRole::Y,
        data_options.y.as_ref(),
        y_categories,
        &y_values,
        ctx,
    );

    let mut block = SeriesPlotOptions {
        data_labels: Some(get_value_label_settings(
            design.value_label,
            Orientation::Horizontal,
            LabelFormatter::ScatterValue,
            theme,
        )),
        ..Default::default()
    };
    match kind {
        SeriesKind::Bubble => {
            block.min_size = Some(design.marker_size.min_size);
            block.max_size = Some(design.marker_size.max_size);
        }
        _ => block.marker = Some(get_scatter_marker_settings(&design.marker_size)),
    }
    let mut plot_options = PlotOptions::default();
    *plot_options.for_kind_mut(kind) = block;
    let plot_options = plot_options.merge(default_plot_options(ChartType::Scatter, Default::default(), theme));

    let options = ChartOptions {
        chart: ChartSettings {
            chart_type: kind,
            zoom_type: Some("xy".to_string()),
            ..Default::default()
        },
        x_axis: vec![x_axis],
        y_axis: vec![y_axis],
        legend: get_scatter_legend_settings(design.legend, theme),
        series,
        plot_options,
        tooltip: get_scatter_tooltip_settings(data_options),
        ..Default::default()
    };

    let alerts = alerts.into_vec();
    tracing::debug!(
        "Compiled scatter chart: {} series, {} alerts",
        options.series.len(),
        alerts.len()
    );
    CompiledChartOptions { options, alerts }
}

fn build_scatter_axis(
    style: &AxisOptions,
    role: AxisRole,
    field: Option<&FieldOption>,
    categories: Option<&[String]>,
    values: &[f64],
    ctx: &CompileContext<'_>,
) -> AxisSettings {
    // Scatter axes show their field title unless it is switched off
    let style = AxisOptions {
        title_enabled: style.title_enabled.or(Some(true)),
        ..style.clone()
    };
    let mut axis = get_axis_settings(&style, role, ctx.theme());
    if axis.title.enabled && axis.title.text.is_none() {
        axis.title.text = field.map(|f| f.display_name().to_string());
    }

    if let Some(categories) = categories {
        axis.axis_type = AxisType::Category;
        axis.categories = Some(categories.to_vec());
        return axis;
    }

    match field {
        Some(FieldOption::Dimension(dimension)) if dimension.granularity.is_some() => {
            axis.axis_type = AxisType::Datetime;
            axis.labels.formatter = dimension.date_format().map(|format| AxisLabelFormatter::DateTime {
                format: format.to_string(),
            });
        }
        Some(FieldOption::Measure(measure)) => {
            axis.labels.formatter = measure
                .number_format
                .clone()
                .map(|number_format| AxisLabelFormatter::Number { number_format });
        }
        _ => {}
    }

    let range = auto_range(
        values.iter().copied(),
        RangeRequest {
            include_zero: false,
            logarithmic: style.logarithmic,
            ..Default::default()
        },
    );
    apply_range(&mut axis, range);
    axis
}
