//! Cartesian family compiler
//!
//! Compiles line, area, bar, column and polar charts. Categories and
//! series are truncated to the design's data limits first, then axes,
//! series and plot options are assembled and merged over the chart-type
//! defaults.

use crate::alerts::{Alerts, CapacityTarget};
use crate::axis::{apply_range, get_axis_settings, AxisRole};
use crate::categories::{build_category_axis, category_timestamp, CategoryAxis};
use crate::data_options::CartesianDataOptions;
use crate::defaults::{default_navigator, default_plot_options, default_scrollbar, stacking_for};
use crate::design_options::{CartesianDesignOptions, PolarType, StackType};
use crate::formatter::{AxisLabelFormatter, LabelFormatter};
use crate::geometry::{auto_range, chart_spacing, stack_totals, AxisRange, Orientation, RangeRequest};
use crate::legend::get_legend_settings;
use crate::marker::{get_line_width, get_marker_settings};
use crate::model::{CartesianChartData, ChartType, SeriesKind};
use crate::options::{
    AxisSettings, AxisType, ChartOptions, ChartSettings, CompiledChartOptions, Merge, PlotOptions,
    StackLabels, TextStyle,
};
use crate::number_format::NumberFormatConfig;
use crate::series::{
    build_cartesian_series, is_on_right_axis, plotted_values, treats_null_as_zero, PointLayout,
    SeriesBuildContext,
};
use crate::theme::CompileContext;
use crate::tooltip::{get_tooltip_settings, TooltipKind};
use crate::value_label::get_value_label_settings;

/// Renderer series type of a cartesian chart
pub fn cartesian_series_kind(chart_type: ChartType, polar_type: PolarType) -> SeriesKind {
    match chart_type {
        ChartType::Area => SeriesKind::Area,
        ChartType::Bar => SeriesKind::Bar,
        ChartType::Column => SeriesKind::Column,
        ChartType::Polar => match polar_type {
            PolarType::Column => SeriesKind::Column,
            PolarType::Area => SeriesKind::Area,
            PolarType::Line => SeriesKind::Line,
        },
        _ => SeriesKind::Line,
    }
}

/// Whether the chart plots a single date dimension on a continuous time axis
pub fn is_continuous_datetime(
    data: &CartesianChartData,
    chart_type: ChartType,
    data_options: &CartesianDataOptions,
) -> bool {
    chart_type != ChartType::Polar
        && data.x_axis_count == 1
        && matches!(data_options.x.as_slice(), [dimension] if dimension.is_continuous_date())
}

/// Compile options for a line, area, bar, column or polar chart
pub fn get_cartesian_chart_options(
    data: &CartesianChartData,
    chart_type: ChartType,
    design: &CartesianDesignOptions,
    data_options: &CartesianDataOptions,
    ctx: &CompileContext<'_>,
) -> CompiledChartOptions {
    tracing::debug!(
        "Compiling {} chart: {} series, {} categories",
        chart_type,
        data.series.len(),
        data.x_values.len()
    );
    let theme = ctx.theme();
    let mut alerts = Alerts::new();

    let continuous = is_continuous_datetime(data, chart_type, data_options);

    let x_values = alerts.enforce(
        &data.x_values,
        design.data_limits.categories_capacity,
        CapacityTarget::Categories,
    );
    let category_axis = build_category_axis(
        x_values,
        data.x_axis_count,
        &data_options.x,
        ctx.date_formatter(),
        design.x2_axis.labels.unwrap_or(true),
    );

    let orientation = Orientation::for_chart_type(chart_type);
    let polar = chart_type == ChartType::Polar;
    let kind = cartesian_series_kind(chart_type, design.polar_type);
    // Only area, bar and column series stack
    let stack_type = match chart_type {
        ChartType::Area | ChartType::Bar | ChartType::Column => design.stack_type,
        _ => StackType::Classic,
    };
    let force_null_as_zero = chart_type == ChartType::Area && stack_type != StackType::Classic;

    let series = alerts.enforce(
        &data.series,
        design.data_limits.series_capacity,
        CapacityTarget::Series,
    );
    let has_right_axis = series.iter().any(|s| is_on_right_axis(s, &data_options.y));

    let mut x_axis = build_x_axis(design, data_options, &category_axis, continuous, polar, ctx);
    if design.auto_zoom.enabled && !polar {
        if let Some(window) = design.auto_zoom.scroller_location {
            x_axis.min = Some(window.min);
            x_axis.max = Some(window.max);
        }
    }

    let include_zero = matches!(chart_type, ChartType::Column | ChartType::Bar | ChartType::Area);
    let side_values = |right: bool| -> Vec<Vec<Option<f64>>> {
        series
            .iter()
            .filter(|s| is_on_right_axis(s, &data_options.y) == right)
            .map(|s| {
                let mut values = plotted_values(s, treats_null_as_zero(s, &data_options.y, force_null_as_zero));
                values.truncate(x_values.len());
                values
            })
            .collect()
    };

    let mut y_axes = vec![build_value_axis(
        design,
        AxisRole::Y,
        stack_type,
        include_zero,
        &side_values(false),
        ctx,
    )];
    if has_right_axis {
        y_axes.push(build_value_axis(
            design,
            AxisRole::Y2,
            stack_type,
            include_zero,
            &side_values(true),
            ctx,
        ));
    }

    if design.show_total && stack_type == StackType::Stacked {
        y_axes[0].stack_labels = Some(StackLabels {
            enabled: true,
            formatter: LabelFormatter::Value {
                number_format: first_measure_format(data_options),
            },
            style: Some(TextStyle {
                font_family: Some(theme.font_family.clone()),
                color: Some(theme.text_color.to_css()),
                font_weight: Some("bold".to_string()),
                ..Default::default()
            }),
        });
    }

    if polar {
        y_axes[0].title.enabled = false;
        y_axes[0].title.text = None;
        y_axes[0].grid_line_interpolation = Some("polygon".to_string());
    }

    let value_labels = design.value_label.map(|rotation| {
        get_value_label_settings(
            Some(rotation),
            orientation,
            LabelFormatter::Value {
                number_format: first_measure_format(data_options),
            },
            theme,
        )
    });

    let timestamps: Vec<Option<f64>> = if continuous {
        x_values.iter().map(category_timestamp).collect()
    } else {
        Vec::new()
    };
    let layout = if continuous {
        PointLayout::Continuous(&timestamps)
    } else if data_options.break_by.is_empty()
        && stack_type == StackType::Classic
        && !category_axis.has_groups()
    {
        PointLayout::OnlyY
    } else {
        PointLayout::Indexed
    };

    let build_ctx = SeriesBuildContext {
        axis: &category_axis,
        x_values,
        layout,
        measures: &data_options.y,
        color_map: &data_options.series_to_color_map,
        palette: ctx.palette(),
        force_null_as_zero,
        value_labels: value_labels.as_ref(),
    };
    let built_series = build_cartesian_series(series, &build_ctx);

    let mut plot_options = PlotOptions::default();
    plot_options.series.stacking = stacking_for(stack_type);
    plot_options.series.data_labels = Some(value_labels.clone().unwrap_or_default());
    // Line and area blocks also style per-series overrides in mixed charts
    let line_like = match kind {
        SeriesKind::Line | SeriesKind::Area => vec![kind],
        _ => vec![SeriesKind::Line, SeriesKind::Area],
    };
    for line_kind in line_like {
        let block = plot_options.for_kind_mut(line_kind);
        block.marker = Some(get_marker_settings(&design.marker));
        block.line_width = Some(get_line_width(design.line_width));
    }
    let plot_options = plot_options.merge(default_plot_options(chart_type, stack_type, theme));

    let has_x2_grouping = data.x_axis_count >= 2;
    let zoomable = design.auto_zoom.enabled && !polar;

    let options = ChartOptions {
        chart: ChartSettings {
            chart_type: kind,
            spacing: chart_spacing(
                stack_type == StackType::Stack100,
                has_x2_grouping,
                orientation,
            ),
            polar,
            align_ticks: has_right_axis,
            zoom_type: zoomable.then(|| "x".to_string()),
        },
        x_axis: vec![x_axis],
        y_axis: y_axes,
        legend: get_legend_settings(design.legend, theme),
        series: built_series,
        plot_options,
        tooltip: get_tooltip_settings(TooltipKind::Cartesian, &data_options.y),
        navigator: zoomable.then(|| default_navigator(kind)),
        scrollbar: zoomable.then(default_scrollbar),
        ..Default::default()
    };

    let alerts = alerts.into_vec();
    tracing::debug!(
        "Compiled {} chart: {} series, {} alerts",
        chart_type,
        options.series.len(),
        alerts.len()
    );
    CompiledChartOptions { options, alerts }
}

fn first_measure_format(data_options: &CartesianDataOptions) -> NumberFormatConfig {
    data_options
        .y
        .iter()
        .find(|m| m.enabled)
        .and_then(|m| m.number_format.clone())
        .unwrap_or_default()
}

fn build_x_axis(
    design: &CartesianDesignOptions,
    data_options: &CartesianDataOptions,
    category_axis: &CategoryAxis,
    continuous: bool,
    polar: bool,
    ctx: &CompileContext<'_>,
) -> AxisSettings {
    let mut axis = get_axis_settings(&design.x_axis, AxisRole::X, ctx.theme());
    if continuous {
        axis.axis_type = AxisType::Datetime;
        axis.labels.formatter = data_options
            .x
            .first()
            .and_then(|d| d.date_format())
            .map(|format| AxisLabelFormatter::DateTime {
                format: format.to_string(),
            });
    } else {
        axis.axis_type = AxisType::Category;
        axis.categories = Some(category_axis.categories.clone());
        axis.plot_bands = category_axis.plot_bands.clone();
    }
    if polar {
        axis.tickmark_placement = Some("on".to_string());
        axis.line_width = Some(0.0);
    }
    axis
}

fn build_value_axis(
    design: &CartesianDesignOptions,
    role: AxisRole,
    stack_type: StackType,
    include_zero: bool,
    values: &[Vec<Option<f64>>],
    ctx: &CompileContext<'_>,
) -> AxisSettings {
    let style = match role {
        AxisRole::Y2 => &design.y2_axis,
        _ => &design.y_axis,
    };
    let mut axis = get_axis_settings(style, role, ctx.theme());

    let range = match stack_type {
        StackType::Stack100 => AxisRange {
            min: Some(0.0),
            max: Some(100.0),
        },
        StackType::Stacked => {
            let totals = stack_totals(values.iter().map(Vec::as_slice));
            auto_range(
                totals.iter().flat_map(|t| [t.positive, t.negative]),
                RangeRequest {
                    include_zero: true,
                    logarithmic: style.logarithmic,
                    ..Default::default()
                },
            )
        }
        StackType::Classic => auto_range(
            values.iter().flatten().flatten().copied(),
            RangeRequest {
                include_zero,
                logarithmic: style.logarithmic,
                ..Default::default()
            },
        ),
    };
    apply_range(&mut axis, range);
    axis
}
