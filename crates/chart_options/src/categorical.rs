//! Categorical family compiler
//!
//! Compiles pie and funnel charts. Both share series construction; pie
//! charts may fold small slices into an "Other" slice and funnel charts
//! annotate every stage with its percent of the first stage.

use crate::alerts::{Alerts, CapacityTarget};
use crate::data_options::CategoricalDataOptions;
use crate::defaults::default_plot_options;
use crate::design_options::{DataLimits, FunnelDesignOptions, LegendPosition, PieDesignOptions, SliceLabels};
use crate::formatter::LabelFormatter;
use crate::funnel::{apply_baseline_percent, get_funnel_plot_options};
use crate::legend::get_legend_settings;
use crate::model::{CategoricalChartData, ChartType, SeriesKind};
use crate::number_format::NumberFormatConfig;
use crate::options::{
    ChartOptions, ChartSettings, CompiledChartOptions, DataLabelsSettings, Merge, PlotOptions,
    SeriesPlotOptions, TextStyle,
};
use crate::pie_series::{build_categorical_series, convolve, CategoricalBuildContext};
use crate::series::measure_for;
use crate::theme::{CompileContext, ThemeSettings};
use crate::tooltip::{get_tooltip_settings, TooltipKind};

/// Design options of a categorical chart
#[derive(Debug, Clone, Copy)]
pub enum CategoricalDesign<'a> {
    Pie(&'a PieDesignOptions),
    Funnel(&'a FunnelDesignOptions),
}

impl CategoricalDesign<'_> {
    fn kind(&self) -> SeriesKind {
        match self {
            CategoricalDesign::Pie(_) => SeriesKind::Pie,
            CategoricalDesign::Funnel(_) => SeriesKind::Funnel,
        }
    }

    fn chart_type(&self) -> ChartType {
        match self {
            CategoricalDesign::Pie(_) => ChartType::Pie,
            CategoricalDesign::Funnel(_) => ChartType::Funnel,
        }
    }

    fn legend(&self) -> Option<LegendPosition> {
        match self {
            CategoricalDesign::Pie(d) => d.legend,
            CategoricalDesign::Funnel(d) => d.legend,
        }
    }

    fn labels(&self) -> &SliceLabels {
        match self {
            CategoricalDesign::Pie(d) => &d.pie_labels,
            CategoricalDesign::Funnel(d) => &d.funnel_labels,
        }
    }

    fn data_limits(&self) -> DataLimits {
        match self {
            CategoricalDesign::Pie(d) => d.data_limits,
            CategoricalDesign::Funnel(d) => d.data_limits,
        }
    }
}

/// Slice label settings composed from the label switches
pub fn get_slice_label_settings(
    labels: &SliceLabels,
    number_format: NumberFormatConfig,
    theme: &ThemeSettings,
) -> DataLabelsSettings {
    DataLabelsSettings {
        enabled: labels.enabled,
        formatter: labels.enabled.then(|| LabelFormatter::Composite {
            show_category: labels.show_categories,
            show_value: labels.show_value,
            show_percent: labels.show_percent,
            show_decimals: labels.show_decimals,
            number_format,
        }),
        style: Some(TextStyle {
            font_family: Some(theme.font_family.clone()),
            color: Some(theme.text_color.to_css()),
            font_size: Some("13px".to_string()),
            font_weight: Some("normal".to_string()),
            text_outline: Some("none".to_string()),
        }),
        ..Default::default()
    }
}

/// Compile options for a pie or funnel chart
pub fn get_categorical_chart_options(
    data: &CategoricalChartData,
    design: CategoricalDesign<'_>,
    data_options: &CategoricalDataOptions,
    ctx: &CompileContext<'_>,
) -> CompiledChartOptions {
    let chart_type = design.chart_type();
    tracing::debug!(
        "Compiling {} chart: {} series, {} groups",
        chart_type,
        data.series.len(),
        data.x_values.len()
    );
    let theme = ctx.theme();
    let kind = design.kind();
    let limits = design.data_limits();
    let mut alerts = Alerts::new();

    let series = alerts.enforce(&data.series, limits.series_capacity, CapacityTarget::Series);
    let x_values = if data.x_axis_count > 0 {
        alerts.enforce(&data.x_values, limits.categories_capacity, CapacityTarget::Categories)
    } else {
        &data.x_values[..]
    };

    let build_ctx = CategoricalBuildContext {
        kind,
        x_axis_count: data.x_axis_count,
        x_values,
        break_by: &data_options.break_by,
        measures: &data_options.y,
        color_map: &data_options.series_to_color_map,
        palette: ctx.palette(),
        date_formatter: ctx.date_formatter(),
    };
    let mut built_series = build_categorical_series(series, &build_ctx);

    let default_format = data_options
        .y
        .iter()
        .find(|m| m.enabled)
        .and_then(|m| m.number_format.clone())
        .unwrap_or_default();
    let labels = design.labels();

    for s in &mut built_series {
        match design {
            CategoricalDesign::Pie(_) => {
                s.data = convolve(std::mem::take(&mut s.data), &data_options.convolution);
            }
            CategoricalDesign::Funnel(_) => apply_baseline_percent(s),
        }
        if data.x_axis_count > 0 && labels.enabled {
            let number_format = measure_for(&data_options.y, &s.name)
                .and_then(|m| m.number_format.clone())
                .unwrap_or_else(|| default_format.clone());
            s.data_labels = Some(get_slice_label_settings(labels, number_format, theme));
        }
    }

    let mut block = match design {
        CategoricalDesign::Pie(pie) => SeriesPlotOptions {
            inner_size: Some(pie.pie_type.inner_size().to_string()),
            ..Default::default()
        },
        CategoricalDesign::Funnel(funnel) => get_funnel_plot_options(funnel, ctx.container_size),
    };
    block.data_labels = Some(get_slice_label_settings(labels, default_format, theme));

    let mut plot_options = PlotOptions::default();
    *plot_options.for_kind_mut(kind) = block;
    let plot_options = plot_options.merge(default_plot_options(chart_type, Default::default(), theme));

    let options = ChartOptions {
        chart: ChartSettings {
            chart_type: kind,
            ..Default::default()
        },
        legend: get_legend_settings(design.legend(), theme),
        series: built_series,
        plot_options,
        tooltip: get_tooltip_settings(TooltipKind::Categorical, &data_options.y),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, OTHER_SLICE_COLOR};
    use crate::data_options::{ConvolutionMode, ConvolutionOptions, MeasureOption};
    use crate::design_options::{FunnelSize, PieType};
    use crate::model::{CategoryValue, Series};
    use crate::pie_series::OTHER_SLICE_NAME;
    use crate::theme::ContainerSize;

    fn measure_data(values: &[(&str, f64)]) -> CategoricalChartData {
        CategoricalChartData {
            x_axis_count: 0,
            x_values: vec![CategoryValue::default()],
            series: values.iter().map(|(n, v)| Series::new(*n, vec![*v])).collect(),
        }
    }

    fn grouped_data(groups: &[&str], values: Vec<f64>) -> CategoricalChartData {
        CategoricalChartData {
            x_axis_count: 1,
            x_values: groups.iter().map(|g| CategoryValue::new(*g)).collect(),
            series: vec![Series::new("Value", values)],
        }
    }

    #[test]
    fn test_pie_measure_slices_with_colors() {
        let data = measure_data(&[("y1", 303.3), ("y2", 202.2)]);
        let mut data_options = CategoricalDataOptions::default();
        data_options
            .series_to_color_map
            .insert("y1".into(), Color::rgb(0xa1, 0xa1, 0xa1));
        data_options
            .series_to_color_map
            .insert("y2".into(), Color::rgb(0xb2, 0xb2, 0xb2));
        let design = PieDesignOptions::default();

        let result = get_categorical_chart_options(
            &data,
            CategoricalDesign::Pie(&design),
            &data_options,
            &CompileContext::new(),
        );

        assert!(result.alerts.is_empty());
        let series = &result.options.series;
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].data.len(), 2);
        assert_eq!(series[0].data[0].y, Some(303.3));
        assert_eq!(series[0].data[1].color, Some(Color::rgb(0xb2, 0xb2, 0xb2)));
        assert_eq!(result.options.chart.chart_type, SeriesKind::Pie);
    }

    #[test]
    fn test_pie_inner_size_and_labels() {
        let data = measure_data(&[("y1", 1.0)]);
        let design = PieDesignOptions {
            pie_type: PieType::Donut,
            ..Default::default()
        };
        let result = get_categorical_chart_options(
            &data,
            CategoricalDesign::Pie(&design),
            &CategoricalDataOptions::default(),
            &CompileContext::new(),
        );

        let pie = result.options.plot_options.pie.unwrap();
        assert_eq!(pie.inner_size.as_deref(), Some("40%"));
        assert!(matches!(
            pie.data_labels.and_then(|l| l.formatter),
            Some(LabelFormatter::Composite { show_category: true, .. })
        ));
        assert_eq!(pie.border_width, Some(0.0));
    }

    #[test]
    fn test_pie_convolution() {
        let data = grouped_data(&["A", "B", "C"], vec![303.3, 202.2, 101.1]);
        let data_options = CategoricalDataOptions {
            convolution: ConvolutionOptions {
                enabled: true,
                mode: ConvolutionMode::ByPercentage,
                minimal_independent_slice_percentage: 20.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let design = PieDesignOptions::default();
        let result = get_categorical_chart_options(
            &data,
            CategoricalDesign::Pie(&design),
            &data_options,
            &CompileContext::new(),
        );

        let points = &result.options.series[0].data;
        assert_eq!(points.len(), 3);
        assert_eq!(points[2].name.as_deref(), Some(OTHER_SLICE_NAME));
        assert_eq!(points[2].color, Some(OTHER_SLICE_COLOR));
    }

    #[test]
    fn test_funnel_percent_and_geometry() {
        let data = grouped_data(&["Stage 1", "Stage 2"], vec![303.3, 202.2]);
        let design = FunnelDesignOptions {
            funnel_size: FunnelSize::Narrow,
            ..Default::default()
        };
        let ctx = CompileContext::new().with_container_size(ContainerSize::new(1000.0, 400.0));
        let result = get_categorical_chart_options(
            &data,
            CategoricalDesign::Funnel(&design),
            &CategoricalDataOptions::default(),
            &ctx,
        );

        let series = &result.options.series[0];
        let percent = |i: usize| series.data[i].custom.as_ref().and_then(|c| c.percent);
        assert_eq!(percent(0), Some(100.0));
        assert!((percent(1).unwrap() - 66.667).abs() < 0.001);

        let funnel = result.options.plot_options.funnel.unwrap();
        assert_eq!(funnel.width.as_deref(), Some("60%"));
        assert_eq!(funnel.neck_width.as_deref(), Some("9%"));
        assert_eq!(funnel.reversed, Some(false));
    }

    #[test]
    fn test_categorical_capacity() {
        let data = grouped_data(&["A", "B", "C"], vec![1.0, 2.0, 3.0]);
        let design = PieDesignOptions {
            data_limits: DataLimits {
                series_capacity: 50,
                categories_capacity: 2,
            },
            ..Default::default()
        };
        let result = get_categorical_chart_options(
            &data,
            CategoricalDesign::Pie(&design),
            &CategoricalDataOptions::default(),
            &CompileContext::new(),
        );

        assert_eq!(result.alerts.len(), 1);
        assert_eq!(result.options.series[0].data.len(), 2);
    }

    #[test]
    fn test_group_series_labels_use_measure_format() {
        let data = grouped_data(&["A"], vec![0.5]);
        let data_options = CategoricalDataOptions {
            y: vec![MeasureOption::new("Value").with_number_format(NumberFormatConfig::percent())],
            ..Default::default()
        };
        let design = FunnelDesignOptions::default();
        let result = get_categorical_chart_options(
            &data,
            CategoricalDesign::Funnel(&design),
            &data_options,
            &CompileContext::new(),
        );

        let labels = result.options.series[0].data_labels.clone().unwrap();
        assert!(matches!(
            labels.formatter,
            Some(LabelFormatter::Composite { number_format, .. }) if number_format == NumberFormatConfig::percent()
        ));
    }
}
