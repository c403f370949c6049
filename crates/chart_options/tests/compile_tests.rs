//! Integration tests for the chart options compiler
//! Drives the public service with JSON and typed inputs
//!
//! These tests cover complete compilations: routing, truncation alerts,
//! "Other" slice folding, funnel percents and the serialized option tree.

use chart_options::{
    highcharts_options_from_json, highcharts_options_service, CartesianChartData, CartesianDataOptions,
    CartesianDesignOptions, CategoricalChartData, CategoricalDataOptions, CategoryValue, ChartData,
    ChartOptionsError, ChartType, Color, CompileContext, ConvolutionMode, ConvolutionOptions, DataLimits,
    DataOptions, DesignOptions, FunnelDesignOptions, FunnelSize, MeasureOption, Series, SeriesKind,
    ThemeSettings, OTHER_SLICE_COLOR, OTHER_SLICE_NAME,
};
use serde_json::Value;

const PIE_DATA: &str = r#"{
    "type": "categorical",
    "x_axis_count": 0,
    "x_values": [],
    "series": [
        { "name": "y1", "data": [{ "value": 303.3 }] },
        { "name": "y2", "data": [{ "value": 202.2 }] }
    ]
}"#;

const PIE_DATA_OPTIONS: &str = r##"{
    "family": "categorical",
    "y": [
        { "name": "y1", "color": "#a1a1a1" },
        { "name": "y2", "color": "#b2b2b2" }
    ]
}"##;

fn compile_json(data: &str, chart_type: &str, data_options: &str) -> Value {
    let compiled = highcharts_options_from_json(data, chart_type, None, data_options, &CompileContext::new())
        .expect("compilation succeeds");
    serde_json::to_value(&compiled).expect("options serialize")
}

#[test]
fn test_pie_end_to_end() {
    let compiled = compile_json(PIE_DATA, "pie", PIE_DATA_OPTIONS);

    assert_eq!(compiled["alerts"], Value::Array(vec![]));
    let options = &compiled["options"];
    assert_eq!(options["chart"]["type"], "pie");

    let series = options["series"].as_array().unwrap();
    assert_eq!(series.len(), 1);
    let points = series[0]["data"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["y"], 303.3);
    assert_eq!(points[0]["name"], "y1");
    assert_eq!(points[0]["color"], "#a1a1a1");
    assert_eq!(points[1]["y"], 202.2);
    assert_eq!(points[1]["color"], "#b2b2b2");

    assert_eq!(options["plotOptions"]["pie"]["innerSize"], "0%");
    assert_eq!(options["plotOptions"]["pie"]["showInLegend"], true);
}

#[test]
fn test_unknown_data_tag_is_fatal() {
    let data = PIE_DATA.replace("\"categorical\"", "\"gauge\"");
    let result = highcharts_options_from_json(&data, "pie", None, PIE_DATA_OPTIONS, &CompileContext::new());
    assert!(matches!(result, Err(ChartOptionsError::UnexpectedChartType(tag)) if tag == "gauge"));
}

#[test]
fn test_chart_type_must_match_data_family() {
    let result = highcharts_options_from_json(PIE_DATA, "line", None, PIE_DATA_OPTIONS, &CompileContext::new());
    assert!(matches!(result, Err(ChartOptionsError::UnexpectedChartType(_))));
}

#[test]
fn test_column_chart_serializes_camel_case() {
    let data = r#"{
        "type": "cartesian",
        "x_axis_count": 1,
        "x_values": [{ "key": "Q1" }, { "key": "Q2" }],
        "series": [{ "name": "Revenue", "data": [{ "value": 10 }, { "value": 20 }] }]
    }"#;
    let compiled = compile_json(data, "column", r#"{ "family": "cartesian" }"#);
    let options = &compiled["options"];

    assert_eq!(options["xAxis"][0]["categories"], serde_json::json!(["Q1", "Q2"]));
    assert_eq!(options["yAxis"][0]["min"], 0.0);
    assert_eq!(options["plotOptions"]["column"]["pointPadding"], 0.1);
    assert_eq!(options["series"][0]["data"][1]["y"], 20.0);
    assert!(options.get("navigator").is_none());
}

#[test]
fn test_cartesian_capacity_alerts() {
    let categories: Vec<CategoryValue> = (0..6).map(|i| CategoryValue::new(format!("c{i}"))).collect();
    let series: Vec<Series> = (0..4)
        .map(|i| Series::new(format!("s{i}"), vec![1.0; 6]))
        .collect();
    let data = ChartData::Cartesian(CartesianChartData {
        x_axis_count: 1,
        x_values: categories,
        series,
    });
    let design = DesignOptions::Cartesian(CartesianDesignOptions {
        data_limits: DataLimits {
            series_capacity: 3,
            categories_capacity: 5,
        },
        ..Default::default()
    });

    let compiled = highcharts_options_service(
        &data,
        ChartType::Line,
        &design,
        &DataOptions::Cartesian(CartesianDataOptions::default()),
        &CompileContext::new(),
    )
    .unwrap();

    assert_eq!(compiled.alerts.len(), 2);
    assert_eq!(compiled.options.series.len(), 3);
    assert!(compiled.options.series.iter().all(|s| s.data.len() == 5));
    assert_eq!(
        compiled.options.x_axis[0].categories.as_ref().map(Vec::len),
        Some(5)
    );
}

#[test]
fn test_pie_other_slice() {
    let data = ChartData::Categorical(CategoricalChartData {
        x_axis_count: 1,
        x_values: ["A", "B", "C"].into_iter().map(CategoryValue::new).collect(),
        series: vec![Series::new("Sales", vec![303.3, 202.2, 101.1])],
    });
    let data_options = DataOptions::Categorical(CategoricalDataOptions {
        convolution: ConvolutionOptions {
            enabled: true,
            mode: ConvolutionMode::ByPercentage,
            minimal_independent_slice_percentage: 20.0,
            ..Default::default()
        },
        ..Default::default()
    });

    let compiled = highcharts_options_service(
        &data,
        ChartType::Pie,
        &DesignOptions::default_for(ChartType::Pie),
        &data_options,
        &CompileContext::new(),
    )
    .unwrap();

    let points = &compiled.options.series[0].data;
    let names: Vec<&str> = points.iter().filter_map(|p| p.name.as_deref()).collect();
    assert_eq!(names, vec!["A", "B", OTHER_SLICE_NAME]);
    assert_eq!(points[2].y, Some(101.1));
    assert_eq!(points[2].color, Some(OTHER_SLICE_COLOR));
}

#[test]
fn test_funnel_end_to_end() {
    let data = ChartData::Categorical(CategoricalChartData {
        x_axis_count: 1,
        x_values: ["Visits", "Signups"].into_iter().map(CategoryValue::new).collect(),
        series: vec![Series::new("Users", vec![303.3, 202.2])],
    });
    let design = DesignOptions::Funnel(FunnelDesignOptions {
        funnel_size: FunnelSize::Regular,
        ..Default::default()
    });
    let data_options = DataOptions::Categorical(CategoricalDataOptions {
        y: vec![MeasureOption::new("Users")],
        ..Default::default()
    });

    let compiled = highcharts_options_service(
        &data,
        ChartType::Funnel,
        &design,
        &data_options,
        &CompileContext::new(),
    )
    .unwrap();

    assert!(compiled.alerts.is_empty());
    assert_eq!(compiled.options.chart.chart_type, SeriesKind::Funnel);
    let percents: Vec<f64> = compiled.options.series[0]
        .data
        .iter()
        .filter_map(|p| p.custom.as_ref().and_then(|c| c.percent))
        .collect();
    assert_eq!(percents[0], 100.0);
    assert!((percents[1] - 66.667).abs() < 0.001);

    let funnel = compiled.options.plot_options.funnel.unwrap();
    assert_eq!(funnel.width.as_deref(), Some("66.6%"));
    assert_eq!(funnel.neck_width.as_deref(), Some("20%"));
}

#[test]
fn test_theme_palette_colors_series() {
    let theme = ThemeSettings::from_json_or_default(r##"{ "palette": ["#123456", "#654321"] }"##);
    let data = ChartData::Cartesian(CartesianChartData {
        x_axis_count: 1,
        x_values: vec![CategoryValue::new("A")],
        series: vec![Series::new("a", vec![1.0]), Series::new("b", vec![2.0])],
    });

    let compiled = highcharts_options_service(
        &data,
        ChartType::Bar,
        &DesignOptions::default_for(ChartType::Bar),
        &DataOptions::Cartesian(CartesianDataOptions::default()),
        &CompileContext::new().with_theme(&theme),
    )
    .unwrap();

    assert_eq!(compiled.options.series[1].color, Some(Color::rgb(0x65, 0x43, 0x21)));
}

#[test]
fn test_invalid_theme_falls_back_to_default() {
    let theme = ThemeSettings::from_json_or_default("not json");
    assert_eq!(theme, ThemeSettings::default());
}

#[test]
fn test_measure_color_applies_without_color_map() {
    let data = ChartData::Cartesian(CartesianChartData {
        x_axis_count: 1,
        x_values: vec![CategoryValue::new("A")],
        series: vec![Series::new("Profit", vec![3.0])],
    });
    let data_options = DataOptions::Cartesian(CartesianDataOptions {
        y: vec![MeasureOption::new("Profit").with_color(Color::rgb(0x11, 0x22, 0x33))],
        ..Default::default()
    });

    let compiled = highcharts_options_service(
        &data,
        ChartType::Area,
        &DesignOptions::default_for(ChartType::Area),
        &data_options,
        &CompileContext::new(),
    )
    .unwrap();

    assert_eq!(compiled.options.series[0].color, Some(Color::rgb(0x11, 0x22, 0x33)));
}
