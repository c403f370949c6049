//! Chart options service
//!
//! Entry point of the compiler: routes intermediate chart data to its
//! family compiler and returns the compiled options with their alerts.

use crate::cartesian::get_cartesian_chart_options;
use crate::categorical::{get_categorical_chart_options, CategoricalDesign};
use crate::data_options::DataOptions;
use crate::design_options::DesignOptions;
use crate::error::{ChartOptionsError, ChartOptionsResult};
use crate::model::{ChartData, ChartType};
use crate::options::CompiledChartOptions;
use crate::scatter::get_scatter_chart_options;
use crate::theme::CompileContext;

/// Compile chart data into renderer options
///
/// The family compiler is selected by the data's tag. A chart type of
/// another family, or design and data options of another family, are
/// contract violations and fail the whole call.
pub fn highcharts_options_service(
    chart_data: &ChartData,
    chart_type: ChartType,
    design_options: &DesignOptions,
    data_options: &DataOptions,
    ctx: &CompileContext<'_>,
) -> ChartOptionsResult<CompiledChartOptions> {
    if chart_type.family() != chart_data.family() {
        return Err(ChartOptionsError::UnexpectedChartType(format!(
            "{} for {} data",
            chart_type,
            chart_data.family().name()
        )));
    }
    design_options.check_chart_type(chart_type)?;

    let compiled = match chart_data {
        ChartData::Cartesian(data) => {
            let DesignOptions::Cartesian(design) = design_options else {
                return Err(design_mismatch(chart_type, design_options));
            };
            get_cartesian_chart_options(data, chart_type, design, data_options.cartesian()?, ctx)
        }
        ChartData::Categorical(data) => {
            let design = match design_options {
                DesignOptions::Pie(pie) => CategoricalDesign::Pie(pie),
                DesignOptions::Funnel(funnel) => CategoricalDesign::Funnel(funnel),
                other => return Err(design_mismatch(chart_type, other)),
            };
            get_categorical_chart_options(data, design, data_options.categorical()?, ctx)
        }
        ChartData::Scatter(data) => {
            let DesignOptions::Scatter(design) = design_options else {
                return Err(design_mismatch(chart_type, design_options));
            };
            get_scatter_chart_options(data, design, data_options.scatter()?, ctx)
        }
    };
    Ok(compiled)
}

fn design_mismatch(chart_type: ChartType, design_options: &DesignOptions) -> ChartOptionsError {
    ChartOptionsError::DesignOptionsMismatch {
        chart_type: chart_type.to_string(),
        found: design_options.name(),
    }
}

/// Compile from JSON documents
///
/// Missing design options fall back to the chart type's defaults.
pub fn highcharts_options_from_json(
    chart_data: &str,
    chart_type: &str,
    design_options: Option<&str>,
    data_options: &str,
    ctx: &CompileContext<'_>,
) -> ChartOptionsResult<CompiledChartOptions> {
    let chart_type: ChartType = chart_type.parse()?;
    let chart_data = ChartData::from_json(chart_data)?;
    let design_options = match design_options {
        Some(json) => DesignOptions::from_json(json)?,
        None => DesignOptions::default_for(chart_type),
    };
    let data_options = DataOptions::from_json(data_options)?;
    highcharts_options_service(&chart_data, chart_type, &design_options, &data_options, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_options::{CartesianDataOptions, CategoricalDataOptions};
    use crate::model::{CartesianChartData, CategoricalChartData, CategoryValue, Series};

    fn cartesian_data() -> ChartData {
        ChartData::Cartesian(CartesianChartData {
            x_axis_count: 1,
            x_values: vec![CategoryValue::new("A")],
            series: vec![Series::new("Sales", vec![1.0])],
        })
    }

    #[test]
    fn test_dispatch_cartesian() {
        let result = highcharts_options_service(
            &cartesian_data(),
            ChartType::Column,
            &DesignOptions::default_for(ChartType::Column),
            &DataOptions::Cartesian(CartesianDataOptions::default()),
            &CompileContext::new(),
        )
        .unwrap();
        assert_eq!(result.options.series.len(), 1);
    }

    #[test]
    fn test_chart_type_of_other_family_fails() {
        let result = highcharts_options_service(
            &cartesian_data(),
            ChartType::Pie,
            &DesignOptions::default_for(ChartType::Pie),
            &DataOptions::Cartesian(CartesianDataOptions::default()),
            &CompileContext::new(),
        );
        assert!(matches!(result, Err(ChartOptionsError::UnexpectedChartType(_))));
    }

    #[test]
    fn test_design_options_mismatch() {
        let data = ChartData::Categorical(CategoricalChartData::default());
        let result = highcharts_options_service(
            &data,
            ChartType::Funnel,
            &DesignOptions::default_for(ChartType::Pie),
            &DataOptions::Categorical(CategoricalDataOptions::default()),
            &CompileContext::new(),
        );
        assert!(matches!(result, Err(ChartOptionsError::DesignOptionsMismatch { .. })));
    }

    #[test]
    fn test_data_options_mismatch() {
        let result = highcharts_options_service(
            &cartesian_data(),
            ChartType::Line,
            &DesignOptions::default_for(ChartType::Line),
            &DataOptions::Categorical(CategoricalDataOptions::default()),
            &CompileContext::new(),
        );
        assert!(matches!(result, Err(ChartOptionsError::DataOptionsMismatch { .. })));
    }

    #[test]
    fn test_unknown_chart_type_string() {
        let result = highcharts_options_from_json("{}", "gauge", None, "{}", &CompileContext::new());
        assert!(matches!(result, Err(ChartOptionsError::UnexpectedChartType(t)) if t == "gauge"));
    }
}
