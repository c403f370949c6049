//! Cartesian series builder
//!
//! Turns chart data series into renderer series. Three point layouts are
//! produced: `[timestamp, y]` pairs on a continuous date axis, bare `y`
//! values when series map one-to-one onto categories, and `[index, y]`
//! pairs on a remapped category axis where separator slots hold nulls.

use crate::categories::CategoryAxis;
use crate::color::{Color, Palette, BLUR_OPACITY};
use crate::data_options::{MeasureOption, SeriesColorMap};
use crate::formatter::LabelFormatter;
use crate::model::{CategoryValue, Series, SeriesValue};
use crate::options::{DataLabelsSettings, PointCustom, SeriesOptions, SeriesPoint};

/// Point layout of cartesian series
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointLayout<'a> {
    /// `[timestamp, y]` on a continuous date axis; one timestamp per category
    Continuous(&'a [Option<f64>]),
    /// Bare values aligned with the categories
    OnlyY,
    /// `[position, y]` on the remapped category axis
    Indexed,
}

/// Everything the cartesian series builder needs besides the series
#[derive(Debug, Clone, Copy)]
pub struct SeriesBuildContext<'a> {
    pub axis: &'a CategoryAxis,
    pub x_values: &'a [CategoryValue],
    pub layout: PointLayout<'a>,
    pub measures: &'a [MeasureOption],
    pub color_map: &'a SeriesColorMap,
    pub palette: &'a Palette,
    /// Plot every null as zero (stacked area charts)
    pub force_null_as_zero: bool,
    /// Value label template; its formatter is replaced per series
    pub value_labels: Option<&'a DataLabelsSettings>,
}

/// Series color: explicit mapping, then measure color, then palette by index
pub fn resolve_series_color(
    name: &str,
    measure_color: Option<Color>,
    index: usize,
    color_map: &SeriesColorMap,
    palette: &Palette,
) -> Color {
    color_map
        .get(name)
        .copied()
        .or(measure_color)
        .unwrap_or_else(|| palette.color_at(index))
}

/// Measure driving a series: the measure of the same name, else the first enabled one
pub fn measure_for<'a>(measures: &'a [MeasureOption], series_name: &str) -> Option<&'a MeasureOption> {
    measures
        .iter()
        .find(|m| m.name == series_name)
        .or_else(|| measures.iter().find(|m| m.enabled))
}

/// Whether a series is drawn against the secondary value axis
pub fn is_on_right_axis(series: &Series, measures: &[MeasureOption]) -> bool {
    series.show_on_right_axis
        || measures
            .iter()
            .any(|m| m.name == series.name && m.show_on_right_axis)
}

/// Whether nulls of a series are plotted as zero
pub fn treats_null_as_zero(series: &Series, measures: &[MeasureOption], forced: bool) -> bool {
    forced
        || series.treat_null_as_zero
        || measures
            .iter()
            .any(|m| m.name == series.name && m.treat_null_as_zero)
}

/// Values of a series as plotted, nulls coerced when requested
pub fn plotted_values(series: &Series, null_as_zero: bool) -> Vec<Option<f64>> {
    series
        .data
        .iter()
        .map(|v| v.value.or(if null_as_zero { Some(0.0) } else { None }))
        .collect()
}

/// Build renderer series for a cartesian chart
pub fn build_cartesian_series(series: &[Series], ctx: &SeriesBuildContext<'_>) -> Vec<SeriesOptions> {
    series
        .iter()
        .enumerate()
        .map(|(index, s)| build_one(index, s, ctx))
        .collect()
}

fn build_one(index: usize, series: &Series, ctx: &SeriesBuildContext<'_>) -> SeriesOptions {
    let own_measure = ctx.measures.iter().find(|m| m.name == series.name);
    let color = resolve_series_color(
        &series.name,
        own_measure.and_then(|m| m.color),
        index,
        ctx.color_map,
        ctx.palette,
    );
    let null_as_zero = treats_null_as_zero(series, ctx.measures, ctx.force_null_as_zero);
    let on_right = is_on_right_axis(series, ctx.measures);

    let point = |value: &SeriesValue, position: usize| -> SeriesPoint {
        SeriesPoint {
            y: value.value.or(if null_as_zero { Some(0.0) } else { None }),
            color: value.blur.then(|| color.with_opacity(BLUR_OPACITY)),
            custom: Some(PointCustom {
                raw_value: value.raw_value.clone(),
                x_display_value: ctx.axis.categories.get(position).cloned(),
                ..Default::default()
            }),
            ..Default::default()
        }
    };

    let category_count = ctx.x_values.len().min(ctx.axis.positions.len());
    let values = series.data.iter().take(category_count);

    let data = match ctx.layout {
        PointLayout::Continuous(timestamps) => values
            .enumerate()
            .filter_map(|(i, value)| {
                let x = timestamps.get(i).copied().flatten()?;
                Some(SeriesPoint {
                    x: Some(x),
                    ..point(value, ctx.axis.positions[i])
                })
            })
            .collect(),
        PointLayout::OnlyY => values
            .enumerate()
            .map(|(i, value)| point(value, ctx.axis.positions[i]))
            .collect(),
        PointLayout::Indexed => {
            let mut data: Vec<SeriesPoint> = (0..ctx.axis.len())
                .map(|position| SeriesPoint::xy(position as f64, None))
                .collect();
            for (i, value) in values.enumerate() {
                let position = ctx.axis.positions[i];
                if let Some(slot) = data.get_mut(position) {
                    *slot = SeriesPoint {
                        x: Some(position as f64),
                        ..point(value, position)
                    };
                }
            }
            data
        }
    };

    let data_labels = ctx.value_labels.map(|template| DataLabelsSettings {
        formatter: Some(LabelFormatter::Value {
            number_format: measure_for(ctx.measures, &series.name)
                .and_then(|m| m.number_format.clone())
                .unwrap_or_default(),
        }),
        ..template.clone()
    });

    SeriesOptions {
        name: series.display_name().to_string(),
        series_type: series
            .series_type
            .or_else(|| own_measure.and_then(|m| m.series_type)),
        data,
        color: Some(color),
        y_axis: Some(usize::from(on_right)),
        data_labels,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeriesKind;

    fn axis(n: usize) -> CategoryAxis {
        CategoryAxis {
            categories: (0..n).map(|i| format!("C{i}")).collect(),
            positions: (0..n).collect(),
            plot_bands: Vec::new(),
        }
    }

    fn categories(n: usize) -> Vec<CategoryValue> {
        (0..n).map(|i| CategoryValue::new(format!("C{i}"))).collect()
    }

    fn context<'a>(
        axis: &'a CategoryAxis,
        x_values: &'a [CategoryValue],
        measures: &'a [MeasureOption],
        color_map: &'a SeriesColorMap,
        palette: &'a Palette,
    ) -> SeriesBuildContext<'a> {
        SeriesBuildContext {
            axis,
            x_values,
            layout: PointLayout::OnlyY,
            measures,
            color_map,
            palette,
            force_null_as_zero: false,
            value_labels: None,
        }
    }

    #[test]
    fn test_color_resolution_order() {
        let palette = Palette::default();
        let mut map = SeriesColorMap::new();
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        map.insert("A".into(), red);

        assert_eq!(resolve_series_color("A", Some(blue), 0, &map, &palette), red);
        assert_eq!(resolve_series_color("B", Some(blue), 0, &map, &palette), blue);
        assert_eq!(resolve_series_color("C", None, 2, &map, &palette), palette.color_at(2));
    }

    #[test]
    fn test_only_y_points() {
        let (axis, x_values) = (axis(3), categories(3));
        let (measures, map, palette) = (Vec::<MeasureOption>::new(), SeriesColorMap::new(), Palette::default());
        let ctx = context(&axis, &x_values, &measures, &map, &palette);
        let series = vec![Series::from_optional("Sales", vec![Some(1.0), None, Some(3.0)])];

        let built = build_cartesian_series(&series, &ctx);
        let ys: Vec<Option<f64>> = built[0].data.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![Some(1.0), None, Some(3.0)]);
        assert!(built[0].data.iter().all(|p| p.x.is_none()));
        assert_eq!(built[0].y_axis, Some(0));
    }

    #[test]
    fn test_indexed_points_fill_separators() {
        let axis = CategoryAxis {
            categories: vec!["a".into(), "".into(), "b".into()],
            positions: vec![0, 2],
            plot_bands: Vec::new(),
        };
        let x_values = categories(2);
        let (measures, map, palette) = (Vec::<MeasureOption>::new(), SeriesColorMap::new(), Palette::default());
        let mut ctx = context(&axis, &x_values, &measures, &map, &palette);
        ctx.layout = PointLayout::Indexed;

        let built = build_cartesian_series(&[Series::new("S", vec![1.0, 2.0])], &ctx);
        let points: Vec<(Option<f64>, Option<f64>)> =
            built[0].data.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(points, vec![(Some(0.0), Some(1.0)), (Some(1.0), None), (Some(2.0), Some(2.0))]);
    }

    #[test]
    fn test_continuous_points_use_timestamps() {
        let (axis, x_values) = (axis(2), categories(2));
        let (measures, map, palette) = (Vec::<MeasureOption>::new(), SeriesColorMap::new(), Palette::default());
        let timestamps = [Some(1000.0), None];
        let mut ctx = context(&axis, &x_values, &measures, &map, &palette);
        ctx.layout = PointLayout::Continuous(&timestamps);

        let built = build_cartesian_series(&[Series::new("S", vec![5.0, 6.0])], &ctx);
        assert_eq!(built[0].data.len(), 1);
        assert_eq!(built[0].data[0].x, Some(1000.0));
    }

    #[test]
    fn test_measure_overrides() {
        let (axis, x_values) = (axis(1), categories(1));
        let measures = vec![MeasureOption {
            name: "Margin".into(),
            show_on_right_axis: true,
            treat_null_as_zero: true,
            series_type: Some(SeriesKind::Line),
            color: Some(Color::rgb(1, 2, 3)),
            ..Default::default()
        }];
        let (map, palette) = (SeriesColorMap::new(), Palette::default());
        let ctx = context(&axis, &x_values, &measures, &map, &palette);

        let built = build_cartesian_series(&[Series::from_optional("Margin", vec![None])], &ctx);
        assert_eq!(built[0].y_axis, Some(1));
        assert_eq!(built[0].series_type, Some(SeriesKind::Line));
        assert_eq!(built[0].color, Some(Color::rgb(1, 2, 3)));
        assert_eq!(built[0].data[0].y, Some(0.0));
    }

    #[test]
    fn test_blurred_points_fade() {
        let (axis, x_values) = (axis(1), categories(1));
        let (measures, map, palette) = (Vec::<MeasureOption>::new(), SeriesColorMap::new(), Palette::default());
        let ctx = context(&axis, &x_values, &measures, &map, &palette);
        let mut series = Series::new("S", vec![1.0]);
        series.data[0].blur = true;

        let built = build_cartesian_series(&[series], &ctx);
        let faded = palette.color_at(0).with_opacity(BLUR_OPACITY);
        assert_eq!(built[0].data[0].color, Some(faded));
    }
}
