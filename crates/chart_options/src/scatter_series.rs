//! Scatter and bubble series builder
//!
//! Each table row becomes one point carrying masked display strings for
//! every bound field. Rows are split into series by a break-by-color
//! dimension; a break-by-color measure instead colors points along a
//! gradient.

use crate::color::{Color, Palette};
use crate::data_options::{FieldOption, ScatterDataOptions};
use crate::date_format::date_millis;
use crate::model::{DataCell, ScatterDataRow, SeriesKind};
use crate::options::{PointCustom, SeriesOptions, SeriesPoint};
use crate::series::resolve_series_color;

/// Inputs of the scatter series builder
#[derive(Debug, Clone, Copy)]
pub struct ScatterBuildContext<'a> {
    pub kind: SeriesKind,
    pub data_options: &'a ScatterDataOptions,
    /// Kept vocabulary of a categorical x axis
    pub x_categories: Option<&'a [String]>,
    /// Kept vocabulary of a categorical y axis
    pub y_categories: Option<&'a [String]>,
    pub palette: &'a Palette,
    /// Anchors of the break-by-color measure gradient
    pub gradient: (Color, Color),
}

/// Position of a cell on its axis: category index or numeric value
fn axis_position(cell: &DataCell, categories: Option<&[String]>) -> Option<f64> {
    match categories {
        Some(categories) => categories
            .iter()
            .position(|c| *c == cell.display_value)
            .map(|i| i as f64),
        None => cell.raw_value.as_number().or_else(|| date_millis(&cell.raw_value)),
    }
}

fn build_point(row: &ScatterDataRow, ctx: &ScatterBuildContext<'_>) -> Option<SeriesPoint> {
    let x = axis_position(&row.x_axis, ctx.x_categories)?;
    let y = axis_position(&row.y_axis, ctx.y_categories)?;
    let z = if ctx.data_options.size.is_some() {
        row.size.as_ref().and_then(|s| s.raw_value.as_number())
    } else {
        None
    };

    Some(SeriesPoint {
        x: Some(x),
        y: Some(y),
        z,
        name: row.break_by_point.as_ref().map(|c| c.display_value.clone()),
        custom: Some(PointCustom {
            masked_x_value: Some(row.x_axis.display_value.clone()),
            masked_y_value: Some(row.y_axis.display_value.clone()),
            masked_size: row.size.as_ref().map(|c| c.display_value.clone()),
            masked_break_by_point: row.break_by_point.as_ref().map(|c| c.display_value.clone()),
            masked_break_by_color: row.break_by_color.as_ref().map(|c| c.display_value.clone()),
            ..Default::default()
        }),
        ..Default::default()
    })
}

/// Build scatter or bubble series from the table rows
pub fn build_scatter_series(rows: &[ScatterDataRow], ctx: &ScatterBuildContext<'_>) -> Vec<SeriesOptions> {
    match &ctx.data_options.break_by_color {
        Some(FieldOption::Dimension(_)) => build_color_groups(rows, ctx),
        Some(FieldOption::Measure(_)) => vec![build_gradient_series(rows, ctx)],
        None => vec![build_single_series(rows, ctx)],
    }
}

fn single_series_name(ctx: &ScatterBuildContext<'_>) -> String {
    ctx.data_options
        .y
        .as_ref()
        .map(|f| f.display_name().to_string())
        .unwrap_or_default()
}

fn build_single_series(rows: &[ScatterDataRow], ctx: &ScatterBuildContext<'_>) -> SeriesOptions {
    let name = single_series_name(ctx);
    let data = rows.iter().filter_map(|row| build_point(row, ctx)).collect();
    let measure_color = ctx
        .data_options
        .y
        .as_ref()
        .and_then(FieldOption::as_measure)
        .and_then(|m| m.color);
    SeriesOptions {
        series_type: Some(ctx.kind),
        color: Some(resolve_series_color(
            &name,
            measure_color,
            0,
            &ctx.data_options.series_to_color_map,
            ctx.palette,
        )),
        ..SeriesOptions::new(name, data)
    }
}

fn build_color_groups(rows: &[ScatterDataRow], ctx: &ScatterBuildContext<'_>) -> Vec<SeriesOptions> {
    let mut groups: Vec<(String, Vec<SeriesPoint>)> = Vec::new();
    for row in rows {
        let Some(point) = build_point(row, ctx) else {
            continue;
        };
        let key = row
            .break_by_color
            .as_ref()
            .map(|c| c.display_value.clone())
            .unwrap_or_default();
        match groups.iter_mut().find(|(name, _)| *name == key) {
            Some((_, points)) => points.push(point),
            None => groups.push((key, vec![point])),
        }
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(index, (name, data))| SeriesOptions {
            series_type: Some(ctx.kind),
            color: Some(resolve_series_color(
                &name,
                None,
                index,
                &ctx.data_options.series_to_color_map,
                ctx.palette,
            )),
            ..SeriesOptions::new(name, data)
        })
        .collect()
}

fn build_gradient_series(rows: &[ScatterDataRow], ctx: &ScatterBuildContext<'_>) -> SeriesOptions {
    let color_value = |row: &ScatterDataRow| {
        row.break_by_color
            .as_ref()
            .and_then(|c| c.raw_value.as_number())
    };
    let (min, max) = rows
        .iter()
        .filter_map(color_value)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let (start, end) = ctx.gradient;

    let data = rows
        .iter()
        .filter_map(|row| {
            let mut point = build_point(row, ctx)?;
            point.color = color_value(row).map(|v| {
                let ratio = if max > min { (v - min) / (max - min) } else { 0.0 };
                start.blend(end, ratio)
            });
            Some(point)
        })
        .collect();

    SeriesOptions {
        series_type: Some(ctx.kind),
        color: Some(start),
        ..SeriesOptions::new(single_series_name(ctx), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_options::{DimensionOption, MeasureOption};

    fn row(x: f64, y: f64, color: Option<DataCell>) -> ScatterDataRow {
        ScatterDataRow {
            break_by_color: color,
            ..ScatterDataRow::new(DataCell::number(x), DataCell::number(y))
        }
    }

    fn context<'a>(options: &'a ScatterDataOptions, palette: &'a Palette) -> ScatterBuildContext<'a> {
        ScatterBuildContext {
            kind: SeriesKind::Scatter,
            data_options: options,
            x_categories: None,
            y_categories: None,
            palette,
            gradient: (Color::rgb(0, 0, 0), Color::rgb(200, 200, 200)),
        }
    }

    #[test]
    fn test_single_series_points() {
        let options = ScatterDataOptions {
            y: Some(FieldOption::Measure(MeasureOption::new("Rating"))),
            ..Default::default()
        };
        let palette = Palette::default();
        let built = build_scatter_series(&[row(1.0, 2.0, None)], &context(&options, &palette));

        assert_eq!(built.len(), 1);
        assert_eq!(built[0].name, "Rating");
        let point = &built[0].data[0];
        assert_eq!((point.x, point.y, point.z), (Some(1.0), Some(2.0), None));
        assert_eq!(
            point.custom.as_ref().and_then(|c| c.masked_y_value.as_deref()),
            Some("2")
        );
    }

    #[test]
    fn test_split_by_color_dimension() {
        let options = ScatterDataOptions {
            break_by_color: Some(FieldOption::Dimension(DimensionOption::new("Region"))),
            ..Default::default()
        };
        let palette = Palette::default();
        let rows = vec![
            row(1.0, 1.0, Some(DataCell::text("North"))),
            row(2.0, 2.0, Some(DataCell::text("South"))),
            row(3.0, 3.0, Some(DataCell::text("North"))),
        ];
        let built = build_scatter_series(&rows, &context(&options, &palette));

        assert_eq!(built.len(), 2);
        assert_eq!(built[0].name, "North");
        assert_eq!(built[0].data.len(), 2);
        assert_eq!(built[1].color, Some(palette.color_at(1)));
    }

    #[test]
    fn test_gradient_colors_for_measure() {
        let options = ScatterDataOptions {
            break_by_color: Some(FieldOption::Measure(MeasureOption::new("Profit"))),
            ..Default::default()
        };
        let palette = Palette::default();
        let rows = vec![
            row(1.0, 1.0, Some(DataCell::number(0.0))),
            row(2.0, 2.0, Some(DataCell::number(10.0))),
        ];
        let built = build_scatter_series(&rows, &context(&options, &palette));

        assert_eq!(built.len(), 1);
        assert_eq!(built[0].data[0].color, Some(Color::rgb(0, 0, 0)));
        assert_eq!(built[0].data[1].color, Some(Color::rgb(200, 200, 200)));
    }

    #[test]
    fn test_categorical_axis_positions() {
        let options = ScatterDataOptions::default();
        let palette = Palette::default();
        let vocabulary = vec!["Low".to_string(), "High".to_string()];
        let mut ctx = context(&options, &palette);
        ctx.x_categories = Some(vocabulary.as_slice());

        let rows = vec![
            ScatterDataRow::new(DataCell::text("High"), DataCell::number(5.0)),
            ScatterDataRow::new(DataCell::text("Unknown"), DataCell::number(6.0)),
        ];
        let built = build_scatter_series(&rows, &ctx);
        assert_eq!(built[0].data.len(), 1);
        assert_eq!(built[0].data[0].x, Some(1.0));
    }
}
