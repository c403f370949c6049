//! Category axis construction for cartesian charts
//!
//! With two x dimensions the outer dimension groups the inner categories.
//! An empty separator slot is inserted between groups and each group gets a
//! plot band labelled with its outer value, so input categories are
//! remapped onto new axis positions.

use crate::data_options::DimensionOption;
use crate::date_format::{date_millis, parse_date, DateFormatter};
use crate::model::{CategoryValue, RawValue};
use crate::options::{Align, PlotBand, PlotBandLabel, VerticalAlign};

/// Vertical offset of group labels above the plot area
pub const GROUP_LABEL_OFFSET: f64 = -15.0;

/// Category axis of a cartesian chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryAxis {
    /// Axis labels, separators included
    pub categories: Vec<String>,
    /// Axis position of each input category
    pub positions: Vec<usize>,
    pub plot_bands: Vec<PlotBand>,
}

impl CategoryAxis {
    /// Number of axis slots, separators included
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn has_groups(&self) -> bool {
        !self.plot_bands.is_empty()
    }
}

/// Display label of one level of a category
pub fn category_label(
    category: &CategoryValue,
    level: usize,
    dimension: Option<&DimensionOption>,
    date_formatter: &dyn DateFormatter,
) -> String {
    let display = category
        .x_values
        .get(level)
        .cloned()
        .unwrap_or_else(|| category.key.clone());

    let Some(format) = dimension.and_then(|d| d.date_format()) else {
        return display;
    };
    let raw = category
        .raw_values
        .get(level)
        .cloned()
        .unwrap_or_else(|| RawValue::Text(display.clone()));
    parse_date(&raw)
        .map(|date| date_formatter.format(date, format))
        .unwrap_or(display)
}

/// Epoch milliseconds of a category on a continuous date axis
pub fn category_timestamp(category: &CategoryValue) -> Option<f64> {
    category
        .raw_values
        .first()
        .and_then(date_millis)
        .or_else(|| {
            category
                .x_values
                .first()
                .and_then(|v| date_millis(&RawValue::Text(v.clone())))
        })
}

/// Build the category axis, grouping by the outer dimension when there are two
pub fn build_category_axis(
    x_values: &[CategoryValue],
    x_axis_count: usize,
    dimensions: &[DimensionOption],
    date_formatter: &dyn DateFormatter,
    group_labels: bool,
) -> CategoryAxis {
    let inner_dimension = dimensions.first();
    if x_axis_count < 2 {
        let categories = x_values
            .iter()
            .map(|c| category_label(c, 0, inner_dimension, date_formatter))
            .collect();
        return CategoryAxis {
            categories,
            positions: (0..x_values.len()).collect(),
            plot_bands: Vec::new(),
        };
    }

    let outer_dimension = dimensions.get(1);
    let mut axis = CategoryAxis::default();
    let mut current_group: Option<(String, usize)> = None;

    for category in x_values {
        let group = category_label(category, 1, outer_dimension, date_formatter);
        match &current_group {
            Some((name, _)) if *name == group => {}
            Some((name, start)) => {
                let end = axis.categories.len() - 1;
                axis.plot_bands.push(group_band(name, *start, end, group_labels));
                axis.categories.push(String::new());
                current_group = Some((group, axis.categories.len()));
            }
            None => current_group = Some((group, 0)),
        }
        axis.positions.push(axis.categories.len());
        axis.categories
            .push(category_label(category, 0, inner_dimension, date_formatter));
    }

    if let Some((name, start)) = current_group {
        let end = axis.categories.len() - 1;
        axis.plot_bands.push(group_band(&name, start, end, group_labels));
    }
    axis
}

fn group_band(name: &str, start: usize, end: usize, labelled: bool) -> PlotBand {
    PlotBand {
        from: start as f64 - 0.5,
        to: end as f64 + 0.5,
        label: PlotBandLabel {
            text: if labelled { name.to_string() } else { String::new() },
            align: Align::Center,
            vertical_align: VerticalAlign::Top,
            y: GROUP_LABEL_OFFSET,
        },
        color: None,
    }
}
