//! Chart-type defaults
//!
//! Base plot options for each chart type. Family compilers merge the
//! options they assemble over these with `Merge`, so assembled values
//! always win.

use crate::design_options::StackType;
use crate::model::{ChartType, SeriesKind};
use crate::options::{
    Animation, DataLabelsSettings, NavigatorSettings, PlotOptions, ScrollbarSettings,
    SeriesPlotOptions, Stacking,
};
use crate::theme::ThemeSettings;

/// Above this many points the renderer switches to its boosted mode
pub const BOOST_THRESHOLD: usize = 5000;

/// Plot stacking for a stack type
pub fn stacking_for(stack_type: StackType) -> Option<Stacking> {
    match stack_type {
        StackType::Classic => None,
        StackType::Stacked => Some(Stacking::Normal),
        StackType::Stack100 => Some(Stacking::Percent),
    }
}

fn shared_series_defaults(theme: &ThemeSettings) -> SeriesPlotOptions {
    SeriesPlotOptions {
        connect_nulls: Some(false),
        animation: Some(Animation {
            duration: theme.animation_duration,
        }),
        boost_threshold: Some(BOOST_THRESHOLD),
        turbo_threshold: Some(0),
        sticky_tracking: Some(false),
        ..Default::default()
    }
}

/// Base plot options of a chart type
pub fn default_plot_options(chart_type: ChartType, stack_type: StackType, theme: &ThemeSettings) -> PlotOptions {
    let mut plot = PlotOptions {
        series: shared_series_defaults(theme),
        ..Default::default()
    };

    match chart_type {
        ChartType::Line => {
            *plot.for_kind_mut(SeriesKind::Line) = SeriesPlotOptions {
                line_width: Some(3.0),
                ..Default::default()
            };
        }
        ChartType::Area => {
            plot.series.stacking = stacking_for(stack_type);
            *plot.for_kind_mut(SeriesKind::Area) = SeriesPlotOptions {
                line_width: Some(3.0),
                fill_opacity: Some(if stack_type == StackType::Classic { 0.5 } else { 0.75 }),
                ..Default::default()
            };
        }
        ChartType::Column | ChartType::Bar => {
            plot.series.stacking = stacking_for(stack_type);
            let kind = if chart_type == ChartType::Bar {
                SeriesKind::Bar
            } else {
                SeriesKind::Column
            };
            *plot.for_kind_mut(kind) = SeriesPlotOptions {
                point_padding: Some(0.1),
                group_padding: Some(0.1),
                border_width: Some(0.0),
                ..Default::default()
            };
        }
        ChartType::Polar => {
            *plot.for_kind_mut(SeriesKind::Column) = SeriesPlotOptions {
                point_padding: Some(0.0),
                group_padding: Some(0.0),
                border_width: Some(0.0),
                ..Default::default()
            };
            *plot.for_kind_mut(SeriesKind::Area) = SeriesPlotOptions {
                fill_opacity: Some(0.5),
                ..Default::default()
            };
        }
        ChartType::Pie => {
            *plot.for_kind_mut(SeriesKind::Pie) = SeriesPlotOptions {
                show_in_legend: Some(true),
                border_width: Some(0.0),
                data_labels: Some(DataLabelsSettings {
                    enabled: true,
                    distance: Some(30.0),
                    crop: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            };
        }
        ChartType::Funnel => {
            *plot.for_kind_mut(SeriesKind::Funnel) = SeriesPlotOptions {
                show_in_legend: Some(true),
                border_width: Some(0.0),
                data_labels: Some(DataLabelsSettings {
                    enabled: true,
                    crop: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            };
        }
        ChartType::Scatter => {
            *plot.for_kind_mut(SeriesKind::Scatter) = SeriesPlotOptions {
                sticky_tracking: Some(false),
                ..Default::default()
            };
            *plot.for_kind_mut(SeriesKind::Bubble) = SeriesPlotOptions {
                sticky_tracking: Some(false),
                ..Default::default()
            };
        }
    }
    plot
}

/// Range navigator shown below zoomable charts
pub fn default_navigator(kind: SeriesKind) -> NavigatorSettings {
    NavigatorSettings {
        enabled: true,
        height: 30.0,
        margin: 25.0,
        series_type: kind,
        x_axis_labels_enabled: false,
    }
}

pub fn default_scrollbar() -> ScrollbarSettings {
    ScrollbarSettings { enabled: false }
}
