//! Chart Options - compiles chart data into renderer option trees
//!
//! This crate provides support for:
//! - Routing tagged chart data to the cartesian, categorical or scatter compiler
//! - Translating design options (axes, legend, markers, value labels)
//! - Building renderer series, including "Other" slice folding and funnel percents
//! - Enforcing data limits with non-fatal alerts
//! - Formatting numbers, dates, labels and tooltips through pure descriptors

mod error;
mod color;
mod model;
mod number_format;
mod date_format;
mod options;
mod formatter;
mod design_options;
mod data_options;
mod tooltip;
mod alerts;
mod theme;
mod geometry;
mod axis;
mod legend;
mod marker;
mod value_label;
mod categories;
mod series;
mod pie_series;
mod funnel;
mod scatter_series;
mod defaults;
mod cartesian;
mod categorical;
mod scatter;
mod service;

pub use error::*;
pub use color::*;
pub use model::*;
pub use number_format::*;
pub use date_format::*;
pub use options::*;
pub use formatter::*;
pub use design_options::*;
pub use data_options::*;
pub use tooltip::*;
pub use alerts::*;
pub use theme::*;
pub use geometry::*;
pub use axis::*;
pub use legend::*;
pub use marker::*;
pub use value_label::*;
pub use categories::*;
pub use series::*;
pub use pie_series::*;
pub use funnel::*;
pub use scatter_series::*;
pub use defaults::*;
pub use cartesian::*;
pub use categorical::*;
pub use scatter::*;
pub use service::*;
