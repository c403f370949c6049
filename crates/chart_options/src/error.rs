//! Error types for the chart options compiler
//!
//! Only structural contract violations are errors. Data-volume problems
//! (too many series or categories) are reported as alerts next to the
//! compiled options instead.

use thiserror::Error;

/// Errors that abort a compilation
#[derive(Error, Debug)]
pub enum ChartOptionsError {
    /// The chart type or data tag cannot be routed to a chart family
    #[error("Unexpected chart type: {0}")]
    UnexpectedChartType(String),

    /// Data options belong to another chart family than the chart data
    #[error("Data options mismatch: expected {expected} data options, got {found}")]
    DataOptionsMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Design options belong to another chart family than the chart type
    #[error("Design options mismatch: chart type {chart_type} cannot use {found} design options")]
    DesignOptionsMismatch {
        chart_type: String,
        found: &'static str,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for chart options operations
pub type ChartOptionsResult<T> = Result<T, ChartOptionsError>;
