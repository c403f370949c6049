//! Capacity enforcement and user-facing alerts
//!
//! Oversized inputs are truncated rather than rejected. Every truncation
//! leaves one alert describing what was dropped.

use std::fmt;

/// What a capacity limit applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityTarget {
    Series,
    Categories,
    /// Categories of a named axis (scatter charts truncate each axis)
    AxisCategories(String),
}

/// A non-fatal truncation notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityAlert {
    pub target: CapacityTarget,
    pub capacity: usize,
    pub original: usize,
}

impl fmt::Display for CapacityAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            CapacityTarget::Series => write!(
                f,
                "The chart exceeds the limit of {} series: only the first {} of {} series are displayed.",
                self.capacity, self.capacity, self.original
            ),
            CapacityTarget::Categories => write!(
                f,
                "The chart exceeds the limit of {} categories: only the first {} of {} categories are displayed.",
                self.capacity, self.capacity, self.original
            ),
            CapacityTarget::AxisCategories(axis) => write!(
                f,
                "The {} axis exceeds the limit of {} categories: only the first {} of {} categories are displayed.",
                axis, self.capacity, self.capacity, self.original
            ),
        }
    }
}

/// Alerts collected during one compilation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alerts(Vec<String>);

impl Alerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, alert: CapacityAlert) {
        tracing::warn!("Truncating chart data: {}", alert);
        self.0.push(alert.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Keep at most `capacity` items, recording an alert when any are dropped
    pub fn enforce<'a, T>(&mut self, items: &'a [T], capacity: usize, target: CapacityTarget) -> &'a [T] {
        if items.len() <= capacity {
            return items;
        }
        self.push(CapacityAlert {
            target,
            capacity,
            original: items.len(),
        });
        &items[..capacity]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enforce_within_capacity() {
        let mut alerts = Alerts::new();
        let items = [1, 2, 3];
        assert_eq!(alerts.enforce(&items, 3, CapacityTarget::Series), &[1, 2, 3]);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_enforce_truncates_with_alert() {
        let mut alerts = Alerts::new();
        let items = [1, 2, 3, 4];
        assert_eq!(alerts.enforce(&items, 2, CapacityTarget::Categories), &[1, 2]);

        let alerts = alerts.into_vec();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("only the first 2 of 4 categories"));
    }

    #[test]
    fn test_axis_alert_names_axis() {
        let alert = CapacityAlert {
            target: CapacityTarget::AxisCategories("x".into()),
            capacity: 500,
            original: 600,
        };
        assert!(alert.to_string().starts_with("The x axis exceeds the limit of 500 categories"));
    }
}
