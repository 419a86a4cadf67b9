//! Metrics calculators

use std::fmt::Debug;

/// Strategy computing the summary value stored on every node.
///
/// Implementations must be consistent: for adjacent texts `a` and `b`,
/// `join(&metrics(a), &metrics(b))` must equal `metrics(a + b)`, and `join`
/// must be associative. The rope relies on this but does not check it.
pub trait MetricsCalculator: Clone {
    type Metrics: Clone + Debug + Send + Sync;

    /// Metrics of a single leaf's text
    fn metrics(&self, text: &str) -> Self::Metrics;

    /// Metrics of two adjacent regions, from their metrics alone
    fn join(&self, left: &Self::Metrics, right: &Self::Metrics) -> Self::Metrics;
}

/// Calculator for ropes that only need the structural operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoMetrics;

impl MetricsCalculator for NoMetrics {
    type Metrics = ();

    fn metrics(&self, _text: &str) {}

    fn join(&self, _left: &(), _right: &()) {}
}
