//! Roofline-style traversal report
//!
//! Combines the traversed-edge count, wall-clock time and the recorded
//! [`MemMetrics`] into throughput (TEPS) and arithmetic intensity
//! (edges per estimated byte moved).

use super::dobfs::BfsRun;
use super::metrics::MemMetrics;
use std::fmt;
use std::time::Duration;

/// Summary of one instrumented traversal
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use trueno_dobfs::algorithms::{MemMetrics, TraversalReport};
///
/// let report = TraversalReport::new(1_000, Duration::from_millis(500), MemMetrics::new());
/// assert_eq!(report.teps(), 2_000.0);
/// assert_eq!(report.edges_per_byte(), 0.0); // no bytes recorded
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversalReport {
    /// Edges examined by all steps
    pub traversed_edges: u64,
    /// Wall-clock traversal time
    pub elapsed: Duration,
    /// Per-category access counts
    pub traffic: MemMetrics,
}

impl TraversalReport {
    /// Assemble a report from its parts
    #[must_use]
    pub fn new(traversed_edges: u64, elapsed: Duration, traffic: MemMetrics) -> Self {
        Self {
            traversed_edges,
            elapsed,
            traffic,
        }
    }

    /// Assemble a report from a finished run and its accounting context
    #[must_use]
    pub fn from_run(run: &BfsRun, traffic: MemMetrics) -> Self {
        Self::new(run.traversed_edges, run.elapsed, traffic)
    }

    /// Estimated bytes moved
    #[must_use]
    pub fn bytes_estimate(&self) -> u64 {
        self.traffic.bytes_estimate()
    }

    /// Arithmetic intensity: traversed edges per estimated byte (0 if no bytes)
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // reporting ratio
    pub fn edges_per_byte(&self) -> f64 {
        match self.bytes_estimate() {
            0 => 0.0,
            bytes => self.traversed_edges as f64 / bytes as f64,
        }
    }

    /// Traversed edges per second (0 if no time elapsed)
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // reporting ratio
    pub fn teps(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.traversed_edges as f64 / seconds
        } else {
            0.0
        }
    }
}

impl fmt::Display for TraversalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Traversed edges: {}", self.traversed_edges)?;
        writeln!(f, "BFS Time (s): {:.6}", self.elapsed.as_secs_f64())?;
        writeln!(f, "Estimated bytes: {}", self.bytes_estimate())?;
        writeln!(f, "Edges per byte (Ie): {:.6}", self.edges_per_byte())?;
        write!(f, "TEPS: {:.3}", self.teps())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::metrics::{Access, MemTraffic};

    fn metrics_with(access: Access, count: usize) -> MemMetrics {
        let mut metrics = MemMetrics::new();
        for _ in 0..count {
            metrics.record(access);
        }
        metrics
    }

    #[test]
    fn test_derived_ratios() {
        // 10 neighbor reads × 4 bytes = 40 bytes
        let report = TraversalReport::new(
            10,
            Duration::from_secs(2),
            metrics_with(Access::NeighborIndexRead, 10),
        );

        assert_eq!(report.bytes_estimate(), 40);
        assert!((report.edges_per_byte() - 0.25).abs() < f64::EPSILON);
        assert!((report.teps() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_denominators_yield_zero() {
        let report = TraversalReport::new(10, Duration::ZERO, MemMetrics::new());
        assert_eq!(report.teps(), 0.0);
        assert_eq!(report.edges_per_byte(), 0.0);
    }

    #[test]
    fn test_display_layout() {
        let report = TraversalReport::new(
            8,
            Duration::from_millis(250),
            metrics_with(Access::BitmapRead, 2),
        );
        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Traversed edges: 8",
                "BFS Time (s): 0.250000",
                "Estimated bytes: 16",
                "Edges per byte (Ie): 0.500000",
                "TEPS: 32.000",
            ]
        );
    }
}
