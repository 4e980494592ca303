//! Benchmark-kernel driver
//!
//! Runs a traversal kernel for a number of trials, timing each one, and
//! optionally prints tree statistics for the last result and verifies every
//! result.

use crate::graph::Graph;
use anyhow::{ensure, Result};
use log::info;
use std::time::{Duration, Instant};

/// Default number of trials
pub const DEFAULT_TRIALS: usize = 16;

/// Trial count and post-processing switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkOptions {
    /// Number of kernel invocations
    pub trials: usize,
    /// Run the verifier on every result
    pub verify: bool,
    /// Print tree statistics for the last result
    pub analysis: bool,
}

impl Default for BenchmarkOptions {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            verify: false,
            analysis: false,
        }
    }
}

/// Outcome of a benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkSummary {
    /// Kernel time per trial
    pub trial_times: Vec<Duration>,
    /// `Some(all passed)` when verification ran
    pub verified: Option<bool>,
}

impl BenchmarkSummary {
    /// Mean kernel time over all trials
    #[must_use]
    pub fn average_time(&self) -> Duration {
        match u32::try_from(self.trial_times.len()) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.trial_times.iter().sum::<Duration>() / n,
        }
    }
}

/// Run `kernel` for `options.trials` trials
///
/// # Arguments
///
/// * `kernel` - Produces one result per call (e.g. a source and its parent array)
/// * `stats` - Tree statistics printer, called on the last result
/// * `verifier` - Returns whether a result is correct
///
/// # Errors
///
/// Returns error if `options.trials` is zero or if the kernel fails
///
/// # Example
///
/// ```
/// use trueno_dobfs::harness::{run_benchmark, BenchmarkOptions};
/// use trueno_dobfs::{CsrGraph, NodeId};
///
/// let graph = CsrGraph::from_edge_list(&[(NodeId(0), NodeId(1))]).unwrap();
/// let options = BenchmarkOptions { trials: 3, verify: true, analysis: false };
///
/// let summary = run_benchmark(
///     &graph,
///     &options,
///     |_| Ok(42),
///     |_, _| {},
///     |_, &result| result == 42,
/// ).unwrap();
///
/// assert_eq!(summary.trial_times.len(), 3);
/// assert_eq!(summary.verified, Some(true));
/// ```
pub fn run_benchmark<G, R, K, S, V>(
    graph: &G,
    options: &BenchmarkOptions,
    mut kernel: K,
    stats: S,
    mut verifier: V,
) -> Result<BenchmarkSummary>
where
    G: Graph,
    K: FnMut(&G) -> Result<R>,
    S: Fn(&G, &R),
    V: FnMut(&G, &R) -> bool,
{
    ensure!(options.trials > 0, "Number of trials must be positive");

    info!(
        "Graph has {} nodes and {} directed edges",
        graph.num_nodes(),
        graph.num_edges_directed()
    );

    let mut trial_times = Vec::with_capacity(options.trials);
    let mut verified = options.verify.then_some(true);

    for trial in 0..options.trials {
        let start = Instant::now();
        let result = kernel(graph)?;
        let elapsed = start.elapsed();
        info!("Trial Time: {:.5}", elapsed.as_secs_f64());
        trial_times.push(elapsed);

        if options.analysis && trial + 1 == options.trials {
            stats(graph, &result);
        }

        if options.verify {
            let start = Instant::now();
            let passed = verifier(graph, &result);
            println!("Verification: {}", if passed { "PASS" } else { "FAIL" });
            info!("Verification Time: {:.5}", start.elapsed().as_secs_f64());
            verified = verified.map(|all| all && passed);
        }
    }

    let summary = BenchmarkSummary {
        trial_times,
        verified,
    };
    info!("Average Time: {:.5}", summary.average_time().as_secs_f64());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CsrGraph, NodeId};
    use std::cell::Cell;

    fn graph() -> CsrGraph {
        CsrGraph::from_edge_list(&[(NodeId(0), NodeId(1))]).unwrap()
    }

    #[test]
    fn test_zero_trials_rejected() {
        let options = BenchmarkOptions {
            trials: 0,
            ..BenchmarkOptions::default()
        };
        let result = run_benchmark(&graph(), &options, |_| Ok(()), |_, _| {}, |_, _| true);
        assert!(result.is_err());
    }

    #[test]
    fn test_stats_only_on_last_trial() {
        let seen = Cell::new(Vec::new());
        let mut calls = 0;
        let options = BenchmarkOptions {
            trials: 4,
            verify: false,
            analysis: true,
        };

        let summary = run_benchmark(
            &graph(),
            &options,
            |_| {
                calls += 1;
                Ok(calls)
            },
            |_, &r| {
                let mut v = seen.take();
                v.push(r);
                seen.set(v);
            },
            |_, _| unreachable!("verification disabled"),
        )
        .unwrap();

        assert_eq!(seen.take(), vec![4]);
        assert_eq!(summary.verified, None);
        assert_eq!(summary.trial_times.len(), 4);
    }

    #[test]
    fn test_single_failure_fails_summary() {
        let options = BenchmarkOptions {
            trials: 3,
            verify: true,
            analysis: false,
        };
        let mut trial = 0;

        let summary = run_benchmark(
            &graph(),
            &options,
            |_| {
                trial += 1;
                Ok(trial)
            },
            |_, _| {},
            |_, &t| t != 2,
        )
        .unwrap();

        assert_eq!(summary.verified, Some(false));
    }

    #[test]
    fn test_kernel_error_propagates() {
        let options = BenchmarkOptions::default();
        let result = run_benchmark(
            &graph(),
            &options,
            |_| -> Result<()> { Err(anyhow::anyhow!("kernel failed")) },
            |_, _| {},
            |_, _| true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_average_time() {
        let summary = BenchmarkSummary {
            trial_times: vec![Duration::from_millis(10), Duration::from_millis(30)],
            verified: None,
        };
        assert_eq!(summary.average_time(), Duration::from_millis(20));
    }
}
