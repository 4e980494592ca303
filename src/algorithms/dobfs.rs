//! Direction-optimizing breadth-first search
//!
//! Based on "Direction-Optimizing Breadth-First Search" (Beamer, Asanović &
//! Patterson, SC 2012) and the GAP Benchmark Suite `bfs` kernel.
//!
//! # Switching heuristic
//!
//! ```text
//!            scout_count > edges_to_check / alpha
//!   TOP_DOWN ─────────────────────────────────────▶ BOTTOM_UP
//!      ▲                                               │ ⟲ while awake grows
//!      │        awake shrinks and awake <= n / beta    │   or awake > n / beta
//!      └───────────────────────────────────────────────┘
//! ```
//!
//! Top-down levels cost roughly the out-degree sum of the frontier (the
//! scout count); bottom-up rounds cost roughly the in-edges of the
//! undiscovered vertices. Switching to bottom-up pays off once the frontier
//! touches a large share of the remaining edges, and switching back once the
//! pull wave has stopped growing and become small again.

use super::metrics::{Access, MemTraffic, NoTraffic};
use super::parent::ParentArray;
use super::steps::{bitmap_to_queue, bu_step, queue_to_bitmap, td_step};
use crate::error::BfsError;
use crate::frontier::{Bitmap, SlidingQueue};
use crate::graph::Graph;
use crate::storage::NodeId;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Default push→pull switching divisor
pub const DEFAULT_ALPHA: u32 = 15;

/// Default pull→push switching divisor
pub const DEFAULT_BETA: u32 = 18;

/// Traversal tuning and feature switches
///
/// Larger `alpha` delays the switch to bottom-up; larger `beta` delays the
/// switch back to top-down.
///
/// # Example
///
/// ```
/// use trueno_dobfs::algorithms::DobfsConfig;
///
/// let config = DobfsConfig::default().with_alpha(20).with_logging(true);
/// assert_eq!(config.alpha, 20);
/// assert_eq!(config.beta, 18);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DobfsConfig {
    /// Push→pull divisor applied to the remaining edge budget
    pub alpha: u32,
    /// Pull→push divisor applied to the vertex count
    pub beta: u32,
    /// Allow bottom-up rounds at all
    pub bottom_up: bool,
    /// Use the visited-byte cache in top-down steps
    pub visited_bytes: bool,
    /// Emit per-step `info!` records
    pub logging: bool,
}

impl Default for DobfsConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            bottom_up: true,
            visited_bytes: true,
            logging: false,
        }
    }
}

impl DobfsConfig {
    /// Top-down only: never switch to bottom-up (the `alpha = ∞` setting)
    #[must_use]
    pub fn top_down_only() -> Self {
        Self {
            bottom_up: false,
            ..Self::default()
        }
    }

    /// Set the push→pull divisor
    #[must_use]
    pub fn with_alpha(mut self, alpha: u32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the pull→push divisor
    #[must_use]
    pub fn with_beta(mut self, beta: u32) -> Self {
        self.beta = beta;
        self
    }

    /// Enable or disable bottom-up rounds
    #[must_use]
    pub fn with_bottom_up(mut self, enabled: bool) -> Self {
        self.bottom_up = enabled;
        self
    }

    /// Enable or disable the visited-byte cache
    #[must_use]
    pub fn with_visited_bytes(mut self, enabled: bool) -> Self {
        self.visited_bytes = enabled;
        self
    }

    /// Enable or disable per-step logging
    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Reject zero divisors
    ///
    /// # Errors
    ///
    /// Returns [`BfsError::InvalidTuning`] if `alpha` or `beta` is zero
    pub fn validate(&self) -> Result<(), BfsError> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if value == 0 {
                return Err(BfsError::InvalidTuning { name, value });
            }
        }
        Ok(())
    }
}

/// Outcome of one instrumented traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsRun {
    /// Normalized parent array: `-1` unreached, `source` at the root
    pub parent: Vec<i32>,
    /// Edges examined across all top-down and bottom-up steps
    pub traversed_edges: u64,
    /// Wall-clock traversal time, parent initialization excluded
    pub elapsed: Duration,
}

/// Direction-optimizing BFS returning the parent array
///
/// Runs without memory-traffic accounting and without the visited-byte
/// cache.
///
/// # Arguments
///
/// * `graph` - Graph to traverse
/// * `source` - Root vertex
/// * `logging_enabled` - Emit per-step timings as `info!` records
/// * `alpha` - Push→pull divisor (default [`DEFAULT_ALPHA`])
/// * `beta` - Pull→push divisor (default [`DEFAULT_BETA`])
///
/// # Errors
///
/// Returns [`BfsError`] if the source is out of range, a divisor is zero or
/// the graph is too large for the parent encoding. Nothing is allocated in
/// that case.
///
/// # Example
///
/// ```
/// use trueno_dobfs::{algorithms::dobfs, CsrGraph, NodeId};
///
/// let graph = CsrGraph::from_edge_list(&[
///     (NodeId(0), NodeId(1)),
///     (NodeId(1), NodeId(2)),
///     (NodeId(2), NodeId(3)),
/// ]).unwrap();
///
/// let parent = dobfs(&graph, NodeId(0), false, 15, 18).unwrap();
/// assert_eq!(parent, vec![0, 0, 1, 2]);
/// ```
pub fn dobfs<G: Graph>(
    graph: &G,
    source: NodeId,
    logging_enabled: bool,
    alpha: u32,
    beta: u32,
) -> Result<Vec<i32>, BfsError> {
    let config = DobfsConfig::default()
        .with_alpha(alpha)
        .with_beta(beta)
        .with_visited_bytes(false)
        .with_logging(logging_enabled);

    Ok(dobfs_instrumented(graph, source, &config, &mut NoTraffic)?.parent)
}

/// Direction-optimizing BFS recording every modeled memory access
///
/// Pass a [`MemMetrics`](super::metrics::MemMetrics) to count accesses, or
/// [`NoTraffic`] to only count traversed edges.
///
/// # Errors
///
/// Returns [`BfsError`] under the same conditions as [`dobfs`]
pub fn dobfs_instrumented<G: Graph, M: MemTraffic>(
    graph: &G,
    source: NodeId,
    config: &DobfsConfig,
    traffic: &mut M,
) -> Result<BfsRun, BfsError> {
    config.validate()?;
    let num_nodes = graph.num_nodes();
    if source.index() >= num_nodes {
        return Err(BfsError::InvalidSource {
            vertex: source.0,
            num_nodes,
        });
    }
    if i32::try_from(num_nodes).is_err() {
        return Err(BfsError::TooManyNodes { num_nodes });
    }

    log_count(config.logging, "Source", i64::from(source.0));

    let t = Instant::now();
    let parent = ParentArray::init(graph);
    parent.set(source, source);
    let mut visited = config.visited_bytes.then(|| {
        let mut visited = vec![0_u8; num_nodes];
        visited[source.index()] = 1;
        traffic.record(Access::VisitedByteWrite);
        visited
    });
    log_step(config.logging, "i", t, None);

    let start = Instant::now();
    let mut queue = SlidingQueue::with_capacity(num_nodes);
    queue.push_back(source);
    queue.slide_window();
    let mut front = Bitmap::new(num_nodes);
    let mut next = Bitmap::new(num_nodes);

    let alpha = i64::from(config.alpha);
    let awake_limit = as_count(num_nodes) / i64::from(config.beta);
    let mut edges_to_check = as_count(graph.num_edges_directed());
    let mut scout_count = as_count(graph.out_degree(source));
    let mut edges_visited = 0;

    while !queue.is_empty() {
        if config.bottom_up && scout_count > edges_to_check / alpha {
            debug!(
                "switching to bottom-up: scout_count={scout_count} edges_to_check={edges_to_check} frontier={}",
                queue.len()
            );
            let t = Instant::now();
            front.reset();
            queue_to_bitmap(&queue, &front, traffic);
            log_step(config.logging, "e", t, None);

            let mut awake_count = as_count(queue.len());
            queue.slide_window();
            loop {
                let t = Instant::now();
                let old_awake_count = awake_count;
                awake_count = bu_step(
                    graph,
                    &parent,
                    &front,
                    &mut next,
                    &mut edges_visited,
                    traffic,
                );
                front.swap(&mut next);
                log_step(config.logging, "bu", t, Some(awake_count));
                if !(awake_count >= old_awake_count || awake_count > awake_limit) {
                    break;
                }
            }

            let t = Instant::now();
            bitmap_to_queue(graph, &front, &mut queue, traffic);
            log_step(config.logging, "c", t, None);
            debug!("switching to top-down: frontier={}", queue.len());
            scout_count = 1;
        } else {
            let t = Instant::now();
            edges_to_check -= scout_count;
            scout_count = td_step(
                graph,
                &parent,
                &queue,
                visited.as_deref_mut(),
                &mut edges_visited,
                traffic,
            );
            queue.slide_window();
            log_step(config.logging, "td", t, Some(as_count(queue.len())));
        }
    }

    Ok(BfsRun {
        parent: parent.into_normalized(),
        traversed_edges: edges_visited,
        elapsed: start.elapsed(),
    })
}

fn as_count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn log_count(enabled: bool, label: &str, count: i64) {
    if enabled {
        info!("{label:<21}{count:>7}");
    }
}

fn log_step(enabled: bool, label: &str, started: Instant, count: Option<i64>) {
    if !enabled {
        return;
    }
    let seconds = started.elapsed().as_secs_f64();
    match count {
        Some(count) => info!("{label:>6}{count:>11}  {seconds:>10.5}"),
        None => info!("{label:>6}{seconds:>25.5}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::metrics::MemMetrics;
    use crate::storage::CsrGraph;

    fn e(src: u32, dst: u32) -> (NodeId, NodeId) {
        (NodeId(src), NodeId(dst))
    }

    /// Hub 0 fans out to 1..=100, all of which point at 101
    fn fan_in_graph() -> CsrGraph {
        let mut edges: Vec<_> = (1..=100).map(|v| e(0, v)).collect();
        edges.extend((1..=100).map(|v| e(v, 101)));
        CsrGraph::from_edge_list(&edges).unwrap()
    }

    /// Claims huge size but panics on any per-vertex query
    struct OversizedGraph;

    impl Graph for OversizedGraph {
        fn num_nodes(&self) -> usize {
            i32::MAX as usize + 1
        }

        fn num_edges_directed(&self) -> usize {
            unreachable!("traversal must be rejected before touching edges")
        }

        fn out_degree(&self, _v: NodeId) -> usize {
            unreachable!("traversal must be rejected before touching vertices")
        }

        fn out_neigh(&self, _v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
            std::iter::empty()
        }

        fn in_neigh(&self, _v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
            std::iter::empty()
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = DobfsConfig::default();
        assert_eq!(config.alpha, 15);
        assert_eq!(config.beta, 18);
        assert!(config.bottom_up);
        assert!(config.visited_bytes);
        assert!(!config.logging);
        assert!(!DobfsConfig::top_down_only().bottom_up);
    }

    #[test]
    fn test_config_rejects_zero_divisors() {
        let err = DobfsConfig::default().with_beta(0).validate().unwrap_err();
        assert_eq!(
            err,
            BfsError::InvalidTuning {
                name: "beta",
                value: 0
            }
        );
        assert!(DobfsConfig::default().with_alpha(0).validate().is_err());
    }

    #[test]
    fn test_path_graph() {
        let graph = CsrGraph::from_edge_list(&[e(0, 1), e(1, 2), e(2, 3)]).unwrap();
        let parent = dobfs(&graph, NodeId(0), false, DEFAULT_ALPHA, DEFAULT_BETA).unwrap();
        assert_eq!(parent, vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_source_out_of_range() {
        let graph = CsrGraph::from_edge_list(&[e(0, 1)]).unwrap();
        let err = dobfs(&graph, NodeId(2), false, DEFAULT_ALPHA, DEFAULT_BETA).unwrap_err();
        assert_eq!(
            err,
            BfsError::InvalidSource {
                vertex: 2,
                num_nodes: 2
            }
        );
    }

    #[test]
    fn test_oversized_graph_rejected_before_allocation() {
        let err = dobfs(&OversizedGraph, NodeId(0), false, 15, 18).unwrap_err();
        assert!(matches!(err, BfsError::TooManyNodes { .. }));
    }

    #[test]
    fn test_hub_forces_bottom_up() {
        let graph = fan_in_graph();
        let mut metrics = MemMetrics::new();
        let run =
            dobfs_instrumented(&graph, NodeId(0), &DobfsConfig::default(), &mut metrics).unwrap();

        assert_eq!(run.parent[0], 0);
        assert!(run.parent[1..=100].iter().all(|&p| p == 0));
        assert_eq!(run.parent[101], 1);

        // Bottom-up rounds ran: bitmap traffic and parent writes are present
        assert!(metrics.get(Access::BitmapRead) > 0);
        assert_eq!(metrics.get(Access::ParentWrite), 101);
        assert_eq!(metrics.get(Access::NeighborIndexRead), run.traversed_edges);
    }

    #[test]
    fn test_top_down_only_never_touches_bitmaps() {
        let graph = fan_in_graph();
        let mut metrics = MemMetrics::new();
        let run = dobfs_instrumented(
            &graph,
            NodeId(0),
            &DobfsConfig::top_down_only(),
            &mut metrics,
        )
        .unwrap();

        assert_eq!(run.traversed_edges, 200);
        assert_eq!(metrics.get(Access::BitmapRead), 0);
        assert_eq!(metrics.get(Access::BitmapWrite), 0);
        assert_eq!(metrics.get(Access::FrontierPush), 101);
        assert!(run.parent[1..=101].iter().all(|&p| p >= 0));
    }

    #[test]
    fn test_visited_bytes_mark_source() {
        let graph = CsrGraph::from_edge_list(&[e(0, 1), e(1, 0)]).unwrap();
        let mut with_bytes = MemMetrics::new();
        let mut without_bytes = MemMetrics::new();

        let a = dobfs_instrumented(
            &graph,
            NodeId(0),
            &DobfsConfig::top_down_only(),
            &mut with_bytes,
        )
        .unwrap();
        let b = dobfs_instrumented(
            &graph,
            NodeId(0),
            &DobfsConfig::top_down_only().with_visited_bytes(false),
            &mut without_bytes,
        )
        .unwrap();

        assert_eq!(a.parent, b.parent);
        // Source mark + discovery of 1
        assert_eq!(with_bytes.get(Access::VisitedByteWrite), 2);
        // Back edge 1 → 0 is rejected by the byte, not the parent array
        assert_eq!(with_bytes.get(Access::ParentRead), 1);
        assert_eq!(without_bytes.get(Access::ParentRead), 2);
        assert_eq!(without_bytes.get(Access::VisitedByteRead), 0);
    }

    #[test]
    fn test_single_vertex() {
        let graph = CsrGraph::with_num_nodes(1, &[]).unwrap();
        let run =
            dobfs_instrumented(&graph, NodeId(0), &DobfsConfig::default(), &mut NoTraffic).unwrap();
        assert_eq!(run.parent, vec![0]);
        assert_eq!(run.traversed_edges, 0);
    }
}
