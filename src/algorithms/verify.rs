//! Post-hoc BFS tree verification and tree statistics
//!
//! The verifier recomputes ground-truth depths with a plain sequential
//! queue (no bitmaps, no atomics) and checks the parent array against them:
//!
//! 1. the source is its own parent at depth 0
//! 2. every other tree vertex has an in-edge from its parent, one level up
//! 3. a vertex has a parent iff it is reachable from the source

use crate::graph::Graph;
use crate::storage::NodeId;
use log::error;
use std::collections::VecDeque;
use thiserror::Error;

/// First broken invariant found in a parent array
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The parent array does not root the tree at the source
    #[error("Source wrong: parent[{root}] = {parent}")]
    SourceWrong {
        /// Traversal source
        root: NodeId,
        /// Entry found at the source
        parent: i32,
    },

    /// A tree edge skips or repeats a level
    #[error("Wrong depths for {vertex} & {parent}")]
    WrongDepth {
        /// Child vertex
        vertex: NodeId,
        /// Its recorded parent
        parent: NodeId,
    },

    /// The recorded parent is not an in-neighbor
    #[error("Couldn't find edge from {parent} to {vertex}")]
    MissingEdge {
        /// Recorded parent entry
        parent: i32,
        /// Child vertex
        vertex: NodeId,
    },

    /// Parent array and ground truth disagree on reachability
    #[error("Reachability mismatch at {vertex}")]
    ReachabilityMismatch {
        /// Offending vertex
        vertex: NodeId,
    },

    /// The traversal source is not a vertex of the graph
    #[error("Source {root} out of range for a graph with {num_nodes} nodes")]
    InvalidSource {
        /// Traversal source
        root: NodeId,
        /// Vertices in the graph
        num_nodes: usize,
    },

    /// Parent array length differs from the vertex count
    #[error("Parent array has {len} entries for a graph with {num_nodes} nodes")]
    LengthMismatch {
        /// Entries in the parent array
        len: usize,
        /// Vertices in the graph
        num_nodes: usize,
    },
}

/// Ground-truth BFS depths from `source` (`None` = unreachable)
///
/// # Panics
///
/// Panics if `source` is out of range
#[must_use]
pub fn bfs_depths<G: Graph>(graph: &G, source: NodeId) -> Vec<Option<u32>> {
    let mut depth = vec![None; graph.num_nodes()];
    let mut to_visit = VecDeque::new();

    depth[source.index()] = Some(0);
    to_visit.push_back(source);

    while let Some(u) = to_visit.pop_front() {
        let next_depth = depth[u.index()].map(|d| d + 1);
        for v in graph.out_neigh(u) {
            if depth[v.index()].is_none() {
                depth[v.index()] = next_depth;
                to_visit.push_back(v);
            }
        }
    }

    depth
}

/// Check `parent` against an independent BFS from `source`
///
/// # Errors
///
/// Returns the first [`VerifyError`] found, scanning vertices in ID order
pub fn check_bfs_tree<G: Graph>(
    graph: &G,
    source: NodeId,
    parent: &[i32],
) -> Result<(), VerifyError> {
    if parent.len() != graph.num_nodes() {
        return Err(VerifyError::LengthMismatch {
            len: parent.len(),
            num_nodes: graph.num_nodes(),
        });
    }

    if source.index() >= graph.num_nodes() {
        return Err(VerifyError::InvalidSource {
            root: source,
            num_nodes: graph.num_nodes(),
        });
    }

    let depth = bfs_depths(graph, source);

    for u in graph.vertices() {
        let p = parent[u.index()];
        match (depth[u.index()], p) {
            (Some(du), p) if p >= 0 => {
                if u == source {
                    if i64::from(p) != i64::from(u.0) || du != 0 {
                        return Err(VerifyError::SourceWrong {
                            root: source,
                            parent: p,
                        });
                    }
                    continue;
                }

                let Some(v) = graph.in_neigh(u).find(|v| i64::from(v.0) == i64::from(p)) else {
                    return Err(VerifyError::MissingEdge { parent: p, vertex: u });
                };
                if depth[v.index()].map(|dv| dv + 1) != Some(du) {
                    return Err(VerifyError::WrongDepth { vertex: u, parent: v });
                }
            }
            (None, -1) => {}
            _ => return Err(VerifyError::ReachabilityMismatch { vertex: u }),
        }
    }

    Ok(())
}

/// Verifier entry point for the benchmark harness
///
/// Logs the broken invariant at `error` level and returns `false`; never
/// propagates the failure.
pub fn bfs_verifier<G: Graph>(graph: &G, source: NodeId, parent: &[i32]) -> bool {
    match check_bfs_tree(graph, source, parent) {
        Ok(()) => true,
        Err(err) => {
            error!("{err}");
            false
        }
    }
}

/// Size of the tree described by a parent array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BfsTreeStats {
    /// Discovered vertices (source included)
    pub nodes: usize,
    /// Sum of the out-degrees of the discovered vertices
    pub edges: usize,
}

impl BfsTreeStats {
    /// Count discovered vertices and their out-edges
    #[must_use]
    pub fn compute<G: Graph>(graph: &G, parent: &[i32]) -> Self {
        graph
            .vertices()
            .zip(parent)
            .filter(|&(_, &p)| p >= 0)
            .fold(Self::default(), |acc, (n, _)| Self {
                nodes: acc.nodes + 1,
                edges: acc.edges + graph.out_degree(n),
            })
    }
}

/// Print `BFS Tree has N nodes and M edges` to stdout
pub fn print_bfs_stats<G: Graph>(graph: &G, parent: &[i32]) {
    let stats = BfsTreeStats::compute(graph, parent);
    println!(
        "BFS Tree has {} nodes and {} edges",
        stats.nodes, stats.edges
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CsrGraph;

    fn e(src: u32, dst: u32) -> (NodeId, NodeId) {
        (NodeId(src), NodeId(dst))
    }

    /// Diamond 0 → {1, 2} → 3, plus unreachable 4 → 0
    fn diamond() -> CsrGraph {
        CsrGraph::from_edge_list(&[e(0, 1), e(0, 2), e(1, 3), e(2, 3), e(4, 0)]).unwrap()
    }

    #[test]
    fn test_bfs_depths() {
        let depth = bfs_depths(&diamond(), NodeId(0));
        assert_eq!(depth, vec![Some(0), Some(1), Some(1), Some(2), None]);
    }

    #[test]
    fn test_accepts_either_shortest_parent() {
        let graph = diamond();
        assert_eq!(check_bfs_tree(&graph, NodeId(0), &[0, 0, 0, 1, -1]), Ok(()));
        assert_eq!(check_bfs_tree(&graph, NodeId(0), &[0, 0, 0, 2, -1]), Ok(()));
    }

    #[test]
    fn test_source_wrong() {
        let err = check_bfs_tree(&diamond(), NodeId(0), &[4, 0, 0, 1, -1]).unwrap_err();
        assert!(matches!(err, VerifyError::SourceWrong { .. }));
    }

    #[test]
    fn test_missing_edge() {
        // No edge 2 → 1
        let err = check_bfs_tree(&diamond(), NodeId(0), &[0, 2, 0, 1, -1]).unwrap_err();
        assert_eq!(
            err,
            VerifyError::MissingEdge {
                parent: 2,
                vertex: NodeId(1)
            }
        );
    }

    #[test]
    fn test_wrong_depth() {
        // 0 → 1 → 3 → 5 is depth 3, but 0 → 5 exists
        let graph =
            CsrGraph::from_edge_list(&[e(0, 1), e(1, 3), e(3, 5), e(0, 5), e(0, 2), e(2, 4)])
                .unwrap();
        let err = check_bfs_tree(&graph, NodeId(0), &[0, 0, 0, 1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            VerifyError::WrongDepth {
                vertex: NodeId(5),
                parent: NodeId(3)
            }
        );
    }

    #[test]
    fn test_reachability_mismatch() {
        let graph = diamond();
        let missing = check_bfs_tree(&graph, NodeId(0), &[0, 0, 0, -1, -1]).unwrap_err();
        assert_eq!(
            missing,
            VerifyError::ReachabilityMismatch { vertex: NodeId(3) }
        );
        let extra = check_bfs_tree(&graph, NodeId(0), &[0, 0, 0, 1, 4]).unwrap_err();
        assert_eq!(extra, VerifyError::ReachabilityMismatch { vertex: NodeId(4) });
    }

    #[test]
    fn test_unnormalized_entry_rejected() {
        // 2 and 3 only reach 0, so neither is reachable from it
        let graph =
            CsrGraph::from_edge_list(&[e(0, 1), e(2, 0), e(3, 0), e(3, 1)]).unwrap();
        assert_eq!(check_bfs_tree(&graph, NodeId(0), &[0, 0, -1, -1]), Ok(()));

        let err = check_bfs_tree(&graph, NodeId(0), &[0, 0, -1, -2]).unwrap_err();
        assert_eq!(err, VerifyError::ReachabilityMismatch { vertex: NodeId(3) });
    }

    #[test]
    fn test_source_out_of_range() {
        let graph = CsrGraph::from_edge_list(&[e(0, 1)]).unwrap();
        let err = check_bfs_tree(&graph, NodeId(7), &[0, 0]).unwrap_err();
        assert_eq!(
            err,
            VerifyError::InvalidSource {
                root: NodeId(7),
                num_nodes: 2
            }
        );
        assert!(!bfs_verifier(&graph, NodeId(7), &[0, 0]));
    }

    #[test]
    fn test_verifier_returns_bool() {
        let graph = diamond();
        assert!(bfs_verifier(&graph, NodeId(0), &[0, 0, 0, 1, -1]));
        assert!(!bfs_verifier(&graph, NodeId(0), &[0, 0, 0]));
    }

    #[test]
    fn test_tree_stats() {
        let graph = diamond();
        let stats = BfsTreeStats::compute(&graph, &[0, 0, 0, 1, -1]);
        // out-degrees 2 + 1 + 1 + 0
        assert_eq!(stats, BfsTreeStats { nodes: 4, edges: 4 });
    }
}
