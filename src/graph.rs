//! Graph capability consumed by the traversal kernels
//!
//! The kernels never see a concrete storage layout: they only need vertex
//! counts, out-degrees and lazy neighbor sequences in both directions. Any
//! static directed graph that can answer these queries can be traversed.

use crate::storage::NodeId;

/// Read-only view of a static directed graph.
///
/// Vertex IDs are dense in `[0, num_nodes)`. Neighbor sequences are lazy,
/// finite and restartable: calling [`Graph::out_neigh`] twice yields the
/// same sequence both times.
///
/// # Example
///
/// ```
/// use trueno_dobfs::{CsrGraph, Graph, NodeId};
///
/// let graph = CsrGraph::from_edge_list(&[(NodeId(0), NodeId(1)), (NodeId(2), NodeId(1))]).unwrap();
///
/// assert_eq!(graph.num_edges_directed(), 2);
/// assert_eq!(graph.out_degree(NodeId(0)), 1);
/// let callers: Vec<_> = graph.in_neigh(NodeId(1)).collect();
/// assert_eq!(callers, vec![NodeId(0), NodeId(2)]);
/// ```
pub trait Graph {
    /// Number of vertices
    fn num_nodes(&self) -> usize;

    /// Number of directed edges (each edge counted once, in its own direction)
    fn num_edges_directed(&self) -> usize;

    /// Number of outgoing edges of `v`
    fn out_degree(&self, v: NodeId) -> usize;

    /// Targets of the outgoing edges of `v`
    fn out_neigh(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_;

    /// Sources of the incoming edges of `v`
    fn in_neigh(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_;

    /// All vertex IDs in ascending order
    #[allow(clippy::cast_possible_truncation)] // vertex IDs are u32 by construction
    fn vertices(&self) -> impl Iterator<Item = NodeId> {
        (0..self.num_nodes()).map(|v| NodeId(v as u32))
    }
}

impl<G: Graph> Graph for &G {
    fn num_nodes(&self) -> usize {
        (**self).num_nodes()
    }

    fn num_edges_directed(&self) -> usize {
        (**self).num_edges_directed()
    }

    fn out_degree(&self, v: NodeId) -> usize {
        (**self).out_degree(v)
    }

    fn out_neigh(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        (**self).out_neigh(v)
    }

    fn in_neigh(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        (**self).in_neigh(v)
    }
}
