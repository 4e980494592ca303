//! CSR (Compressed Sparse Row) graph representation
//!
//! Based on the GAP Benchmark Suite graph layout (Beamer et al., arXiv 2015):
//! a forward CSR for out-neighbors and a reverse CSR for in-neighbors, so
//! both push (top-down) and pull (bottom-up) traversal read contiguous slices.
//!
//! # CSR Format
//!
//! ```text
//! Graph: 0 → 1, 0 → 2, 1 → 2
//!
//! Forward CSR:
//!   row_offsets: [0, 2, 3, 3]  // Node 0: edges [0..2), Node 1: [2..3), Node 2: [3..3)
//!   col_indices: [1, 2, 2]
//!
//! Reverse CSR:
//!   rev_row_offsets: [0, 0, 1, 3]
//!   rev_col_indices: [0, 0, 1]
//! ```

use crate::graph::Graph;
use anyhow::{anyhow, ensure, Result};
use std::fmt;

/// Node identifier (zero-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of this node in dense per-vertex arrays
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static directed graph in forward + reverse CSR form
///
/// Optimized for:
/// - O(1) access to outgoing edges (via forward CSR)
/// - O(1) access to incoming edges (via reverse CSR)
/// - Sequential neighbor scans in both traversal directions
///
/// # Example
///
/// ```
/// use trueno_dobfs::{CsrGraph, NodeId};
///
/// let graph = CsrGraph::from_edge_list(&[(NodeId(0), NodeId(1)), (NodeId(0), NodeId(2))]).unwrap();
///
/// let neighbors = graph.outgoing_neighbors(NodeId(0)).unwrap();
/// assert_eq!(neighbors.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    /// Forward CSR: node i's out-edges are `col_indices[row_offsets[i]..row_offsets[i + 1]]`
    /// Length: `num_nodes` + 1
    row_offsets: Vec<usize>,

    /// Forward CSR: edge targets
    /// Length: `num_edges`
    col_indices: Vec<u32>,

    /// Reverse CSR: node i's in-edges start at `rev_row_offsets[i]`
    /// Length: `num_nodes` + 1
    rev_row_offsets: Vec<usize>,

    /// Reverse CSR: edge sources
    /// Length: `num_edges`
    rev_col_indices: Vec<u32>,
}

impl CsrGraph {
    /// Create new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            row_offsets: vec![0],
            col_indices: Vec::new(),
            rev_row_offsets: vec![0],
            rev_col_indices: Vec::new(),
        }
    }

    /// Create graph from edge list, sized to the largest endpoint
    ///
    /// # Errors
    ///
    /// Returns error if a node ID does not fit the vertex ID space
    pub fn from_edge_list(edges: &[(NodeId, NodeId)]) -> Result<Self> {
        let num_nodes = edges
            .iter()
            .flat_map(|(src, dst)| [src.index(), dst.index()])
            .max()
            .map_or(0, |max| max + 1);

        Self::with_num_nodes(num_nodes, edges)
    }

    /// Create graph with an explicit vertex count
    ///
    /// Vertices without edges (including trailing ones past the largest
    /// endpoint) are kept as isolated vertices.
    ///
    /// # Arguments
    ///
    /// * `num_nodes` - Number of vertices; IDs are `0..num_nodes`
    /// * `edges` - Directed `(source, target)` pairs; duplicates are kept
    ///
    /// # Errors
    ///
    /// Returns error if an edge endpoint is `>= num_nodes` or if `num_nodes`
    /// exceeds the `u32` vertex ID space
    pub fn with_num_nodes(num_nodes: usize, edges: &[(NodeId, NodeId)]) -> Result<Self> {
        ensure!(
            u32::try_from(num_nodes).is_ok(),
            "Graph with {num_nodes} nodes exceeds the u32 vertex ID space"
        );

        if let Some((src, dst)) = edges
            .iter()
            .find(|(src, dst)| src.index() >= num_nodes || dst.index() >= num_nodes)
        {
            return Err(anyhow!(
                "Edge {src} → {dst} out of bounds for graph with {num_nodes} nodes"
            ));
        }

        let (row_offsets, col_indices) = build_csr(num_nodes, edges.iter().copied());
        let (rev_row_offsets, rev_col_indices) =
            build_csr(num_nodes, edges.iter().map(|&(src, dst)| (dst, src)));

        Ok(Self {
            row_offsets,
            col_indices,
            rev_row_offsets,
            rev_col_indices,
        })
    }

    /// Add edge to graph (dynamic insertion)
    ///
    /// Note: For large graphs, use `from_edge_list` for better performance.
    ///
    /// # Errors
    ///
    /// Returns error if an endpoint does not fit the vertex ID space
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId) -> Result<()> {
        let max_node = src.index().max(dst.index());
        ensure!(
            max_node < u32::MAX as usize,
            "Node ID {max_node} exceeds the u32 vertex ID space"
        );
        if max_node >= self.num_nodes() {
            self.expand_to(max_node + 1);
        }

        // Insert forward edge (src → dst) at the end of src's row
        let end = self.row_offsets[src.index() + 1];
        self.col_indices.insert(end, dst.0);
        for offset in &mut self.row_offsets[src.index() + 1..] {
            *offset += 1;
        }

        // Insert reverse edge (dst ← src)
        let rev_end = self.rev_row_offsets[dst.index() + 1];
        self.rev_col_indices.insert(rev_end, src.0);
        for offset in &mut self.rev_row_offsets[dst.index() + 1..] {
            *offset += 1;
        }

        Ok(())
    }

    /// Get outgoing neighbors of a node
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn outgoing_neighbors(&self, node: NodeId) -> Result<&[u32]> {
        if node.index() >= self.num_nodes() {
            return Err(anyhow!("Node ID {} out of bounds", node.0));
        }

        Ok(self.out_slice(node))
    }

    /// Get incoming neighbors of a node
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn incoming_neighbors(&self, node: NodeId) -> Result<&[u32]> {
        if node.index() >= self.num_nodes() {
            return Err(anyhow!("Node ID {} out of bounds", node.0));
        }

        Ok(self.in_slice(node))
    }

    /// Get number of nodes
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.row_offsets.len() - 1
    }

    /// Get number of edges
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.col_indices.len()
    }

    /// Iterate over all edges as `(source, target)` in CSR order
    pub fn iter_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.vertices()
            .flat_map(move |src| self.out_slice(src).iter().map(move |&dst| (src, NodeId(dst))))
    }

    fn out_slice(&self, node: NodeId) -> &[u32] {
        let idx = node.index();
        &self.col_indices[self.row_offsets[idx]..self.row_offsets[idx + 1]]
    }

    fn in_slice(&self, node: NodeId) -> &[u32] {
        let idx = node.index();
        &self.rev_col_indices[self.rev_row_offsets[idx]..self.rev_row_offsets[idx + 1]]
    }

    /// Expand graph to accommodate new nodes
    fn expand_to(&mut self, new_size: usize) {
        let last_offset = *self.row_offsets.last().unwrap_or(&0);
        self.row_offsets.resize(new_size + 1, last_offset);

        let rev_last_offset = *self.rev_row_offsets.last().unwrap_or(&0);
        self.rev_row_offsets.resize(new_size + 1, rev_last_offset);
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph for CsrGraph {
    fn num_nodes(&self) -> usize {
        self.row_offsets.len() - 1
    }

    fn num_edges_directed(&self) -> usize {
        self.col_indices.len()
    }

    fn out_degree(&self, v: NodeId) -> usize {
        self.row_offsets[v.index() + 1] - self.row_offsets[v.index()]
    }

    fn out_neigh(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_slice(v).iter().map(|&u| NodeId(u))
    }

    fn in_neigh(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.in_slice(v).iter().map(|&u| NodeId(u))
    }
}

/// Counting-sort `(row, col)` pairs into CSR offsets and column indices.
/// Columns within a row keep their input order.
fn build_csr(
    num_nodes: usize,
    pairs: impl Iterator<Item = (NodeId, NodeId)> + Clone,
) -> (Vec<usize>, Vec<u32>) {
    let mut row_offsets = vec![0_usize; num_nodes + 1];
    for (row, _) in pairs.clone() {
        row_offsets[row.index() + 1] += 1;
    }
    for i in 0..num_nodes {
        row_offsets[i + 1] += row_offsets[i];
    }

    let mut cursor = row_offsets.clone();
    let mut col_indices = vec![0_u32; row_offsets[num_nodes]];
    for (row, col) in pairs {
        col_indices[cursor[row.index()]] = col.0;
        cursor[row.index()] += 1;
    }

    (row_offsets, col_indices)
}
