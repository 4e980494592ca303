//! Traversal source selection for benchmark trials

use crate::graph::Graph;
use crate::storage::NodeId;
use anyhow::{ensure, Context, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Default seed for random source selection
pub const DEFAULT_SOURCE_SEED: u64 = 27_491_095;

/// Picks one traversal source per trial
///
/// Returns the fixed source every time if one is given; otherwise draws
/// uniformly random vertices with at least one out-edge, so that every trial
/// traverses something.
///
/// # Example
///
/// ```
/// use trueno_dobfs::algorithms::SourcePicker;
/// use trueno_dobfs::{CsrGraph, Graph, NodeId};
///
/// let graph = CsrGraph::with_num_nodes(4, &[(NodeId(2), NodeId(3))]).unwrap();
/// let mut picker = SourcePicker::new(&graph, None).unwrap();
///
/// // Vertex 2 is the only one with an out-edge
/// assert_eq!(picker.pick_next(), NodeId(2));
/// ```
#[derive(Debug)]
pub struct SourcePicker<'g, G> {
    graph: &'g G,
    fixed: Option<NodeId>,
    num_nodes: u32,
    rng: SmallRng,
}

impl<'g, G: Graph> SourcePicker<'g, G> {
    /// Create a picker seeded with [`DEFAULT_SOURCE_SEED`]
    ///
    /// # Errors
    ///
    /// Returns error if no source is fixed and the graph has no edges
    pub fn new(graph: &'g G, fixed: Option<NodeId>) -> Result<Self> {
        Self::with_seed(graph, fixed, DEFAULT_SOURCE_SEED)
    }

    /// Create a picker with an explicit seed
    ///
    /// # Errors
    ///
    /// Returns error if no source is fixed and the graph has no edges, or if
    /// the graph has more vertices than the `u32` ID space
    pub fn with_seed(graph: &'g G, fixed: Option<NodeId>, seed: u64) -> Result<Self> {
        ensure!(
            fixed.is_some() || graph.num_edges_directed() > 0,
            "Cannot pick a random source: graph has no edges"
        );
        let num_nodes = u32::try_from(graph.num_nodes())
            .context("Graph exceeds the u32 vertex ID space")?;

        Ok(Self {
            graph,
            fixed,
            num_nodes,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Source for the next trial
    pub fn pick_next(&mut self) -> NodeId {
        if let Some(source) = self.fixed {
            return source;
        }

        // Terminates: at least one vertex has an out-edge
        loop {
            let candidate = NodeId(self.rng.random_range(0..self.num_nodes));
            if self.graph.out_degree(candidate) > 0 {
                return candidate;
            }
        }
    }
}
