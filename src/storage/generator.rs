//! Synthetic graph generation for benchmarking
//!
//! Uniform random graphs in the style of the GAP `-u` generator: `2^scale`
//! vertices and `degree * 2^scale` directed edges whose endpoints are drawn
//! independently and uniformly. Self-loops and duplicate edges are kept, as
//! they are legal in the traversal's input model.

use super::{CsrGraph, NodeId};
use anyhow::{ensure, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Largest supported scale (vertex IDs must fit in `u32` and the parent
/// encoding in `i32`)
pub const MAX_SCALE: u32 = 30;

/// Generate the edge list of a uniform random graph
///
/// # Arguments
///
/// * `scale` - log2 of the number of vertices
/// * `degree` - average out-degree
/// * `seed` - seed for the [pseudorandom number generator](SmallRng)
///
/// # Errors
///
/// Returns error if `scale` exceeds [`MAX_SCALE`]
pub fn uniform_random_edges(scale: u32, degree: usize, seed: u64) -> Result<Vec<(NodeId, NodeId)>> {
    ensure!(scale <= MAX_SCALE, "scale {scale} exceeds maximum {MAX_SCALE}");

    let num_nodes = 1_u32 << scale;
    let num_edges = (num_nodes as usize) * degree;
    let mut rng = SmallRng::seed_from_u64(seed);

    Ok((0..num_edges)
        .map(|_| {
            (
                NodeId(rng.random_range(0..num_nodes)),
                NodeId(rng.random_range(0..num_nodes)),
            )
        })
        .collect())
}

/// Build a uniform random graph with exactly `2^scale` vertices
///
/// # Errors
///
/// Returns error if `scale` exceeds [`MAX_SCALE`]
///
/// # Example
///
/// ```
/// use trueno_dobfs::{storage::uniform_random, Graph};
///
/// let graph = uniform_random(6, 4, 42).unwrap();
/// assert_eq!(graph.num_nodes(), 64);
/// assert_eq!(graph.num_edges_directed(), 256);
/// ```
pub fn uniform_random(scale: u32, degree: usize, seed: u64) -> Result<CsrGraph> {
    let edges = uniform_random_edges(scale, degree, seed)?;
    CsrGraph::with_num_nodes(1_usize << scale, &edges)
}
