//! Parent/visited state, one signed entry per vertex
//!
//! Encoding while a traversal runs:
//!
//! | value              | meaning                                      |
//! |--------------------|----------------------------------------------|
//! | `== v`             | `v` is the source (self-parent)              |
//! | `>= 0`, `!= v`     | discovered, value is the parent's ID         |
//! | `-d` (`d >= 1`)    | undiscovered, out-degree `d`                 |
//! | `-1`               | undiscovered, out-degree 1 or isolated       |
//!
//! The stashed degree feeds the scout count when the vertex is claimed, so
//! the top-down step never has to look the degree up again. An entry moves
//! from negative to non-negative exactly once, and only through
//! [`ParentArray::try_claim`] (a compare-and-swap) or by the single
//! bottom-up actor responsible for that vertex.

use crate::graph::Graph;
use crate::storage::NodeId;
use std::sync::atomic::{AtomicI32, Ordering};

/// Public marker for a vertex not reached by the traversal
pub const UNREACHED: i32 = -1;

/// Per-vertex parent entries with atomic claim
#[derive(Debug)]
pub struct ParentArray {
    slots: Vec<AtomicI32>,
}

impl ParentArray {
    /// Initialize every vertex as undiscovered, stashing `-out_degree`
    /// (or `-1` for vertices without out-edges)
    ///
    /// Callers must ensure `graph.num_nodes() <= i32::MAX`.
    pub fn init<G: Graph>(graph: &G) -> Self {
        Self {
            slots: graph
                .vertices()
                .map(|v| AtomicI32::new(undiscovered(graph.out_degree(v))))
                .collect(),
        }
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Raw encoded entry for `v`
    #[must_use]
    pub fn get(&self, v: NodeId) -> i32 {
        self.slots[v.index()].load(Ordering::Relaxed)
    }

    /// Whether `v` has been discovered
    #[must_use]
    pub fn is_discovered(&self, v: NodeId) -> bool {
        self.get(v) >= 0
    }

    /// Claim `v` for `parent` if its entry still holds `expected`
    ///
    /// Returns `false` when another writer got there first; that claim is
    /// equally valid, so the loser simply moves on.
    pub fn try_claim(&self, v: NodeId, expected: i32, parent: NodeId) -> bool {
        self.slots[v.index()]
            .compare_exchange(
                expected,
                encode(parent),
                Ordering::Relaxed,
                Ordering::Relaxed,
            )
            .is_ok()
    }

    /// Record `parent` for `v` unconditionally
    ///
    /// Only valid when the caller is the sole writer for `v` (the bottom-up
    /// step examines each vertex exactly once).
    pub fn set(&self, v: NodeId, parent: NodeId) {
        self.slots[v.index()].store(encode(parent), Ordering::Relaxed);
    }

    /// Finish the traversal: collapse every leftover `< -1` to [`UNREACHED`]
    ///
    /// The result is exactly `{-1 = unreached, v = source, other >= 0 = parent}`.
    #[must_use]
    pub fn into_normalized(self) -> Vec<i32> {
        self.slots
            .into_iter()
            .map(|slot| slot.into_inner().max(UNREACHED))
            .collect()
    }
}

/// Scout weight carried by an undiscovered entry (its stashed out-degree)
#[must_use]
pub fn scout_weight(encoded: i32) -> i64 {
    -i64::from(encoded)
}

fn undiscovered(out_degree: usize) -> i32 {
    match out_degree {
        0 => UNREACHED,
        d => i32::try_from(d).map_or(i32::MIN, |d| -d),
    }
}

#[allow(clippy::cast_possible_wrap)] // vertex IDs are bounded by i32::MAX before allocation
fn encode(v: NodeId) -> i32 {
    v.0 as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CsrGraph;

    fn star_plus_isolated() -> CsrGraph {
        // 0 → {1, 2, 3}, 1 → 2, vertex 4 isolated
        CsrGraph::with_num_nodes(
            5,
            &[
                (NodeId(0), NodeId(1)),
                (NodeId(0), NodeId(2)),
                (NodeId(0), NodeId(3)),
                (NodeId(1), NodeId(2)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_init_stashes_negative_degree() {
        let parent = ParentArray::init(&star_plus_isolated());

        assert_eq!(parent.len(), 5);
        assert_eq!(parent.get(NodeId(0)), -3);
        assert_eq!(parent.get(NodeId(1)), -1);
        assert_eq!(parent.get(NodeId(2)), UNREACHED);
        assert_eq!(parent.get(NodeId(4)), UNREACHED);
        assert!(!parent.is_discovered(NodeId(0)));
    }

    #[test]
    fn test_claim_succeeds_once() {
        let parent = ParentArray::init(&star_plus_isolated());
        let old = parent.get(NodeId(1));

        assert!(parent.try_claim(NodeId(1), old, NodeId(0)));
        assert!(!parent.try_claim(NodeId(1), old, NodeId(3)));
        assert_eq!(parent.get(NodeId(1)), 0);
        assert_eq!(scout_weight(old), 1);
    }

    #[test]
    fn test_normalize_collapses_degree_stash() {
        let parent = ParentArray::init(&star_plus_isolated());
        parent.set(NodeId(2), NodeId(0));

        assert_eq!(parent.into_normalized(), vec![-1, -1, 0, -1, -1]);
    }

    #[test]
    fn test_concurrent_claims_have_single_winner() {
        let graph = star_plus_isolated();
        let parent = ParentArray::init(&graph);
        let old = parent.get(NodeId(3));

        let wins: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..3)
                .map(|p| {
                    let parent = &parent;
                    s.spawn(move || usize::from(parent.try_claim(NodeId(3), old, NodeId(p))))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(wins, 1);
        assert!(parent.is_discovered(NodeId(3)));
    }
}
