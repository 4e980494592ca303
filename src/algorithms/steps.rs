//! Direction-optimizing step kernels and frontier converters
//!
//! Based on "Direction-Optimizing Breadth-First Search" (Beamer, Asanović &
//! Patterson, SC 2012).
//!
//! - [`td_step`]: push. Expand every frontier vertex along its out-edges.
//! - [`bu_step`]: pull. Every undiscovered vertex scans its in-edges for a
//!   frontier parent, stopping at the first hit.
//! - [`queue_to_bitmap`] / [`bitmap_to_queue`]: translate the frontier when
//!   the traversal changes direction.
//!
//! The step kernels add one to `edges_visited` per examined edge. Every
//! function records its modeled memory accesses into the supplied
//! [`MemTraffic`] context.

use super::metrics::{Access, MemTraffic};
use super::parent::{scout_weight, ParentArray};
use crate::frontier::{Bitmap, QueueBuffer, SlidingQueue};
use crate::graph::Graph;

/// Top-down step: expand the current queue window
///
/// Newly discovered vertices are appended past the window; the caller must
/// slide the window to make them the next frontier.
///
/// # Arguments
///
/// * `visited` - Optional visited-byte cache, `1` iff discovered. A set byte
///   skips the parent-array read; a clear byte falls back to the parent
///   array, which stays authoritative.
///
/// # Returns
///
/// The scout count: sum of the out-degrees of the vertices claimed in this
/// step, an upper bound on the edges the next top-down step would examine.
pub fn td_step<G: Graph, M: MemTraffic>(
    graph: &G,
    parent: &ParentArray,
    queue: &SlidingQueue,
    mut visited: Option<&mut [u8]>,
    edges_visited: &mut u64,
    traffic: &mut M,
) -> i64 {
    let mut scout_count = 0;
    let mut lqueue = QueueBuffer::new(queue);

    for u in queue.iter() {
        for v in graph.out_neigh(u) {
            *edges_visited += 1;
            traffic.record(Access::NeighborIndexRead);

            if let Some(visited) = visited.as_deref() {
                traffic.record(Access::VisitedByteRead);
                if visited[v.index()] != 0 {
                    continue;
                }
            }

            let curr_val = parent.get(v);
            traffic.record(Access::ParentRead);
            if curr_val < 0 {
                if let Some(visited) = visited.as_deref_mut() {
                    visited[v.index()] = 1;
                    traffic.record(Access::VisitedByteWrite);
                }
                if parent.try_claim(v, curr_val, u) {
                    lqueue.push_back(v);
                    traffic.record(Access::FrontierPush);
                    scout_count += scout_weight(curr_val);
                }
            }
        }
    }

    lqueue.flush();
    scout_count
}

/// Bottom-up step: find frontier parents for undiscovered vertices
///
/// `next` is cleared on entry and receives every vertex woken in this step.
///
/// # Returns
///
/// The awake count: number of vertices discovered in this step.
pub fn bu_step<G: Graph, M: MemTraffic>(
    graph: &G,
    parent: &ParentArray,
    front: &Bitmap,
    next: &mut Bitmap,
    edges_visited: &mut u64,
    traffic: &mut M,
) -> i64 {
    let mut awake_count = 0;
    next.reset();

    for u in graph.vertices() {
        traffic.record(Access::ParentRead);
        if parent.is_discovered(u) {
            continue;
        }
        for v in graph.in_neigh(u) {
            *edges_visited += 1;
            traffic.record(Access::NeighborIndexRead);
            traffic.record(Access::BitmapRead);
            if front.get_bit(v) {
                parent.set(u, v);
                traffic.record(Access::ParentWrite);
                awake_count += 1;
                next.set_bit(u);
                traffic.record(Access::BitmapWrite);
                break;
            }
        }
    }

    awake_count
}

/// Mark every vertex of the current queue window in `bm`
pub fn queue_to_bitmap<M: MemTraffic>(queue: &SlidingQueue, bm: &Bitmap, traffic: &mut M) {
    for u in queue.iter() {
        bm.set_bit_atomic(u);
        traffic.record(Access::BitmapWrite);
    }
}

/// Enqueue every set bit of `bm` and slide the window onto them
pub fn bitmap_to_queue<G: Graph, M: MemTraffic>(
    graph: &G,
    bm: &Bitmap,
    queue: &mut SlidingQueue,
    traffic: &mut M,
) {
    {
        let mut lqueue = QueueBuffer::new(queue);
        for n in graph.vertices() {
            traffic.record(Access::BitmapRead);
            if bm.get_bit(n) {
                lqueue.push_back(n);
                traffic.record(Access::FrontierPush);
            }
        }
        lqueue.flush();
    }
    queue.slide_window();
}
