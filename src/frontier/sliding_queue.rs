//! Windowed append-only vertex queue for level-synchronous traversal
//!
//! Based on the GAP Benchmark Suite `SlidingQueue` (Beamer et al., 2015).
//!
//! ```text
//!   consumed     window (current level)   appended (next level)
//! [ . . . . . | a b c d e f             | g h i ...            ]
//!             ^ out_start               ^ out_end              ^ tail
//! ```
//!
//! Iteration only ever sees `[out_start, out_end)`. Appends land past
//! `out_end` and stay invisible until [`SlidingQueue::slide_window`], so a
//! vertex discovered while expanding level k can never be expanded as part
//! of level k.

use crate::storage::NodeId;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// Default number of vertices a [`QueueBuffer`] batches before flushing
pub const DEFAULT_LOCAL_SIZE: usize = 16_384;

/// Append-only vertex sequence with a sliding visible window
///
/// Backing storage is allocated once. Each vertex is enqueued at most once
/// per traversal, so a capacity of `num_nodes` is always sufficient.
///
/// # Example
///
/// ```
/// use trueno_dobfs::frontier::SlidingQueue;
/// use trueno_dobfs::NodeId;
///
/// let mut queue = SlidingQueue::with_capacity(8);
/// queue.push_back(NodeId(3));
/// assert!(queue.is_empty()); // not visible until the window slides
///
/// queue.slide_window();
/// assert_eq!(queue.iter().collect::<Vec<_>>(), vec![NodeId(3)]);
/// ```
#[derive(Debug)]
pub struct SlidingQueue {
    shared: Vec<AtomicU32>,
    /// Next free slot; advanced atomically by buffer flushes
    tail: AtomicUsize,
    out_start: usize,
    out_end: usize,
}

impl SlidingQueue {
    /// Create an empty queue able to hold `capacity` appends in total
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shared: (0..capacity).map(|_| AtomicU32::new(0)).collect(),
            tail: AtomicUsize::new(0),
            out_start: 0,
            out_end: 0,
        }
    }

    /// Append one vertex directly to the tail
    ///
    /// # Panics
    ///
    /// Panics if the total number of appends exceeds the capacity
    pub fn push_back(&mut self, v: NodeId) {
        let slot = *self.tail.get_mut();
        self.check_capacity(slot, 1);
        *self.shared[slot].get_mut() = v.0;
        *self.tail.get_mut() = slot + 1;
    }

    /// Make everything appended since the last slide the current window
    pub fn slide_window(&mut self) {
        self.out_start = self.out_end;
        self.out_end = *self.tail.get_mut();
    }

    /// Iterate the current window
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.shared[self.out_start..self.out_end]
            .iter()
            .map(|slot| NodeId(slot.load(Ordering::Relaxed)))
    }

    /// Number of vertices in the current window
    #[must_use]
    pub fn len(&self) -> usize {
        self.out_end - self.out_start
    }

    /// Whether the current window is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.out_start == self.out_end
    }

    /// Reserve `items.len()` slots with one atomic bump and fill them
    fn append(&self, items: &[NodeId]) {
        let start = self.tail.fetch_add(items.len(), Ordering::Relaxed);
        self.check_capacity(start, items.len());
        for (slot, v) in self.shared[start..start + items.len()].iter().zip(items) {
            slot.store(v.0, Ordering::Relaxed);
        }
    }

    fn check_capacity(&self, start: usize, count: usize) {
        assert!(
            start + count <= self.shared.len(),
            "SlidingQueue overflow: {} appends exceed capacity {}",
            start + count,
            self.shared.len()
        );
    }
}

/// Caller-local batch of appends destined for a shared [`SlidingQueue`]
///
/// Appends are published to the queue in one reservation when the local
/// buffer fills up or on [`QueueBuffer::flush`]. Order within a level is
/// irrelevant to the traversal, so batching only reorders appends.
#[derive(Debug)]
pub struct QueueBuffer<'a> {
    queue: &'a SlidingQueue,
    local: Vec<NodeId>,
    local_size: usize,
}

impl<'a> QueueBuffer<'a> {
    /// Create a buffer with [`DEFAULT_LOCAL_SIZE`] slots
    #[must_use]
    pub fn new(queue: &'a SlidingQueue) -> Self {
        Self::with_local_size(queue, DEFAULT_LOCAL_SIZE)
    }

    /// Create a buffer that flushes every `local_size` appends
    #[must_use]
    pub fn with_local_size(queue: &'a SlidingQueue, local_size: usize) -> Self {
        let local_size = local_size.max(1);
        Self {
            queue,
            local: Vec::with_capacity(local_size),
            local_size,
        }
    }

    /// Buffer one vertex, flushing first if the buffer is full
    pub fn push_back(&mut self, v: NodeId) {
        if self.local.len() == self.local_size {
            self.flush();
        }
        self.local.push(v);
    }

    /// Publish all buffered vertices to the shared queue
    pub fn flush(&mut self) {
        if !self.local.is_empty() {
            self.queue.append(&self.local);
            self.local.clear();
        }
    }
}

impl Drop for QueueBuffer<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}
