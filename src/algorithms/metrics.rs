//! Memory-traffic accounting for roofline-style analysis
//!
//! Every modeled memory access made by the traversal kernels is recorded into
//! an accounting context passed down explicitly. [`MemMetrics`] tallies one
//! counter per [`Access`] category; [`NoTraffic`] discards everything and
//! compiles away, which is how the plain (uninstrumented) traversal runs.
//!
//! Counters only ever increase. There is no reset: build a fresh
//! [`MemMetrics`] per traversal.

use crate::frontier::bitmap::WORD_BYTES;
use std::fmt;

/// Bytes per vertex ID (neighbor indices, parent entries, queue slots)
pub const VERTEX_BYTES: usize = std::mem::size_of::<u32>();

const NUM_CATEGORIES: usize = 8;

/// Modeled memory access categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// CSR neighbor index load (one per examined edge)
    NeighborIndexRead,
    /// Parent array read
    ParentRead,
    /// Parent array write on discovery
    ParentWrite,
    /// Vertex appended to the sliding queue
    FrontierPush,
    /// Frontier bitmap `get_bit`
    BitmapRead,
    /// Frontier bitmap `set_bit`
    BitmapWrite,
    /// Visited-byte array read
    VisitedByteRead,
    /// Visited-byte array write
    VisitedByteWrite,
}

impl Access {
    /// All categories in report order
    pub const ALL: [Access; NUM_CATEGORIES] = [
        Access::NeighborIndexRead,
        Access::ParentRead,
        Access::ParentWrite,
        Access::FrontierPush,
        Access::BitmapRead,
        Access::BitmapWrite,
        Access::VisitedByteRead,
        Access::VisitedByteWrite,
    ];

    /// Bytes moved by one access of this category
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Access::NeighborIndexRead
            | Access::ParentRead
            | Access::ParentWrite
            | Access::FrontierPush => VERTEX_BYTES,
            Access::BitmapRead | Access::BitmapWrite => WORD_BYTES,
            Access::VisitedByteRead | Access::VisitedByteWrite => 1,
        }
    }

    /// Short counter name used in the `[mem]` report line
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Access::NeighborIndexRead => "col_reads",
            Access::ParentRead => "parent_reads",
            Access::ParentWrite => "parent_writes",
            Access::FrontierPush => "frontier_pushes",
            Access::BitmapRead => "bitmap_reads",
            Access::BitmapWrite => "bitmap_writes",
            Access::VisitedByteRead => "visited_reads",
            Access::VisitedByteWrite => "visited_writes",
        }
    }
}

/// Sink for modeled memory accesses
pub trait MemTraffic {
    /// Record one access of the given category
    fn record(&mut self, access: Access);
}

impl<M: MemTraffic + ?Sized> MemTraffic for &mut M {
    #[inline]
    fn record(&mut self, access: Access) {
        (**self).record(access);
    }
}

/// Accounting context that discards every access
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoTraffic;

impl MemTraffic for NoTraffic {
    #[inline(always)]
    fn record(&mut self, _access: Access) {}
}

/// Per-category access counters
///
/// # Example
///
/// ```
/// use trueno_dobfs::algorithms::metrics::{Access, MemMetrics, MemTraffic};
///
/// let mut metrics = MemMetrics::new();
/// metrics.record(Access::BitmapRead);
/// metrics.record(Access::VisitedByteWrite);
///
/// assert_eq!(metrics.get(Access::BitmapRead), 1);
/// assert_eq!(metrics.bytes_estimate(), 8 + 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemMetrics {
    counts: [u64; NUM_CATEGORIES],
}

impl MemMetrics {
    /// All counters at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for one category
    #[must_use]
    pub fn get(&self, access: Access) -> u64 {
        self.counts[access as usize]
    }

    /// `(category, count)` pairs in report order
    pub fn iter(&self) -> impl Iterator<Item = (Access, u64)> + '_ {
        Access::ALL
            .into_iter()
            .map(move |access| (access, self.get(access)))
    }

    /// Total accesses across all categories
    #[must_use]
    pub fn total_accesses(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Estimated bytes moved: Σ count × width over all categories
    #[must_use]
    pub fn bytes_estimate(&self) -> u64 {
        self.iter()
            .map(|(access, count)| count * access.width() as u64)
            .sum()
    }
}

impl MemTraffic for MemMetrics {
    #[inline]
    fn record(&mut self, access: Access) {
        self.counts[access as usize] += 1;
    }
}

impl fmt::Display for MemMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[mem]")?;
        for (access, count) in self.iter() {
            write!(f, " {}={count}", access.label())?;
        }
        write!(f, " total={}", self.total_accesses())
    }
}
