//! Direction-optimizing BFS and its supporting analysis
//!
//! - [`dobfs()`] / [`dobfs_instrumented`]: the traversal
//! - [`steps`]: top-down and bottom-up step kernels, frontier converters
//! - [`metrics`] / [`report`]: memory-traffic accounting and roofline report
//! - [`verify`]: independent verifier and tree statistics
//! - [`source`]: per-trial source selection

pub mod dobfs;
pub mod metrics;
pub mod parent;
pub mod report;
pub mod source;
pub mod steps;
pub mod verify;

pub use dobfs::{dobfs, dobfs_instrumented, BfsRun, DobfsConfig, DEFAULT_ALPHA, DEFAULT_BETA};
pub use metrics::{Access, MemMetrics, MemTraffic, NoTraffic};
pub use parent::{ParentArray, UNREACHED};
pub use report::TraversalReport;
pub use source::SourcePicker;
pub use steps::{bitmap_to_queue, bu_step, queue_to_bitmap, td_step};
pub use verify::{bfs_depths, bfs_verifier, check_bfs_tree, print_bfs_stats, BfsTreeStats, VerifyError};
