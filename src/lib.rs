//! trueno-dobfs: direction-optimizing breadth-first search with memory-traffic accounting
//!
//! # Overview
//!
//! trueno-dobfs runs the hybrid push/pull BFS of Beamer et al. over static
//! directed graphs stored in forward + reverse CSR form. Every traversal can
//! optionally record each modeled memory access, which yields an estimate
//! of bytes moved and the edges-per-byte intensity used for roofline-style
//! analysis.
//!
//! # Quick Start
//!
//! ```
//! use trueno_dobfs::algorithms::{
//!     bfs_verifier, dobfs_instrumented, DobfsConfig, MemMetrics, TraversalReport,
//! };
//! use trueno_dobfs::{storage::uniform_random, NodeId};
//!
//! # fn main() -> anyhow::Result<()> {
//! let graph = uniform_random(10, 8, 1)?;
//!
//! let mut metrics = MemMetrics::new();
//! let run = dobfs_instrumented(&graph, NodeId(0), &DobfsConfig::default(), &mut metrics)?;
//! assert!(bfs_verifier(&graph, NodeId(0), &run.parent));
//!
//! let report = TraversalReport::from_run(&run, metrics);
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Storage**: CSR graphs, Parquet persistence, uniform random generator
//! - **Frontier**: `SlidingQueue` (top-down) and `Bitmap` (bottom-up)
//! - **Algorithms**: step kernels, orchestrator, accounting, verifier
//! - **Harness**: multi-trial benchmark driver behind the `dobfs` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod harness;
pub mod storage;

// Re-export core types
pub use algorithms::{bfs_verifier, dobfs, dobfs_instrumented, BfsRun, DobfsConfig};
pub use error::BfsError;
pub use graph::Graph;
pub use storage::{CsrGraph, NodeId};

// Error type
pub use anyhow::{Error, Result};
