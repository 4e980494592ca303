//! Graph storage layer
//!
//! Provides the CSR graph representation, Parquet persistence and synthetic
//! graph generation.

pub mod csr;
pub mod generator;
#[cfg(feature = "storage")]
pub mod parquet;

pub use csr::{CsrGraph, NodeId};
pub use generator::{uniform_random, uniform_random_edges};
