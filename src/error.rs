//! Traversal error conditions
//!
//! The traversal itself has no recoverable failure modes; these are the
//! preconditions checked before any traversal state is allocated.

use thiserror::Error;

/// Errors rejected by the traversal entry points
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BfsError {
    /// Source vertex lies outside `[0, num_nodes)`
    #[error("source vertex {vertex} out of range for graph with {num_nodes} nodes")]
    InvalidSource {
        /// Requested source vertex
        vertex: u32,
        /// Number of vertices in the graph
        num_nodes: usize,
    },

    /// A switching-heuristic divisor was zero
    #[error("tuning parameter {name} must be positive (got {value})")]
    InvalidTuning {
        /// Parameter name (`alpha` or `beta`)
        name: &'static str,
        /// Rejected value
        value: u32,
    },

    /// Graph too large for the signed 32-bit parent encoding
    #[error("graph has {num_nodes} nodes; parent encoding supports at most {}", i32::MAX)]
    TooManyNodes {
        /// Number of vertices in the graph
        num_nodes: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BfsError::InvalidSource {
            vertex: 7,
            num_nodes: 4,
        };
        assert_eq!(
            err.to_string(),
            "source vertex 7 out of range for graph with 4 nodes"
        );

        let err = BfsError::InvalidTuning {
            name: "alpha",
            value: 0,
        };
        assert!(err.to_string().contains("alpha"));
    }
}
