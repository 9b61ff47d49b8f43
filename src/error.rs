//! Error types for graph and compression operations.

use crate::id_gen::{GraphId, Uid};
use thiserror::Error;

/// Contract violations reported by [`Graph`](crate::Graph) operations and
/// by decompression.
///
/// None of these are transient: they describe a call that was invalid for the
/// graph it was made against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The operation requires a node owned by this graph.
    #[error("node {node} is not owned by graph {graph}")]
    OwnershipViolation { node: Uid, graph: GraphId },

    /// The node or edge does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A structural guarantee of the graph (or its topology) would be broken.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GraphError::NotFound("edge #1 -> #2".into());
        assert_eq!(err.to_string(), "not found: edge #1 -> #2");

        let err = GraphError::InvariantViolation("empty snapshot".into());
        assert!(err.to_string().contains("empty snapshot"));
    }
}
