//! Error types shared by every graph variant and the conversion layer.

use std::fmt;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("node {0} is not in the graph")]
    NodeNotFound(String),

    #[error("edge {0} is not in the graph")]
    EdgeNotFound(String),

    #[error("invalid edge tuple: {0}")]
    InvalidEdgeTuple(String),

    #[error("invalid attribute container: {0}")]
    InvalidAttributeContainer(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("frozen graph can't be modified")]
    FrozenGraphMutation,

    #[error("conversion failed: {0}")]
    ConversionFailure(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// A missing-node error for the given node id.
    pub fn node_not_found<N: fmt::Debug>(n: &N) -> Self {
        GraphError::NodeNotFound(format!("{n:?}"))
    }

    /// A missing-edge error for the pair (u, v).
    pub fn edge_not_found<N: fmt::Debug>(u: &N, v: &N) -> Self {
        GraphError::EdgeNotFound(format!("{u:?}-{v:?}"))
    }

    /// A missing-edge error for the pair (u, v) under a specific key.
    pub fn edge_key_not_found<N: fmt::Debug, K: fmt::Debug>(u: &N, v: &N, key: &K) -> Self {
        GraphError::EdgeNotFound(format!("{u:?}-{v:?} with key {key:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GraphError::node_not_found(&"a");
        assert_eq!(err.to_string(), "node \"a\" is not in the graph");

        let err = GraphError::edge_not_found(&1, &2);
        assert_eq!(err.to_string(), "edge 1-2 is not in the graph");

        let err = GraphError::FrozenGraphMutation;
        assert_eq!(err.to_string(), "frozen graph can't be modified");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            GraphError::node_not_found(&7),
            GraphError::NodeNotFound("7".to_string())
        );
        assert_ne!(
            GraphError::edge_not_found(&1, &2),
            GraphError::edge_not_found(&2, &1)
        );
    }
}
