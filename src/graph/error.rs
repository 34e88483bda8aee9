//! Error types for node set population and validation
//!
//! This module hides error representation details and provides a unified
//! error type for graph construction and validation.

use super::NodeId;
use thiserror::Error;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while populating or validating a node set
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum GraphError {
    /// A node was added with an identity that is already in use
    #[error("duplicate node id: {node}")]
    DuplicateNode {
        /// The reused identity
        node: NodeId,
    },

    /// A reference endpoint does not resolve to a node in the set
    #[error("reference {src} -> {target} does not resolve: {missing} is not in the node set")]
    UnresolvedReference {
        /// Source endpoint of the offending reference
        src: NodeId,
        /// Target endpoint of the offending reference
        target: NodeId,
        /// The endpoint that failed to resolve
        missing: NodeId,
    },

    /// A reference was typed by a node that is not a `ReferenceType`
    #[error("node {node} is not a ReferenceType and cannot type a reference")]
    NotAReferenceType {
        /// The offending type node
        node: NodeId,
    },

    /// A node lookup failed
    #[error("node not found: {node}")]
    NodeNotFound {
        /// The identity that was not found
        node: NodeId,
    },
}

impl GraphError {
    /// Creates a duplicate node error
    pub fn duplicate_node(node: NodeId) -> Self {
        Self::DuplicateNode { node }
    }

    /// Creates an unresolved reference error
    pub fn unresolved_reference(source: NodeId, target: NodeId, missing: NodeId) -> Self {
        Self::UnresolvedReference {
            src: source,
            target,
            missing,
        }
    }

    /// Creates a not-a-reference-type error
    pub fn not_a_reference_type(node: NodeId) -> Self {
        Self::NotAReferenceType { node }
    }

    /// Creates a node not found error
    pub fn node_not_found(node: NodeId) -> Self {
        Self::NodeNotFound { node }
    }
}
