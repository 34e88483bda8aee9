//! Error types for ordering operations
//!
//! Every failure here is fatal for the generation run: a cyclic or
//! dangling input is a structural defect in upstream graph population,
//! not a transient condition, and no partial order is ever returned.

use crate::graph::NodeId;
use thiserror::Error;

/// Result type for ordering operations
pub type OrderResult<T> = Result<T, OrderError>;

/// Errors that can occur while computing the emission order
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum OrderError {
    /// The subgraph of ordering-relevant references contains a cycle
    #[error("node graph is circular on the ordering references ({placed} of {total} nodes placed)")]
    CycleDetected {
        /// Nodes placed before the ready queue drained
        placed: usize,
        /// Total nodes in the set
        total: usize,
    },

    /// An ordering-relevant reference points at a node that is not in the set
    #[error("reference {src} -> {target} does not resolve to a known node")]
    UnresolvedReference {
        /// Source endpoint of the offending reference
        src: NodeId,
        /// Target endpoint of the offending reference
        target: NodeId,
    },

    /// The designated hierarchical root type is not in the node set
    #[error("hierarchical root not found: {root}")]
    RootNotFound {
        /// The missing root id
        root: NodeId,
    },
}

impl OrderError {
    /// Creates a cycle detected error
    pub fn cycle(placed: usize, total: usize) -> Self {
        Self::CycleDetected { placed, total }
    }

    /// Creates an unresolved reference error
    pub fn unresolved_reference(source: NodeId, target: NodeId) -> Self {
        Self::UnresolvedReference { src: source, target }
    }

    /// Creates a root not found error
    pub fn root_not_found(root: NodeId) -> Self {
        Self::RootNotFound { root }
    }
}
