//! Error types for emission

use crate::graph::NodeId;
use crate::order::OrderError;
use thiserror::Error;

/// Result type for emission operations
pub type EmitResult<T> = Result<T, EmitError>;

/// Errors that can occur while emitting the ordered artifact
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// Computing the emission order failed
    #[error("ordering failed")]
    Order(#[from] OrderError),

    /// Writing to the output sink failed
    #[error("write failed")]
    Io(#[from] std::io::Error),

    /// The supplied order names a node the node set does not contain
    ///
    /// Only possible when an [`EmissionOrder`](crate::order::EmissionOrder)
    /// is paired with a node set it was not computed from.
    #[error("emission order refers to unknown node {node}")]
    UnknownNode {
        /// The unknown identity
        node: NodeId,
    },
}
