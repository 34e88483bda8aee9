//! Node identifier type
//!
//! This module defines the NodeId type which uniquely identifies a node
//! within a node set. A node id is qualified by the index of the namespace
//! it belongs to, plus a numeric or string identifier inside that
//! namespace.
//!
//! # Design Decision
//!
//! Identity is structural rather than a bare string because:
//! 1. Namespace-qualified ids survive merging node sets from several
//!    information models without collisions
//! 2. Numeric ids are the common case and stay cheap to hash and compare
//! 3. The namespace index is what emission drivers need to special-case
//!    base-namespace nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// The namespace-local part of a [`NodeId`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Identifier {
    /// Numeric identifier, rendered as `i=42`
    Numeric(u32),
    /// String identifier, rendered as `s=Name`
    String(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "i={}", n),
            Identifier::String(s) => write!(f, "s={}", s),
        }
    }
}

/// Unique identifier for a node within a node set
///
/// Used as the sole lookup key throughout ordering and emission. Identity
/// is stable for the lifetime of the node set and never reused.
///
/// # Examples
///
/// ```
/// use taxis::NodeId;
///
/// let id = NodeId::numeric(0, 33);
/// assert_eq!(id.namespace(), 0);
/// assert_eq!(id.to_string(), "ns=0;i=33");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Index into the node set's namespace table
    namespace: u16,
    /// Identifier within that namespace
    identifier: Identifier,
}

impl NodeId {
    /// Creates a numeric node id in the given namespace
    pub fn numeric(namespace: u16, value: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(value),
        }
    }

    /// Creates a string node id in the given namespace
    pub fn string(namespace: u16, value: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(value.into()),
        }
    }

    /// Returns the namespace index
    pub fn namespace(&self) -> u16 {
        self.namespace
    }

    /// Returns the namespace-local identifier
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Returns true if the id lives in the base namespace (index 0)
    ///
    /// Emission drivers use this to honor the namespace-zero generation
    /// flag in [`EmitOptions`](crate::emit::EmitOptions).
    pub fn is_base_namespace(&self) -> bool {
        self.namespace == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ns={};{}", self.namespace, self.identifier)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self)
    }
}
