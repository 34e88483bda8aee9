//! Node and reference records
//!
//! This module defines the typed entities of the dependency graph: nodes
//! tagged with a [`NodeClass`], and the directed, typed [`Reference`]
//! records connecting them.
//!
//! A reference between two nodes is modeled as a pair of records: a forward
//! record stored on the source node's outgoing list and an inverse record
//! stored on the target node's incoming list, with source and target
//! swapped. On either list, `source` is always the owning node and `target`
//! the other endpoint, so selection logic can ask "is the other endpoint
//! placed yet" uniformly for both directions.

use super::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of node kinds
///
/// `ReferenceType` is the kind that participates in the reference-type
/// taxonomy: nodes of this class type the edges between all other nodes,
/// and the topological sorter biases them behind ordinary nodes of equal
/// readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeClass {
    Object,
    Variable,
    Method,
    ObjectType,
    VariableType,
    ReferenceType,
    DataType,
    View,
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeClass::Object => "Object",
            NodeClass::Variable => "Variable",
            NodeClass::Method => "Method",
            NodeClass::ObjectType => "ObjectType",
            NodeClass::VariableType => "VariableType",
            NodeClass::ReferenceType => "ReferenceType",
            NodeClass::DataType => "DataType",
            NodeClass::View => "View",
        };
        f.write_str(name)
    }
}

/// A typed, directed reference record between two nodes
///
/// `source` is the node whose list this record lives on; `target` is the
/// other endpoint. The paired inverse record lives on the target node with
/// the endpoints swapped and `is_forward` cleared. Both records share the
/// reference type and the hidden flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Id of the `ReferenceType` node typing this edge
    reference_type: NodeId,
    /// The owning endpoint
    source: NodeId,
    /// The other endpoint
    target: NodeId,
    /// True for the forward record of the pair, false for the inverse
    is_forward: bool,
    /// Hidden references neither constrain ordering nor get emitted
    hidden: bool,
}

impl Reference {
    pub(crate) fn new(
        reference_type: NodeId,
        source: NodeId,
        target: NodeId,
        is_forward: bool,
        hidden: bool,
    ) -> Self {
        Self {
            reference_type,
            source,
            target,
            is_forward,
            hidden,
        }
    }

    /// Returns the id of the node typing this reference
    pub fn reference_type(&self) -> &NodeId {
        &self.reference_type
    }

    /// Returns the owning endpoint
    pub fn source(&self) -> &NodeId {
        &self.source
    }

    /// Returns the other endpoint
    pub fn target(&self) -> &NodeId {
        &self.target
    }

    /// Returns true for the forward record of the pair
    pub fn is_forward(&self) -> bool {
        self.is_forward
    }

    /// Returns true if the reference is excluded from ordering and emission
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.is_forward { "->" } else { "<-" };
        write!(
            f,
            "{} {} {} ({})",
            self.source, arrow, self.target, self.reference_type
        )
    }
}

/// A node in the dependency graph
///
/// Carries its identity, kind tag, human-readable browse name, visibility
/// flag, and the two reference lists. Hidden nodes still participate in
/// ordering but are excluded from emitted output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identity, the sole lookup key
    id: NodeId,
    /// Kind tag
    class: NodeClass,
    /// Human-readable label, unique enough for driver lookups
    browse_name: String,
    /// Excluded from emission when set
    hidden: bool,
    /// Forward reference records (`source` is this node)
    outgoing: Vec<Reference>,
    /// Inverse reference records (`source` is this node, `target` the
    /// node the paired forward record originates from)
    incoming: Vec<Reference>,
}

impl Node {
    /// Creates a new visible node with no references
    pub fn new(id: NodeId, class: NodeClass, browse_name: impl Into<String>) -> Self {
        Self {
            id,
            class,
            browse_name: browse_name.into(),
            hidden: false,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Returns the node id
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the node kind
    pub fn class(&self) -> NodeClass {
        self.class
    }

    /// Returns the browse name
    pub fn browse_name(&self) -> &str {
        &self.browse_name
    }

    /// Returns true if the node is excluded from emitted output
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Returns the forward reference records
    pub fn outgoing(&self) -> &[Reference] {
        &self.outgoing
    }

    /// Returns the inverse reference records
    pub fn incoming(&self) -> &[Reference] {
        &self.incoming
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub(crate) fn push_outgoing(&mut self, reference: Reference) {
        self.outgoing.push(reference);
    }

    pub(crate) fn push_incoming(&mut self, reference: Reference) {
        self.incoming.push(reference);
    }
}
