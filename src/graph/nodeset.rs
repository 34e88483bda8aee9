//! Node set container
//!
//! The [`Nodeset`] owns every node and reference record for the duration
//! of ordering and emission. Population happens up front through
//! [`Nodeset::add_node`] and [`Nodeset::add_reference`]; once ordering
//! starts the set is treated as frozen and only handed out by shared
//! reference.
//!
//! # Design
//!
//! Nodes live in a hash map keyed by [`NodeId`], with a parallel insertion
//! order vector so every iteration over the set is deterministic. The
//! ordering algorithm's tie-breaks are defined in terms of this iteration
//! order, so two identically populated sets always order identically.

use super::error::{GraphError, GraphResult};
use super::{Node, NodeClass, NodeId, Reference};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The full dependency graph: all nodes, their references, and the
/// namespace table used for qualifying identities
///
/// Namespaces are irrelevant to ordering; they are carried for emission
/// drivers that need to register namespace URIs in the generated artifact.
///
/// # Example
///
/// ```
/// use taxis::{Node, NodeClass, NodeId, Nodeset};
///
/// let mut nodeset = Nodeset::new();
/// let root = NodeId::numeric(0, 33);
/// let child = NodeId::numeric(0, 35);
///
/// nodeset.add_node(Node::new(root.clone(), NodeClass::ReferenceType, "HierarchicalReferences")).unwrap();
/// nodeset.add_node(Node::new(child.clone(), NodeClass::ReferenceType, "Organizes")).unwrap();
/// nodeset.add_node(Node::new(NodeId::numeric(0, 45), NodeClass::ReferenceType, "HasSubtype")).unwrap();
///
/// // Organizes is a subtype of HierarchicalReferences
/// nodeset.add_reference(NodeId::numeric(0, 45), root, child, false).unwrap();
/// assert_eq!(nodeset.len(), 3);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "NodesetRepr", into = "NodesetRepr")]
pub struct Nodeset {
    /// Map from node id to node
    nodes: HashMap<NodeId, Node>,
    /// Insertion order for deterministic iteration
    insertion_order: Vec<NodeId>,
    /// Namespace URIs; index 0 is the base namespace
    namespaces: Vec<String>,
}

/// Serialized form: nodes as a flat list in insertion order
///
/// Keeps the wire format free of structured map keys and makes the
/// insertion order, which the ordering tie-breaks depend on, an explicit
/// part of the serialized data.
#[derive(Serialize, Deserialize)]
struct NodesetRepr {
    nodes: Vec<Node>,
    namespaces: Vec<String>,
}

impl From<NodesetRepr> for Nodeset {
    fn from(repr: NodesetRepr) -> Self {
        let mut nodeset = Nodeset {
            nodes: HashMap::with_capacity(repr.nodes.len()),
            insertion_order: Vec::with_capacity(repr.nodes.len()),
            namespaces: repr.namespaces,
        };
        for node in repr.nodes {
            nodeset.insertion_order.push(node.id().clone());
            nodeset.nodes.insert(node.id().clone(), node);
        }
        nodeset
    }
}

impl From<Nodeset> for NodesetRepr {
    fn from(nodeset: Nodeset) -> Self {
        let nodes = nodeset
            .insertion_order
            .iter()
            .filter_map(|id| nodeset.nodes.get(id).cloned())
            .collect();
        NodesetRepr {
            nodes,
            namespaces: nodeset.namespaces,
        }
    }
}

impl Nodeset {
    /// Creates a new empty node set
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            insertion_order: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    /// Returns the number of nodes in the set
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the set has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if the node exists in the set
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns a reference to a node
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns an iterator over all node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.insertion_order.iter()
    }

    /// Returns an iterator over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.insertion_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Registers a namespace URI and returns its index
    pub fn add_namespace(&mut self, uri: impl Into<String>) -> u16 {
        self.namespaces.push(uri.into());
        (self.namespaces.len() - 1) as u16
    }

    /// Returns the registered namespace URIs
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Adds a node to the set
    ///
    /// Returns an error if a node with the same id already exists.
    pub fn add_node(&mut self, node: Node) -> GraphResult<()> {
        if self.nodes.contains_key(node.id()) {
            return Err(GraphError::duplicate_node(node.id().clone()));
        }

        self.insertion_order.push(node.id().clone());
        self.nodes.insert(node.id().clone(), node);
        Ok(())
    }

    /// Adds a reference between two nodes already in the set
    ///
    /// Inserts the forward record on the source node and the paired
    /// inverse record on the target node. Both nodes and the type node
    /// must already be present, so references are added after all nodes.
    ///
    /// Returns an error if:
    /// - Either endpoint does not resolve to a node in the set
    /// - The type node is missing or is not of class `ReferenceType`
    pub fn add_reference(
        &mut self,
        reference_type: NodeId,
        source: NodeId,
        target: NodeId,
        hidden: bool,
    ) -> GraphResult<()> {
        match self.nodes.get(&reference_type) {
            Some(ty) if ty.class() == NodeClass::ReferenceType => {}
            Some(_) => return Err(GraphError::not_a_reference_type(reference_type)),
            None => return Err(GraphError::node_not_found(reference_type)),
        }
        if !self.nodes.contains_key(&source) {
            return Err(GraphError::unresolved_reference(
                source.clone(),
                target,
                source,
            ));
        }
        if !self.nodes.contains_key(&target) {
            return Err(GraphError::unresolved_reference(
                source,
                target.clone(),
                target,
            ));
        }

        // SAFETY: Both keys are guaranteed to exist by the checks above.
        // If these unwraps panic, it's a bug in this function's logic.
        self.nodes.get_mut(&source).unwrap().push_outgoing(Reference::new(
            reference_type.clone(),
            source.clone(),
            target.clone(),
            true,
            hidden,
        ));
        self.nodes.get_mut(&target).unwrap().push_incoming(Reference::new(
            reference_type,
            target,
            source,
            false,
            hidden,
        ));

        Ok(())
    }

    /// Returns the first node (in insertion order) with the given browse name
    ///
    /// Drivers use this to locate well-known anchor nodes, e.g. the
    /// hierarchical reference root, when numeric ids are not known up front.
    pub fn node_by_browse_name(&self, browse_name: &str) -> Option<&Node> {
        self.nodes().find(|n| n.browse_name() == browse_name)
    }

    /// Marks a node as hidden
    ///
    /// Hidden nodes still participate in ordering but produce no fragment
    /// in the emitted artifact.
    pub fn hide_node(&mut self, id: &NodeId) -> GraphResult<()> {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.set_hidden(true);
                Ok(())
            }
            None => Err(GraphError::node_not_found(id.clone())),
        }
    }

    /// Validates the structural invariants of the set
    ///
    /// Checks that every stored reference record resolves: the type node
    /// exists and is a `ReferenceType`, and the other endpoint is present.
    /// [`add_reference`](Self::add_reference) enforces this on the way in;
    /// this re-check guards node sets rebuilt through deserialization.
    pub fn validate(&self) -> GraphResult<()> {
        for node in self.nodes() {
            for reference in node.outgoing().iter().chain(node.incoming()) {
                match self.nodes.get(reference.reference_type()) {
                    Some(ty) if ty.class() == NodeClass::ReferenceType => {}
                    Some(_) => {
                        return Err(GraphError::not_a_reference_type(
                            reference.reference_type().clone(),
                        ))
                    }
                    None => {
                        return Err(GraphError::node_not_found(
                            reference.reference_type().clone(),
                        ))
                    }
                }
                if !self.nodes.contains_key(reference.target()) {
                    return Err(GraphError::unresolved_reference(
                        reference.source().clone(),
                        reference.target().clone(),
                        reference.target().clone(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_type(id: u32, name: &str) -> Node {
        Node::new(NodeId::numeric(0, id), NodeClass::ReferenceType, name)
    }

    fn object(ns: u16, id: u32, name: &str) -> Node {
        Node::new(NodeId::numeric(ns, id), NodeClass::Object, name)
    }

    #[test]
    fn test_empty_nodeset() {
        let nodeset = Nodeset::new();
        assert!(nodeset.is_empty());
        assert_eq!(nodeset.len(), 0);
        assert!(nodeset.validate().is_ok());
    }

    #[test]
    fn test_add_node_and_lookup() {
        let mut nodeset = Nodeset::new();
        nodeset.add_node(object(1, 100, "Pump")).unwrap();

        assert_eq!(nodeset.len(), 1);
        assert!(nodeset.contains(&NodeId::numeric(1, 100)));
        let node = nodeset.node(&NodeId::numeric(1, 100)).unwrap();
        assert_eq!(node.browse_name(), "Pump");
    }

    #[test]
    fn test_duplicate_node_error() {
        let mut nodeset = Nodeset::new();
        nodeset.add_node(object(1, 100, "Pump")).unwrap();

        let result = nodeset.add_node(object(1, 100, "Valve"));
        assert!(matches!(result, Err(GraphError::DuplicateNode { .. })));
    }

    #[test]
    fn test_add_reference_creates_paired_records() {
        let mut nodeset = Nodeset::new();
        nodeset.add_node(reference_type(35, "Organizes")).unwrap();
        nodeset.add_node(object(1, 1, "Folder")).unwrap();
        nodeset.add_node(object(1, 2, "Pump")).unwrap();

        nodeset
            .add_reference(
                NodeId::numeric(0, 35),
                NodeId::numeric(1, 1),
                NodeId::numeric(1, 2),
                false,
            )
            .unwrap();

        let folder = nodeset.node(&NodeId::numeric(1, 1)).unwrap();
        let pump = nodeset.node(&NodeId::numeric(1, 2)).unwrap();

        assert_eq!(folder.outgoing().len(), 1);
        assert!(folder.incoming().is_empty());
        assert_eq!(pump.incoming().len(), 1);
        assert!(pump.outgoing().is_empty());

        let forward = &folder.outgoing()[0];
        let inverse = &pump.incoming()[0];
        assert!(forward.is_forward());
        assert!(!inverse.is_forward());
        // Swapped endpoints, shared type and visibility
        assert_eq!(forward.source(), inverse.target());
        assert_eq!(forward.target(), inverse.source());
        assert_eq!(forward.reference_type(), inverse.reference_type());
        assert_eq!(forward.is_hidden(), inverse.is_hidden());
    }

    #[test]
    fn test_add_reference_unresolved_endpoint() {
        let mut nodeset = Nodeset::new();
        nodeset.add_node(reference_type(35, "Organizes")).unwrap();
        nodeset.add_node(object(1, 1, "Folder")).unwrap();

        let result = nodeset.add_reference(
            NodeId::numeric(0, 35),
            NodeId::numeric(1, 1),
            NodeId::numeric(1, 99),
            false,
        );
        assert!(matches!(
            result,
            Err(GraphError::UnresolvedReference { .. })
        ));
    }

    #[test]
    fn test_add_reference_rejects_non_reference_type() {
        let mut nodeset = Nodeset::new();
        nodeset.add_node(object(1, 1, "Folder")).unwrap();
        nodeset.add_node(object(1, 2, "Pump")).unwrap();

        let result = nodeset.add_reference(
            NodeId::numeric(1, 1),
            NodeId::numeric(1, 1),
            NodeId::numeric(1, 2),
            false,
        );
        assert!(matches!(result, Err(GraphError::NotAReferenceType { .. })));
    }

    #[test]
    fn test_node_by_browse_name() {
        let mut nodeset = Nodeset::new();
        nodeset
            .add_node(reference_type(33, "HierarchicalReferences"))
            .unwrap();
        nodeset.add_node(object(1, 1, "Folder")).unwrap();

        let root = nodeset.node_by_browse_name("HierarchicalReferences").unwrap();
        assert_eq!(root.id(), &NodeId::numeric(0, 33));
        assert!(nodeset.node_by_browse_name("Missing").is_none());
    }

    #[test]
    fn test_hide_node() {
        let mut nodeset = Nodeset::new();
        nodeset.add_node(object(1, 1, "Internal")).unwrap();

        nodeset.hide_node(&NodeId::numeric(1, 1)).unwrap();
        assert!(nodeset.node(&NodeId::numeric(1, 1)).unwrap().is_hidden());

        let result = nodeset.hide_node(&NodeId::numeric(1, 2));
        assert!(matches!(result, Err(GraphError::NodeNotFound { .. })));
    }

    #[test]
    fn test_namespaces() {
        let mut nodeset = Nodeset::new();
        assert_eq!(nodeset.add_namespace("http://opcfoundation.org/UA/"), 0);
        assert_eq!(nodeset.add_namespace("urn:example:boiler"), 1);
        assert_eq!(nodeset.namespaces().len(), 2);
    }

    #[test]
    fn test_serde_round_trip_preserves_insertion_order() {
        let mut nodeset = Nodeset::new();
        nodeset.add_namespace("http://opcfoundation.org/UA/");
        nodeset.add_node(reference_type(35, "Organizes")).unwrap();
        nodeset.add_node(object(1, 2, "Pump")).unwrap();
        nodeset.add_node(object(1, 1, "Folder")).unwrap();
        nodeset
            .add_reference(
                NodeId::numeric(0, 35),
                NodeId::numeric(1, 1),
                NodeId::numeric(1, 2),
                false,
            )
            .unwrap();

        let json = serde_json::to_string(&nodeset).unwrap();
        let restored: Nodeset = serde_json::from_str(&json).unwrap();

        assert!(restored.validate().is_ok());
        assert_eq!(restored.len(), nodeset.len());
        let original: Vec<_> = nodeset.node_ids().collect();
        let round_tripped: Vec<_> = restored.node_ids().collect();
        assert_eq!(original, round_tripped);
        assert_eq!(restored.namespaces(), nodeset.namespaces());
        assert_eq!(
            restored.node(&NodeId::numeric(1, 2)).unwrap().incoming().len(),
            1
        );
    }

    #[test]
    fn test_insertion_order_iteration() {
        let mut nodeset = Nodeset::new();
        for i in [5u32, 3, 9, 1] {
            nodeset.add_node(object(1, i, "n")).unwrap();
        }
        let ids: Vec<u32> = nodeset
            .node_ids()
            .map(|id| match id.identifier() {
                crate::graph::Identifier::Numeric(n) => *n,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(ids, vec![5, 3, 9, 1]);
    }
}
