//! Relevance filter over the reference-type taxonomy
//!
//! Reference types form their own subtype hierarchy: `ReferenceType` nodes
//! connected by subtype references. Only the subtree rooted at the
//! designated hierarchical root imposes real ordering constraints; every
//! other reference is free to point forward in the emitted artifact.
//!
//! The filter is computed once per generation run and threaded through the
//! sorter and the emitter as an immutable set value, never recomputed per
//! reference.

use super::error::{OrderError, OrderResult};
use crate::graph::{NodeId, Nodeset};
use petgraph::dot::{Config, Dot};
use petgraph::graph::DiGraph;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Well-known anchor ids from the base information model
pub mod well_known {
    use crate::graph::NodeId;

    /// Root of the hierarchical reference-type subtree (`ns=0;i=33`)
    pub fn hierarchical_references() -> NodeId {
        NodeId::numeric(0, 33)
    }

    /// The subtype reference type connecting the taxonomy (`ns=0;i=45`)
    pub fn has_subtype() -> NodeId {
        NodeId::numeric(0, 45)
    }
}

/// The set of reference types that constrain the emission order
///
/// Contains the designated root type and all its transitive subtypes.
/// Membership is the only operation the sorter needs; the set is immutable
/// once computed.
///
/// # Example
///
/// ```
/// use taxis::{Node, NodeClass, NodeId, Nodeset, RelevantTypes};
///
/// let mut nodeset = Nodeset::new();
/// let root = NodeId::numeric(0, 33);
/// let subtype = NodeId::numeric(0, 45);
/// let organizes = NodeId::numeric(0, 35);
///
/// nodeset.add_node(Node::new(root.clone(), NodeClass::ReferenceType, "HierarchicalReferences")).unwrap();
/// nodeset.add_node(Node::new(subtype.clone(), NodeClass::ReferenceType, "HasSubtype")).unwrap();
/// nodeset.add_node(Node::new(organizes.clone(), NodeClass::ReferenceType, "Organizes")).unwrap();
/// nodeset.add_reference(subtype.clone(), root.clone(), organizes.clone(), false).unwrap();
///
/// let relevant = RelevantTypes::compute(&nodeset, &root, &subtype).unwrap();
/// assert!(relevant.contains(&root));
/// assert!(relevant.contains(&organizes));
/// assert!(!relevant.contains(&subtype));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelevantTypes {
    types: HashSet<NodeId>,
}

impl RelevantTypes {
    /// Computes the relevant-type set for a node set
    ///
    /// Walks forward references of type `subtype_type` breadth-first from
    /// `root`, collecting every reachable reference type including the
    /// root itself. A visited set guards against taxonomy cycles, which
    /// are not expected but must not hang the traversal.
    ///
    /// Fails with [`OrderError::RootNotFound`] if `root` is not in the
    /// node set.
    pub fn compute(
        nodeset: &Nodeset,
        root: &NodeId,
        subtype_type: &NodeId,
    ) -> OrderResult<Self> {
        if !nodeset.contains(root) {
            return Err(OrderError::root_not_found(root.clone()));
        }

        let mut types = HashSet::new();
        let mut queue = VecDeque::new();
        types.insert(root.clone());
        queue.push_back(root.clone());

        while let Some(id) = queue.pop_front() {
            let node = match nodeset.node(&id) {
                Some(node) => node,
                None => {
                    // Only reachable on a dangling subtype edge
                    continue;
                }
            };
            for reference in node.outgoing() {
                if !reference.is_forward() || reference.reference_type() != subtype_type {
                    continue;
                }
                if !nodeset.contains(reference.target()) {
                    return Err(OrderError::unresolved_reference(
                        reference.source().clone(),
                        reference.target().clone(),
                    ));
                }
                if types.insert(reference.target().clone()) {
                    queue.push_back(reference.target().clone());
                }
            }
        }

        debug!(relevant_types = types.len(), root = %root, "computed relevant reference types");
        Ok(Self { types })
    }

    /// Computes the set anchored at the base model's well-known ids
    ///
    /// Equivalent to [`compute`](Self::compute) with
    /// [`well_known::hierarchical_references`] as the root and
    /// [`well_known::has_subtype`] as the taxonomy edge type.
    pub fn hierarchical(nodeset: &Nodeset) -> OrderResult<Self> {
        Self::compute(
            nodeset,
            &well_known::hierarchical_references(),
            &well_known::has_subtype(),
        )
    }

    /// Returns true if the reference type constrains ordering
    pub fn contains(&self, reference_type: &NodeId) -> bool {
        self.types.contains(reference_type)
    }

    /// Returns the number of relevant types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are relevant
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns an iterator over the relevant type ids
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.types.iter()
    }

    /// Generates a DOT representation of the ordering-relevant subgraph
    ///
    /// Includes every node in the set, labeled by browse name, with an
    /// edge per forward, relevant, non-hidden reference. Useful for
    /// tracking down the offending edges behind a
    /// [`OrderError::CycleDetected`]:
    ///
    /// ```ignore
    /// let dot = relevant.to_dot(&nodeset);
    /// std::fs::write("graph.dot", dot)?;
    /// // render with Graphviz: dot -Tpng graph.dot -o graph.png
    /// ```
    pub fn to_dot(&self, nodeset: &Nodeset) -> String {
        let mut graph = DiGraph::<String, ()>::new();
        let mut indices = HashMap::new();

        for node in nodeset.nodes() {
            let index = graph.add_node(node.browse_name().to_string());
            indices.insert(node.id().clone(), index);
        }
        for node in nodeset.nodes() {
            for reference in node.outgoing() {
                if !reference.is_forward()
                    || reference.is_hidden()
                    || !self.contains(reference.reference_type())
                {
                    continue;
                }
                if let (Some(&from), Some(&to)) = (
                    indices.get(reference.source()),
                    indices.get(reference.target()),
                ) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        format!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }
}
