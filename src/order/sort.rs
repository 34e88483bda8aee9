//! Topological sorter and reference selector
//!
//! Computes the emission order for a node set: every node appears only
//! after all nodes it structurally depends on, where "depends on" means a
//! forward, non-hidden reference whose type is in the relevant set. While
//! placing each node, the sorter also decides which of the node's
//! references are safe to textualize immediately after it, based on which
//! other endpoints have already been placed.
//!
//! # Algorithm
//!
//! Kahn's algorithm over the relevant subgraph, with a deterministic
//! tie-break:
//!
//! 1. Compute in-degree for every node, counting only forward, relevant,
//!    non-hidden references targeting it.
//! 2. Seed a deque with the zero-in-degree nodes, walking the set in
//!    insertion order. `ReferenceType` nodes go to the deferred end,
//!    everything else to the active end, so ordinary nodes are consumed
//!    before reference types of equal readiness.
//! 3. Pop from the active end (LIFO), select the node's emittable
//!    references against the placed prefix, place it, and decrement its
//!    relevant targets, pushing newly ready nodes onto the active end.
//! 4. If the deque drains before every node is placed, the relevant
//!    subgraph is cyclic and the whole run fails.
//!
//! The steps are inherently sequential: each selection reads the exact
//! prefix of already-placed nodes, which changes after every placement.

use super::error::{OrderError, OrderResult};
use super::relevance::RelevantTypes;
use crate::graph::{Node, NodeClass, NodeId, Nodeset, Reference};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info, warn};

/// The sorter's output: the total emission order plus, per node, the
/// ordered list of references to emit immediately after it
///
/// Selections are an output of the sort rather than an annotation on the
/// nodes, so the node set stays immutable across generation runs. The
/// order and every selection list are deterministic for a fixed node set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmissionOrder {
    /// Node ids in placement order
    order: Vec<NodeId>,
    /// References selected for emission after each placed node
    selections: HashMap<NodeId, Vec<Reference>>,
}

impl EmissionOrder {
    /// Returns the node ids in placement order
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Returns the references selected for emission after the given node
    ///
    /// Empty for nodes with no selected references or unknown ids.
    pub fn selected(&self, id: &NodeId) -> &[Reference] {
        self.selections.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns an iterator over `(node id, selected references)` in
    /// placement order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &[Reference])> {
        self.order.iter().map(|id| (id, self.selected(id)))
    }

    /// Returns the number of placed nodes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no nodes were placed
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Computes the emission order for the node set
///
/// Returns an error if a relevant reference targets a node that is not in
/// the set, or if the relevant subgraph contains a cycle. On failure no
/// partial order is returned.
///
/// # Example
///
/// ```
/// use taxis::{sort_nodes, Node, NodeClass, NodeId, Nodeset, RelevantTypes};
///
/// let mut nodeset = Nodeset::new();
/// let ty = NodeId::numeric(0, 33);
/// let x = NodeId::numeric(1, 1);
/// let y = NodeId::numeric(1, 2);
///
/// nodeset.add_node(Node::new(ty.clone(), NodeClass::ReferenceType, "HierarchicalReferences")).unwrap();
/// nodeset.add_node(Node::new(y.clone(), NodeClass::Object, "Y")).unwrap();
/// nodeset.add_node(Node::new(x.clone(), NodeClass::Object, "X")).unwrap();
/// nodeset.add_reference(ty.clone(), x.clone(), y.clone(), false).unwrap();
///
/// let relevant = RelevantTypes::compute(&nodeset, &ty, &NodeId::numeric(0, 45)).unwrap();
/// let order = sort_nodes(&nodeset, &relevant).unwrap();
/// let placed = order.order();
/// assert!(placed.iter().position(|n| n == &x) < placed.iter().position(|n| n == &y));
/// ```
pub fn sort_nodes(nodeset: &Nodeset, relevant: &RelevantTypes) -> OrderResult<EmissionOrder> {
    info!(
        nodes = nodeset.len(),
        "reordering nodes for minimal dependencies during emission"
    );

    // In-degree over forward, relevant, non-hidden references. A dangling
    // target is a precondition violation, never silently skipped.
    let mut in_degree: HashMap<&NodeId, usize> =
        nodeset.node_ids().map(|id| (id, 0usize)).collect();
    for node in nodeset.nodes() {
        for reference in node.outgoing() {
            if !constrains_ordering(reference, relevant) {
                continue;
            }
            match in_degree.get_mut(reference.target()) {
                Some(degree) => *degree += 1,
                None => {
                    return Err(OrderError::unresolved_reference(
                        reference.source().clone(),
                        reference.target().clone(),
                    ))
                }
            }
        }
    }

    // Ready deque: ordinary nodes on the active (back) end, reference
    // types on the deferred (front) end, so the LIFO pop below consumes
    // ordinary nodes first among equally ready seeds.
    let mut ready: VecDeque<&Node> = VecDeque::new();
    for node in nodeset.nodes() {
        if in_degree[node.id()] == 0 {
            if node.class() == NodeClass::ReferenceType {
                ready.push_front(node);
            } else {
                ready.push_back(node);
            }
        }
    }

    let mut placed: HashSet<&NodeId> = HashSet::with_capacity(nodeset.len());
    let mut order: Vec<NodeId> = Vec::with_capacity(nodeset.len());
    let mut selections: HashMap<NodeId, Vec<Reference>> = HashMap::with_capacity(nodeset.len());

    while let Some(node) = ready.pop_back() {
        // Selection reads the exact placed prefix, so it happens before
        // the node itself is placed.
        let selected = select_references(node, &placed);
        debug!(node = %node.id(), selected = selected.len(), "placing node");

        placed.insert(node.id());
        order.push(node.id().clone());
        selections.insert(node.id().clone(), selected);

        for reference in node.outgoing() {
            if !constrains_ordering(reference, relevant) {
                continue;
            }
            if let Some(degree) = in_degree.get_mut(reference.target()) {
                *degree -= 1;
                if *degree == 0 {
                    if let Some(next) = nodeset.node(reference.target()) {
                        ready.push_back(next);
                    }
                }
            }
        }
    }

    if order.len() != nodeset.len() {
        warn!(
            placed = order.len(),
            total = nodeset.len(),
            "ordering aborted, relevant reference subgraph is cyclic"
        );
        return Err(OrderError::cycle(order.len(), nodeset.len()));
    }

    Ok(EmissionOrder { order, selections })
}

/// True if the reference constrains the emission order
fn constrains_ordering(reference: &Reference, relevant: &RelevantTypes) -> bool {
    reference.is_forward()
        && !reference.is_hidden()
        && relevant.contains(reference.reference_type())
}

/// Selects the references to emit immediately after `node`
///
/// A reference can only be textualized once both endpoints exist in the
/// artifact, so each pair is attached to whichever endpoint is placed
/// second: outgoing records whose target is already placed, then incoming
/// records likewise, each in stored list order. The node itself counts as
/// placed for its own outgoing records, which attaches self-references
/// exactly once (their inverse record stays unselected).
fn select_references(node: &Node, placed: &HashSet<&NodeId>) -> Vec<Reference> {
    let mut selected = Vec::new();
    for reference in node.outgoing() {
        if reference.is_hidden() {
            continue;
        }
        if placed.contains(reference.target()) || reference.target() == node.id() {
            selected.push(reference.clone());
        }
    }
    for reference in node.incoming() {
        if reference.is_hidden() {
            continue;
        }
        if placed.contains(reference.target()) {
            selected.push(reference.clone());
        }
    }
    selected
}
