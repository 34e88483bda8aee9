//! Taxis: Dependency-Ordered Source Emission for Rust
//!
//! `taxis` (τάξις, Greek for "arrangement" or "ordering") serializes a typed
//! node graph into a linear source artifact in which every node appears only
//! after all nodes it structurally depends on, and every reference is
//! textualized exactly once, as soon as both of its endpoints exist.
//!
//! # Features
//!
//! - **Relevance filtering**: Only the subtree of reference types beneath a
//!   designated hierarchical root constrains ordering
//! - **Deterministic topological sort**: Kahn's algorithm with an explicit
//!   kind-biased tie-break, byte-identical output across runs
//! - **Reference selection**: Each reference is attached to whichever of its
//!   endpoints is placed second, so emitted fragments never point forward
//! - **Fail-fast validation**: Cyclic or dangling input aborts the run
//!   instead of producing a partial artifact
//! - **Pluggable emission**: Target syntax lives behind a fragment-generator
//!   trait; the core writes lines to caller-owned sinks
//!
//! # Quick Start
//!
//! ```
//! use taxis::prelude::*;
//!
//! struct CGenerator;
//!
//! impl FragmentGenerator for CGenerator {
//!     fn node_fragment(&self, node: &Node, _options: &EmitOptions) -> String {
//!         format!("add_node(server, \"{}\"); /* {} */", node.browse_name(), node.id())
//!     }
//!     fn reference_fragment(&self, reference: &Reference) -> String {
//!         format!("add_reference(server, \"{}\", \"{}\");", reference.source(), reference.target())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut nodeset = Nodeset::new();
//!     nodeset.add_namespace("urn:example:model");
//!
//!     let root = well_known::hierarchical_references();
//!     nodeset.add_node(Node::new(root.clone(), NodeClass::ReferenceType, "HierarchicalReferences"))?;
//!     nodeset.add_node(Node::new(NodeId::numeric(1, 1), NodeClass::Object, "Folder"))?;
//!     nodeset.add_node(Node::new(NodeId::numeric(1, 2), NodeClass::Object, "Pump"))?;
//!     nodeset.add_reference(root.clone(), NodeId::numeric(1, 1), NodeId::numeric(1, 2), false)?;
//!
//!     let mut body = Vec::new();
//!     let order = generate(
//!         &nodeset,
//!         &root,
//!         &well_known::has_subtype(),
//!         CGenerator,
//!         EmitOptions::default(),
//!         &mut body,
//!     )?;
//!
//!     assert_eq!(order.len(), 3);
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! Following Parnas's information hiding principles, each module hides
//! specific design decisions that are likely to change:
//!
//! - [`graph`]: Node and reference model (hides the graph representation)
//! - [`order`]: Relevance filter and topological sorter (hides the
//!   ordering algorithm and its tie-breaks)
//! - [`emit`]: Emitter shell (hides nothing about target syntax, because
//!   it never sees any: fragments come from the caller's generator)
//!
//! # Design Principles
//!
//! This library follows Dave Cheney's practical programming wisdom:
//! - **Simplicity**: Simple, focused APIs that do one thing well
//! - **Clarity**: Explicit over implicit, readable over clever
//! - **Safety**: Hard to misuse, defaults prevent common mistakes

pub mod emit;
pub mod graph;
pub mod order;

// Re-export commonly used types for convenience
pub use graph::{GraphError, GraphResult, Identifier, Node, NodeClass, NodeId, Nodeset, Reference};

pub use order::{
    sort_nodes, well_known, EmissionOrder, OrderError, OrderResult, RelevantTypes,
};

pub use emit::{generate, EmitError, EmitOptions, EmitResult, Emitter, FragmentGenerator};

// Re-export dependencies used in public API
// This ensures users don't have version mismatch errors (Effective Rust Item 24)
pub use serde; // Graph values implement Serialize/Deserialize

/// Prelude module for convenient glob imports
///
/// # Example
///
/// ```
/// use taxis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::emit::{
        generate, EmitError, EmitOptions, EmitResult, Emitter, FragmentGenerator,
    };
    pub use crate::graph::{
        GraphError, GraphResult, Node, NodeClass, NodeId, Nodeset, Reference,
    };
    pub use crate::order::{
        sort_nodes, well_known, EmissionOrder, OrderError, OrderResult, RelevantTypes,
    };

    // Re-export commonly used external types
    pub use serde::{Deserialize, Serialize};
}
