//! Typed node graph for dependency-ordered emission
//!
//! This module provides the data model the ordering and emission engine
//! runs on: uniquely identified, kind-tagged nodes connected by typed,
//! directed, inverse-paired references, owned by a [`Nodeset`].
//!
//! # Design Principles
//!
//! Following Parnas's information hiding principles:
//! - This module hides the graph representation (map plus paired edge
//!   records) behind abstract operations: add_node, add_reference,
//!   node lookups, validate.
//! - Ordering state never leaks into the model: which references get
//!   emitted after a node is an output of the sorter, not a node field.

mod error;
mod node;
mod node_id;
mod nodeset;

pub use error::{GraphError, GraphResult};
pub use node::{Node, NodeClass, Reference};
pub use node_id::{Identifier, NodeId};
pub use nodeset::Nodeset;
