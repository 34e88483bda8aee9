//! Ordering engine: relevance filter, topological sorter, reference selector
//!
//! This module computes the linear emission order for a frozen
//! [`Nodeset`](crate::graph::Nodeset) and, for each placed node, the
//! references that are safe to textualize immediately after it.
//!
//! # Design Principles
//!
//! Following Parnas's information hiding principles:
//! - The relevance decision is precomputed once into an immutable
//!   [`RelevantTypes`] value instead of being re-derived per reference.
//! - All algorithm state (ready deque, in-degree map, placed set) is local
//!   to a single [`sort_nodes`] call; there is no process-wide ordering
//!   state.
//! - The selection lists are returned as part of the [`EmissionOrder`]
//!   output rather than written back onto the nodes.

mod error;
mod relevance;
mod sort;

pub use error::{OrderError, OrderResult};
pub use relevance::{well_known, RelevantTypes};
pub use sort::{sort_nodes, EmissionOrder};
