//! Emitter shell
//!
//! Walks a computed [`EmissionOrder`] once and writes the textual fragment
//! of every visible node, immediately followed by the fragments of the
//! references selected for that node. The emitter performs no ordering
//! logic of its own; it is a pure consumer of the sorter's output.
//!
//! Fragment generation is an external collaborator behind the
//! [`FragmentGenerator`] trait. Sink lifecycle, preamble and postamble
//! boilerplate, and how many sinks the driver keeps (a header stream next
//! to a body stream, say) all belong to the driver; the emitter writes
//! lines to whichever sink it is handed.

use super::error::{EmitError, EmitResult};
use super::options::EmitOptions;
use crate::graph::{Node, NodeId, Nodeset, Reference};
use crate::order::{sort_nodes, EmissionOrder, RelevantTypes};
use std::io::Write;
use tracing::info;

/// Produces the textual fragments the emitter writes
///
/// Both methods are expected to be pure: the same node or reference must
/// yield the same fragment, so repeat runs produce byte-identical
/// artifacts.
pub trait FragmentGenerator {
    /// Returns the fragment declaring and instantiating the node
    fn node_fragment(&self, node: &Node, options: &EmitOptions) -> String;

    /// Returns the fragment instantiating the reference
    fn reference_fragment(&self, reference: &Reference) -> String;
}

/// Order-preserving fragment writer
///
/// # Example
///
/// ```
/// use taxis::{
///     Emitter, EmitOptions, FragmentGenerator, Node, NodeClass, NodeId, Nodeset, Reference,
///     RelevantTypes, sort_nodes,
/// };
///
/// struct Plain;
///
/// impl FragmentGenerator for Plain {
///     fn node_fragment(&self, node: &Node, _options: &EmitOptions) -> String {
///         format!("node {}", node.browse_name())
///     }
///     fn reference_fragment(&self, reference: &Reference) -> String {
///         format!("ref {} {}", reference.source(), reference.target())
///     }
/// }
///
/// let mut nodeset = Nodeset::new();
/// let ty = NodeId::numeric(0, 33);
/// nodeset.add_node(Node::new(ty.clone(), NodeClass::ReferenceType, "HierarchicalReferences")).unwrap();
/// nodeset.add_node(Node::new(NodeId::numeric(1, 1), NodeClass::Object, "Pump")).unwrap();
///
/// let relevant = RelevantTypes::compute(&nodeset, &ty, &NodeId::numeric(0, 45)).unwrap();
/// let order = sort_nodes(&nodeset, &relevant).unwrap();
///
/// let emitter = Emitter::new(Plain, EmitOptions::default().with_relevant_types(relevant));
/// let mut sink = Vec::new();
/// emitter.emit(&nodeset, &order, &mut sink).unwrap();
/// let text = String::from_utf8(sink).unwrap();
/// assert!(text.contains("node Pump"));
/// ```
pub struct Emitter<G> {
    generator: G,
    options: EmitOptions,
}

impl<G: FragmentGenerator> Emitter<G> {
    /// Creates an emitter from a fragment generator and its options
    pub fn new(generator: G, options: EmitOptions) -> Self {
        Self { generator, options }
    }

    /// Returns the options handed to the generator
    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Writes the artifact fragments for the given order
    ///
    /// For every placed node: the node fragment if the node is not
    /// hidden, then the fragment of each selected reference, as
    /// append-only lines. Hidden nodes produce no node fragment but
    /// their selected references are still written, since those
    /// references belong to visible structure placed earlier.
    pub fn emit<W: Write>(
        &self,
        nodeset: &Nodeset,
        order: &EmissionOrder,
        sink: &mut W,
    ) -> EmitResult<()> {
        info!(nodes = order.len(), "writing fragments for nodes and references");

        for (id, references) in order.iter() {
            let node = nodeset
                .node(id)
                .ok_or_else(|| EmitError::UnknownNode { node: id.clone() })?;

            if !node.is_hidden() {
                writeln!(sink, "{}", self.generator.node_fragment(node, &self.options))?;
            }
            for reference in references {
                writeln!(sink, "{}", self.generator.reference_fragment(reference))?;
            }
        }

        Ok(())
    }
}

/// Computes the relevance filter and emission order for `nodeset` and
/// writes the artifact fragments to `sink`
///
/// The pipeline entry point: relevance filter anchored at `root` over
/// `subtype_type` edges, topological sort, then emission. The computed
/// relevant-type set is placed into the generator's options, replacing
/// whatever set `options` carried. Returns the emission order so drivers
/// can inspect or log the placement.
pub fn generate<G: FragmentGenerator, W: Write>(
    nodeset: &Nodeset,
    root: &NodeId,
    subtype_type: &NodeId,
    generator: G,
    options: EmitOptions,
    sink: &mut W,
) -> EmitResult<EmissionOrder> {
    let relevant = RelevantTypes::compute(nodeset, root, subtype_type)?;
    let order = sort_nodes(nodeset, &relevant)?;
    let emitter = Emitter::new(generator, options.with_relevant_types(relevant));
    emitter.emit(nodeset, &order, sink)?;
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeClass;
    use crate::order::{well_known, OrderError};

    /// Generator that renders browse names and reference endpoints, enough
    /// to assert on emission order and hidden-node exclusion.
    struct Recording;

    impl FragmentGenerator for Recording {
        fn node_fragment(&self, node: &Node, _options: &EmitOptions) -> String {
            format!("node:{}", node.browse_name())
        }
        fn reference_fragment(&self, reference: &Reference) -> String {
            format!("ref:{}->{}", reference.source(), reference.target())
        }
    }

    fn fixture() -> Nodeset {
        let mut nodeset = Nodeset::new();
        nodeset
            .add_node(Node::new(
                well_known::hierarchical_references(),
                NodeClass::ReferenceType,
                "HierarchicalReferences",
            ))
            .unwrap();
        nodeset
            .add_node(Node::new(
                NodeId::numeric(0, 35),
                NodeClass::ReferenceType,
                "Organizes",
            ))
            .unwrap();
        nodeset
            .add_node(Node::new(
                well_known::has_subtype(),
                NodeClass::ReferenceType,
                "HasSubtype",
            ))
            .unwrap();
        nodeset
            .add_reference(
                well_known::has_subtype(),
                well_known::hierarchical_references(),
                NodeId::numeric(0, 35),
                false,
            )
            .unwrap();
        nodeset
            .add_node(Node::new(NodeId::numeric(1, 1), NodeClass::Object, "Folder"))
            .unwrap();
        nodeset
            .add_node(Node::new(NodeId::numeric(1, 2), NodeClass::Object, "Pump"))
            .unwrap();
        nodeset
            .add_reference(
                NodeId::numeric(0, 35),
                NodeId::numeric(1, 1),
                NodeId::numeric(1, 2),
                false,
            )
            .unwrap();
        nodeset
    }

    #[test]
    fn test_emit_writes_nodes_then_selected_references() {
        let nodeset = fixture();
        let relevant = RelevantTypes::hierarchical(&nodeset).unwrap();
        let order = sort_nodes(&nodeset, &relevant).unwrap();
        let emitter = Emitter::new(Recording, EmitOptions::default().with_relevant_types(relevant));

        let mut sink = Vec::new();
        emitter.emit(&nodeset, &order, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        let folder = lines.iter().position(|l| *l == "node:Folder").unwrap();
        let pump = lines.iter().position(|l| *l == "node:Pump").unwrap();
        let organizes_ref = lines
            .iter()
            .position(|l| *l == "ref:ns=1;i=2->ns=1;i=1")
            .unwrap();
        assert!(folder < pump);
        // The Folder -> Pump reference rides with Pump, right after it
        assert_eq!(organizes_ref, pump + 1);
    }

    #[test]
    fn test_hidden_node_fragment_suppressed() {
        let mut nodeset = fixture();
        nodeset.hide_node(&NodeId::numeric(1, 1)).unwrap();

        let relevant = RelevantTypes::hierarchical(&nodeset).unwrap();
        let order = sort_nodes(&nodeset, &relevant).unwrap();
        let emitter = Emitter::new(Recording, EmitOptions::default().with_relevant_types(relevant));

        let mut sink = Vec::new();
        emitter.emit(&nodeset, &order, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();

        assert!(!text.contains("node:Folder"));
        // The reference into the hidden node's subtree still appears
        assert!(text.contains("ref:ns=1;i=2->ns=1;i=1"));
        assert!(text.contains("node:Pump"));
    }

    #[test]
    fn test_generate_pipeline() {
        let nodeset = fixture();
        let mut sink = Vec::new();
        let order = generate(
            &nodeset,
            &well_known::hierarchical_references(),
            &well_known::has_subtype(),
            Recording,
            EmitOptions::default(),
            &mut sink,
        )
        .unwrap();

        assert_eq!(order.len(), nodeset.len());
        let text = String::from_utf8(sink).unwrap();
        assert!(text.contains("node:HierarchicalReferences"));
        assert!(text.contains("node:Pump"));
    }

    #[test]
    fn test_generate_missing_root_fails() {
        let nodeset = fixture();
        let mut sink = Vec::new();
        let result = generate(
            &nodeset,
            &NodeId::numeric(0, 9999),
            &well_known::has_subtype(),
            Recording,
            EmitOptions::default(),
            &mut sink,
        );
        assert!(matches!(
            result,
            Err(EmitError::Order(OrderError::RootNotFound { .. }))
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_mismatched_order_rejected() {
        let nodeset = fixture();
        let relevant = RelevantTypes::hierarchical(&nodeset).unwrap();
        let order = sort_nodes(&nodeset, &relevant).unwrap();

        let emitter = Emitter::new(Recording, EmitOptions::default());
        let mut sink = Vec::new();
        let result = emitter.emit(&Nodeset::new(), &order, &mut sink);
        assert!(matches!(result, Err(EmitError::UnknownNode { .. })));
    }
}
