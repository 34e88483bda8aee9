//! Miniature C code generator driven by the ordering engine.
//!
//! Builds a small information model by hand, then renders it as a pair of
//! C sources: a header with the entry-point declaration and a body that
//! instantiates every node and reference in dependency order.
//!
//! Run with: `cargo run --example emit_c`, then inspect `nodeset.h` /
//! `nodeset.c` in the working directory.

use std::fs::File;
use std::io::{BufWriter, Write};
use taxis::prelude::*;

struct CGenerator;

impl FragmentGenerator for CGenerator {
    fn node_fragment(&self, node: &Node, options: &EmitOptions) -> String {
        if node.id().is_base_namespace() && !options.generate_namespace_zero() {
            return format!("/* {} provided by the base model */", node.browse_name());
        }
        format!(
            "\n/* {} - {} */\nadd_{}(server, \"{}\", \"{}\");",
            node.browse_name(),
            node.id(),
            node.class(),
            node.id(),
            node.browse_name()
        )
    }

    fn reference_fragment(&self, reference: &Reference) -> String {
        format!(
            "add_reference(server, \"{}\", \"{}\", \"{}\", {});",
            reference.source(),
            reference.target(),
            reference.reference_type(),
            reference.is_forward()
        )
    }
}

fn build_model() -> Result<Nodeset, GraphError> {
    let mut nodeset = Nodeset::new();
    nodeset.add_namespace("http://opcfoundation.org/UA/");
    nodeset.add_namespace("urn:example:boiler");

    let hierarchical = well_known::hierarchical_references();
    let has_subtype = well_known::has_subtype();
    let organizes = NodeId::numeric(0, 35);
    let has_component = NodeId::numeric(0, 47);

    nodeset.add_node(Node::new(
        hierarchical.clone(),
        NodeClass::ReferenceType,
        "HierarchicalReferences",
    ))?;
    nodeset.add_node(Node::new(
        has_subtype.clone(),
        NodeClass::ReferenceType,
        "HasSubtype",
    ))?;
    nodeset.add_node(Node::new(organizes.clone(), NodeClass::ReferenceType, "Organizes"))?;
    nodeset.add_node(Node::new(
        has_component.clone(),
        NodeClass::ReferenceType,
        "HasComponent",
    ))?;
    nodeset.add_reference(has_subtype.clone(), hierarchical.clone(), has_subtype.clone(), false)?;
    nodeset.add_reference(has_subtype.clone(), hierarchical.clone(), organizes.clone(), false)?;
    nodeset.add_reference(has_subtype.clone(), hierarchical.clone(), has_component.clone(), false)?;

    let objects = NodeId::numeric(0, 85);
    let boiler = NodeId::numeric(1, 1);
    let drum = NodeId::numeric(1, 2);
    let level = NodeId::numeric(1, 3);

    nodeset.add_node(Node::new(objects.clone(), NodeClass::Object, "Objects"))?;
    nodeset.add_node(Node::new(boiler.clone(), NodeClass::Object, "Boiler"))?;
    nodeset.add_node(Node::new(drum.clone(), NodeClass::Object, "Drum"))?;
    nodeset.add_node(Node::new(level.clone(), NodeClass::Variable, "Level"))?;

    nodeset.add_reference(organizes, objects.clone(), boiler.clone(), false)?;
    nodeset.add_reference(has_component.clone(), boiler.clone(), drum.clone(), false)?;
    nodeset.add_reference(has_component, drum.clone(), level.clone(), false)?;

    // The Objects folder already exists in the target environment
    nodeset.hide_node(&objects)?;

    Ok(nodeset)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let nodeset = build_model()?;
    nodeset.validate()?;

    let mut header = BufWriter::new(File::create("nodeset.h")?);
    let mut body = BufWriter::new(File::create("nodeset.c")?);

    writeln!(
        header,
        "/* WARNING: This is a generated file.\n * Any manual changes will be overwritten. */\n"
    )?;
    writeln!(header, "#ifndef NODESET_H_")?;
    writeln!(header, "#define NODESET_H_\n")?;
    writeln!(header, "extern void nodeset(Server *server);\n")?;
    writeln!(header, "#endif /* NODESET_H_ */")?;

    writeln!(
        body,
        "/* WARNING: This is a generated file.\n * Any manual changes will be overwritten. */\n"
    )?;
    writeln!(body, "#include \"nodeset.h\"\n")?;
    writeln!(body, "void nodeset(Server *server) {{")?;
    for (index, uri) in nodeset.namespaces().iter().enumerate() {
        writeln!(body, "ns[{}] = add_namespace(server, \"{}\");", index, uri)?;
    }

    let order = generate(
        &nodeset,
        &well_known::hierarchical_references(),
        &well_known::has_subtype(),
        CGenerator,
        EmitOptions::default().with_generate_namespace_zero(false),
        &mut body,
    )?;

    writeln!(body, "}}")?;
    body.flush()?;

    println!("emitted {} nodes to nodeset.h / nodeset.c", order.len());
    Ok(())
}
