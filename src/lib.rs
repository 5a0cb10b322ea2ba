pub mod ast;
pub mod config;
pub mod doc;
pub mod embed;
pub mod error;
pub mod plugin;
pub mod printer;
pub mod sql;

pub use config::Config;
pub use error::{Error, Result};

use crate::ast::{Grammar, Node};
use crate::doc::{hardline, join, print_doc, Doc};
use crate::embed::FormatterRegistry;
use crate::printer::Printer;
use std::path::Path;

/// Parse ESTree JSON holding a single node or an array of top-level nodes.
pub fn parse_nodes(json: &str) -> Result<Vec<Node>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let nodes = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(nodes)
}

/// Read and parse an ESTree JSON file.
pub fn read_nodes(path: &Path) -> Result<Vec<Node>> {
    let json = std::fs::read_to_string(path)?;
    parse_nodes(&json)
}

/// Print a tree to a document with the global printer registry.
pub fn print_node_doc(node: &Node, grammar: Grammar, config: &Config) -> Result<Doc> {
    let registry = plugin::global();
    let formatters = FormatterRegistry::with_defaults(&config.sql);
    let options = config.print_options();
    let printer = Printer::new(grammar, registry.embed_for(grammar), &formatters, &options);
    printer.print_root(node)
}

/// Format a single tree to text.
pub fn format_node(node: &Node, grammar: Grammar, config: &Config) -> Result<String> {
    let doc = print_node_doc(node, grammar, config)?;
    Ok(print_doc(&doc, &config.print_options()))
}

/// Format a sequence of top-level trees, one per line, with a trailing
/// newline.
pub fn format_program(nodes: &[Node], grammar: Grammar, config: &Config) -> Result<String> {
    if nodes.is_empty() {
        return Ok(String::new());
    }
    let docs = nodes
        .iter()
        .map(|node| print_node_doc(node, grammar, config))
        .collect::<Result<Vec<_>>>()?;
    let program = Doc::Concat(vec![join(hardline(), docs), hardline()]);
    Ok(print_doc(&program, &config.print_options()))
}
