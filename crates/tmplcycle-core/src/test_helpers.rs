//! Shared test helper functions for constructing test fixtures.
//!
//! This module is compiled only in test builds. Integration tests in
//! `crates/tmplcycle-core/tests/` define their own local helpers because they
//! link against the non-test library build where this module is not
//! available.
#![allow(clippy::expect_used)]

use petgraph::stable_graph::NodeIndex;

use crate::graph::TemplateGraph;
use crate::template::Template;

/// Creates a [`Template`] from string slices, panicking on invalid ids.
pub fn tpl(id: &str, parents: &[&str]) -> Template {
    Template::new(id, parents).expect("valid template")
}

/// Resolves node indices back to their template id strings.
pub fn ids_of(graph: &TemplateGraph, nodes: &[NodeIndex]) -> Vec<String> {
    nodes
        .iter()
        .map(|&idx| graph.template_id(idx).expect("node must exist").to_string())
        .collect()
}
