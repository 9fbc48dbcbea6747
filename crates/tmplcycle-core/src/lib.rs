#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod graph;
pub mod newtypes;
pub mod template;

#[cfg(test)]
mod test_helpers;

pub use graph::{
    BuildOptions, CycleReport, DanglingRef, DuplicatePolicy, EdgeWeight, GraphBuildError,
    NodeState, NodeWeight, TemplateGraph, build_graph, build_graph_with, detect, detect_cycles,
    find_circular_dependency, is_acyclic, resolution_order,
};
pub use newtypes::{InvalidTemplateError, TemplateId};
pub use template::{Template, TemplateDecodeError, parse_templates};

/// Returns the current version of the tmplcycle-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
