/// Command module for the `tmplcycle` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the already-read input and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod check;
pub mod order;

use tmplcycle_core::{
    BuildOptions, DuplicatePolicy, TemplateGraph, build_graph_with, parse_templates,
};

use crate::error::CliError;

/// Decodes `content` and builds the inheritance graph.
///
/// Under `strict`, a repeated template id is an error; otherwise the last
/// definition wins.
///
/// # Errors
///
/// [`CliError::ParseFailed`] or [`CliError::InvalidTemplates`], both exit
/// code 2.
pub fn load_graph(content: &str, strict: bool) -> Result<TemplateGraph, CliError> {
    let templates = parse_templates(content).map_err(|e| CliError::ParseFailed {
        detail: e.to_string(),
    })?;

    let options = BuildOptions {
        duplicates: if strict {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::LastWriteWins
        },
    };
    let graph = build_graph_with(&templates, &options).map_err(|e| CliError::InvalidTemplates {
        detail: e.to_string(),
    })?;

    tracing::debug!(
        templates = templates.len(),
        distinct = graph.node_count(),
        edges = graph.edge_count(),
        dangling = graph.dangling_references().len(),
        "built inheritance graph"
    );
    Ok(graph)
}
