//! Implementation of `tmplcycle order <file>`.
//!
//! Prints an order in which the templates can be resolved: every parent
//! appears before each template that inherits from it.
//!
//! Output (human mode): one template id per line.
//! Output (JSON mode): `{"template_count": N, "order": [...]}`.
//!
//! Exit codes: 0 = order printed, 1 = the graph has a cycle, 2 = input
//! failure.
use tmplcycle_core::resolution_order;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::format::{write_order_human, write_order_json};

/// Runs the `order` command.
///
/// # Errors
///
/// - [`CliError`] exit code 2 if the input cannot be decoded, or repeats a
///   template id under `strict`.
/// - [`CliError::UnresolvableOrder`] (exit code 1) naming the first cycle
///   found.
pub fn run(content: &str, strict: bool, format: OutputFormat) -> Result<(), CliError> {
    let graph = super::load_graph(content, strict)?;
    let order = resolution_order(&graph).map_err(|cycle| CliError::UnresolvableOrder {
        cycle: cycle.to_string(),
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => write_order_human(&mut out, &order),
        OutputFormat::Json => write_order_json(&mut out, &order),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}
