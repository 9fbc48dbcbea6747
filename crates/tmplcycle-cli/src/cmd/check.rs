//! Implementation of `tmplcycle check <file>`.
//!
//! Decodes a template list, builds the inheritance graph, and reports every
//! cycle the traversal finds.
//!
//! Output (human mode): one `cycle: A -> B -> A` line per report on stdout;
//! dangling-parent warnings and a summary line on stderr.
//! Output (JSON mode): `{"template_count": N, "cycles": [[...]], "dangling": [...]}`.
//!
//! Exit codes: 0 = no cycles, 1 = at least one cycle, 2 = input failure.
use tmplcycle_core::detect_cycles;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::format::{
    FormatterConfig, write_check_json, write_cycles_human, write_dangling_human,
    write_summary_human,
};

/// Runs the `check` command.
///
/// # Errors
///
/// - [`CliError`] exit code 2 if the input cannot be decoded, or repeats a
///   template id under `strict`.
/// - [`CliError::CyclesFound`] (exit code 1) if any cycle is reported.
pub fn run(
    content: &str,
    strict: bool,
    format: OutputFormat,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let graph = super::load_graph(content, strict)?;
    let cycles = detect_cycles(&graph);
    let dangling = graph.dangling_references();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        OutputFormat::Human => {
            let stderr = std::io::stderr();
            let mut err = stderr.lock();
            write_dangling_human(&mut err, dangling, config)
                .and_then(|()| write_cycles_human(&mut out, &cycles, config))
                .and_then(|()| {
                    write_summary_human(&mut err, cycles.len(), graph.node_count(), config)
                })
        }
        OutputFormat::Json => write_check_json(&mut out, graph.node_count(), &cycles, dangling),
    };
    written.map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })?;

    if cycles.is_empty() {
        Ok(())
    } else {
        Err(CliError::CyclesFound {
            count: cycles.len(),
        })
    }
}
