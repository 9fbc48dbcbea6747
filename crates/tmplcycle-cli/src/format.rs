/// Report formatting: human-readable and JSON modes.
///
/// - **Human mode** (default): one `cycle:` line per report on stdout,
///   warnings and a summary line on stderr. The `cycle:` tag is red and the
///   `[W]` tag yellow when colors are enabled. Colors are disabled when
///   `--no-color` is set, the `NO_COLOR` environment variable is present (per
///   <https://no-color.org>), or stderr is not a TTY.
/// - **JSON mode**: a single JSON object on stdout.
///
/// The **quiet** flag suppresses warnings and the summary line.
use std::io::{IsTerminal as _, Write};

use serde::Serialize;
use tmplcycle_core::{CycleReport, DanglingRef, TemplateId};

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

const ANSI_RED: &str = "\x1b[31m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for the report formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress warnings and the summary line.
    pub quiet: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(no_color_flag: bool, quiet: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.colors {
            format!("{color}{text}{ANSI_RESET}")
        } else {
            text.to_owned()
        }
    }
}

// ---------------------------------------------------------------------------
// Human mode
// ---------------------------------------------------------------------------

/// Writes one `cycle: A -> B -> A` line per report.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_cycles_human<W: Write>(
    writer: &mut W,
    cycles: &[CycleReport],
    config: &FormatterConfig,
) -> std::io::Result<()> {
    let tag = config.paint(ANSI_RED, "cycle:");
    for cycle in cycles {
        writeln!(writer, "{tag} {cycle}")?;
    }
    Ok(())
}

/// Writes a `[W]` line per dangling parent reference. Suppressed in quiet
/// mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_dangling_human<W: Write>(
    writer: &mut W,
    dangling: &[DanglingRef],
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    let tag = config.paint(ANSI_YELLOW, "[W]");
    for d in dangling {
        writeln!(
            writer,
            "{tag} template {:?} inherits from unknown template {:?}",
            d.template.as_str(),
            d.missing_parent.as_str()
        )?;
    }
    Ok(())
}

/// Writes the summary line, e.g. `2 cycles in 5 templates`. Suppressed in
/// quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary_human<W: Write>(
    writer: &mut W,
    cycle_count: usize,
    template_count: usize,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    let cycles = match cycle_count {
        0 => "no cycles".to_owned(),
        n => format!("{n} {}", pluralize(n, "cycle", "cycles")),
    };
    writeln!(
        writer,
        "{cycles} in {template_count} {}",
        pluralize(template_count, "template", "templates")
    )
}

/// Writes a resolution order, one template id per line.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_order_human<W: Write>(writer: &mut W, order: &[TemplateId]) -> std::io::Result<()> {
    for id in order {
        writeln!(writer, "{id}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON mode
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DanglingJson<'a> {
    template: &'a str,
    missing_parent: &'a str,
}

#[derive(Serialize)]
struct CheckJson<'a> {
    template_count: usize,
    cycles: &'a [CycleReport],
    dangling: Vec<DanglingJson<'a>>,
}

#[derive(Serialize)]
struct OrderJson<'a> {
    template_count: usize,
    order: &'a [TemplateId],
}

/// Writes the `check` result as one JSON object followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_check_json<W: Write>(
    writer: &mut W,
    template_count: usize,
    cycles: &[CycleReport],
    dangling: &[DanglingRef],
) -> std::io::Result<()> {
    let doc = CheckJson {
        template_count,
        cycles,
        dangling: dangling
            .iter()
            .map(|d| DanglingJson {
                template: d.template.as_str(),
                missing_parent: d.missing_parent.as_str(),
            })
            .collect(),
    };
    serde_json::to_writer(&mut *writer, &doc)?;
    writeln!(writer)
}

/// Writes the `order` result as one JSON object followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_order_json<W: Write>(writer: &mut W, order: &[TemplateId]) -> std::io::Result<()> {
    let doc = OrderJson {
        template_count: order.len(),
        order,
    };
    serde_json::to_writer(&mut *writer, &doc)?;
    writeln!(writer)
}

fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use tmplcycle_core::{Template, build_graph, detect};

    use super::*;

    fn plain() -> FormatterConfig {
        FormatterConfig {
            colors: false,
            quiet: false,
        }
    }

    fn quiet() -> FormatterConfig {
        FormatterConfig {
            colors: false,
            quiet: true,
        }
    }

    fn tpl(id: &str, parents: &[&str]) -> Template {
        Template::new(id, parents).expect("valid template")
    }

    fn two_cycles() -> Vec<CycleReport> {
        detect(&[tpl("A", &["B"]), tpl("B", &["A"]), tpl("C", &["C"])]).expect("builds")
    }

    fn capture<F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn human_cycles_one_line_each() {
        let cycles = two_cycles();
        let out = capture(|w| write_cycles_human(w, &cycles, &plain()));
        assert_eq!(out, "cycle: A -> B -> A\ncycle: C -> C\n");
    }

    #[test]
    fn human_cycles_colored_tag() {
        let cycles = two_cycles();
        let config = FormatterConfig {
            colors: true,
            quiet: false,
        };
        let out = capture(|w| write_cycles_human(w, &cycles, &config));
        assert!(out.starts_with("\x1b[31mcycle:\x1b[0m A -> B -> A"), "{out:?}");
    }

    #[test]
    fn human_summary_counts() {
        let out = capture(|w| write_summary_human(w, 2, 5, &plain()));
        assert_eq!(out, "2 cycles in 5 templates\n");
        let out = capture(|w| write_summary_human(w, 1, 1, &plain()));
        assert_eq!(out, "1 cycle in 1 template\n");
        let out = capture(|w| write_summary_human(w, 0, 3, &plain()));
        assert_eq!(out, "no cycles in 3 templates\n");
    }

    #[test]
    fn human_summary_suppressed_in_quiet_mode() {
        let out = capture(|w| write_summary_human(w, 2, 5, &quiet()));
        assert!(out.is_empty());
    }

    #[test]
    fn human_dangling_warnings() {
        let g = build_graph(&[tpl("A", &["ghost"])]).expect("builds");
        let out = capture(|w| write_dangling_human(w, g.dangling_references(), &plain()));
        assert_eq!(
            out,
            "[W] template \"A\" inherits from unknown template \"ghost\"\n"
        );
        let out = capture(|w| write_dangling_human(w, g.dangling_references(), &quiet()));
        assert!(out.is_empty());
    }

    #[test]
    fn human_order_one_id_per_line() {
        let g = build_graph(&[tpl("A", &["B"]), tpl("B", &[])]).expect("builds");
        let order = tmplcycle_core::resolution_order(&g).expect("acyclic");
        let out = capture(|w| write_order_human(w, &order));
        assert_eq!(out, "B\nA\n");
    }

    #[test]
    fn json_check_document() {
        let g = build_graph(&[tpl("A", &["B", "ghost"]), tpl("B", &["A"])]).expect("builds");
        let cycles = tmplcycle_core::detect_cycles(&g);
        let out = capture(|w| write_check_json(w, 2, &cycles, g.dangling_references()));
        assert!(out.ends_with('\n'));
        let v: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(v["template_count"], 2);
        assert_eq!(v["cycles"], serde_json::json!([["A", "B", "A"]]));
        assert_eq!(v["dangling"][0]["template"], "A");
        assert_eq!(v["dangling"][0]["missing_parent"], "ghost");
    }

    #[test]
    fn json_order_document() {
        let g = build_graph(&[tpl("A", &["B"]), tpl("B", &[])]).expect("builds");
        let order = tmplcycle_core::resolution_order(&g).expect("acyclic");
        let out = capture(|w| write_order_json(w, &order));
        let v: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(v["order"], serde_json::json!(["B", "A"]));
        assert_eq!(v["template_count"], 2);
    }

    #[test]
    fn colors_disabled_by_no_color_flag() {
        assert!(!colors_enabled(true));
    }
}
