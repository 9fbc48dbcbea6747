//! Post-operation invariant checkers for correctness validation.

use std::collections::{HashMap, HashSet};

use tmplcycle_core::{CycleReport, TemplateGraph, TemplateId};

/// Verifies that `report` is a closed inheritance path in `graph`:
/// - at least two entries, first equals last
/// - every consecutive pair `(child, parent)` is a resolved parent link
/// - no template repeats except the closing one
pub fn check_cycle_report(graph: &TemplateGraph, report: &CycleReport) -> Result<(), String> {
    let ids = report.ids();
    if ids.len() < 2 {
        return Err(format!("cycle too short: {report}"));
    }
    if ids.first() != ids.last() {
        return Err(format!("cycle does not close: {report}"));
    }

    let interior: HashSet<&TemplateId> = ids[..ids.len() - 1].iter().collect();
    if interior.len() != ids.len() - 1 {
        return Err(format!("cycle repeats a template: {report}"));
    }

    for pair in ids.windows(2) {
        let (child, parent) = (&pair[0], &pair[1]);
        let child_idx = graph
            .node_index(child)
            .ok_or_else(|| format!("cycle names unknown template {child}"))?;
        let parent_idx = graph
            .node_index(parent)
            .ok_or_else(|| format!("cycle names unknown template {parent}"))?;
        if !graph.parents(child_idx).contains(&parent_idx) {
            return Err(format!("{child} does not inherit from {parent} in {report}"));
        }
    }
    Ok(())
}

/// Verifies that no template appears in two reports. Each search only walks
/// templates no earlier search finished, so reports are disjoint.
pub fn check_reports_disjoint(reports: &[CycleReport]) -> Result<(), String> {
    let mut seen: HashSet<&TemplateId> = HashSet::new();
    for report in reports {
        let ids = report.ids();
        for id in &ids[..ids.len().saturating_sub(1)] {
            if !seen.insert(id) {
                return Err(format!("{id} appears in two reports"));
            }
        }
    }
    Ok(())
}

/// Verifies a resolution order:
/// - every template in the graph appears exactly once
/// - every resolved parent appears before each template inheriting from it
pub fn check_resolution_order(graph: &TemplateGraph, order: &[TemplateId]) -> Result<(), String> {
    if order.len() != graph.node_count() {
        return Err(format!(
            "order length mismatch: order={}, graph={}",
            order.len(),
            graph.node_count()
        ));
    }

    let mut position: HashMap<&str, usize> = HashMap::with_capacity(order.len());
    for (i, id) in order.iter().enumerate() {
        if position.insert(id.as_str(), i).is_some() {
            return Err(format!("{id} appears twice in order"));
        }
    }

    for &idx in graph.traversal_order() {
        let child = graph
            .template_id(idx)
            .ok_or_else(|| format!("dangling node index {idx:?}"))?;
        let child_pos = position
            .get(child.as_str())
            .copied()
            .ok_or_else(|| format!("{child} missing from order"))?;
        for parent_idx in graph.parents(idx) {
            let parent = graph
                .template_id(parent_idx)
                .ok_or_else(|| format!("dangling node index {parent_idx:?}"))?;
            let parent_pos = position
                .get(parent.as_str())
                .copied()
                .ok_or_else(|| format!("{parent} missing from order"))?;
            if parent_pos >= child_pos {
                return Err(format!("{parent} does not precede {child}"));
            }
        }
    }
    Ok(())
}

/// Verifies that cycle detection agrees with petgraph's own cycle test.
pub fn check_agrees_with_petgraph(
    graph: &TemplateGraph,
    reports: &[CycleReport],
) -> Result<(), String> {
    let petgraph_cyclic = petgraph::algo::is_cyclic_directed(graph.graph());
    if petgraph_cyclic == reports.is_empty() {
        return Err(format!(
            "petgraph cyclic={petgraph_cyclic}, reports={}",
            reports.len()
        ));
    }
    Ok(())
}
