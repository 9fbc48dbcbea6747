//! Property-based tests for the cycle detector.
//!
//! Generates small template sets (1-12 templates, up to 4 parents each, with
//! some parents pointing at ids outside the set) and checks soundness,
//! per-component completeness, agreement with `petgraph`, idempotence and the
//! parents-first guarantee of `resolution_order`.
#![allow(clippy::expect_used)]

use std::collections::{HashMap, HashSet};

use petgraph::algo::{is_cyclic_directed, kosaraju_scc};
use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeRef as _, IntoEdgeReferences as _, NodeIndexable as _};
use proptest::prelude::*;
use tmplcycle_core::{
    CycleReport, Template, TemplateGraph, build_graph, detect, detect_cycles, resolution_order,
};

const MAX_TEMPLATES: usize = 12;

/// Template id for slot `i`. Slots at or beyond the template count are
/// dangling references.
fn name(i: usize) -> String {
    format!("t{i}")
}

fn make_templates(raw: &[Vec<usize>]) -> Vec<Template> {
    raw.iter()
        .enumerate()
        .map(|(i, parents)| {
            let parent_names: Vec<String> = parents.iter().map(|&p| name(p)).collect();
            Template::new(&name(i), &parent_names).expect("valid template")
        })
        .collect()
}

/// Strategy: arbitrary template sets, cycles and dangling references allowed.
fn arb_templates() -> impl Strategy<Value = Vec<Template>> {
    (1usize..=MAX_TEMPLATES)
        .prop_flat_map(|n| {
            prop::collection::vec(prop::collection::vec(0usize..n + 2, 0..=4), n)
        })
        .prop_map(|raw| make_templates(&raw))
}

/// Strategy: acyclic template sets. Template `i` only inherits from
/// templates with a higher index, so no cycle can form.
fn arb_acyclic_templates() -> impl Strategy<Value = Vec<Template>> {
    (1usize..=MAX_TEMPLATES)
        .prop_flat_map(|n| {
            prop::collection::vec(prop::collection::vec(0usize..n, 0..=3), n).prop_map(
                move |raw| {
                    raw.into_iter()
                        .enumerate()
                        .map(|(i, parents)| {
                            parents
                                .into_iter()
                                .filter(|&p| p > i)
                                .collect::<Vec<_>>()
                        })
                        .collect::<Vec<_>>()
                },
            )
        })
        .prop_map(|raw| make_templates(&raw))
}

fn parent_map(templates: &[Template]) -> HashMap<String, HashSet<String>> {
    templates
        .iter()
        .map(|t| {
            (
                t.id.to_string(),
                t.parents.iter().map(ToString::to_string).collect(),
            )
        })
        .collect()
}

/// Checks that `report` is a closed walk along declared parent edges with no
/// repeated id apart from the closing one.
fn assert_sound(report: &CycleReport, parents: &HashMap<String, HashSet<String>>) {
    let ids: Vec<&str> = report.ids().iter().map(|id| id.as_str()).collect();
    assert!(ids.len() >= 2, "cycle too short: {report}");
    assert_eq!(ids.first(), ids.last(), "cycle not closed: {report}");

    let open = &ids[..ids.len() - 1];
    let distinct: HashSet<&str> = open.iter().copied().collect();
    assert_eq!(distinct.len(), open.len(), "cycle repeats an id: {report}");

    for pair in ids.windows(2) {
        let declared = parents.get(pair[0]).expect("cycle node is a template");
        assert!(
            declared.contains(pair[1]),
            "{} does not inherit from {} in {report}",
            pair[0],
            pair[1]
        );
    }
}

/// Weakly connected component label for every template id.
fn components(graph: &TemplateGraph) -> HashMap<String, usize> {
    let g = graph.graph();
    let mut uf = UnionFind::<usize>::new(g.node_bound());
    for e in g.edge_references() {
        uf.union(e.source().index(), e.target().index());
    }
    graph
        .traversal_order()
        .iter()
        .map(|&idx| {
            let id = graph.template_id(idx).expect("node exists").to_string();
            (id, uf.find(idx.index()))
        })
        .collect()
}

/// Component labels that contain at least one cycle.
fn cyclic_components(graph: &TemplateGraph, labels: &HashMap<String, usize>) -> HashSet<usize> {
    let g = graph.graph();
    kosaraju_scc(g)
        .into_iter()
        .filter(|scc| scc.len() > 1 || g.find_edge(scc[0], scc[0]).is_some())
        .map(|scc| {
            let id = graph.template_id(scc[0]).expect("node exists").to_string();
            labels[&id]
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_report_is_a_closed_walk(templates in arb_templates()) {
        let parents = parent_map(&templates);
        for report in detect(&templates).expect("builds") {
            assert_sound(&report, &parents);
        }
    }

    #[test]
    fn detection_agrees_with_petgraph(templates in arb_templates()) {
        let graph = build_graph(&templates).expect("builds");
        let cycles = detect_cycles(&graph);
        prop_assert_eq!(!cycles.is_empty(), is_cyclic_directed(graph.graph()));
    }

    #[test]
    fn every_cyclic_component_is_reported(templates in arb_templates()) {
        let graph = build_graph(&templates).expect("builds");
        let labels = components(&graph);
        let cyclic = cyclic_components(&graph, &labels);
        let cycles = detect_cycles(&graph);

        let reported: HashSet<usize> = cycles
            .iter()
            .filter_map(|c| c.start())
            .map(|id| labels[id.as_str()])
            .collect();
        for component in &cyclic {
            prop_assert!(
                reported.contains(component),
                "component {} has a cycle but none was reported; got {:?}",
                component,
                cycles
            );
        }
        // Every report lies in a component that really is cyclic.
        for component in &reported {
            prop_assert!(cyclic.contains(component));
        }
    }

    #[test]
    fn acyclic_sets_report_nothing(templates in arb_acyclic_templates()) {
        prop_assert!(detect(&templates).expect("builds").is_empty());
    }

    #[test]
    fn detection_is_idempotent(templates in arb_templates()) {
        let first = detect(&templates).expect("builds");
        let second = detect(&templates).expect("builds");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn resolution_order_puts_parents_first(templates in arb_acyclic_templates()) {
        let graph = build_graph(&templates).expect("builds");
        let order = resolution_order(&graph).expect("acyclic");
        prop_assert_eq!(order.len(), templates.len());

        let position: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        for t in &templates {
            for parent in &t.parents {
                prop_assert!(position[parent.as_str()] < position[t.id.as_str()]);
            }
        }
    }

    #[test]
    fn resolution_order_fails_exactly_when_cyclic(templates in arb_templates()) {
        let graph = build_graph(&templates).expect("builds");
        let cyclic = !detect_cycles(&graph).is_empty();
        prop_assert_eq!(resolution_order(&graph).is_err(), cyclic);
    }
}
