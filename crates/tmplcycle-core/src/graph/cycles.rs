/// Circular inheritance detection for the template graph.
///
/// # Algorithm Overview
///
/// A colored depth-first search over a forest of searches. Every template
/// carries a [`NodeState`]: `Unvisited`, `InProgress` (its search frame is on
/// the stack) or `Finished`. The driver walks templates in input order and
/// starts a new search from each one that is still `Unvisited`.
///
/// A search follows parents in declared order:
/// - `Unvisited` parent: descend.
/// - `InProgress` parent: back-edge. The parent is an ancestor on the active
///   path, so the path suffix from the parent to the current node, closed by
///   the parent again, is a cycle. The search stops and reports it.
/// - `Finished` parent: cross-edge into a fully explored subtree. Skipped.
///
/// Each search reports at most one cycle, the first back-edge it meets. When
/// a search stops on a cycle, every node it left `InProgress` is marked
/// `Finished` so that no later search enters it again.
///
/// The search is iterative over an explicit frame stack, each frame holding
/// a node and the position of its next parent, so deep inheritance chains do
/// not exhaust the native call stack.
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::NodeIndexable as _;
use serde::Serialize;

use crate::graph::{GraphBuildError, TemplateGraph, build_graph};
use crate::newtypes::TemplateId;
use crate::template::Template;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Per-node traversal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Not yet reached by any search.
    Unvisited,
    /// On the active path of the current search.
    InProgress {
        /// Index of the node on the active path.
        depth: usize,
    },
    /// Fully explored (or abandoned after its search reported a cycle).
    Finished,
}

/// A closed walk through the inheritance graph.
///
/// The first and last ids are equal; no other id repeats. A self-reference
/// is reported as `[A, A]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CycleReport(Vec<TemplateId>);

impl CycleReport {
    /// Returns the ids of the closed walk, start id repeated at the end.
    pub fn ids(&self) -> &[TemplateId] {
        &self.0
    }

    /// Returns the template where the back-edge closed the loop.
    pub fn start(&self) -> Option<&TemplateId> {
        self.0.first()
    }

    /// Returns the number of distinct templates on the cycle.
    pub fn len(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Returns `true` for an empty report. Reports produced by the detector
    /// are never empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `id` lies on the cycle.
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|t| t.as_str() == id)
    }
}

impl std::fmt::Display for CycleReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(id)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Builds the graph for `templates` with default options and detects cycles.
///
/// Returns one [`CycleReport`] per top-level search that found a cycle, in
/// the order the searches ran. An empty `Vec` means no cycle, which is also
/// the answer for an empty input.
///
/// # Errors
///
/// Propagates [`GraphBuildError`] from graph construction.
pub fn detect(templates: &[Template]) -> Result<Vec<CycleReport>, GraphBuildError> {
    let graph = build_graph(templates)?;
    Ok(detect_cycles(&graph))
}

/// Like [`detect`], but returns `None` instead of an empty list.
///
/// # Errors
///
/// Propagates [`GraphBuildError`] from graph construction.
pub fn find_circular_dependency(
    templates: &[Template],
) -> Result<Option<Vec<CycleReport>>, GraphBuildError> {
    let cycles = detect(templates)?;
    Ok(if cycles.is_empty() { None } else { Some(cycles) })
}

/// Detects circular inheritance in `graph`.
///
/// Searches start from each template in input order that no earlier search
/// reached. A search reports the first back-edge it finds and then stops, so
/// a component holding several independent cycles yields one report per
/// search that reached it, not one per cycle.
pub fn detect_cycles(graph: &TemplateGraph) -> Vec<CycleReport> {
    let walk = Traversal::new(graph).run();
    tracing::debug!(
        templates = graph.node_count(),
        cycles = walk.cycles.len(),
        "cycle detection finished"
    );
    walk.cycles
}

/// Returns `true` if no template inherits from itself, directly or
/// transitively.
pub fn is_acyclic(graph: &TemplateGraph) -> bool {
    detect_cycles(graph).is_empty()
}

/// Returns an order in which every parent precedes each template that
/// inherits from it.
///
/// The order is the sequence in which templates finish in the traversal
/// that [`detect_cycles`] performs. Ties follow input order and declared
/// parent order, so the result is deterministic.
///
/// # Errors
///
/// Returns the first [`CycleReport`] found when the graph is cyclic.
pub fn resolution_order(graph: &TemplateGraph) -> Result<Vec<TemplateId>, CycleReport> {
    let walk = Traversal::new(graph).run();
    if let Some(first) = walk.cycles.into_iter().next() {
        return Err(first);
    }
    Ok(walk
        .finish_order
        .iter()
        .filter_map(|&idx| graph.template_id(idx).cloned())
        .collect())
}

// ---------------------------------------------------------------------------
// Internal: traversal
// ---------------------------------------------------------------------------

/// One entry of the explicit DFS stack.
struct Frame {
    node: NodeIndex,
    parents: Vec<NodeIndex>,
    next: usize,
}

/// Outcome of a full forest traversal.
struct Walk {
    cycles: Vec<CycleReport>,
    finish_order: Vec<NodeIndex>,
}

/// Traversal state owned by a single invocation.
struct Traversal<'g> {
    graph: &'g TemplateGraph,
    states: Vec<NodeState>,
    path: Vec<NodeIndex>,
    finish_order: Vec<NodeIndex>,
}

impl<'g> Traversal<'g> {
    fn new(graph: &'g TemplateGraph) -> Self {
        Self {
            graph,
            states: vec![NodeState::Unvisited; graph.graph().node_bound()],
            path: Vec::new(),
            finish_order: Vec::with_capacity(graph.node_count()),
        }
    }

    fn state(&self, node: NodeIndex) -> NodeState {
        self.states
            .get(node.index())
            .copied()
            .unwrap_or(NodeState::Finished)
    }

    fn set_state(&mut self, node: NodeIndex, state: NodeState) {
        if let Some(slot) = self.states.get_mut(node.index()) {
            *slot = state;
        }
    }

    /// Runs one search per template still unvisited, in input order.
    fn run(&mut self) -> Walk {
        let mut cycles = Vec::new();
        for &root in self.graph.traversal_order() {
            if self.state(root) != NodeState::Unvisited {
                continue;
            }
            if let Some(cycle) = self.search(root) {
                cycles.push(cycle);
            }
        }
        Walk {
            cycles,
            finish_order: std::mem::take(&mut self.finish_order),
        }
    }

    /// Marks `node` in progress and returns its stack frame.
    fn enter(&mut self, node: NodeIndex) -> Frame {
        self.set_state(
            node,
            NodeState::InProgress {
                depth: self.path.len(),
            },
        );
        self.path.push(node);
        Frame {
            node,
            parents: self.graph.parents(node),
            next: 0,
        }
    }

    fn finish(&mut self, node: NodeIndex) {
        self.set_state(node, NodeState::Finished);
        self.path.pop();
        self.finish_order.push(node);
    }

    /// Depth-first search from `root`. Returns the first cycle found.
    fn search(&mut self, root: NodeIndex) -> Option<CycleReport> {
        tracing::trace!(root = ?self.graph.template_id(root), "starting search");

        let mut stack: Vec<Frame> = vec![self.enter(root)];

        while let Some(frame) = stack.last_mut() {
            let Some(&parent) = frame.parents.get(frame.next) else {
                // Every parent explored without a cycle.
                let node = frame.node;
                stack.pop();
                self.finish(node);
                continue;
            };
            frame.next += 1;

            match self.state(parent) {
                NodeState::Unvisited => {
                    let child_frame = self.enter(parent);
                    stack.push(child_frame);
                }
                NodeState::InProgress { depth } => {
                    let cycle = self.close_cycle(depth, parent);
                    tracing::debug!(%cycle, "back-edge found");
                    self.abandon();
                    return Some(cycle);
                }
                NodeState::Finished => {
                    tracing::trace!(
                        parent = ?self.graph.template_id(parent),
                        "cross-edge into finished subtree skipped"
                    );
                }
            }
        }

        None
    }

    /// Builds the cycle from the active path suffix starting at `depth`,
    /// closed by `target`.
    fn close_cycle(&self, depth: usize, target: NodeIndex) -> CycleReport {
        let ids: Vec<TemplateId> = self.path[depth..]
            .iter()
            .chain(std::iter::once(&target))
            .filter_map(|&idx| self.graph.template_id(idx).cloned())
            .collect();
        CycleReport(ids)
    }

    /// Marks every node left on the active path as finished and clears it.
    fn abandon(&mut self) {
        let path = std::mem::take(&mut self.path);
        for node in path {
            self.set_state(node, NodeState::Finished);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
