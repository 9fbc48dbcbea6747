/// Inheritance graph construction from a template list using `petgraph`.
///
/// Wraps a `StableDiGraph` with typed node and edge weights. Every template
/// becomes a node; every declared parent that names a known template becomes
/// an edge `template -> parent`. Parents that name no template in the input
/// (dangling references) are recorded but produce no edge.
///
/// # Two-Pass Construction
///
/// [`build_graph_with`] runs two passes over the input:
/// 1. **Node pass** inserts one node per distinct id, in first-appearance
///    order, and records the `id -> NodeIndex` mapping. Repeated ids are
///    handled per [`DuplicatePolicy`].
/// 2. **Edge pass** resolves each node's declared parents and inserts one
///    edge per resolvable parent, tagged with its position in the
///    declaration so traversal can follow declared order.
///
/// # Cycle Detection
///
/// See the [`cycles`] submodule for the colored depth-first search.
pub mod cycles;

pub use cycles::{
    CycleReport, NodeState, detect, detect_cycles, find_circular_dependency, is_acyclic,
    resolution_order,
};

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef as _;

use crate::newtypes::TemplateId;
use crate::template::Template;

/// Weight stored on each petgraph node.
#[derive(Debug, Clone)]
pub struct NodeWeight {
    /// The template's identifier.
    pub template_id: TemplateId,
    /// The declared parent list, copied from the input so that later
    /// mutation of the caller's templates cannot affect the graph.
    pub parents: Vec<TemplateId>,
    /// Index of the template's first appearance in the input.
    pub position: usize,
}

/// Weight stored on each petgraph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeWeight {
    /// Position of the parent within the child's declared parent list.
    pub ordinal: usize,
}

/// How repeated template ids in one input are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later definition replaces the earlier parent list. The template
    /// keeps the traversal position of its first appearance.
    #[default]
    LastWriteWins,
    /// Fail with [`GraphBuildError::DuplicateTemplateId`].
    Reject,
}

/// Options for [`build_graph_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Policy for repeated template ids.
    pub duplicates: DuplicatePolicy,
}

/// Errors that can occur during graph construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphBuildError {
    /// Two templates share the same id and [`DuplicatePolicy::Reject`] is in
    /// effect.
    ///
    /// The contained string is the duplicate id.
    DuplicateTemplateId(String),
}

impl std::fmt::Display for GraphBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphBuildError::DuplicateTemplateId(id) => {
                write!(f, "duplicate template id: {id:?}")
            }
        }
    }
}

impl std::error::Error for GraphBuildError {}

/// A declared parent that names no template in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRef {
    /// The template that declares the parent.
    pub template: TemplateId,
    /// The parent id that could not be resolved.
    pub missing_parent: TemplateId,
}

/// The template inheritance graph: an adjacency view `id -> parents`.
///
/// Not mutated after construction. Construct with [`build_graph`] or
/// [`build_graph_with`].
#[derive(Debug)]
pub struct TemplateGraph {
    graph: StableDiGraph<NodeWeight, EdgeWeight>,
    id_to_index: HashMap<TemplateId, NodeIndex>,
    order: Vec<NodeIndex>,
    dangling: Vec<DanglingRef>,
}

impl TemplateGraph {
    /// Returns the number of templates in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of resolved inheritance edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` when the graph holds no templates.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Looks up the [`NodeIndex`] for a template id.
    ///
    /// Returns `None` if no template with that id exists.
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    /// Returns the [`NodeWeight`] for the given index.
    pub fn node_weight(&self, idx: NodeIndex) -> Option<&NodeWeight> {
        self.graph.node_weight(idx)
    }

    /// Returns the template id stored at `idx`.
    pub fn template_id(&self, idx: NodeIndex) -> Option<&TemplateId> {
        self.graph.node_weight(idx).map(|w| &w.template_id)
    }

    /// Returns the node indices in input order (first appearance of each id).
    pub fn traversal_order(&self) -> &[NodeIndex] {
        &self.order
    }

    /// Returns the template ids in input order.
    pub fn template_ids(&self) -> impl Iterator<Item = &TemplateId> + '_ {
        self.order.iter().filter_map(|&idx| self.template_id(idx))
    }

    /// Returns the resolved parents of `idx` in declared order.
    ///
    /// Dangling parents are omitted. A parent declared twice appears twice.
    pub fn parents(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut ordered: Vec<(usize, NodeIndex)> = self
            .graph
            .edges(idx)
            .map(|e| (e.weight().ordinal, e.target()))
            .collect();
        ordered.sort_unstable_by_key(|&(ordinal, _)| ordinal);
        ordered.into_iter().map(|(_, target)| target).collect()
    }

    /// Returns every declared parent that names no template, in input order.
    pub fn dangling_references(&self) -> &[DanglingRef] {
        &self.dangling
    }

    /// Returns a reference to the underlying [`StableDiGraph`].
    pub fn graph(&self) -> &StableDiGraph<NodeWeight, EdgeWeight> {
        &self.graph
    }
}

/// Constructs a [`TemplateGraph`] with default [`BuildOptions`]
/// (last definition of a repeated id wins).
///
/// # Errors
///
/// Never fails under the default options; the `Result` mirrors
/// [`build_graph_with`].
pub fn build_graph(templates: &[Template]) -> Result<TemplateGraph, GraphBuildError> {
    build_graph_with(templates, &BuildOptions::default())
}

/// Constructs a [`TemplateGraph`] from an ordered list of templates.
///
/// Construction is O(N + P) where N is the template count and P the total
/// number of declared parents.
///
/// # Errors
///
/// - [`GraphBuildError::DuplicateTemplateId`] when an id repeats and
///   `options.duplicates` is [`DuplicatePolicy::Reject`].
pub fn build_graph_with(
    templates: &[Template],
    options: &BuildOptions,
) -> Result<TemplateGraph, GraphBuildError> {
    let parent_total: usize = templates.iter().map(|t| t.parents.len()).sum();

    let mut graph: StableDiGraph<NodeWeight, EdgeWeight> =
        StableDiGraph::with_capacity(templates.len(), parent_total);
    let mut id_to_index: HashMap<TemplateId, NodeIndex> = HashMap::with_capacity(templates.len());
    let mut order: Vec<NodeIndex> = Vec::with_capacity(templates.len());

    for (position, template) in templates.iter().enumerate() {
        if let Some(&existing) = id_to_index.get(&template.id) {
            match options.duplicates {
                DuplicatePolicy::Reject => {
                    return Err(GraphBuildError::DuplicateTemplateId(
                        template.id.to_string(),
                    ));
                }
                DuplicatePolicy::LastWriteWins => {
                    tracing::warn!(id = %template.id, "duplicate template id; later definition wins");
                    if let Some(weight) = graph.node_weight_mut(existing) {
                        weight.parents = template.parents.clone();
                    }
                    continue;
                }
            }
        }

        let idx = graph.add_node(NodeWeight {
            template_id: template.id.clone(),
            parents: template.parents.clone(),
            position,
        });
        id_to_index.insert(template.id.clone(), idx);
        order.push(idx);
    }

    let mut dangling: Vec<DanglingRef> = Vec::new();
    for &idx in &order {
        let Some(weight) = graph.node_weight(idx) else {
            continue;
        };
        let mut resolved: Vec<(NodeIndex, usize)> = Vec::with_capacity(weight.parents.len());
        for (ordinal, parent) in weight.parents.iter().enumerate() {
            match id_to_index.get(parent) {
                Some(&parent_idx) => resolved.push((parent_idx, ordinal)),
                None => {
                    tracing::debug!(
                        template = %weight.template_id,
                        parent = %parent,
                        "dangling parent reference skipped"
                    );
                    dangling.push(DanglingRef {
                        template: weight.template_id.clone(),
                        missing_parent: parent.clone(),
                    });
                }
            }
        }
        for (parent_idx, ordinal) in resolved {
            graph.add_edge(idx, parent_idx, EdgeWeight { ordinal });
        }
    }

    tracing::debug!(
        templates = order.len(),
        edges = graph.edge_count(),
        dangling = dangling.len(),
        "built inheritance graph"
    );

    Ok(TemplateGraph {
        graph,
        id_to_index,
        order,
        dangling,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
