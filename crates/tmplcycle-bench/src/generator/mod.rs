//! Template hierarchy generator.
//!
//! Produces [`Template`] lists whose inheritance graph is a layered DAG,
//! optionally with injected cycles and dangling parent references.

pub mod shapes;
pub mod topology;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tmplcycle_core::{Template, TemplateId};

use topology::{add_dangling_parents, build_layered_hierarchy, inject_cycles};

/// Configuration for the template generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of templates.
    pub num_templates: usize,
    /// Number of inheritance layers. Layer 0 holds the root templates.
    pub depth: usize,
    /// Upper bound on parents per template.
    pub max_parents: usize,
    /// Fraction of parent links that skip one or more layers (0.0-0.5).
    pub skip_layer_density: f64,
    /// Fraction of templates given an extra parent that names no template.
    pub dangling_density: f64,
    /// Number of cycles to inject. Zero keeps the hierarchy acyclic.
    pub inject_cycles: usize,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// ~50 templates, ~80 parent links
    Small,
    /// ~500 templates, ~1000 parent links
    Medium,
    /// ~5000 templates, ~12000 parent links
    Large,
    /// ~50000 templates, ~125000 parent links
    XLarge,
}

impl SizeTier {
    /// Returns the default acyclic `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        match self {
            SizeTier::Small => GeneratorConfig {
                seed,
                num_templates: 50,
                depth: 4,
                max_parents: 2,
                skip_layer_density: 0.1,
                dangling_density: 0.02,
                inject_cycles: 0,
            },
            SizeTier::Medium => GeneratorConfig {
                seed,
                num_templates: 500,
                depth: 6,
                max_parents: 3,
                skip_layer_density: 0.15,
                dangling_density: 0.02,
                inject_cycles: 0,
            },
            SizeTier::Large => GeneratorConfig {
                seed,
                num_templates: 5_000,
                depth: 8,
                max_parents: 4,
                skip_layer_density: 0.15,
                dangling_density: 0.01,
                inject_cycles: 0,
            },
            SizeTier::XLarge => GeneratorConfig {
                seed,
                num_templates: 50_000,
                depth: 10,
                max_parents: 4,
                skip_layer_density: 0.2,
                dangling_density: 0.01,
                inject_cycles: 0,
            },
        }
    }

    /// Like [`SizeTier::config`], with `cycles` injected cycles.
    pub fn cyclic_config(self, seed: u64, cycles: usize) -> GeneratorConfig {
        GeneratorConfig {
            inject_cycles: cycles,
            ..self.config(seed)
        }
    }
}

/// Generates a template list from `config`.
///
/// The same config always produces the same list.
pub fn generate_templates(config: &GeneratorConfig) -> Vec<Template> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut templates = build_layered_hierarchy(&mut rng, config);
    if config.dangling_density > 0.0 {
        add_dangling_parents(&mut rng, &mut templates, config.dangling_density);
    }
    if config.inject_cycles > 0 {
        inject_cycles(&mut rng, &mut templates, config.inject_cycles);
    }
    templates
}

/// Serializes a template list to the JSON array form `parse_templates` reads.
pub fn to_json(templates: &[Template]) -> String {
    serde_json::to_string(templates).unwrap_or_else(|_| unreachable!())
}

/// Builds a [`TemplateId`] from a generated name.
///
/// Generated names are ASCII alphanumerics, which always validate.
pub(crate) fn template_id(s: &str) -> TemplateId {
    TemplateId::try_from(s).unwrap_or_else(|_| unreachable!())
}

/// Zero-padded name for the template at `index`.
pub(crate) fn template_name(index: usize) -> String {
    format!("tpl{index:06}")
}
