//! Layered hierarchy construction and cycle injection.

use rand::Rng;
use rand::rngs::StdRng;
use tmplcycle_core::{Template, TemplateId};

use super::{GeneratorConfig, template_id, template_name};

/// Splits `num_templates` into `depth` contiguous layers and links every
/// template outside layer 0 to parents in earlier layers.
///
/// Parents always have a lower index than the child, so the result is
/// acyclic. Most links target the previous layer; a `skip_layer_density`
/// share targets any earlier layer.
pub fn build_layered_hierarchy(rng: &mut StdRng, config: &GeneratorConfig) -> Vec<Template> {
    let n = config.num_templates;
    let depth = config.depth.clamp(1, n.max(1));
    let per_layer = n.div_ceil(depth).max(1);

    let ids: Vec<TemplateId> = (0..n).map(|i| template_id(&template_name(i))).collect();
    let mut templates = Vec::with_capacity(n);

    for (i, id) in ids.iter().enumerate() {
        let layer = i / per_layer;
        let mut parents: Vec<TemplateId> = Vec::new();
        if layer > 0 && config.max_parents > 0 {
            let prev_start = (layer - 1) * per_layer;
            let prev_end = layer * per_layer;
            let count = rng.gen_range(1..=config.max_parents);
            for _ in 0..count {
                let parent = if rng.gen_bool(config.skip_layer_density.clamp(0.0, 1.0)) {
                    rng.gen_range(0..prev_end)
                } else {
                    rng.gen_range(prev_start..prev_end)
                };
                let parent_id = &ids[parent];
                if !parents.contains(parent_id) {
                    parents.push(parent_id.clone());
                }
            }
        }
        templates.push(Template {
            id: id.clone(),
            parents,
        });
    }
    templates
}

/// Appends a parent that names no template to a `density` share of
/// templates.
pub fn add_dangling_parents(rng: &mut StdRng, templates: &mut [Template], density: f64) {
    let density = density.clamp(0.0, 1.0);
    for (i, template) in templates.iter_mut().enumerate() {
        if rng.gen_bool(density) {
            template
                .parents
                .push(template_id(&format!("missing{i:06}")));
        }
    }
}

/// Closes `count` cycles by walking from a random template up its first
/// parents to an ancestor, then making the starting template a parent of
/// that ancestor.
///
/// A template with no parents becomes its own parent.
pub fn inject_cycles(rng: &mut StdRng, templates: &mut [Template], count: usize) {
    if templates.is_empty() {
        return;
    }
    for _ in 0..count {
        let start = rng.gen_range(0..templates.len());
        let steps = rng.gen_range(1..=4);

        let mut ancestor = start;
        for _ in 0..steps {
            let next = templates[ancestor]
                .parents
                .first()
                .and_then(|p| position_of(templates, p));
            match next {
                Some(next) => ancestor = next,
                None => break,
            }
        }

        let start_id = templates[start].id.clone();
        if !templates[ancestor].parents.contains(&start_id) {
            templates[ancestor].parents.push(start_id);
        }
    }
}

fn position_of(templates: &[Template], id: &TemplateId) -> Option<usize> {
    templates.iter().position(|t| &t.id == id)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use rand::SeedableRng;
    use tmplcycle_core::{build_graph, is_acyclic};

    use super::*;
    use crate::SizeTier;

    #[test]
    fn layered_hierarchy_is_acyclic() {
        let config = SizeTier::Medium.config(7);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let templates = build_layered_hierarchy(&mut rng, &config);
        assert_eq!(templates.len(), config.num_templates);
        let graph = build_graph(&templates).expect("builds");
        assert!(is_acyclic(&graph));
    }

    #[test]
    fn roots_have_no_parents() {
        let config = SizeTier::Small.config(1);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let templates = build_layered_hierarchy(&mut rng, &config);
        assert!(templates[0].parents.is_empty());
    }

    #[test]
    fn injected_cycle_is_detected() {
        let config = SizeTier::Small.config(3);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut templates = build_layered_hierarchy(&mut rng, &config);
        inject_cycles(&mut rng, &mut templates, 1);
        let graph = build_graph(&templates).expect("builds");
        assert!(!is_acyclic(&graph));
    }

    #[test]
    fn dangling_parents_are_reported() {
        let config = SizeTier::Small.config(5);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut templates = build_layered_hierarchy(&mut rng, &config);
        add_dangling_parents(&mut rng, &mut templates, 1.0);
        let graph = build_graph(&templates).expect("builds");
        assert_eq!(graph.dangling_references().len(), templates.len());
    }
}
