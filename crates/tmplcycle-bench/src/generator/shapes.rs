//! Fixed worst-case shapes.

use tmplcycle_core::Template;

use super::{template_id, template_name};

/// A single inheritance chain `tpl000000 -> tpl000001 -> ...` of `len`
/// templates. With `closed`, the last template inherits from the first.
///
/// Traversal depth equals `len`, which is what recursion-free detection
/// has to survive.
pub fn deep_chain(len: usize, closed: bool) -> Vec<Template> {
    (0..len)
        .map(|i| {
            let parent = if i + 1 < len {
                Some(i + 1)
            } else if closed {
                Some(0)
            } else {
                None
            };
            Template {
                id: template_id(&template_name(i)),
                parents: parent
                    .map(|p| template_id(&template_name(p)))
                    .into_iter()
                    .collect(),
            }
        })
        .collect()
}

/// One child inheriting from `width` parents that all share a single base.
pub fn wide_fan(width: usize) -> Vec<Template> {
    let base = template_id("base");
    let mids: Vec<Template> = (0..width)
        .map(|i| Template {
            id: template_id(&template_name(i)),
            parents: vec![base.clone()],
        })
        .collect();

    let mut templates = Vec::with_capacity(width + 2);
    templates.push(Template {
        id: template_id("leaf"),
        parents: mids.iter().map(|t| t.id.clone()).collect(),
    });
    templates.extend(mids);
    templates.push(Template {
        id: base,
        parents: Vec::new(),
    });
    templates
}
