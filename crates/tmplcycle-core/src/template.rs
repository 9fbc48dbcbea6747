//! Template records and their JSON binding.
//!
//! A [`Template`] is a named entity that inherits from zero or more parent
//! templates. Input is either a bare JSON array of templates or an object
//! with a `templates` array:
//!
//! ```json
//! [{ "id": "page", "parents": ["layout"] }, { "id": "layout" }]
//! ```
//!
//! `parents` defaults to `[]` and also accepts the key `inherits_from`.
//! Unknown keys on a template are ignored so that richer template documents
//! can be fed in unchanged.
use serde::{Deserialize, Serialize};

use crate::newtypes::{InvalidTemplateError, TemplateId};

/// A single template declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Identifier, unique within one input collection.
    pub id: TemplateId,
    /// Parent templates in declared order. May name ids that are not
    /// present in the collection.
    #[serde(default, alias = "inherits_from")]
    pub parents: Vec<TemplateId>,
}

impl Template {
    /// Builds a template from raw strings, validating every id.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTemplateError`] if `id` or any parent id is
    /// malformed.
    pub fn new<S: AsRef<str>>(id: &str, parents: &[S]) -> Result<Self, InvalidTemplateError> {
        let id = TemplateId::try_from(id)?;
        let parents = parents
            .iter()
            .map(|p| TemplateId::try_from(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { id, parents })
    }
}

#[derive(Deserialize)]
struct WrappedDocument {
    templates: Vec<Template>,
}

/// Error produced when a template document cannot be decoded.
#[derive(Debug)]
pub enum TemplateDecodeError {
    /// The input is not valid JSON, or does not have the expected shape.
    Json(serde_json::Error),
}

impl std::fmt::Display for TemplateDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateDecodeError::Json(e) => write!(f, "invalid template document: {e}"),
        }
    }
}

impl std::error::Error for TemplateDecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateDecodeError::Json(e) => Some(e),
        }
    }
}

/// Parses a JSON template document into templates in document order.
///
/// # Errors
///
/// Returns [`TemplateDecodeError::Json`] for syntax errors, shape mismatches
/// and malformed template ids (empty, `null`, surrounding whitespace).
pub fn parse_templates(content: &str) -> Result<Vec<Template>, TemplateDecodeError> {
    // Dispatch on the first token so serde keeps precise error positions.
    let templates: Vec<Template> = if content.trim_start().starts_with('{') {
        serde_json::from_str::<WrappedDocument>(content)
            .map_err(TemplateDecodeError::Json)?
            .templates
    } else {
        serde_json::from_str(content).map_err(TemplateDecodeError::Json)?
    };
    tracing::debug!(count = templates.len(), "parsed template document");
    Ok(templates)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
