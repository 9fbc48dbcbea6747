/// Validated newtype wrapper for template identifiers.
///
/// [`TemplateId`] enforces its shape at construction time via
/// [`TryFrom<&str>`]. Once constructed, the inner value is immutable (no
/// `DerefMut`). The serde `Deserialize` impl re-runs validation so malformed
/// ids cannot enter the type system from untrusted JSON.
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced when a template record cannot be accepted at the
/// graph-builder boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidTemplateError {
    /// The identifier was the empty string.
    EmptyId,
    /// The identifier has surrounding whitespace or contains control
    /// characters.
    InvalidFormat {
        /// A human-readable description of the expected format.
        expected: &'static str,
        /// The input that was rejected.
        got: String,
    },
}

impl fmt::Display for InvalidTemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => f.write_str("invalid template id: must not be empty"),
            Self::InvalidFormat { expected, got } => {
                write!(f, "invalid template id: expected {expected}, got {got:?}")
            }
        }
    }
}

impl std::error::Error for InvalidTemplateError {}

// ---------------------------------------------------------------------------
// Regex statics
//
// The pattern is a compile-time literal; Regex::new never returns Err for it.
// The workspace bans expect() and unwrap(), so "a^" (never matches) stands in
// as the fallback.
// ---------------------------------------------------------------------------

/// No leading/trailing whitespace, no control characters anywhere.
static TEMPLATE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\p{Cc}](?:[^\p{Cc}]*[^\s\p{Cc}])?$").unwrap_or_else(|_| {
        Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken"))
    })
});

// ---------------------------------------------------------------------------
// TemplateId
// ---------------------------------------------------------------------------

/// Identifier of a template, unique within one input collection.
///
/// Any non-empty string is accepted as long as it carries no surrounding
/// whitespace and no control characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplateId(String);

impl TemplateId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for TemplateId {
    type Error = InvalidTemplateError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.is_empty() {
            return Err(InvalidTemplateError::EmptyId);
        }
        if TEMPLATE_ID_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(InvalidTemplateError::InvalidFormat {
                expected: "no surrounding whitespace and no control characters",
                got: s.to_owned(),
            })
        }
    }
}

impl TryFrom<String> for TemplateId {
    type Error = InvalidTemplateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}

impl Deref for TemplateId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TemplateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TemplateId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::try_from(s.as_str()).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
