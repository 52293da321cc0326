//! The set of top-level keys every control document must carry.

use serde::Serialize;

/// Keys every control must define, in reporting order.
pub const DEFAULT_REQUIRED_FIELDS: &[&str] =
    &["control_id", "control_name", "pillar", "description"];

/// Immutable, ordered set of required field names.
///
/// Order matters only for reporting: missing fields are listed in the order
/// they appear here. Duplicates passed to [`RequiredFieldSet::new`] are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequiredFieldSet {
    fields: Vec<String>,
}

impl RequiredFieldSet {
    /// Build a set from an ordered list of names, keeping the first occurrence of each.
    #[must_use]
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !out.contains(&field) {
                out.push(field);
            }
        }
        Self { fields: out }
    }

    /// Iterate field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for RequiredFieldSet {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_FIELDS.iter().copied())
    }
}
