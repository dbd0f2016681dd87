//! Store-agnostic query filters.

use serde_json::Value;

use super::Document;
use crate::domain::RecordId;

/// A condition on a single document field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the value exactly
    Equals(Value),

    /// Field is a string equal to the text, ignoring case
    EqualsIgnoreCase(String),

    /// Field is a list containing the value (or a scalar equal to it)
    Contains(Value),
}

impl Condition {
    /// Check whether a field value satisfies this condition.
    ///
    /// A missing field is passed as `None` and never matches.
    pub fn matches(&self, field: Option<&Value>) -> bool {
        let Some(field) = field else {
            return false;
        };

        match self {
            Condition::Equals(expected) => field == expected,
            Condition::EqualsIgnoreCase(text) => field
                .as_str()
                .is_some_and(|s| s.to_lowercase() == text.to_lowercase()),
            Condition::Contains(expected) => match field {
                Value::Array(items) => items.contains(expected),
                other => other == expected,
            },
        }
    }
}

/// A conjunction of field conditions, optionally pinned to one record id.
///
/// # Examples
///
/// ```
/// use fuel_server::store::Filter;
///
/// let filter = Filter::new()
///     .equals_ignore_case("city", "austin")
///     .equals("state", "TX");
///
/// assert_eq!(filter.clauses().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    id: Option<RecordId>,
    clauses: Vec<(String, Condition)>,
}

impl Filter {
    /// A filter that matches every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match only the document with this identifier.
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    /// Require `field` to equal `value`.
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses
            .push((field.into(), Condition::Equals(value.into())));
        self
    }

    /// Require `field` to equal `text`, ignoring case.
    pub fn equals_ignore_case(mut self, field: impl Into<String>, text: impl Into<String>) -> Self {
        self.clauses
            .push((field.into(), Condition::EqualsIgnoreCase(text.into())));
        self
    }

    /// Require the list in `field` to contain `value`.
    pub fn contains(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses
            .push((field.into(), Condition::Contains(value.into())));
        self
    }

    /// The identifier this filter is pinned to, if any.
    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    /// The field conditions, in the order they were added.
    pub fn clauses(&self) -> &[(String, Condition)] {
        &self.clauses
    }

    /// Returns true if the filter has no conditions at all.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.clauses.is_empty()
    }

    /// Check whether a document satisfies every condition.
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(id) = self.id {
            if doc.id != Some(id) {
                return false;
            }
        }

        self.clauses
            .iter()
            .all(|(field, condition)| condition.matches(doc.fields.get(field)))
    }
}
