//! Deterministic, collision-free naming of aliases and value placeholders.
//!
//! Two disjoint namespaces are produced:
//!
//! - **name aliases**: attribute `X` is always referenced as `#X`, and each
//!   attribute is registered once per request no matter how often it is used;
//! - **value placeholders**: a clause value for `X` is `:X`; a condition value
//!   is `:condition_{path}_X`, where `path` is the underscore-joined chain of
//!   1-based positions from the outermost condition list down to the node
//!   (plus the candidate index for a membership test).
//!
//! Downstream consumers match on these names, so the scheme is part of the
//! output contract.

use std::collections::HashMap;

use condwrite_model::AttributeValue;

use crate::ordered::OrderedMap;

/// Placeholder bound to an empty list by `set_value_in_or_create_list`.
pub const EMPTY_LIST_PLACEHOLDER: &str = ":emptyList";

/// The alias for an attribute name.
#[must_use]
pub fn name_alias(attribute: &str) -> String {
    format!("#{attribute}")
}

/// The placeholder for a clause value.
#[must_use]
pub fn clause_placeholder(attribute: &str) -> String {
    format!(":{attribute}")
}

/// The placeholder for a condition value at `path`.
///
/// ```
/// use condwrite_core::placeholder::condition_placeholder;
///
/// assert_eq!(condition_placeholder(&[1], "status"), ":condition_1_status");
/// assert_eq!(condition_placeholder(&[2, 1], "b"), ":condition_2_1_b");
/// ```
#[must_use]
pub fn condition_placeholder(path: &[usize], attribute: &str) -> String {
    let positions: Vec<String> = path.iter().map(ToString::to_string).collect();
    format!(":condition_{}_{attribute}", positions.join("_"))
}

/// Accumulates the alias and value bindings of one request.
#[derive(Debug, Default)]
pub struct Placeholders {
    names: OrderedMap<String>,
    values: OrderedMap<AttributeValue>,
}

impl Placeholders {
    /// Register `attribute` and return its alias. Idempotent.
    pub fn name(&mut self, attribute: &str) -> String {
        let alias = name_alias(attribute);
        if !self.names.contains_key(&alias) {
            self.names.insert(alias.clone(), attribute.to_owned());
        }
        alias
    }

    /// Bind `value` to `placeholder`, replacing any earlier binding.
    pub fn bind(&mut self, placeholder: String, value: AttributeValue) -> String {
        self.values.insert(placeholder.clone(), value);
        placeholder
    }

    /// Bind a clause value for `attribute` under `:attribute`.
    pub fn bind_clause(&mut self, attribute: &str, value: AttributeValue) -> String {
        self.bind(clause_placeholder(attribute), value)
    }

    /// Bind a condition value for `attribute` at `path`.
    pub fn bind_condition(
        &mut self,
        path: &[usize],
        attribute: &str,
        value: AttributeValue,
    ) -> String {
        self.bind(condition_placeholder(path, attribute), value)
    }

    /// The value currently bound to `placeholder`.
    #[must_use]
    pub fn value(&self, placeholder: &str) -> Option<&AttributeValue> {
        self.values.get(placeholder)
    }

    /// Number of registered aliases.
    #[must_use]
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Number of bound placeholders.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// The alias map and, if any placeholder was bound, the value map.
    ///
    /// Both are unordered, like the JSON objects they serialize to.
    #[must_use]
    pub fn into_maps(
        self,
    ) -> (
        HashMap<String, String>,
        Option<HashMap<String, AttributeValue>>,
    ) {
        let names = self.names.into_entries().into_iter().collect();
        let values = if self.values.is_empty() {
            None
        } else {
            Some(self.values.into_entries().into_iter().collect())
        };
        (names, values)
    }
}
