//! The finished conditional update request.
//!
//! Serialises with `PascalCase` keys to match the store's `UpdateItem` input.
//! `ConditionExpression` and `ExpressionAttributeValues` are omitted when
//! absent; `ExpressionAttributeNames` is always present, even when empty.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;
use crate::types::{ReturnOptions, ReturnValue, ReturnValuesOnConditionCheckFailure};

/// A primary key of one (partition) or two (partition + sort) attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey {
    partition: (String, AttributeValue),
    sort: Option<(String, AttributeValue)>,
}

impl PrimaryKey {
    /// A key made of a partition attribute only.
    #[must_use]
    pub fn partition(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            partition: (name.into(), value.into()),
            sort: None,
        }
    }

    /// Add the sort attribute.
    #[must_use]
    pub fn with_sort(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.sort = Some((name.into(), value.into()));
        self
    }

    /// The key as the wire-format attribute map.
    #[must_use]
    pub fn into_map(self) -> HashMap<String, AttributeValue> {
        std::iter::once(self.partition).chain(self.sort).collect()
    }
}

/// The rendered clauses of an update, one ordered section per clause kind.
///
/// Each entry pairs the attribute the clause was registered under with the
/// rendered fragment. Order is first-registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateClauses {
    /// `SET` fragments, e.g. `("status", "#status = :status")`.
    pub set: Vec<(String, String)>,
    /// `REMOVE` targets, by attribute name.
    pub remove: Vec<String>,
    /// `ADD` fragments, e.g. `("lockNumber", "#lockNumber :lockNumber")`.
    pub add: Vec<(String, String)>,
    /// `DELETE` fragments.
    pub delete: Vec<(String, String)>,
}

impl UpdateClauses {
    /// Returns `true` if no clause of any kind was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
            && self.remove.is_empty()
            && self.add.is_empty()
            && self.delete.is_empty()
    }
}

/// An immutable, fully rendered conditional update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRequest {
    /// The target table.
    pub table_name: String,

    /// The primary key of the item to update (one or two attributes).
    pub key: HashMap<String, AttributeValue>,

    /// The rendered update expression (`SET ... REMOVE ... ADD ... DELETE ...`).
    pub update_expression: String,

    /// The rendered condition expression; absent when no condition was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,

    /// Alias (`#name`) to real attribute name.
    #[serde(default)]
    pub expression_attribute_names: HashMap<String, String>,

    /// Placeholder (`:name`) to bound value; absent when nothing was bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<HashMap<String, AttributeValue>>,

    /// Values returned by a successful write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,

    /// Values returned when the condition fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values_on_condition_check_failure: Option<ReturnValuesOnConditionCheckFailure>,

    /// The individual clauses behind `update_expression`.
    #[serde(skip)]
    pub clauses: UpdateClauses,
}

impl UpdateRequest {
    /// The pass-through options this request was built with.
    #[must_use]
    pub fn return_options(&self) -> ReturnOptions {
        ReturnOptions {
            return_values: self.return_values,
            on_condition_failure: self.return_values_on_condition_check_failure,
        }
    }

    /// Look up a bound value by its placeholder (with or without the leading `:`).
    #[must_use]
    pub fn value(&self, placeholder: &str) -> Option<&AttributeValue> {
        let key = if placeholder.starts_with(':') {
            placeholder.to_owned()
        } else {
            format!(":{placeholder}")
        };
        self.expression_attribute_values.as_ref()?.get(&key)
    }
}
