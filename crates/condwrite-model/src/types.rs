//! Pass-through request options.

use serde::{Deserialize, Serialize};

/// Determines what values are returned by a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReturnValue {
    /// Nothing is returned.
    #[default]
    #[serde(rename = "NONE")]
    None,
    /// Returns all attributes of the item as they appeared before the operation.
    #[serde(rename = "ALL_OLD")]
    AllOld,
    /// Returns only the updated attributes as they appeared before the operation.
    #[serde(rename = "UPDATED_OLD")]
    UpdatedOld,
    /// Returns all attributes of the item as they appear after the operation.
    #[serde(rename = "ALL_NEW")]
    AllNew,
    /// Returns only the updated attributes as they appear after the operation.
    #[serde(rename = "UPDATED_NEW")]
    UpdatedNew,
}

impl ReturnValue {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::AllOld => "ALL_OLD",
            Self::UpdatedOld => "UPDATED_OLD",
            Self::AllNew => "ALL_NEW",
            Self::UpdatedNew => "UPDATED_NEW",
        }
    }
}

impl std::fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the store returns alongside a conditional-check failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReturnValuesOnConditionCheckFailure {
    /// Return the item as it was before the rejected write (the "previous item").
    #[serde(rename = "ALL_OLD")]
    AllOld,
    /// Return nothing.
    #[default]
    #[serde(rename = "NONE")]
    None,
}

impl ReturnValuesOnConditionCheckFailure {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllOld => "ALL_OLD",
            Self::None => "NONE",
        }
    }
}

impl std::fmt::Display for ReturnValuesOnConditionCheckFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options copied verbatim from the builder into the finished request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReturnOptions {
    /// Values returned by a successful write.
    pub return_values: Option<ReturnValue>,
    /// Values returned when the condition expression fails.
    pub on_condition_failure: Option<ReturnValuesOnConditionCheckFailure>,
}

impl ReturnOptions {
    /// Ask the store for the previous item when the condition fails.
    #[must_use]
    pub fn previous_item_on_failure() -> Self {
        Self {
            return_values: None,
            on_condition_failure: Some(ReturnValuesOnConditionCheckFailure::AllOld),
        }
    }

    /// Set the values returned by a successful write.
    #[must_use]
    pub fn with_return_values(mut self, return_values: ReturnValue) -> Self {
        self.return_values = Some(return_values);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_combine_return_options() {
        let options =
            ReturnOptions::previous_item_on_failure().with_return_values(ReturnValue::UpdatedNew);
        assert_eq!(options.return_values, Some(ReturnValue::UpdatedNew));
        assert_eq!(
            options.on_condition_failure,
            Some(ReturnValuesOnConditionCheckFailure::AllOld)
        );
        assert_eq!(
            serde_json::to_value(options.return_values).unwrap(),
            serde_json::json!("UPDATED_NEW")
        );
    }
}
