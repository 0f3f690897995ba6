//! Errors reported by the store when it rejects a write.
//!
//! The compiler never produces these. A store client maps transport failures
//! into a [`StoreError`] and the entity layer inspects it, most importantly
//! the conditional-check failure together with the previous item the store
//! returned for it.

use std::fmt;

use crate::attribute_value::Item;

/// Well-known store error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum StoreErrorCode {
    /// The condition expression evaluated to false.
    ConditionalCheckFailedException,
    /// A transaction was canceled; see the cancellation reasons.
    TransactionCanceledException,
    /// Another transaction touched the same item.
    TransactionConflictException,
    /// Table not found.
    ResourceNotFoundException,
    /// Throughput exceeded.
    ProvisionedThroughputExceededException,
    /// The request was malformed.
    #[default]
    ValidationException,
    /// Internal server error.
    InternalServerError,
}

impl StoreErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConditionalCheckFailedException => "ConditionalCheckFailedException",
            Self::TransactionCanceledException => "TransactionCanceledException",
            Self::TransactionConflictException => "TransactionConflictException",
            Self::ResourceNotFoundException => "ResourceNotFoundException",
            Self::ProvisionedThroughputExceededException => {
                "ProvisionedThroughputExceededException"
            }
            Self::ValidationException => "ValidationException",
            Self::InternalServerError => "InternalServerError",
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why one item of a canceled transaction failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancellationReason {
    /// Reason code, e.g. `"ConditionalCheckFailed"` or `"None"`.
    pub code: String,
    /// Human-readable message, if any.
    pub message: Option<String>,
    /// The item as it was before the transaction, when requested.
    pub item: Option<Item>,
}

impl CancellationReason {
    /// Returns `true` if this item did not cause the cancellation.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.code == "None"
    }

    /// Returns `true` if this item's condition expression failed.
    #[must_use]
    pub fn is_conditional_check_failed(&self) -> bool {
        self.code == "ConditionalCheckFailed"
    }
}

/// A store error response.
#[derive(Debug)]
pub struct StoreError {
    /// The error code.
    pub code: StoreErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The previous item, returned with a conditional-check failure when the
    /// request asked for it.
    pub item: Option<Item>,
    /// Per-item reasons for a canceled transaction, in request order.
    pub cancellation_reasons: Vec<CancellationReason>,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl StoreError {
    /// Create a new `StoreError` from an error code.
    #[must_use]
    pub fn new(code: StoreErrorCode) -> Self {
        Self::with_message(code, code.as_str())
    }

    /// Create a new `StoreError` with a custom message.
    #[must_use]
    pub fn with_message(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            item: None,
            cancellation_reasons: Vec::new(),
            source: None,
        }
    }

    /// Attach the previous item.
    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    /// Attach transaction cancellation reasons.
    #[must_use]
    pub fn with_cancellation_reasons(mut self, reasons: Vec<CancellationReason>) -> Self {
        self.cancellation_reasons = reasons;
        self
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Condition expression evaluated to false.
    #[must_use]
    pub fn conditional_check_failed(item: Option<Item>) -> Self {
        Self {
            item,
            ..Self::with_message(
                StoreErrorCode::ConditionalCheckFailedException,
                "The conditional request failed",
            )
        }
    }

    /// Returns `true` for the conditional-check-failed signal.
    #[must_use]
    pub fn is_conditional_check_failed(&self) -> bool {
        self.code == StoreErrorCode::ConditionalCheckFailedException
    }

    /// Reduce a canceled transaction to the failure of the item at `index`.
    ///
    /// Returns `None` if this is not a cancellation or that item did not
    /// cause it.
    #[must_use]
    pub fn cancellation_for(&self, index: usize) -> Option<Self> {
        if self.code != StoreErrorCode::TransactionCanceledException {
            return None;
        }
        let reason = self.cancellation_reasons.get(index)?;
        if reason.is_none() {
            return None;
        }
        let message = reason
            .message
            .clone()
            .unwrap_or_else(|| reason.code.clone());
        let code = if reason.is_conditional_check_failed() {
            StoreErrorCode::ConditionalCheckFailedException
        } else {
            StoreErrorCode::TransactionCanceledException
        };
        Some(Self {
            item: reason.item.clone(),
            ..Self::with_message(code, message)
        })
    }
}

/// Create a `StoreError` from an error code.
///
/// # Examples
///
/// ```
/// use condwrite_model::store_error;
/// use condwrite_model::error::StoreErrorCode;
///
/// let err = store_error!(ValidationException);
/// assert_eq!(err.code, StoreErrorCode::ValidationException);
///
/// let err = store_error!(ResourceNotFoundException, "Table not found");
/// assert_eq!(err.message, "Table not found");
/// ```
#[macro_export]
macro_rules! store_error {
    ($code:ident) => {
        $crate::error::StoreError::new($crate::error::StoreErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::StoreError::with_message($crate::error::StoreErrorCode::$code, $msg)
    };
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::AttributeValue;

    #[test]
    fn test_should_carry_previous_item() {
        let item = HashMap::from([("lockNumber".to_owned(), AttributeValue::from(3_u64))]);
        let err = StoreError::conditional_check_failed(Some(item));
        assert!(err.is_conditional_check_failed());
        assert_eq!(err.item.unwrap()["lockNumber"].as_u64(), Some(3));
    }

    #[test]
    fn test_should_reduce_cancellation_to_item_reason() {
        let item = HashMap::from([("status".to_owned(), AttributeValue::from("DRAFT"))]);
        let err = store_error!(TransactionCanceledException).with_cancellation_reasons(vec![
            CancellationReason {
                code: "ConditionalCheckFailed".to_owned(),
                message: Some("The conditional request failed".to_owned()),
                item: Some(item),
            },
            CancellationReason {
                code: "None".to_owned(),
                ..CancellationReason::default()
            },
        ]);

        let first = err.cancellation_for(0).unwrap();
        assert!(first.is_conditional_check_failed());
        assert_eq!(first.item.unwrap()["status"].as_s(), Some("DRAFT"));
        assert!(err.cancellation_for(1).is_none());
        assert!(err.cancellation_for(2).is_none());
    }

    #[test]
    fn test_should_expose_transport_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "connection timed out");
        let err = store_error!(InternalServerError, "request failed").with_source(io);

        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("connection timed out"));
        assert!(std::error::Error::source(&store_error!(ValidationException)).is_none());
    }

    #[test]
    fn test_should_not_reduce_other_errors() {
        let err = store_error!(ValidationException, "bad request");
        assert!(err.cancellation_for(0).is_none());
        assert_eq!(err.to_string(), "StoreError(ValidationException): bad request");
    }
}
