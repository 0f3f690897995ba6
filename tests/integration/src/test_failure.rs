//! Store rejections mapped back to entity errors.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use condwrite_entity::{EntityUpdate, EntityUpdateError, FailureClassifier, TemplateStatus};
    use condwrite_model::{
        AttributeValue, CancellationReason, Item, ReturnValuesOnConditionCheckFailure, StoreError,
        StoreErrorCode, store_error,
    };

    use crate::{init_tracing, template_update};

    fn stored_template(status: &str, lock_number: u64) -> Item {
        HashMap::from([
            ("owner".to_owned(), AttributeValue::from("CLIENT#client-1")),
            ("id".to_owned(), AttributeValue::from("template-1")),
            ("templateStatus".to_owned(), AttributeValue::from(status)),
            ("templateType".to_owned(), AttributeValue::from("LETTER")),
            ("lockNumber".to_owned(), AttributeValue::from(lock_number)),
        ])
    }

    /// What a store would answer to a rejected conditional write.
    fn reject(previous: Option<Item>) -> StoreError {
        StoreError::conditional_check_failed(previous)
    }

    #[test]
    fn test_should_request_previous_item_and_classify_conflict() {
        let mut update = template_update("client-1", "template-1");
        update
            .set_name("new name")
            .expect_not_final_status()
            .expect_lock_number(3)
            .increment_lock_number();
        let request = update.build();
        assert_eq!(
            request.return_values_on_condition_check_failure,
            Some(ReturnValuesOnConditionCheckFailure::AllOld)
        );

        let err = FailureClassifier::template(3)
            .classify(reject(Some(stored_template("NOT_YET_SUBMITTED", 5))));
        assert_eq!(
            err.to_string(),
            "Lock number mismatch - Template has been modified since last read"
        );
    }

    #[test]
    fn test_should_classify_each_precondition() {
        init_tracing();
        let classifier = FailureClassifier::template(3)
            .with_blocked_statuses(&[TemplateStatus::PendingValidation]);

        let cases = [
            (None, "not found"),
            (Some(stored_template("DELETED", 3)), "not found"),
            (Some(stored_template("SUBMITTED", 3)), "submitted"),
            (Some(stored_template("PENDING_VALIDATION", 3)), "submitted"),
            (Some(stored_template("NOT_YET_SUBMITTED", 2)), "conflict"),
            (Some(stored_template("NOT_YET_SUBMITTED", 3)), "store"),
        ];
        for (previous, expected) in cases {
            let actual = match classifier.classify(reject(previous)) {
                EntityUpdateError::NotFound { .. } => "not found",
                EntityUpdateError::AlreadySubmitted { .. } => "submitted",
                EntityUpdateError::Conflict { .. } => "conflict",
                EntityUpdateError::Store { .. } => "store",
                other => panic!("unexpected classification: {other}"),
            };
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_should_report_unsupported_from_caller_check() {
        init_tracing();
        let err = FailureClassifier::template(3).classify_with(
            reject(Some(stored_template("NOT_YET_SUBMITTED", 3))),
            |old| {
                (old.get("letterVersion").and_then(AttributeValue::as_s) != Some("AUTHORING"))
                    .then(|| "Unsupported for this template type".to_owned())
            },
        );
        assert!(matches!(err, EntityUpdateError::Unsupported { .. }));
    }

    #[test]
    fn test_should_keep_store_error_as_source() {
        init_tracing();
        let err = FailureClassifier::template(1).classify(store_error!(
            InternalServerError,
            "Internal server error"
        ));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("StoreError(InternalServerError): Internal server error")
        );
    }

    #[test]
    fn test_should_classify_update_inside_transaction() {
        init_tracing();
        let err = store_error!(TransactionCanceledException).with_cancellation_reasons(vec![
            CancellationReason {
                code: "ConditionalCheckFailed".to_owned(),
                message: Some("The conditional request failed".to_owned()),
                item: Some(stored_template("SUBMITTED", 3)),
            },
            CancellationReason {
                code: "None".to_owned(),
                ..CancellationReason::default()
            },
        ]);
        let classified = FailureClassifier::template(3).classify_transaction(err, 0);
        assert!(matches!(classified, EntityUpdateError::AlreadySubmitted { .. }));

        let conflict = store_error!(TransactionConflictException);
        let classified = FailureClassifier::template(3).classify_transaction(conflict, 0);
        assert_eq!(
            classified.store_error().map(|e| e.code),
            Some(StoreErrorCode::TransactionConflictException)
        );
    }
}
