//! Expression compiler tests against the wire format.

#[cfg(test)]
mod tests {
    use condwrite_core::{CompareOp, ConditionFunction, UpdateCommandBuilder, validate_references};
    use condwrite_model::{AttributeValue, PrimaryKey, ReturnOptions};
    use serde_json::json;

    use crate::{init_tracing, wire_json};

    fn builder() -> UpdateCommandBuilder {
        init_tracing();
        UpdateCommandBuilder::new(
            "orders",
            PrimaryKey::partition("pk", "ORDER#1").with_sort("sk", "META"),
            ReturnOptions::previous_item_on_failure(),
        )
    }

    #[test]
    fn test_should_emit_full_wire_request() -> anyhow::Result<()> {
        let mut b = builder();
        b.set_value("status", "SHIPPED")
            .add_to_value("version", 1_u64)
            .remove_attribute("reservation");
        b.conditions()
            .when("status", CompareOp::Eq, "PAID", false)
            .and_group(|g| {
                g.when("version", CompareOp::Eq, 7_u64, false).or_fn(
                    ConditionFunction::AttributeNotExists,
                    "version",
                    false,
                );
            });
        let request = b.finalize();
        validate_references(&request)?;

        assert_eq!(
            wire_json(&request)?,
            json!({
                "TableName": "orders",
                "Key": { "pk": { "S": "ORDER#1" }, "sk": { "S": "META" } },
                "UpdateExpression": "SET #status = :status REMOVE #reservation ADD #version :version",
                "ConditionExpression": "#status = :condition_1_status AND (#version = :condition_2_1_version OR attribute_not_exists (#version))",
                "ExpressionAttributeNames": {
                    "#status": "status",
                    "#version": "version",
                    "#reservation": "reservation",
                },
                "ExpressionAttributeValues": {
                    ":status": { "S": "SHIPPED" },
                    ":version": { "N": "1" },
                    ":condition_1_status": { "S": "PAID" },
                    ":condition_2_1_version": { "N": "7" },
                },
                "ReturnValuesOnConditionCheckFailure": "ALL_OLD",
            })
        );
        Ok(())
    }

    #[test]
    fn test_should_omit_values_for_remove_only_update() -> anyhow::Result<()> {
        let mut b = builder();
        b.remove_attribute("x").remove_attribute("y");
        let request = b.finalize();
        validate_references(&request)?;

        let json = wire_json(&request)?;
        assert_eq!(json["UpdateExpression"], "REMOVE #x, #y");
        assert!(json.get("ExpressionAttributeValues").is_none());
        assert!(json.get("ConditionExpression").is_none());
        Ok(())
    }

    #[test]
    fn test_should_name_same_attribute_at_every_depth() {
        let mut b = builder();
        b.set_value("lockNumber", 2_u64);
        b.conditions()
            .when("lockNumber", CompareOp::Lt, 10_u64, false)
            .or_group(|g| {
                g.when_fn(ConditionFunction::AttributeNotExists, "lockNumber", false)
                    .and_group(|g| {
                        g.when_in("lockNumber", [1_u64, 2_u64], true);
                    });
            });
        let request = b.finalize();

        assert_eq!(request.expression_attribute_names.len(), 1);
        assert_eq!(
            request.condition_expression.as_deref(),
            Some(
                "#lockNumber < :condition_1_lockNumber OR (attribute_not_exists (#lockNumber) \
                 AND (NOT #lockNumber IN (:condition_2_2_1_1_lockNumber, :condition_2_2_1_2_lockNumber)))"
            )
        );
        assert_eq!(request.expression_attribute_values.map(|v| v.len()), Some(4));
    }

    #[test]
    fn test_should_keep_first_position_of_overwritten_clause() {
        let mut b = builder();
        b.set_value("a", 1_u64)
            .set_value("b", 2_u64)
            .set_value_if_not_exists("a", 3_u64);
        let request = b.finalize();

        assert_eq!(
            request.update_expression,
            "SET #a = if_not_exists(#a, :a), #b = :b"
        );
        assert_eq!(request.value("a"), Some(&AttributeValue::from(3_u64)));
    }

    #[test]
    fn test_should_build_independent_requests_concurrently() {
        let handles: Vec<_> = (0..4_u64)
            .map(|i| {
                std::thread::spawn(move || {
                    let mut b = UpdateCommandBuilder::new(
                        "orders",
                        PrimaryKey::partition("pk", format!("ORDER#{i}")),
                        ReturnOptions::default(),
                    );
                    b.set_value("n", i);
                    b.conditions().when("n", CompareOp::Lt, i, false);
                    b.finalize()
                })
            })
            .collect();

        for (i, handle) in (0..4_u64).zip(handles) {
            let request = handle.join().unwrap();
            assert_eq!(request.value(":n"), Some(&AttributeValue::from(i)));
            assert_eq!(
                request.condition_expression.as_deref(),
                Some("#n < :condition_1_n")
            );
        }
    }
}
