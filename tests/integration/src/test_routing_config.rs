//! Routing config update flows.

#[cfg(test)]
mod tests {
    use condwrite_core::validate_references;
    use condwrite_entity::{
        CascadeGroup, CascadeItem, ChannelType, EntityUpdate, RoutingConfigStatus, TemplateType,
    };
    use serde_json::json;

    use crate::{fixed_now, routing_config_update, wire_json};

    #[test]
    fn test_should_compile_routing_config_edit() -> anyhow::Result<()> {
        let cascade = [CascadeItem {
            channel: TemplateType::Email,
            channel_type: ChannelType::Primary,
            cascade_groups: vec!["standard".to_owned()],
            default_template_id: Some("90e46ece-4a3b-47bd-b781-f986b42a5a09".to_owned()),
            conditional_templates: None,
        }];
        let overrides = [CascadeGroup {
            name: "translations".to_owned(),
            language: Some(vec!["pl".to_owned()]),
            accessible_format: None,
        }];

        let mut update = routing_config_update("client-1", "rc-1");
        update
            .set_name("Plan")
            .set_cascade(&cascade)?
            .set_cascade_group_overrides(&overrides)?
            .expect_status(RoutingConfigStatus::Draft)
            .expect_lock_number(2)
            .set_updated_by_user_at("INTERNAL_USER#u-1", fixed_now())
            .increment_lock_number();
        let request = update.build();
        validate_references(&request)?;

        let json = wire_json(&request)?;
        assert_eq!(
            json["ConditionExpression"],
            "#status = :condition_1_status AND #lockNumber = :condition_2_lockNumber"
        );
        assert_eq!(
            json["ExpressionAttributeValues"][":cascadeGroupOverrides"],
            json!({ "L": [ { "M": {
                "name": { "S": "translations" },
                "language": { "L": [ { "S": "pl" } ] },
            } } ] })
        );
        assert_eq!(
            json["ExpressionAttributeValues"][":condition_2_lockNumber"],
            json!({ "N": "2" })
        );
        Ok(())
    }

    #[test]
    fn test_should_compile_submit() -> anyhow::Result<()> {
        let mut update = routing_config_update("client-1", "rc-1");
        update
            .set_status(RoutingConfigStatus::Completed)
            .expect_routing_config_exists()
            .expect_status(RoutingConfigStatus::Draft)
            .expect_lock_number(0)
            .increment_lock_number();
        let request = update.build();
        validate_references(&request)?;

        assert_eq!(
            request.update_expression,
            "SET #status = :status ADD #lockNumber :lockNumber"
        );
        assert_eq!(
            request.condition_expression.as_deref(),
            Some(
                "attribute_exists (#id) AND #status = :condition_2_status \
                 AND #lockNumber = :condition_3_lockNumber"
            )
        );
        assert_eq!(request.expression_attribute_names.len(), 3);
        Ok(())
    }
}
