//! Template update flows, composed the way a template repository does.

#[cfg(test)]
mod tests {
    use condwrite_core::validate_references;
    use condwrite_entity::{EntityUpdate, LetterVersion, RenderDetails, TemplateStatus, TemplateType};
    use condwrite_model::AttributeValue;

    use crate::{fixed_now, template_update, test_config, wire_json};

    #[test]
    fn test_should_compile_authoring_letter_update() -> anyhow::Result<()> {
        let mut update = template_update("client-1", "template-1");
        update
            .set_name("Reminder")
            .expect_template_exists()
            .expect_template_type(TemplateType::Letter)
            .expect_letter_version(LetterVersion::Authoring)
            .expect_not_final_status()
            .expect_not_status_in(&[
                TemplateStatus::PendingValidation,
                TemplateStatus::VirusScanFailed,
            ])
            .expect_lock_number(4)
            .set_updated_by_user_at("INTERNAL_USER#u-1", fixed_now())
            .increment_lock_number();
        let request = update.build();
        validate_references(&request)?;

        assert_eq!(request.table_name, "templates-test");
        assert_eq!(
            request.update_expression,
            "SET #name = :name, #updatedAt = :updatedAt, #updatedBy = :updatedBy ADD #lockNumber :lockNumber"
        );
        assert_eq!(
            request.condition_expression.as_deref(),
            Some(concat!(
                "attribute_exists (#id)",
                " AND #templateType = :condition_2_templateType",
                " AND #letterVersion = :condition_3_letterVersion",
                " AND NOT #templateStatus IN (:condition_4_1_templateStatus, :condition_4_2_templateStatus)",
                " AND NOT #templateStatus IN (:condition_5_1_templateStatus, :condition_5_2_templateStatus)",
                " AND (#lockNumber = :condition_6_1_lockNumber OR attribute_not_exists (#lockNumber))",
            ))
        );
        assert_eq!(
            request.value(":condition_5_2_templateStatus"),
            Some(&AttributeValue::from("VIRUS_SCAN_FAILED"))
        );
        assert_eq!(
            request.value(":updatedAt"),
            Some(&AttributeValue::from("2025-01-01T09:00:00.000Z"))
        );

        let json = wire_json(&request)?;
        assert_eq!(json["ReturnValuesOnConditionCheckFailure"], "ALL_OLD");
        assert_eq!(json["Key"]["owner"]["S"], "CLIENT#client-1");
        Ok(())
    }

    #[test]
    fn test_should_compile_soft_delete() -> anyhow::Result<()> {
        let config = test_config();
        let mut update = template_update("client-1", "template-1");
        update
            .set_status(TemplateStatus::Deleted)
            .set_ttl(config.ttl_from(fixed_now()))
            .expect_not_final_status()
            .expect_lock_number(1)
            .increment_lock_number();
        let request = update.build();
        validate_references(&request)?;

        let expected_ttl = fixed_now().timestamp() + 90 * 86_400;
        assert_eq!(request.value(":ttl"), Some(&AttributeValue::from(expected_ttl)));
        assert_eq!(
            request.condition_expression.as_deref(),
            Some(
                "NOT #templateStatus IN (:condition_1_1_templateStatus, :condition_1_2_templateStatus) \
                 AND (#lockNumber = :condition_2_1_lockNumber OR attribute_not_exists (#lockNumber))"
            )
        );
        Ok(())
    }

    #[test]
    fn test_should_compile_render_and_validation_update() -> anyhow::Result<()> {
        let render = RenderDetails {
            status: "RENDERED".to_owned(),
            file_name: "short-form.pdf".to_owned(),
            current_version: "v2".to_owned(),
            page_count: 1,
            system_personalisation_pack_id: Some("pack-1".to_owned()),
            personalisation_parameters: Some(
                [("firstName".to_owned(), "John".to_owned())].into_iter().collect(),
            ),
        };
        let mut update = template_update("client-1", "template-1");
        update
            .set_short_form_render(&render)?
            .set_status(TemplateStatus::PendingValidation)
            .expect_status(TemplateStatus::PendingUpload);
        let request = update.build();
        validate_references(&request)?;

        let stored = request
            .value(":shortFormRender")
            .map(AttributeValue::to_json)
            .unwrap_or_default();
        assert_eq!(stored["personalisationParameters"]["firstName"], "John");
        assert_eq!(stored["systemPersonalisationPackId"], "pack-1");
        Ok(())
    }

    #[test]
    fn test_should_compile_supplier_reference_and_lock() -> anyhow::Result<()> {
        let now_ms = fixed_now().timestamp_millis();
        let mut update = template_update("client-1", "template-1");
        update
            .initialise_supplier_references()
            .set_lock_time(now_ms, Some(now_ms - 60_000));
        let request = update.build();
        validate_references(&request)?;

        assert_eq!(
            request.update_expression,
            "SET #supplierReferences = if_not_exists(#supplierReferences, :supplierReferences), \
             #sftpSendLockTime = :sftpSendLockTime"
        );
        assert_eq!(
            request.condition_expression.as_deref(),
            Some(
                "attribute_not_exists (#sftpSendLockTime) OR #sftpSendLockTime > :condition_2_sftpSendLockTime"
            )
        );

        let mut update = template_update("client-1", "template-1");
        update.set_supplier_reference("WTMMOCK", "ref-123");
        let request = update.build();
        validate_references(&request)?;
        assert_eq!(request.value(":WTMMOCK"), Some(&AttributeValue::from("ref-123")));
        Ok(())
    }
}
