//! Template updates.

use condwrite_core::{CompareOp, ConditionFunction};
use condwrite_model::{AttributeValue, ReturnOptions, UpdateRequest, to_attribute_value};
use tracing::debug;

use crate::domain::{
    LetterVersion, RenderDetails, TemplateStatus, TemplateType, ValidationErrorDetail,
};
use crate::entity::{EntityUpdate, EntityUpdateBuilder};
use crate::error::EntityUpdateError;

const STATUS: &str = "templateStatus";
const LOCK_NUMBER: &str = "lockNumber";
const FILES: &str = "files";
const SUPPLIER_REFERENCES: &str = "supplierReferences";

/// Lock attribute guarding the SFTP send.
pub const SFTP_SEND_LOCK_TIME: &str = "sftpSendLockTime";

/// Builds a conditional update to one template.
///
/// ```
/// use condwrite_entity::{EntityUpdate, TemplateStatus, TemplateUpdateBuilder};
/// use condwrite_model::ReturnOptions;
///
/// let mut update =
///     TemplateUpdateBuilder::new("templates", "client-1", "template-1", ReturnOptions::default());
/// update
///     .set_status(TemplateStatus::Deleted)
///     .expect_not_final_status()
///     .increment_lock_number();
/// let request = update.build();
///
/// assert_eq!(
///     request.update_expression,
///     "SET #templateStatus = :templateStatus ADD #lockNumber :lockNumber"
/// );
/// ```
#[derive(Debug)]
pub struct TemplateUpdateBuilder {
    entity: EntityUpdateBuilder,
}

impl EntityUpdate for TemplateUpdateBuilder {
    fn entity(&mut self) -> &mut EntityUpdateBuilder {
        &mut self.entity
    }
}

impl TemplateUpdateBuilder {
    /// Create a builder for template `id` owned by `client_id`.
    #[must_use]
    pub fn new(table_name: &str, client_id: &str, id: &str, options: ReturnOptions) -> Self {
        Self {
            entity: EntityUpdateBuilder::new(table_name, client_id, id, options),
        }
    }

    /// `SET subject`.
    pub fn set_subject(&mut self, subject: &str) -> &mut Self {
        self.entity.update_builder().set_value("subject", subject);
        self
    }

    /// `SET message`.
    pub fn set_message(&mut self, message: &str) -> &mut Self {
        self.entity.update_builder().set_value("message", message);
        self
    }

    /// `SET templateStatus`.
    pub fn set_status(&mut self, status: TemplateStatus) -> &mut Self {
        self.entity.update_builder().set_value(STATUS, status);
        self
    }

    /// `SET systemPersonalisation, customPersonalisation`.
    pub fn set_personalisation(&mut self, system: &[&str], custom: &[&str]) -> &mut Self {
        self.entity
            .update_builder()
            .set_value("systemPersonalisation", system.to_vec())
            .set_value("customPersonalisation", custom.to_vec());
        self
    }

    /// `SET letterVariantId`.
    pub fn set_letter_variant_id(&mut self, letter_variant_id: &str) -> &mut Self {
        self.entity
            .update_builder()
            .set_value("letterVariantId", letter_variant_id);
        self
    }

    /// `REMOVE letterVariantId`.
    pub fn remove_letter_variant_id(&mut self) -> &mut Self {
        self.entity.update_builder().remove_attribute("letterVariantId");
        self
    }

    /// `SET files.initialRender`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityUpdateError::Serialization`] if `render` cannot be
    /// converted to an attribute value.
    pub fn set_initial_render(
        &mut self,
        render: &RenderDetails,
    ) -> Result<&mut Self, EntityUpdateError> {
        self.set_render("initialRender", render)
    }

    /// `SET files.shortFormRender`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityUpdateError::Serialization`] if `render` cannot be
    /// converted to an attribute value.
    pub fn set_short_form_render(
        &mut self,
        render: &RenderDetails,
    ) -> Result<&mut Self, EntityUpdateError> {
        self.set_render("shortFormRender", render)
    }

    fn set_render(
        &mut self,
        key: &str,
        render: &RenderDetails,
    ) -> Result<&mut Self, EntityUpdateError> {
        let value = to_attribute_value(render)?;
        self.entity.update_builder().set_value_in_map(FILES, key, value);
        Ok(self)
    }

    /// Append to `validationErrors`, creating the list if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`EntityUpdateError::Serialization`] if an error detail cannot
    /// be converted to an attribute value.
    pub fn append_validation_errors(
        &mut self,
        errors: &[ValidationErrorDetail],
    ) -> Result<&mut Self, EntityUpdateError> {
        let items = errors
            .iter()
            .map(to_attribute_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.entity
            .update_builder()
            .set_value_in_or_create_list("validationErrors", items);
        Ok(self)
    }

    /// Take the SFTP send lock at `time_ms`.
    ///
    /// The write only commits if no lock is held or, when `lock_expiry_time_ms`
    /// is given, the held lock is older than it.
    pub fn set_lock_time(&mut self, time_ms: i64, lock_expiry_time_ms: Option<i64>) -> &mut Self {
        let builder = self.entity.update_builder();
        builder.set_value(SFTP_SEND_LOCK_TIME, time_ms);
        let conditions = builder.conditions();
        conditions.and_fn(ConditionFunction::AttributeNotExists, SFTP_SEND_LOCK_TIME, false);
        if let Some(expiry) = lock_expiry_time_ms {
            conditions.or(SFTP_SEND_LOCK_TIME, CompareOp::Gt, expiry, false);
        }
        self
    }

    /// Set the SFTP send lock without checking for an existing one.
    pub fn set_lock_time_unconditional(&mut self, time_ms: i64) -> &mut Self {
        self.entity
            .update_builder()
            .set_value(SFTP_SEND_LOCK_TIME, time_ms);
        self
    }

    /// Create `supplierReferences` as an empty map unless it exists.
    pub fn initialise_supplier_references(&mut self) -> &mut Self {
        self.entity
            .update_builder()
            .set_value_if_not_exists(SUPPLIER_REFERENCES, AttributeValue::empty_map());
        self
    }

    /// `SET supplierReferences.<supplier>`.
    pub fn set_supplier_reference(&mut self, supplier: &str, reference: &str) -> &mut Self {
        self.entity
            .update_builder()
            .set_value_in_map(SUPPLIER_REFERENCES, supplier, reference);
        self
    }

    /// Require `templateStatus` to equal `status`.
    pub fn expect_status(&mut self, status: TemplateStatus) -> &mut Self {
        self.entity
            .update_builder()
            .conditions()
            .and(STATUS, CompareOp::Eq, status, false);
        self
    }

    /// Require `templateStatus` to be one of `statuses`.
    ///
    /// Always renders as `IN`, even for a single status. An empty list adds no
    /// condition.
    pub fn expect_status_in(&mut self, statuses: &[TemplateStatus]) -> &mut Self {
        self.status_in(statuses, false)
    }

    /// Require `templateStatus` to differ from `status`.
    pub fn expect_not_status(&mut self, status: TemplateStatus) -> &mut Self {
        self.entity
            .update_builder()
            .conditions()
            .and(STATUS, CompareOp::Eq, status, true);
        self
    }

    /// Require `templateStatus` to be none of `statuses`.
    ///
    /// Always renders as `NOT ... IN`. An empty list adds no condition.
    pub fn expect_not_status_in(&mut self, statuses: &[TemplateStatus]) -> &mut Self {
        self.status_in(statuses, true)
    }

    /// Require the template to be neither deleted nor submitted.
    pub fn expect_not_final_status(&mut self) -> &mut Self {
        self.expect_not_status_in(&TemplateStatus::FINAL)
    }

    fn status_in(&mut self, statuses: &[TemplateStatus], negate: bool) -> &mut Self {
        if statuses.is_empty() {
            debug!(negate, "empty status list, no condition added");
            return self;
        }
        self.entity
            .update_builder()
            .conditions()
            .and_in(STATUS, statuses.iter().copied(), negate);
        self
    }

    /// Require `templateType` to equal `template_type`.
    pub fn expect_template_type(&mut self, template_type: TemplateType) -> &mut Self {
        self.entity
            .update_builder()
            .conditions()
            .and("templateType", CompareOp::Eq, template_type, false);
        self
    }

    /// Require `letterVersion` to equal `version`.
    pub fn expect_letter_version(&mut self, version: LetterVersion) -> &mut Self {
        self.entity
            .update_builder()
            .conditions()
            .and("letterVersion", CompareOp::Eq, version, false);
        self
    }

    /// Require `clientId` to equal `client_id`.
    pub fn expect_client_id(&mut self, client_id: &str) -> &mut Self {
        self.entity
            .update_builder()
            .conditions()
            .and("clientId", CompareOp::Eq, client_id, false);
        self
    }

    /// Require the template to exist.
    pub fn expect_template_exists(&mut self) -> &mut Self {
        self.entity
            .update_builder()
            .conditions()
            .and_fn(ConditionFunction::AttributeExists, "id", false);
        self
    }

    /// Require proofing to be enabled for the template.
    pub fn expect_proofing_enabled(&mut self) -> &mut Self {
        self.entity
            .update_builder()
            .conditions()
            .and("proofingEnabled", CompareOp::Eq, true, false);
        self
    }

    /// Require `lockNumber` to equal `lock_number`, or to be absent.
    pub fn expect_lock_number(&mut self, lock_number: u64) -> &mut Self {
        self.entity.update_builder().conditions().and_group(|group| {
            group
                .and(LOCK_NUMBER, CompareOp::Eq, lock_number, false)
                .or_fn(ConditionFunction::AttributeNotExists, LOCK_NUMBER, false);
        });
        self
    }

    /// Finalize the update.
    #[must_use]
    pub fn build(self) -> UpdateRequest {
        self.entity.build()
    }
}
