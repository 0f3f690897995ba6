//! Routing config updates.

use condwrite_core::{CompareOp, ConditionFunction};
use condwrite_model::{ReturnOptions, UpdateRequest, to_attribute_value};

use crate::domain::{CascadeGroup, CascadeItem, RoutingConfigStatus};
use crate::entity::{EntityUpdate, EntityUpdateBuilder};
use crate::error::EntityUpdateError;

const STATUS: &str = "status";

/// Builds a conditional update to one routing config.
#[derive(Debug)]
pub struct RoutingConfigUpdateBuilder {
    entity: EntityUpdateBuilder,
}

impl EntityUpdate for RoutingConfigUpdateBuilder {
    fn entity(&mut self) -> &mut EntityUpdateBuilder {
        &mut self.entity
    }
}

impl RoutingConfigUpdateBuilder {
    /// Create a builder for routing config `id` owned by `client_id`.
    #[must_use]
    pub fn new(table_name: &str, client_id: &str, id: &str, options: ReturnOptions) -> Self {
        Self {
            entity: EntityUpdateBuilder::new(table_name, client_id, id, options),
        }
    }

    /// `SET status`.
    pub fn set_status(&mut self, status: RoutingConfigStatus) -> &mut Self {
        self.entity.update_builder().set_value(STATUS, status);
        self
    }

    /// Require `status` to equal `status`.
    pub fn expect_status(&mut self, status: RoutingConfigStatus) -> &mut Self {
        self.entity
            .update_builder()
            .conditions()
            .and(STATUS, CompareOp::Eq, status, false);
        self
    }

    /// `SET cascade`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityUpdateError::Serialization`] if the cascade cannot be
    /// converted to an attribute value.
    pub fn set_cascade(&mut self, cascade: &[CascadeItem]) -> Result<&mut Self, EntityUpdateError> {
        let value = to_attribute_value(cascade)?;
        self.entity.update_builder().set_value("cascade", value);
        Ok(self)
    }

    /// `SET cascadeGroupOverrides`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityUpdateError::Serialization`] if the overrides cannot be
    /// converted to an attribute value.
    pub fn set_cascade_group_overrides(
        &mut self,
        overrides: &[CascadeGroup],
    ) -> Result<&mut Self, EntityUpdateError> {
        let value = to_attribute_value(overrides)?;
        self.entity
            .update_builder()
            .set_value("cascadeGroupOverrides", value);
        Ok(self)
    }

    /// Require the routing config to exist.
    pub fn expect_routing_config_exists(&mut self) -> &mut Self {
        self.entity
            .update_builder()
            .conditions()
            .and_fn(ConditionFunction::AttributeExists, "id", false);
        self
    }

    /// Require `lockNumber` to equal `lock_number`.
    pub fn expect_lock_number(&mut self, lock_number: u64) -> &mut Self {
        self.entity
            .update_builder()
            .conditions()
            .and("lockNumber", CompareOp::Eq, lock_number, false);
        self
    }

    /// Finalize the update.
    #[must_use]
    pub fn build(self) -> UpdateRequest {
        self.entity.build()
    }
}
