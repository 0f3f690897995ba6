//! Shared plumbing for the entity update builders.

use chrono::{DateTime, SecondsFormat, Utc};
use condwrite_core::UpdateCommandBuilder;
use condwrite_model::{PrimaryKey, ReturnOptions, UpdateRequest};

use crate::domain::client_owner_key;

/// An update to one client-owned item, keyed by `owner = CLIENT#{client}`
/// and `id`.
#[derive(Debug)]
pub struct EntityUpdateBuilder {
    builder: UpdateCommandBuilder,
}

impl EntityUpdateBuilder {
    /// Create a builder for the item `id` owned by `client_id`.
    #[must_use]
    pub fn new(table_name: &str, client_id: &str, id: &str, options: ReturnOptions) -> Self {
        let key = PrimaryKey::partition("owner", client_owner_key(client_id)).with_sort("id", id);
        Self {
            builder: UpdateCommandBuilder::new(table_name, key, options),
        }
    }

    /// The underlying update command builder.
    pub fn update_builder(&mut self) -> &mut UpdateCommandBuilder {
        &mut self.builder
    }

    /// Finalize the update.
    #[must_use]
    pub fn build(self) -> UpdateRequest {
        self.builder.finalize()
    }
}

/// Updates every client-owned entity supports.
pub trait EntityUpdate {
    /// The builder the default methods write to.
    fn entity(&mut self) -> &mut EntityUpdateBuilder;

    /// `SET name`.
    fn set_name(&mut self, name: &str) -> &mut Self {
        self.entity().update_builder().set_value("name", name);
        self
    }

    /// `SET campaignId`.
    fn set_campaign_id(&mut self, campaign_id: &str) -> &mut Self {
        self.entity()
            .update_builder()
            .set_value("campaignId", campaign_id);
        self
    }

    /// `SET ttl`, in epoch seconds.
    fn set_ttl(&mut self, ttl: i64) -> &mut Self {
        self.entity().update_builder().set_value("ttl", ttl);
        self
    }

    /// `SET updatedAt, updatedBy`.
    fn set_updated_by_user_at(&mut self, user: &str, at: DateTime<Utc>) -> &mut Self {
        self.entity()
            .update_builder()
            .set_value("updatedAt", format_timestamp(at))
            .set_value("updatedBy", user);
        self
    }

    /// `ADD lockNumber 1`.
    fn increment_lock_number(&mut self) -> &mut Self {
        self.entity().update_builder().add_to_value("lockNumber", 1_u64);
        self
    }
}

/// ISO 8601 with millisecond precision and a `Z` suffix.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
