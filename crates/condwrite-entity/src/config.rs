//! Entity store configuration.

use std::env;

use chrono::{DateTime, Duration, Utc};
use condwrite_model::ReturnOptions;

/// Default retention window for soft-deleted templates.
pub const DEFAULT_TEMPLATE_TTL_DAYS: u32 = 90;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// The variable name.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Table names and write options used by the entity builders.
#[derive(Debug, Clone)]
pub struct EntityConfig {
    /// Table holding templates.
    pub templates_table_name: String,
    /// Table holding routing configs.
    pub routing_config_table_name: String,
    /// Days a soft-deleted item is kept before the store expires it.
    pub template_ttl_days: u32,
    /// Ask the store for the previous item when a condition fails.
    pub return_old_item_on_condition_failure: bool,
}

impl EntityConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `TEMPLATE_TTL_DAYS` is not a
    /// non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from any key-value source; `lookup` returns
    /// `None` for unset keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `TEMPLATE_TTL_DAYS` is not a
    /// non-negative integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            templates_table_name: lookup("TEMPLATES_TABLE_NAME")
                .unwrap_or(defaults.templates_table_name),
            routing_config_table_name: lookup("ROUTING_CONFIG_TABLE_NAME")
                .unwrap_or(defaults.routing_config_table_name),
            template_ttl_days: parse_u32(
                "TEMPLATE_TTL_DAYS",
                lookup("TEMPLATE_TTL_DAYS"),
                defaults.template_ttl_days,
            )?,
            return_old_item_on_condition_failure: parse_bool(
                lookup("RETURN_OLD_ITEM_ON_CONDITION_FAILURE"),
                defaults.return_old_item_on_condition_failure,
            ),
        })
    }

    /// The return options passed to every update builder.
    #[must_use]
    pub fn return_options(&self) -> ReturnOptions {
        if self.return_old_item_on_condition_failure {
            ReturnOptions::previous_item_on_failure()
        } else {
            ReturnOptions::default()
        }
    }

    /// Epoch seconds at which an item soft-deleted at `now` expires.
    #[must_use]
    pub fn ttl_from(&self, now: DateTime<Utc>) -> i64 {
        (now + Duration::days(i64::from(self.template_ttl_days))).timestamp()
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            templates_table_name: "templates".to_owned(),
            routing_config_table_name: "routing-configs".to_owned(),
            template_ttl_days: DEFAULT_TEMPLATE_TTL_DAYS,
            return_old_item_on_condition_failure: true,
        }
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value.map_or(default, |v| {
        matches!(v.trim(), "1" | "true" | "yes" | "TRUE" | "YES")
    })
}

fn parse_u32(key: &'static str, value: Option<String>, default: u32) -> Result<u32, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}
