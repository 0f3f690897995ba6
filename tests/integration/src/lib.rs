//! Cross-crate tests for condwrite: entity builders through the expression
//! compiler down to the wire JSON, and store rejections back up to entity
//! errors.
//!
//! Run them with:
//! ```text
//! cargo test -p condwrite-integration
//! ```

use std::sync::Once;

use chrono::{DateTime, TimeZone, Utc};
use condwrite_entity::{EntityConfig, RoutingConfigUpdateBuilder, TemplateUpdateBuilder};
use condwrite_model::UpdateRequest;

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Configuration used by every test.
#[must_use]
pub fn test_config() -> EntityConfig {
    EntityConfig {
        templates_table_name: "templates-test".to_owned(),
        routing_config_table_name: "routing-configs-test".to_owned(),
        ..EntityConfig::default()
    }
}

/// A fixed clock reading.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A template update builder against the test table.
#[must_use]
pub fn template_update(client_id: &str, id: &str) -> TemplateUpdateBuilder {
    init_tracing();
    let config = test_config();
    TemplateUpdateBuilder::new(
        &config.templates_table_name,
        client_id,
        id,
        config.return_options(),
    )
}

/// A routing config update builder against the test table.
#[must_use]
pub fn routing_config_update(client_id: &str, id: &str) -> RoutingConfigUpdateBuilder {
    init_tracing();
    let config = test_config();
    RoutingConfigUpdateBuilder::new(
        &config.routing_config_table_name,
        client_id,
        id,
        config.return_options(),
    )
}

/// The request as the store client would send it.
///
/// # Errors
///
/// Returns an error if the request cannot be serialized.
pub fn wire_json(request: &UpdateRequest) -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::to_value(request)?)
}

mod test_compiler;
mod test_failure;
mod test_routing_config;
mod test_template;
