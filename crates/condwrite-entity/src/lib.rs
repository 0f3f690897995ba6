//! Entity update builders for templates and routing configs.
//!
//! Each builder speaks the domain's vocabulary ("set status", "expect lock
//! number") and compiles to a single conditional [`UpdateRequest`] through
//! [`condwrite_core`]. When the store rejects the write, [`FailureClassifier`]
//! turns the rejection and the previous item it returned into an
//! [`EntityUpdateError`].
//!
//! [`UpdateRequest`]: condwrite_model::UpdateRequest
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod domain;
pub mod entity;
pub mod error;
pub mod failure;
pub mod routing_config;
pub mod template;

pub use config::{ConfigError, EntityConfig};
pub use domain::{
    CascadeGroup, CascadeItem, ChannelType, ConditionalTemplate, LetterVersion, RenderDetails,
    RoutingConfigStatus, TemplateStatus, TemplateType, ValidationErrorDetail, client_owner_key,
};
pub use entity::{EntityUpdate, EntityUpdateBuilder, format_timestamp};
pub use error::EntityUpdateError;
pub use failure::{EntityKind, FailureClassifier};
pub use routing_config::RoutingConfigUpdateBuilder;
pub use template::TemplateUpdateBuilder;
