//! Wire model types for condwrite.
//!
//! These types describe what the expression compiler produces (an
//! [`UpdateRequest`] shaped like the store's `UpdateItem` input) and what a
//! store client hands back when a conditional write is rejected
//! ([`StoreError`]). Nothing in this crate talks to a store.
// "DynamoDB" appears in many doc comments in this crate.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod attribute_value;
pub mod error;
pub mod request;
pub mod types;

pub use attribute_value::{AttributeValue, Item, to_attribute_value};
pub use error::{CancellationReason, StoreError, StoreErrorCode};
pub use request::{PrimaryKey, UpdateClauses, UpdateRequest};
pub use types::{ReturnOptions, ReturnValue, ReturnValuesOnConditionCheckFailure};
