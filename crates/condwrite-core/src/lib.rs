//! Compiler for atomic conditional update expressions.
//!
//! Callers describe what to mutate and under which precondition the mutation
//! may commit; [`UpdateCommandBuilder::finalize`] renders it into the store's
//! placeholder-based update and condition expressions plus the name and value
//! maps they reference. The pipeline is:
//!
//! 1. **Accumulate**: clause calls register aliases, placeholders and
//!    fragments; condition calls grow a [`ConditionList`].
//! 2. **Render**: the condition tree is walked with an explicit position path
//!    to name every value placeholder, and the clause sections are joined.
//! 3. **Validate** (optional): [`validate::validate_references`] checks that
//!    every reference is bound and every binding is referenced.
#![allow(clippy::doc_markdown)]

pub mod builder;
pub mod clause;
pub mod condition;
mod ordered;
pub mod placeholder;
pub mod render;
pub mod validate;

pub use builder::UpdateCommandBuilder;
pub use condition::{
    AttributeType, CompareOp, Condition, ConditionBuilder, ConditionFunction, ConditionList, Joiner,
};
pub use validate::{ExpressionError, validate_references};
