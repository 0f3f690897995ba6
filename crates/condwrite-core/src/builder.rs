//! The update command builder.

use condwrite_model::{AttributeValue, PrimaryKey, ReturnOptions, UpdateRequest};
use tracing::debug;

use crate::clause::{ClauseKind, ClauseSet};
use crate::condition::ConditionBuilder;
use crate::placeholder::{EMPTY_LIST_PLACEHOLDER, Placeholders};
use crate::render::{render_condition_expression, render_update_expression};

/// Accumulates the clauses and conditions of one conditional update.
///
/// Clause calls register their aliases and values immediately; conditions are
/// kept as a tree and only named during [`finalize`](Self::finalize), which
/// consumes the builder.
///
/// ```
/// use condwrite_core::{CompareOp, UpdateCommandBuilder};
/// use condwrite_model::{PrimaryKey, ReturnOptions};
///
/// let mut builder = UpdateCommandBuilder::new(
///     "templates",
///     PrimaryKey::partition("owner", "CLIENT#c-1").with_sort("id", "t-1"),
///     ReturnOptions::default(),
/// );
/// builder.set_value("templateStatus", "DELETED");
/// builder
///     .conditions()
///     .when("templateStatus", CompareOp::Ne, "SUBMITTED", false);
///
/// let request = builder.finalize();
/// assert_eq!(request.update_expression, "SET #templateStatus = :templateStatus");
/// assert_eq!(
///     request.condition_expression.as_deref(),
///     Some("#templateStatus <> :condition_1_templateStatus")
/// );
/// ```
#[derive(Debug)]
pub struct UpdateCommandBuilder {
    table_name: String,
    key: PrimaryKey,
    return_options: ReturnOptions,
    clauses: ClauseSet,
    placeholders: Placeholders,
    conditions: ConditionBuilder,
}

impl UpdateCommandBuilder {
    /// Create a builder targeting one item of `table_name`.
    #[must_use]
    pub fn new(
        table_name: impl Into<String>,
        key: PrimaryKey,
        return_options: ReturnOptions,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            key,
            return_options,
            clauses: ClauseSet::default(),
            placeholders: Placeholders::default(),
            conditions: ConditionBuilder::new(),
        }
    }

    /// `SET #attr = :attr`. Setting the same attribute again replaces both the
    /// fragment and the value.
    pub fn set_value(&mut self, attribute: &str, value: impl Into<AttributeValue>) -> &mut Self {
        let alias = self.placeholders.name(attribute);
        let placeholder = self.placeholders.bind_clause(attribute, value.into());
        self.clauses.register(
            ClauseKind::Set,
            attribute.to_owned(),
            format!("{alias} = {placeholder}"),
        );
        self
    }

    /// `SET #attr = if_not_exists(#attr, :attr)`.
    pub fn set_value_if_not_exists(
        &mut self,
        attribute: &str,
        value: impl Into<AttributeValue>,
    ) -> &mut Self {
        let alias = self.placeholders.name(attribute);
        let placeholder = self.placeholders.bind_clause(attribute, value.into());
        self.clauses.register(
            ClauseKind::Set,
            attribute.to_owned(),
            format!("{alias} = if_not_exists({alias}, {placeholder})"),
        );
        self
    }

    /// `ADD #attr :attr`.
    pub fn add_to_value(&mut self, attribute: &str, delta: impl Into<AttributeValue>) -> &mut Self {
        let alias = self.placeholders.name(attribute);
        let placeholder = self.placeholders.bind_clause(attribute, delta.into());
        self.clauses.register(
            ClauseKind::Add,
            attribute.to_owned(),
            format!("{alias} {placeholder}"),
        );
        self
    }

    /// `SET #attr = list_append(#attr, :attr)`.
    pub fn set_value_in_list<I, V>(&mut self, attribute: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        let alias = self.placeholders.name(attribute);
        let placeholder = self.placeholders.bind_clause(attribute, list_of(items));
        self.clauses.register(
            ClauseKind::Set,
            attribute.to_owned(),
            format!("{alias} = list_append({alias}, {placeholder})"),
        );
        self
    }

    /// `SET #attr = list_append(if_not_exists(#attr, :emptyList), :attr)`.
    pub fn set_value_in_or_create_list<I, V>(&mut self, attribute: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        let alias = self.placeholders.name(attribute);
        let placeholder = self.placeholders.bind_clause(attribute, list_of(items));
        let empty = self
            .placeholders
            .bind(EMPTY_LIST_PLACEHOLDER.to_owned(), AttributeValue::empty_list());
        self.clauses.register(
            ClauseKind::Set,
            attribute.to_owned(),
            format!("{alias} = list_append(if_not_exists({alias}, {empty}), {placeholder})"),
        );
        self
    }

    /// `SET #attr.#key = :key`.
    ///
    /// `key` gets its own alias and placeholder. The fragment is registered
    /// under `attr.key`, so writes to different keys of one map coexist.
    pub fn set_value_in_map(
        &mut self,
        attribute: &str,
        key: &str,
        value: impl Into<AttributeValue>,
    ) -> &mut Self {
        let alias = self.placeholders.name(attribute);
        let key_alias = self.placeholders.name(key);
        let placeholder = self.placeholders.bind_clause(key, value.into());
        self.clauses.register(
            ClauseKind::Set,
            format!("{attribute}.{key}"),
            format!("{alias}.{key_alias} = {placeholder}"),
        );
        self
    }

    /// `REMOVE #attr`. Idempotent.
    pub fn remove_attribute(&mut self, attribute: &str) -> &mut Self {
        let alias = self.placeholders.name(attribute);
        self.clauses
            .register(ClauseKind::Remove, attribute.to_owned(), alias);
        self
    }

    /// `DELETE #attr :attr`, removing `members` from a set attribute.
    pub fn delete_from_set(
        &mut self,
        attribute: &str,
        members: impl Into<AttributeValue>,
    ) -> &mut Self {
        let alias = self.placeholders.name(attribute);
        let placeholder = self.placeholders.bind_clause(attribute, members.into());
        self.clauses.register(
            ClauseKind::Delete,
            attribute.to_owned(),
            format!("{alias} {placeholder}"),
        );
        self
    }

    /// The root condition list.
    pub fn conditions(&mut self) -> &mut ConditionBuilder {
        &mut self.conditions
    }

    /// Render the accumulated state into an [`UpdateRequest`].
    #[must_use]
    pub fn finalize(self) -> UpdateRequest {
        let Self {
            table_name,
            key,
            return_options,
            clauses,
            mut placeholders,
            conditions,
        } = self;

        let condition_expression =
            render_condition_expression(conditions.build(), &mut placeholders);
        let clauses = clauses.into_clauses();
        let update_expression = render_update_expression(&clauses);
        let (expression_attribute_names, expression_attribute_values) = placeholders.into_maps();

        debug!(
            table = %table_name,
            set = clauses.set.len(),
            remove = clauses.remove.len(),
            add = clauses.add.len(),
            delete = clauses.delete.len(),
            names = expression_attribute_names.len(),
            values = expression_attribute_values.as_ref().map_or(0, |v| v.len()),
            conditional = condition_expression.is_some(),
            "finalized update request"
        );

        UpdateRequest {
            table_name,
            key: key.into_map(),
            update_expression,
            condition_expression,
            expression_attribute_names,
            expression_attribute_values,
            return_values: return_options.return_values,
            return_values_on_condition_check_failure: return_options.on_condition_failure,
            clauses,
        }
    }
}

fn list_of<I, V>(items: I) -> AttributeValue
where
    I: IntoIterator<Item = V>,
    V: Into<AttributeValue>,
{
    AttributeValue::L(items.into_iter().map(Into::into).collect())
}
