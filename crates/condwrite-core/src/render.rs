//! Expression rendering.
//!
//! Condition rendering walks the tree depth-first with an explicit position
//! path (1-based, one entry per nesting level). Placeholders are named from
//! that path at the moment they are bound, so two nodes can only share a
//! placeholder if they share both path and attribute.

use condwrite_model::UpdateClauses;

use crate::clause::ClauseKind;
use crate::condition::{Condition, ConditionList, Joiner};
use crate::placeholder::{Placeholders, name_alias};

/// Render the update expression: `SET a, b REMOVE c ADD d DELETE e`.
///
/// Sections with no fragments are left out; an empty clause set renders as
/// the empty string.
#[must_use]
pub fn render_update_expression(clauses: &UpdateClauses) -> String {
    let mut sections = Vec::with_capacity(ClauseKind::ORDER.len());
    for kind in ClauseKind::ORDER {
        let fragments: Vec<String> = match kind {
            ClauseKind::Set => fragments_of(&clauses.set),
            ClauseKind::Remove => clauses.remove.iter().map(|a| name_alias(a)).collect(),
            ClauseKind::Add => fragments_of(&clauses.add),
            ClauseKind::Delete => fragments_of(&clauses.delete),
        };
        if !fragments.is_empty() {
            sections.push(format!("{kind} {}", fragments.join(", ")));
        }
    }
    sections.join(" ")
}

fn fragments_of(section: &[(String, String)]) -> Vec<String> {
    section.iter().map(|(_, fragment)| fragment.clone()).collect()
}

/// Render the condition expression, registering every alias and binding
/// every value it references. Returns `None` for an empty list.
pub fn render_condition_expression(
    conditions: ConditionList,
    placeholders: &mut Placeholders,
) -> Option<String> {
    if conditions.is_empty() {
        return None;
    }
    let mut path = Vec::new();
    Some(render_list(conditions, &mut path, placeholders))
}

fn render_list(
    list: ConditionList,
    path: &mut Vec<usize>,
    placeholders: &mut Placeholders,
) -> String {
    let mut fragments = Vec::with_capacity(list.len());
    for (position, (joiner, node)) in list.into_iter().enumerate() {
        path.push(position + 1);
        let fragment = render_node(node, path, placeholders);
        path.pop();
        fragments.push(with_joiner(joiner, fragment));
    }
    fragments.join(" ")
}

fn render_node(node: Condition, path: &mut Vec<usize>, placeholders: &mut Placeholders) -> String {
    match node {
        Condition::Comparison {
            attribute,
            op,
            value,
            negated,
        } => {
            let alias = placeholders.name(&attribute);
            let placeholder = placeholders.bind_condition(path, &attribute, value);
            with_negation(negated, format!("{alias} {op} {placeholder}"))
        }
        Condition::Function {
            attribute,
            function,
            negated,
        } => {
            let alias = placeholders.name(&attribute);
            let name = function.name();
            let predicate = match function.into_argument() {
                Some(argument) => {
                    let placeholder = placeholders.bind_condition(path, &attribute, argument);
                    format!("{name} ({alias}, {placeholder})")
                }
                None => format!("{name} ({alias})"),
            };
            with_negation(negated, predicate)
        }
        Condition::Membership {
            attribute,
            values,
            negated,
        } => {
            let alias = placeholders.name(&attribute);
            let mut candidates = Vec::with_capacity(values.len());
            for (index, value) in values.into_iter().enumerate() {
                path.push(index + 1);
                candidates.push(placeholders.bind_condition(path, &attribute, value));
                path.pop();
            }
            with_negation(negated, format!("{alias} IN ({})", candidates.join(", ")))
        }
        Condition::Group(inner) => format!("({})", render_list(inner, path, placeholders)),
    }
}

fn with_negation(negated: bool, predicate: String) -> String {
    if negated {
        format!("NOT {predicate}")
    } else {
        predicate
    }
}

fn with_joiner(joiner: Option<Joiner>, fragment: String) -> String {
    match joiner {
        Some(joiner) => format!("{joiner} {fragment}"),
        None => fragment,
    }
}
