//! Referential checks over a finished request.
//!
//! The store rejects a request whose expressions reference an alias or
//! placeholder that is not bound, and also one that binds a name or value no
//! expression references. [`validate_references`] reports both.

use std::collections::{BTreeSet, HashSet};
use std::iter::Peekable;
use std::str::Chars;

use condwrite_model::UpdateRequest;

/// A reference mismatch between the expressions and their bindings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    /// An alias is used but not present in the name map.
    #[error("Unresolved expression attribute name: {name}")]
    UnresolvedName {
        /// The unresolved alias.
        name: String,
    },
    /// A placeholder is used but not present in the value map.
    #[error("Unresolved expression attribute value: {name}")]
    UnresolvedValue {
        /// The unresolved placeholder.
        name: String,
    },
    /// Aliases bound in the name map but never used.
    #[error("Value provided in ExpressionAttributeNames unused in expressions: keys: {{{}}}", .names.join(", "))]
    UnusedName {
        /// The unused aliases, sorted.
        names: Vec<String>,
    },
    /// Placeholders bound in the value map but never used.
    #[error("Value provided in ExpressionAttributeValues unused in expressions: keys: {{{}}}", .names.join(", "))]
    UnusedValue {
        /// The unused placeholders, sorted.
        names: Vec<String>,
    },
}

/// The alias and placeholder tokens referenced by a set of expressions.
#[derive(Debug, Default)]
struct References {
    names: BTreeSet<String>,
    values: BTreeSet<String>,
}

impl References {
    fn scan(&mut self, expression: &str) {
        let mut chars = expression.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '#' => {
                    let token = read_ident_chars(&mut chars);
                    if !token.is_empty() {
                        self.names.insert(format!("#{token}"));
                    }
                }
                ':' => {
                    let token = read_ident_chars(&mut chars);
                    if !token.is_empty() {
                        self.values.insert(format!(":{token}"));
                    }
                }
                _ => {}
            }
        }
    }
}

fn read_ident_chars(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut token = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_continue(c) {
            break;
        }
        token.push(c);
        chars.next();
    }
    token
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Check that every alias and placeholder in the update and condition
/// expressions is bound, and that every binding is used.
///
/// Attribute names outside `[A-Za-z0-9_]` produce aliases that cannot be
/// referenced and are reported here.
///
/// # Errors
///
/// Returns the first [`ExpressionError`] found, checking unresolved names,
/// unresolved values, unused names and unused values in that order.
pub fn validate_references(request: &UpdateRequest) -> Result<(), ExpressionError> {
    let mut used = References::default();
    used.scan(&request.update_expression);
    if let Some(condition) = &request.condition_expression {
        used.scan(condition);
    }

    let names = &request.expression_attribute_names;
    let values: HashSet<&str> = request
        .expression_attribute_values
        .iter()
        .flat_map(|v| v.keys().map(String::as_str))
        .collect();

    if let Some(name) = used.names.iter().find(|n| !names.contains_key(n.as_str())) {
        return Err(ExpressionError::UnresolvedName { name: name.clone() });
    }
    if let Some(name) = used.values.iter().find(|v| !values.contains(v.as_str())) {
        return Err(ExpressionError::UnresolvedValue { name: name.clone() });
    }

    let unused_names = unused(names.keys().map(String::as_str), &used.names);
    if !unused_names.is_empty() {
        return Err(ExpressionError::UnusedName {
            names: unused_names,
        });
    }
    let unused_values = unused(values.into_iter(), &used.values);
    if !unused_values.is_empty() {
        return Err(ExpressionError::UnusedValue {
            names: unused_values,
        });
    }
    Ok(())
}

fn unused<'a>(provided: impl Iterator<Item = &'a str>, used: &BTreeSet<String>) -> Vec<String> {
    let mut unused: Vec<String> = provided
        .filter(|k| !used.contains(*k))
        .map(ToOwned::to_owned)
        .collect();
    unused.sort();
    unused
}
