//! Update clause accumulation.

use std::fmt;

use condwrite_model::UpdateClauses;

use crate::ordered::OrderedMap;

/// The four update expression sections, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    /// `SET`
    Set,
    /// `REMOVE`
    Remove,
    /// `ADD`
    Add,
    /// `DELETE`
    Delete,
}

impl ClauseKind {
    /// All kinds in the order their sections are emitted.
    pub const ORDER: [ClauseKind; 4] = [Self::Set, Self::Remove, Self::Add, Self::Delete];

    /// The section keyword.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Set => "SET",
            Self::Remove => "REMOVE",
            Self::Add => "ADD",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Rendered clause fragments keyed by the attribute they target.
///
/// Registering a key again replaces its fragment without moving it.
#[derive(Debug, Default)]
pub(crate) struct ClauseSet {
    set: OrderedMap<String>,
    remove: OrderedMap<String>,
    add: OrderedMap<String>,
    delete: OrderedMap<String>,
}

impl ClauseSet {
    pub(crate) fn register(&mut self, kind: ClauseKind, key: String, fragment: String) {
        let section = match kind {
            ClauseKind::Set => &mut self.set,
            ClauseKind::Remove => &mut self.remove,
            ClauseKind::Add => &mut self.add,
            ClauseKind::Delete => &mut self.delete,
        };
        section.insert(key, fragment);
    }

    pub(crate) fn into_clauses(self) -> UpdateClauses {
        UpdateClauses {
            set: self.set.into_entries(),
            remove: self
                .remove
                .into_entries()
                .into_iter()
                .map(|(attribute, _)| attribute)
                .collect(),
            add: self.add.into_entries(),
            delete: self.delete.into_entries(),
        }
    }
}
