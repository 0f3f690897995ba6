//! Mapping store rejections to entity errors.
//!
//! A conditional-check failure only says that *some* precondition was false.
//! When the update asked for the previous item on failure, that snapshot is
//! inspected in a fixed order to find out which one: missing or deleted item,
//! final status, changed template type, stale lock number, then an optional
//! caller check. Anything left over is passed through as
//! [`EntityUpdateError::Store`].

use condwrite_model::{Item, StoreError, StoreErrorCode};
use tracing::{debug, warn};

use crate::domain::{RoutingConfigStatus, TemplateStatus, TemplateType};
use crate::error::EntityUpdateError;

/// The kind of entity an update targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A template, status in `templateStatus`.
    Template,
    /// A routing config, status in `status`.
    RoutingConfig,
}

impl EntityKind {
    /// Human-readable entity name used in error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Template => "Template",
            Self::RoutingConfig => "Routing configuration",
        }
    }

    fn status_attribute(&self) -> &'static str {
        match self {
            Self::Template => "templateStatus",
            Self::RoutingConfig => "status",
        }
    }

    fn deleted_status(&self) -> &'static str {
        match self {
            Self::Template => TemplateStatus::Deleted.as_str(),
            Self::RoutingConfig => RoutingConfigStatus::Deleted.as_str(),
        }
    }

    fn submitted_status(&self) -> &'static str {
        match self {
            Self::Template => TemplateStatus::Submitted.as_str(),
            Self::RoutingConfig => RoutingConfigStatus::Completed.as_str(),
        }
    }
}

/// What an update expected of the stored item, used to explain a rejection.
#[derive(Debug, Clone)]
pub struct FailureClassifier {
    kind: EntityKind,
    lock_number: u64,
    blocked_statuses: Vec<&'static str>,
    template_type: Option<TemplateType>,
}

impl FailureClassifier {
    /// Expectations of a template update made at `lock_number`.
    #[must_use]
    pub fn template(lock_number: u64) -> Self {
        Self::new(EntityKind::Template, lock_number)
    }

    /// Expectations of a routing config update made at `lock_number`.
    #[must_use]
    pub fn routing_config(lock_number: u64) -> Self {
        Self::new(EntityKind::RoutingConfig, lock_number)
    }

    fn new(kind: EntityKind, lock_number: u64) -> Self {
        Self {
            kind,
            lock_number,
            blocked_statuses: Vec::new(),
            template_type: None,
        }
    }

    /// Treat these statuses like the submitted status.
    #[must_use]
    pub fn with_blocked_statuses(mut self, statuses: &[TemplateStatus]) -> Self {
        self.blocked_statuses
            .extend(statuses.iter().map(TemplateStatus::as_str));
        self
    }

    /// The template type the update wrote.
    #[must_use]
    pub fn with_template_type(mut self, template_type: TemplateType) -> Self {
        self.template_type = Some(template_type);
        self
    }

    /// Classify a failed single-item update.
    #[must_use]
    pub fn classify(&self, err: StoreError) -> EntityUpdateError {
        self.classify_with(err, |_| None)
    }

    /// Classify a failed single-item update, consulting `check` on the
    /// previous item once the built-in explanations are exhausted. `check`
    /// returns a message when its precondition did not hold.
    pub fn classify_with<F>(&self, err: StoreError, check: F) -> EntityUpdateError
    where
        F: FnOnce(&Item) -> Option<String>,
    {
        if !err.is_conditional_check_failed() {
            warn!(entity = self.kind.name(), code = %err.code, "store rejected update");
            return self.store(err);
        }
        let explained = match err.item.as_ref() {
            None => Some(self.not_found()),
            Some(item) => self.explain(item, check),
        };
        match explained {
            Some(failure) => {
                debug!(entity = self.kind.name(), error = %failure, "classified condition failure");
                failure
            }
            None => {
                warn!(
                    entity = self.kind.name(),
                    lock_number = self.lock_number,
                    "condition failed for an unexplained reason"
                );
                self.store(err)
            }
        }
    }

    /// Classify a failed transaction by the cancellation reason of the item
    /// at `index`.
    ///
    /// Errors that are not transaction cancellations are classified as a
    /// single-item failure.
    #[must_use]
    pub fn classify_transaction(&self, err: StoreError, index: usize) -> EntityUpdateError {
        if err.code != StoreErrorCode::TransactionCanceledException {
            return self.classify(err);
        }
        match err.cancellation_for(index) {
            Some(reduced) => self.classify(reduced),
            None => {
                debug!(
                    entity = self.kind.name(),
                    index, "transaction canceled by another item"
                );
                self.store(err)
            }
        }
    }

    fn explain<F>(&self, item: &Item, check: F) -> Option<EntityUpdateError>
    where
        F: FnOnce(&Item) -> Option<String>,
    {
        let status = item
            .get(self.kind.status_attribute())
            .and_then(|v| v.as_s());

        if status == Some(self.kind.deleted_status()) {
            return Some(self.not_found());
        }
        if let Some(status) = status {
            if status == self.kind.submitted_status()
                || self.blocked_statuses.iter().any(|blocked| *blocked == status)
            {
                return Some(EntityUpdateError::AlreadySubmitted {
                    entity: self.kind.name(),
                    status: status.to_owned(),
                });
            }
        }
        if let Some(expected) = self.template_type {
            let stored = item.get("templateType").and_then(|v| v.as_s());
            if stored != Some(expected.as_str()) {
                return Some(EntityUpdateError::TemplateTypeChanged {
                    expected: stored.unwrap_or_default().to_owned(),
                    actual: expected.as_str().to_owned(),
                });
            }
        }
        if item.get("lockNumber").and_then(|v| v.as_u64()) != Some(self.lock_number) {
            return Some(EntityUpdateError::Conflict {
                entity: self.kind.name(),
            });
        }
        check(item).map(|message| EntityUpdateError::Unsupported { message })
    }

    fn not_found(&self) -> EntityUpdateError {
        EntityUpdateError::NotFound {
            entity: self.kind.name(),
        }
    }

    fn store(&self, source: StoreError) -> EntityUpdateError {
        EntityUpdateError::Store {
            entity: self.kind.name(),
            source,
        }
    }
}
