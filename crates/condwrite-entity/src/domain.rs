//! Domain vocabulary shared by the entity update builders.

use std::collections::HashMap;
use std::fmt;

use condwrite_model::AttributeValue;
use serde::{Deserialize, Serialize};

/// Declares `as_str`, `Display` and the `AttributeValue` conversion for a
/// string-valued domain enum.
macro_rules! string_enum {
    ($ty:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            /// Returns the stored string representation.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Parse the stored string representation.
            #[must_use]
            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$ty> for AttributeValue {
            fn from(value: $ty) -> Self {
                AttributeValue::S(value.as_str().to_owned())
            }
        }
    };
}

/// Lifecycle status of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateStatus {
    /// Editable draft.
    NotYetSubmitted,
    /// Submitted; no further edits.
    Submitted,
    /// Soft-deleted.
    Deleted,
    /// Waiting for files to be uploaded.
    PendingUpload,
    /// Waiting for validation.
    PendingValidation,
    /// An uploaded file failed the virus scan.
    VirusScanFailed,
    /// Validation failed.
    ValidationFailed,
    /// Waiting for a proof.
    WaitingForProof,
    /// A proof is available.
    ProofAvailable,
    /// A proof has been requested.
    PendingProofRequest,
    /// The proof was approved.
    ProofApproved,
}

string_enum!(TemplateStatus {
    NotYetSubmitted => "NOT_YET_SUBMITTED",
    Submitted => "SUBMITTED",
    Deleted => "DELETED",
    PendingUpload => "PENDING_UPLOAD",
    PendingValidation => "PENDING_VALIDATION",
    VirusScanFailed => "VIRUS_SCAN_FAILED",
    ValidationFailed => "VALIDATION_FAILED",
    WaitingForProof => "WAITING_FOR_PROOF",
    ProofAvailable => "PROOF_AVAILABLE",
    PendingProofRequest => "PENDING_PROOF_REQUEST",
    ProofApproved => "PROOF_APPROVED",
});

impl TemplateStatus {
    /// Statuses after which a template can no longer be changed.
    pub const FINAL: [TemplateStatus; 2] = [Self::Deleted, Self::Submitted];
}

/// Channel a template is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateType {
    /// NHS App message.
    NhsApp,
    /// Email.
    Email,
    /// Text message.
    Sms,
    /// Letter.
    Letter,
}

string_enum!(TemplateType {
    NhsApp => "NHS_APP",
    Email => "EMAIL",
    Sms => "SMS",
    Letter => "LETTER",
});

/// How a letter template is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterVersion {
    /// Authored in the service.
    Authoring,
    /// Uploaded PDF.
    Pdf,
    /// Uploaded PDF with proofing.
    PdfProofing,
}

string_enum!(LetterVersion {
    Authoring => "AUTHORING",
    Pdf => "PDF",
    PdfProofing => "PDF_PROOFING",
});

/// Lifecycle status of a routing config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingConfigStatus {
    /// Editable draft.
    Draft,
    /// Completed; no further edits.
    Completed,
    /// Soft-deleted.
    Deleted,
}

string_enum!(RoutingConfigStatus {
    Draft => "DRAFT",
    Completed => "COMPLETED",
    Deleted => "DELETED",
});

/// A rendered letter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDetails {
    /// Render state, e.g. `RENDERED`.
    pub status: String,
    /// Output file name.
    pub file_name: String,
    /// Version identifier of the rendered file.
    pub current_version: String,
    /// Number of pages.
    pub page_count: u32,
    /// Personalisation pack used for the render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_personalisation_pack_id: Option<String>,
    /// Values substituted into the render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalisation_parameters: Option<HashMap<String, String>>,
}

/// One problem found while validating an uploaded letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Error code, e.g. `MISSING_ADDRESS_LINES`.
    pub name: String,
    /// Offending markers or fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,
}

/// Priority of a cascade item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    /// Primary channel.
    Primary,
    /// Secondary channel.
    Secondary,
}

/// A template picked by language or accessible format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalTemplate {
    /// Template to use.
    pub template_id: String,
    /// Language this template applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Accessible format this template applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible_format: Option<String>,
}

/// One channel of a routing config cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeItem {
    /// Channel of this step.
    pub channel: TemplateType,
    /// Priority of this step.
    pub channel_type: ChannelType,
    /// Groups this step belongs to.
    pub cascade_groups: Vec<String>,
    /// Template used when no conditional template applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_template_id: Option<String>,
    /// Overrides by language or accessible format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_templates: Option<Vec<ConditionalTemplate>>,
}

/// A non-default cascade group and when it applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeGroup {
    /// Group name.
    pub name: String,
    /// Languages routed to this group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Vec<String>>,
    /// Accessible formats routed to this group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible_format: Option<Vec<String>>,
}

/// The partition key value for items owned by a client.
#[must_use]
pub fn client_owner_key(client_id: &str) -> String {
    format!("CLIENT#{client_id}")
}
