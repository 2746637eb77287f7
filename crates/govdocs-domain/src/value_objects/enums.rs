//! Closed enumerations for entity fields that the distilled spec modeled as
//! raw strings. REDESIGN FLAGS (spec §9) call for closed variants wherever a
//! field is duck-typed in the source system; these are those variants.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Site-dialect discovery strategy for a scraping [`crate::entities::Source`] (spec §3, §4.C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    Moe,
    Ugc,
    Aicte,
    Generic,
}

/// Lifecycle status of a [`crate::entities::ScrapeJob`] (spec §3).
///
/// Monotonic except `Running -> Stopping -> Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScrapeJobStatus {
    Running,
    Stopping,
    Stopped,
    Succeeded,
    Failed,
}

impl ScrapeJobStatus {
    /// Whether the job has reached a terminal state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Stopped | Self::Succeeded | Self::Failed)
    }
}

/// Document visibility tier (spec §3, access matrix in §4.K).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    InstitutionOnly,
    Restricted,
    Confidential,
}

/// Approval workflow status of a document (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Draft,
    Pending,
    UnderReview,
    ChangesRequested,
    Approved,
    RestrictedApproved,
    Rejected,
    Archived,
    Flagged,
    Expired,
}

/// Lazy-embedding lifecycle of a document's embedding satellite (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr, Default)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingStatus {
    #[default]
    NotEmbedded,
    Embedding,
    Embedded,
    Failed,
}

/// Metadata extraction lifecycle (spec §3, §4.F).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr, Default)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MetadataStatus {
    #[default]
    Processing,
    Ready,
    Failed,
}

/// Backing store kind for an [`crate::entities::ExternalDataSource`] (spec §3, §4.L).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Database,
    ObjectStore,
}

/// Caller role used by the retrieval access matrix (spec §4.K).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    DocumentOfficer,
    UniversityAdmin,
    MinistryAdmin,
    Developer,
}
