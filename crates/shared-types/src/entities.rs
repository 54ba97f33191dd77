//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Submission**: `ProjectMetadata`, `Evidence`, `EcosystemType`
//! - **Analysis labels**: `HealthLabel`, `AnalysisSource`
//! - **Identity**: `ProjectId`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::ContentId;
use crate::errors::DomainError;

/// Reserved prefix for project identifiers synthesized without the ledger.
///
/// Ledger-assigned identifiers are plain decimal digits, so any id carrying
/// this prefix is known to be local.
pub const LOCAL_PROJECT_ID_PREFIX: &str = "local-";

// =============================================================================
// CLUSTER A: SUBMISSION
// =============================================================================

/// Coastal ecosystem a restoration project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcosystemType {
    Mangrove,
    Seagrass,
    Saltmarsh,
}

impl EcosystemType {
    /// All recognized ecosystem types.
    pub const ALL: [EcosystemType; 3] = [
        EcosystemType::Mangrove,
        EcosystemType::Seagrass,
        EcosystemType::Saltmarsh,
    ];

    /// Wire name of the ecosystem type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EcosystemType::Mangrove => "mangrove",
            EcosystemType::Seagrass => "seagrass",
            EcosystemType::Saltmarsh => "saltmarsh",
        }
    }
}

impl fmt::Display for EcosystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EcosystemType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        EcosystemType::ALL
            .into_iter()
            .find(|e| e.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownEcosystem(s.to_string()))
    }
}

/// Declared project metadata, validated.
///
/// Serializes to the metadata object handed to the external scorer:
/// `{name, location, area, ecosystemType, submitter}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Project name.
    pub name: String,
    /// Free-form location description.
    pub location: String,
    /// Declared area in hectares (strictly positive).
    #[serde(rename = "area")]
    pub area_hectares: f64,
    /// Ecosystem type.
    #[serde(rename = "ecosystemType")]
    pub ecosystem_type: EcosystemType,
    /// Opaque submitter address.
    pub submitter: String,
}

impl ProjectMetadata {
    /// Declared area truncated to whole hectares, as stored on the ledger.
    pub fn whole_hectares(&self) -> u64 {
        // `as` saturates for out-of-range floats.
        self.area_hectares.trunc() as u64
    }
}

/// Evidence blob submitted with a project.
#[derive(Clone, PartialEq, Eq)]
pub struct Evidence {
    /// Raw bytes of the artifact.
    pub bytes: Vec<u8>,
    /// Declared MIME type.
    pub content_type: String,
}

impl Evidence {
    /// Create evidence from bytes and a content type.
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    /// True when the declared MIME type is an `image/*` type.
    pub fn is_image(&self) -> bool {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence
            .strip_prefix("image/")
            .is_some_and(|subtype| !subtype.is_empty())
    }

    /// Size of the blob in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the blob has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// SHA-256 digest of the evidence bytes, used as the evidence reference.
    pub fn digest(&self) -> ContentId {
        ContentId::digest(&self.bytes)
    }
}

impl fmt::Debug for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evidence")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

// =============================================================================
// CLUSTER B: ANALYSIS LABELS
// =============================================================================

/// Qualitative vegetation health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLabel {
    Good,
    Moderate,
}

impl FromStr for HealthLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(HealthLabel::Good),
            "moderate" => Ok(HealthLabel::Moderate),
            other => Err(DomainError::UnknownHealthLabel(other.to_string())),
        }
    }
}

/// Where an analysis result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// Well-formed output of the external scorer.
    Scorer,
    /// Deterministic fallback computed from declared metadata.
    Fallback,
}

// =============================================================================
// CLUSTER C: IDENTITY
// =============================================================================

/// Project identifier returned to callers.
///
/// - `Ledger(n)` is assigned by the registry contract and renders as `n`.
/// - `Local(uuid)` is synthesized when the ledger is disabled or registration
///   failed, and renders as `local-<uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectId {
    Ledger(u64),
    Local(Uuid),
}

impl ProjectId {
    /// Synthesize a fresh local identifier.
    pub fn new_local() -> Self {
        ProjectId::Local(Uuid::new_v4())
    }

    /// True for identifiers that were not assigned by the ledger.
    pub fn is_local(&self) -> bool {
        matches!(self, ProjectId::Local(_))
    }

    /// Ledger-assigned number, if any.
    pub fn ledger_id(&self) -> Option<u64> {
        match self {
            ProjectId::Ledger(id) => Some(*id),
            ProjectId::Local(_) => None,
        }
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Ledger(id) => write!(f, "{}", id),
            ProjectId::Local(uuid) => write!(f, "{}{}", LOCAL_PROJECT_ID_PREFIX, uuid),
        }
    }
}

impl FromStr for ProjectId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix(LOCAL_PROJECT_ID_PREFIX) {
            return Uuid::parse_str(rest)
                .map(ProjectId::Local)
                .map_err(|_| DomainError::InvalidProjectId(s.to_string()));
        }
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidProjectId(s.to_string()));
        }
        s.parse::<u64>()
            .map(ProjectId::Ledger)
            .map_err(|_| DomainError::InvalidProjectId(s.to_string()))
    }
}

impl Serialize for ProjectId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
