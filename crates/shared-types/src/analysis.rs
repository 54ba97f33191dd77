//! # Analysis Result and Content Addressing
//!
//! An `AnalysisResult` is identified by the SHA-256 digest of its canonical
//! content bytes.
//!
//! ## Canonical serialization
//!
//! Compact JSON (no whitespace), fields in this fixed order:
//!
//! | # | Field | Type |
//! |---|-------|------|
//! | 1 | `carbonCredits` | unsigned integer |
//! | 2 | `confidence` | float in [0, 1] |
//! | 3 | `areaDetected` | float, hectares |
//! | 4 | `vegetationHealth` | `"good"` or `"moderate"` |
//! | 5 | `ndvi` | float in [-1, 1] |
//! | 6 | `imageQuality` | string |
//! | 7 | `ecosystemType` | `"mangrove"`, `"seagrass"` or `"saltmarsh"` |
//! | 8 | `evidenceDigest` | hex SHA-256 of the evidence bytes |
//! | 9 | `source` | `"scorer"` or `"fallback"` |
//!
//! The generation timestamp is provenance only and is NOT part of the digest,
//! so identical content always maps to the same identifier.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::entities::{AnalysisSource, EcosystemType, HealthLabel};
use crate::errors::DomainError;
use crate::time::Timestamp;

/// Length of a hex-encoded SHA-256 digest.
pub const CONTENT_ID_HEX_LEN: usize = 64;

/// Lowercase hex SHA-256 digest used as a content address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId(String);

impl ContentId {
    /// Digest arbitrary bytes.
    pub fn digest(bytes: &[u8]) -> Self {
        ContentId(hex::encode(Sha256::digest(bytes)))
    }

    /// Parse an identifier from untrusted input.
    ///
    /// Only 64 lowercase hex characters are accepted, which also guarantees
    /// the value is safe to use as a file name.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let valid = raw.len() == CONTENT_ID_HEX_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if valid {
            Ok(ContentId(raw.to_string()))
        } else {
            Err(DomainError::InvalidContentId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw 32 digest bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        let decoded = hex::decode_to_slice(&self.0, &mut out);
        // `digest` and `parse` are the only constructors; both yield 64 hex chars.
        debug_assert!(decoded.is_ok(), "content id {} is not 32 hex bytes", self.0);
        out
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContentId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContentId::parse(&value)
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

/// The hashed part of an analysis result.
///
/// Field order here IS the canonical order; do not reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContent {
    pub carbon_credits: u64,
    pub confidence: f64,
    pub area_detected: f64,
    pub vegetation_health: HealthLabel,
    pub ndvi: f64,
    pub image_quality: String,
    pub ecosystem_type: EcosystemType,
    pub evidence_digest: ContentId,
    pub source: AnalysisSource,
}

impl AnalysisContent {
    /// Canonical bytes the identifier is computed over.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        // Only strings, integers and finite floats: serialization cannot fail.
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Content address of these fields.
    pub fn content_id(&self) -> ContentId {
        ContentId::digest(&self.canonical_bytes())
    }
}

/// Immutable analysis result, sealed with its content address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: ContentId,
    pub generated_at: Timestamp,
    pub content: AnalysisContent,
}

impl AnalysisResult {
    /// Compute the identifier and seal the content.
    pub fn seal(content: AnalysisContent, generated_at: Timestamp) -> Self {
        Self {
            id: content.content_id(),
            generated_at,
            content,
        }
    }

    /// True when the stored identifier matches the content.
    pub fn verify(&self) -> bool {
        self.id == self.content.content_id()
    }

    /// Canonical serialization of the whole record, as persisted on disk.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}
