//! # Submission Request
//!
//! `RawSubmission` carries the fields as received. `validate` turns it into
//! a `SubmissionRequest`, the only form the pipeline accepts.

use shared_types::{EcosystemType, Evidence, ProjectMetadata};

use super::errors::ValidationError;

/// Submission fields as received, not yet checked.
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    pub name: Option<String>,
    pub location: Option<String>,
    pub area: Option<String>,
    pub ecosystem_type: Option<String>,
    pub submitter: Option<String>,
    pub evidence: Option<Evidence>,
}

/// Validated submission.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    metadata: ProjectMetadata,
    evidence: Evidence,
}

impl SubmissionRequest {
    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    pub fn evidence(&self) -> &Evidence {
        &self.evidence
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

impl RawSubmission {
    /// Check every field. Evidence presence is checked first.
    pub fn validate(self, max_evidence_bytes: usize) -> Result<SubmissionRequest, ValidationError> {
        let evidence = self
            .evidence
            .filter(|e| !e.is_empty())
            .ok_or(ValidationError::MissingEvidence)?;

        let name = required(self.name, "name")?;
        let location = required(self.location, "location")?;
        let area_raw = required(self.area, "area")?;
        let ecosystem_raw = required(self.ecosystem_type, "ecosystemType")?;
        let submitter = required(self.submitter, "userAddress")?;

        let area_hectares = area_raw
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or_else(|| ValidationError::InvalidArea(area_raw.clone()))?;

        let ecosystem_type = ecosystem_raw
            .parse::<EcosystemType>()
            .map_err(|_| ValidationError::UnknownEcosystem(ecosystem_raw.clone()))?;

        if !evidence.is_image() {
            return Err(ValidationError::NotAnImage(evidence.content_type.clone()));
        }
        if evidence.len() > max_evidence_bytes {
            return Err(ValidationError::EvidenceTooLarge {
                size: evidence.len(),
                max: max_evidence_bytes,
            });
        }

        Ok(SubmissionRequest {
            metadata: ProjectMetadata {
                name,
                location,
                area_hectares,
                ecosystem_type,
                submitter,
            },
            evidence,
        })
    }
}
