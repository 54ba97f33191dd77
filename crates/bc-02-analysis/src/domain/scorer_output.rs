//! # Scorer Output Validation
//!
//! The scorer must print one JSON object:
//!
//! ```text
//! {"carbonCredits":int, "vegetationHealth":"good"|"moderate", "confidence":float,
//!  "area_detected":float, "ndvi":float, "image_quality":string}
//! ```
//!
//! Extra fields are ignored. Anything else is malformed.

use serde_json::{Map, Value};
use shared_types::{AnalysisContent, AnalysisSource, ContentId, EcosystemType, HealthLabel};

/// Validated scorer output.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerReport {
    pub carbon_credits: u64,
    pub vegetation_health: HealthLabel,
    pub confidence: f64,
    pub area_detected: f64,
    pub ndvi: f64,
    pub image_quality: String,
}

impl ScorerReport {
    /// Attach provenance and turn the report into hashable content.
    pub fn into_content(
        self,
        ecosystem_type: EcosystemType,
        evidence_digest: ContentId,
    ) -> AnalysisContent {
        AnalysisContent {
            carbon_credits: self.carbon_credits,
            confidence: self.confidence,
            area_detected: self.area_detected,
            vegetation_health: self.vegetation_health,
            ndvi: self.ndvi,
            image_quality: self.image_quality,
            ecosystem_type,
            evidence_digest,
            source: AnalysisSource::Scorer,
        }
    }
}

/// Parse and validate raw scorer output.
///
/// Returns a short description of the first violation on failure.
pub fn parse_scorer_output(raw: &str) -> Result<ScorerReport, String> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|e| format!("not valid JSON: {}", e))?;
    let object = value
        .as_object()
        .ok_or_else(|| "output is not a JSON object".to_string())?;

    let carbon_credits = field(object, "carbonCredits")?
        .as_u64()
        .ok_or_else(|| "carbonCredits must be a non-negative integer".to_string())?;

    let vegetation_health = field(object, "vegetationHealth")?
        .as_str()
        .ok_or_else(|| "vegetationHealth must be a string".to_string())?
        .parse::<HealthLabel>()
        .map_err(|e| e.to_string())?;

    let confidence = finite(object, "confidence")?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(format!("confidence {} outside [0, 1]", confidence));
    }

    let area_detected = finite(object, "area_detected")?;
    if area_detected < 0.0 {
        return Err(format!("area_detected {} is negative", area_detected));
    }

    let ndvi = finite(object, "ndvi")?;
    if !(-1.0..=1.0).contains(&ndvi) {
        return Err(format!("ndvi {} outside [-1, 1]", ndvi));
    }

    let image_quality = field(object, "image_quality")?
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| "image_quality must be a non-empty string".to_string())?
        .to_string();

    Ok(ScorerReport {
        carbon_credits,
        vegetation_health,
        confidence,
        area_detected,
        ndvi,
        image_quality,
    })
}

/// Truncate on a char boundary to at most `max` bytes, marking the cut.
pub fn truncate_for_log(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}

fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Result<&'a Value, String> {
    object
        .get(name)
        .ok_or_else(|| format!("missing field {}", name))
}

fn finite(object: &Map<String, Value>, name: &str) -> Result<f64, String> {
    field(object, name)?
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{} must be a finite number", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{"carbonCredits":120,"vegetationHealth":"good","confidence":0.91,"area_detected":11.5,"ndvi":0.62,"image_quality":"good","analysis_timestamp":"2024-01-01T00:00:00Z"}"#;

    #[test]
    fn test_well_formed_output() {
        let report = parse_scorer_output(WELL_FORMED).unwrap();
        assert_eq!(report.carbon_credits, 120);
        assert_eq!(report.vegetation_health, HealthLabel::Good);
        assert_eq!(report.confidence, 0.91);
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        assert!(parse_scorer_output(&format!("\n  {}\n", WELL_FORMED)).is_ok());
    }

    #[test]
    fn test_rejections() {
        let cases = [
            ("", "not valid JSON"),
            ("[1,2]", "not a JSON object"),
            ("Loading model...\n{}", "not valid JSON"),
            (r#"{"vegetationHealth":"good"}"#, "missing field carbonCredits"),
            (
                r#"{"carbonCredits":-5,"vegetationHealth":"good","confidence":0.9,"area_detected":1,"ndvi":0.5,"image_quality":"good"}"#,
                "non-negative integer",
            ),
            (
                r#"{"carbonCredits":5.5,"vegetationHealth":"good","confidence":0.9,"area_detected":1,"ndvi":0.5,"image_quality":"good"}"#,
                "non-negative integer",
            ),
            (
                r#"{"carbonCredits":5,"vegetationHealth":"excellent","confidence":0.9,"area_detected":1,"ndvi":0.5,"image_quality":"good"}"#,
                "excellent",
            ),
            (
                r#"{"carbonCredits":5,"vegetationHealth":"good","confidence":1.5,"area_detected":1,"ndvi":0.5,"image_quality":"good"}"#,
                "confidence",
            ),
            (
                r#"{"carbonCredits":5,"vegetationHealth":"good","confidence":0.9,"area_detected":-1,"ndvi":0.5,"image_quality":"good"}"#,
                "area_detected",
            ),
            (
                r#"{"carbonCredits":5,"vegetationHealth":"good","confidence":0.9,"area_detected":1,"ndvi":2,"image_quality":"good"}"#,
                "ndvi",
            ),
            (
                r#"{"carbonCredits":5,"vegetationHealth":"good","confidence":0.9,"area_detected":1,"ndvi":0.5,"image_quality":""}"#,
                "image_quality",
            ),
        ];

        for (raw, expected) in cases {
            let err = parse_scorer_output(raw).unwrap_err();
            assert!(err.contains(expected), "{:?} -> {:?}", raw, err);
        }
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(truncate_for_log("ééé", 3), "é…");
    }

    #[test]
    fn test_report_into_content() {
        let content = parse_scorer_output(WELL_FORMED)
            .unwrap()
            .into_content(EcosystemType::Saltmarsh, ContentId::digest(b"img"));
        assert_eq!(content.source, AnalysisSource::Scorer);
        assert_eq!(content.ecosystem_type, EcosystemType::Saltmarsh);
        assert_eq!(content.area_detected, 11.5);
    }
}
