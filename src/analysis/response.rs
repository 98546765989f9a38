use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::viewer::{Recording, ViewerError};

/// Per-class metrics from the service's classification report.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1-score")]
    pub f1_score: f64,
    pub support: f64,
}

/// Summary entries are per-class metrics; report-level scalars such as `accuracy` are kept as is.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SummaryEntry {
    Class(ClassMetrics),
    Scalar(f64),
}

/// JSON body returned by the analysis service.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub signal: Vec<f32>,
    #[serde(default)]
    pub peaks: Vec<usize>,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub predictions: Vec<String>,
    #[serde(default)]
    pub summary: Option<BTreeMap<String, SummaryEntry>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub fn from_json(text: &str) -> Result<Self, ViewerError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Turn the response into a recording, or surface the service's own error message.
    pub fn into_recording(self) -> Result<Recording, ViewerError> {
        if let Some(message) = self.error {
            return Err(ViewerError::Server(message));
        }
        if let Some(summary) = &self.summary {
            log_summary(summary);
        }
        Recording::new(self.signal, self.peaks, self.annotations, self.predictions)
    }
}

fn log_summary(summary: &BTreeMap<String, SummaryEntry>) {
    for (class, entry) in summary {
        match entry {
            SummaryEntry::Class(m) => info!(
                "class {class}: precision {:.3} recall {:.3} f1 {:.3} support {}",
                m.precision, m.recall, m.f1_score, m.support
            ),
            SummaryEntry::Scalar(value) => info!("{class}: {value:.3}"),
        }
    }
}

pub fn load_response_file(path: &Path) -> Result<AnalysisResponse, ViewerError> {
    let text = fs::read_to_string(path)?;
    AnalysisResponse::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_response_with_summary() {
        let text = r#"{
            "signal": [0.1, 0.5, -0.2, 0.0, 0.3],
            "peaks": [1, 4],
            "annotations": ["N", "V"],
            "predictions": ["N", "S"],
            "summary": {
                "N": {"precision": 0.98, "recall": 0.97, "f1-score": 0.975, "support": 1800},
                "accuracy": 0.96
            }
        }"#;
        let response = AnalysisResponse::from_json(text).unwrap();
        let summary = response.summary.clone().unwrap();
        assert_eq!(summary.get("accuracy"), Some(&SummaryEntry::Scalar(0.96)));
        assert!(matches!(summary.get("N"), Some(SummaryEntry::Class(m)) if m.support == 1800.0));
        let recording = response.into_recording().unwrap();
        assert_eq!(recording.len(), 5);
        assert_eq!(recording.predictions(), &["N".to_string(), "S".to_string()]);
    }

    #[test]
    fn annotations_are_optional() {
        let text = r#"{"signal": [1.0, 2.0], "peaks": [0], "predictions": ["Q"]}"#;
        let response = AnalysisResponse::from_json(text).unwrap();
        assert!(response.annotations.is_empty());
        assert!(response.into_recording().is_ok());
    }

    #[test]
    fn server_error_is_surfaced_verbatim() {
        let response = AnalysisResponse::from_json(
            r#"{"error": "Failed to load record: no such file"}"#,
        )
        .unwrap();
        let err = response.into_recording().unwrap_err();
        assert_eq!(err.to_string(), "Failed to load record: no such file");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AnalysisResponse::from_json("{\"signal\": [1, 2").unwrap_err();
        assert!(matches!(err, ViewerError::Json(_)));
    }

    #[test]
    fn peaks_outside_the_signal_are_rejected() {
        let response =
            AnalysisResponse::from_json(r#"{"signal": [1.0, 2.0], "peaks": [5]}"#).unwrap();
        assert!(matches!(
            response.into_recording(),
            Err(ViewerError::PeakOutOfRange { .. })
        ));
    }
}
