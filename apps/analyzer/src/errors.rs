use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Every failure the pipeline can report to the operator maps onto one variant.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Input image not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The model answered, but no usable JSON object could be pulled out of the text.
    /// `raw` keeps the full response for diagnostics.
    #[error("Malformed model response: {reason}")]
    MalformedResponse { reason: String, raw: String },

    #[error("Upstream model call failed: {0}")]
    UpstreamCallFailure(#[from] LlmError),

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: &'static str,
        #[source]
        source: Box<AnalyzerError>,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AnalyzerError {
    pub fn malformed(reason: impl Into<String>, raw: &str) -> Self {
        AnalyzerError::MalformedResponse {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }

    /// Wraps this error with the name of the pipeline step it aborted.
    pub fn in_step(self, step: &'static str) -> Self {
        AnalyzerError::StepFailed {
            step,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through step wrappers.
    pub fn root(&self) -> &AnalyzerError {
        match self {
            AnalyzerError::StepFailed { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_input_not_found(&self) -> bool {
        matches!(self.root(), AnalyzerError::InputNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_looks_through_step_wrappers() {
        let err = AnalyzerError::InputNotFound(PathBuf::from("missing.png"))
            .in_step("load screenshot")
            .in_step("pipeline");
        assert!(err.is_input_not_found());
        assert!(matches!(err.root(), AnalyzerError::InputNotFound(_)));
    }

    #[test]
    fn test_step_failure_message_names_step() {
        let err = AnalyzerError::malformed("no JSON object found", "hello").in_step("profile scoring");
        let message = err.to_string();
        assert!(message.contains("profile scoring"), "{message}");
        assert!(message.contains("no JSON object found"), "{message}");
        assert!(!err.is_input_not_found());
    }

    #[test]
    fn test_malformed_keeps_raw_text() {
        let err = AnalyzerError::malformed("bad", "raw model text");
        match err {
            AnalyzerError::MalformedResponse { raw, .. } => assert_eq!(raw, "raw model text"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
