//! Error types for the speak-score crate.
//!
//! Scoring itself is total and never fails. Errors only arise while loading
//! configuration, or at the recognizer boundary before a transcript exists.

use std::path::PathBuf;

/// Configuration and I/O errors.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// A configuration value is out of range or inconsistent.
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for speak-score operations.
pub type SpeakResult<T> = Result<T, ScoreError>;

/// Failure reported by the speech-recognition collaborator.
///
/// These never reach the scorer. The calling layer turns them into
/// learner-facing feedback instead of a `ComparisonInput`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    /// Microphone permission was refused.
    #[error("microphone permission denied")]
    PermissionDenied,

    /// The recognizer heard nothing it could transcribe.
    #[error("no speech detected")]
    NoSpeech,

    /// Audio capture device unavailable.
    #[error("audio capture failed")]
    AudioCapture,

    /// A cloud recognizer could not be reached.
    #[error("network error during recognition")]
    Network,

    /// Recognition was cancelled before producing a result.
    #[error("recognition aborted")]
    Aborted,

    /// Any other recognizer error code.
    #[error("recognition failed: {0}")]
    Other(String),
}

impl RecognitionError {
    /// Map a Web Speech API error code to a typed error.
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" | "service-not-allowed" => Self::PermissionDenied,
            "no-speech" => Self::NoSpeech,
            "audio-capture" => Self::AudioCapture,
            "network" => Self::Network,
            "aborted" => Self::Aborted,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Whether the learner has to change a browser/OS setting to recover.
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(RecognitionError::from_code("not-allowed"), RecognitionError::PermissionDenied);
        assert_eq!(
            RecognitionError::from_code("service-not-allowed"),
            RecognitionError::PermissionDenied
        );
        assert_eq!(RecognitionError::from_code("no-speech"), RecognitionError::NoSpeech);
        assert_eq!(RecognitionError::from_code("network"), RecognitionError::Network);
        assert_eq!(
            RecognitionError::from_code("bad-grammar"),
            RecognitionError::Other("bad-grammar".to_owned())
        );
    }

    #[test]
    fn test_display() {
        let err = ScoreError::InvalidConfig {
            field: "autoAdvanceThreshold",
            reason: "must be at most 100".to_owned(),
        };
        assert!(err.to_string().contains("autoAdvanceThreshold"));
    }
}
