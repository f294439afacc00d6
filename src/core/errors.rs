//! Shared error types for the semantic analysis pipeline

use crate::observability::AnalysisPhase;
use thiserror::Error;

/// Main error type for semmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream parser reported a failure for this file
    #[error("{message}")]
    Input { file_path: String, message: String },

    /// The parsed result did not have the expected element shape
    #[error("Extraction error in {file_path} during {phase}: {message}")]
    Extraction {
        file_path: String,
        phase: AnalysisPhase,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller-supplied matcher failed to compile
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an input error carrying the parser's message verbatim
    pub fn input(file_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Input {
            file_path: file_path.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error tagged with the phase it happened in
    pub fn extraction(
        file_path: impl Into<String>,
        phase: AnalysisPhase,
        message: impl Into<String>,
    ) -> Self {
        Self::Extraction {
            file_path: file_path.into(),
            phase,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Message reported in a failed file result.
    ///
    /// Input errors keep the parser's text untouched.
    pub fn user_message(&self) -> String {
        match self {
            Self::Input { message, .. } => message.clone(),
            Self::Extraction { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_message_is_verbatim() {
        let err = Error::input("f.js", "Unexpected token (3:7)");
        assert_eq!(err.to_string(), "Unexpected token (3:7)");
        assert_eq!(err.user_message(), "Unexpected token (3:7)");
    }

    #[test]
    fn test_extraction_error_mentions_phase() {
        let err = Error::extraction(
            "app.py",
            AnalysisPhase::ExtractingElements,
            "function entry is missing `name`",
        );
        let rendered = err.to_string();
        assert!(rendered.contains("app.py"));
        assert!(rendered.contains("extracting_elements"));
        assert_eq!(err.user_message(), "function entry is missing `name`");
    }

    #[test]
    fn test_configuration_error_display() {
        let err = Error::configuration("threshold out of range");
        assert_eq!(
            err.to_string(),
            "Configuration error: threshold out of range"
        );
    }
}
