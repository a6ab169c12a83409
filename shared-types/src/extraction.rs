use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::DocumentFormat;

/// Core trait that all text extractors must implement
pub trait TextExtractor {
    /// Extract the full plain text of one document
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError>;

    /// Which document format does this extractor read?
    fn format(&self) -> DocumentFormat;
}

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The input is not a well-formed ZIP archive. The payload carries the
    /// underlying reason for logging; the message shown to callers is fixed.
    #[error("Invalid ZIP file")]
    InvalidArchive(String),

    #[error("Error extracting {target}: {reason}")]
    ExtractionFailure { target: String, reason: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to write report: {0}")]
    SerializationFailure(String),
}

impl ExtractionError {
    pub fn document(path: &Path, reason: impl ToString) -> Self {
        ExtractionError::ExtractionFailure {
            target: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn archive(reason: impl ToString) -> Self {
        ExtractionError::ExtractionFailure {
            target: "ZIP file".to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result contract handed to whoever drives a pipeline run.
///
/// Serializes as `{"status": "success", "excel_file": ...}` or
/// `{"status": "error", "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PipelineOutcome {
    Success { excel_file: PathBuf },
    Error { message: String },
}

impl PipelineOutcome {
    pub fn success(excel_file: impl Into<PathBuf>) -> Self {
        PipelineOutcome::Success {
            excel_file: excel_file.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        PipelineOutcome::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success { .. })
    }

    pub fn excel_file(&self) -> Option<&Path> {
        match self {
            PipelineOutcome::Success { excel_file } => Some(excel_file),
            PipelineOutcome::Error { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            PipelineOutcome::Success { .. } => None,
            PipelineOutcome::Error { message } => Some(message),
        }
    }
}

impl From<ExtractionError> for PipelineOutcome {
    fn from(err: ExtractionError) -> Self {
        PipelineOutcome::error(err.to_string())
    }
}
