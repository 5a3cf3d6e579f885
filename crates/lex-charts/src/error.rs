//! Error types for the chart recommendation engine.
//!
//! Every failure raised here belongs to the validation class: the input was
//! malformed or structurally inconsistent and no recommendation is produced.
//! Missing optional statistics are *not* errors; they surface as
//! [`AnalysisWarning`](crate::types::AnalysisWarning) values next to a
//! low-confidence recommendation.
//!
//! Errors are serializable so they can be forwarded to a frontend as
//! `{ "code": ..., "message": ... }`.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the recommendation engine.
#[derive(Error, Debug)]
pub enum ChartError {
    /// A required identifier (column name, correlation variable) is blank.
    #[error("Missing required identifier: {0}")]
    MissingIdentifier(String),

    /// A field carries a value outside its documented domain.
    #[error("Invalid value for '{field}' in '{subject}': {reason}")]
    InvalidField {
        subject: String,
        field: String,
        reason: String,
    },

    /// Counts of a column contradict each other (e.g. unique > total).
    #[error("Inconsistent counts for column '{column}': {reason}")]
    InconsistentCounts { column: String, reason: String },

    /// A correlation references a column that is not part of the input.
    #[error("Column '{0}' not found in input")]
    ColumnNotFound(String),

    /// The input document declares a schema version this engine cannot read.
    #[error("Unsupported schema version {found} (expected {expected})")]
    UnsupportedSchemaVersion { found: u32, expected: u32 },

    /// The input could not be parsed against the schema (negative counts,
    /// wrong field types, missing required fields).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ChartError>,
    },
}

impl ChartError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ChartError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for [`ChartError::InvalidField`].
    pub fn invalid_field(
        subject: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ChartError::InvalidField {
            subject: subject.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingIdentifier(_) => "MISSING_IDENTIFIER",
            Self::InvalidField { .. } => "INVALID_FIELD",
            Self::InconsistentCounts { .. } => "INCONSISTENT_COUNTS",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::UnsupportedSchemaVersion { .. } => "UNSUPPORTED_SCHEMA_VERSION",
            Self::MalformedInput(_) => "MALFORMED_INPUT",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error rejects the input itself (as opposed to an
    /// environment failure such as IO).
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Io(_) | Self::Json(_) | Self::InvalidConfig(_) => false,
            Self::WithContext { source, .. } => source.is_validation(),
            _ => true,
        }
    }
}

/// Serialize implementation for frontend compatibility.
impl Serialize for ChartError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ChartError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for recommendation operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
