//! Error types for report generation.

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Error type for report operations.
///
/// None of these is fatal to a batch: loaders turn `MalformedInput` and
/// `ContainerExtraction` into warnings and keep going, while
/// `EmptySelection` rejects a generate call before any work is done.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Malformed input '{source_name}': {message}")]
    MalformedInput {
        source_name: String,
        message: String,
    },

    #[error("Cannot extract archive '{archive}': {message}")]
    ContainerExtraction { archive: String, message: String },

    #[error("Empty selection: {0}")]
    EmptySelection(String),

    #[error("Malformed report table: {0}")]
    MalformedTable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub fn malformed_input(source_name: impl Into<String>, message: impl ToString) -> Self {
        ReportError::MalformedInput {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn container_extraction(archive: impl Into<String>, message: impl ToString) -> Self {
        ReportError::ContainerExtraction {
            archive: archive.into(),
            message: message.to_string(),
        }
    }
}
