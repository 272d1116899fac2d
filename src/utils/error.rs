use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Route service request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Route service returned HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Malformed route response: {details}")]
    SchemaError { details: String },

    #[error("Invalid value for {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Not found: {message}")]
    NotFoundError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse failure kind, used by callers that only need to distinguish
/// "configuration problem" from "everything else".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    Schema,
    Validation,
    Storage,
}

impl OpsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OpsError::ConfigError { .. } => ErrorCategory::Configuration,
            OpsError::TransportError(_) | OpsError::ServiceError { .. } => ErrorCategory::Transport,
            OpsError::SchemaError { .. } => ErrorCategory::Schema,
            OpsError::ValidationError { .. } | OpsError::NotFoundError { .. } => {
                ErrorCategory::Validation
            }
            OpsError::SerializationError(_) | OpsError::CsvError(_) | OpsError::IoError(_) => {
                ErrorCategory::Storage
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => {
                "Gemini API key is not configured correctly. Please set the GEMINI_API_KEY environment variable.".to_string()
            }
            ErrorCategory::Transport | ErrorCategory::Schema => {
                "Failed to generate an optimized route. Please check the addresses and your connection, then try again.".to_string()
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Export GEMINI_API_KEY and run the command again",
            ErrorCategory::Transport => "Check the network connection and retry",
            ErrorCategory::Schema => "Retry the request; the service returned an unusable payload",
            ErrorCategory::Validation => "Fix the reported field and retry",
            ErrorCategory::Storage => "Check that the data directory is readable and writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, OpsError>;
