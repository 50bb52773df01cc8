use thiserror::Error;

#[derive(Error, Debug)]
pub enum VenuesError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    HttpStatusError {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Remote error {code} ({error_type}): {detail}")]
    RemoteError {
        code: u16,
        error_type: String,
        detail: String,
    },

    #[error("Response is missing key: {key}")]
    MissingResponseKey { key: String },

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Transport,
    Remote,
    Configuration,
}

impl VenuesError {
    pub fn validation(message: impl Into<String>) -> Self {
        VenuesError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            VenuesError::ValidationError { .. } => ErrorCategory::Validation,
            VenuesError::ApiError(_)
            | VenuesError::HttpStatusError { .. }
            | VenuesError::UrlError(_)
            | VenuesError::IoError(_) => ErrorCategory::Transport,
            VenuesError::RemoteError { .. }
            | VenuesError::MissingResponseKey { .. }
            | VenuesError::SerializationError(_) => ErrorCategory::Remote,
            VenuesError::ConfigError { .. }
            | VenuesError::InvalidConfigValueError { .. }
            | VenuesError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Short message suitable for printing to a terminal user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            VenuesError::ValidationError { message } => message.clone(),
            VenuesError::RemoteError {
                error_type, detail, ..
            } => format!("The venues service rejected the request ({}): {}", error_type, detail),
            VenuesError::HttpStatusError { status, .. } => {
                format!("The venues service answered with HTTP {}", status)
            }
            VenuesError::ApiError(e) if e.is_timeout() => {
                "The venues service did not answer in time".to_string()
            }
            VenuesError::ApiError(_) => "Could not reach the venues service".to_string(),
            VenuesError::MissingResponseKey { key } => {
                format!("The response did not contain '{}'", key)
            }
            VenuesError::ConfigError { .. }
            | VenuesError::InvalidConfigValueError { .. }
            | VenuesError::MissingConfigError { .. } => format!("Bad configuration: {}", self),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VenuesError>;
