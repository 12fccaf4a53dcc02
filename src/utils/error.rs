use crate::domain::lead::LeadIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Io,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::HttpError(_) => ErrorCategory::Network,
            SiteError::IoError(_) => ErrorCategory::Io,
            SiteError::MissingConfigError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            SiteError::ServerError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::HttpError(e) => format!("Could not reach a remote service: {}", e),
            SiteError::IoError(e) => format!("A file or socket operation failed: {}", e),
            SiteError::MissingConfigError { field } => {
                format!("The setting '{}' is required but was not provided", field)
            }
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                format!("The setting '{}' is invalid: {}", field, reason)
            }
            SiteError::ConfigValidationError { field, message } => {
                format!("The setting '{}' could not be used: {}", field, message)
            }
            SiteError::ServerError { message } => format!("The server failed: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the config file and the HOST/PORT/MAIL_RELAY_* environment variables"
            }
            ErrorCategory::Network => "Check that the mail relay is reachable and retry",
            ErrorCategory::Io => "Check that the config file exists and is readable",
            ErrorCategory::Internal => {
                "Check that no other process holds the port, then inspect the logs with RUST_LOG=odo_site=debug"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

/// Outcome of a failed lead submission, as seen by the HTTP caller.
#[derive(Error, Debug)]
pub enum LeadError {
    #[error("lead failed validation with {} issue(s)", .0.len())]
    Validation(Vec<LeadIssue>),

    #[error("lead processing failed: {message}")]
    Server { message: String },
}

/// Graceful mail relay failures. These never reach the visitor.
#[derive(Error, Debug)]
pub enum MailError {
    #[error("mail relay unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("mail relay rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("could not build the notification: {reason}")]
    InvalidMessage { reason: String },
}
