use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilmorateError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl FilmorateError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for FilmorateError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::ErrorKind;
        match domain_error.kind() {
            ErrorKind::NotFound => Self::not_found(domain_error.to_string()),
            ErrorKind::Validation => Self::validation(domain_error.to_string()),
            ErrorKind::Unexpected => Self::internal(),
        }
    }
}
