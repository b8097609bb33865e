//! Error taxonomy surfaced to callers of the gateway
//!
//! Domain crates keep their own error enums and convert into `CoreError`
//! at the gateway boundary. The variants map one-to-one onto what a view has
//! to tell the user apart: bad input, not allowed, missing, or unreachable.

use thiserror::Error;

use crate::ports::PortError;

/// Core error type shared by the gateway and its callers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A required field is missing or malformed; nothing was changed
    #[error("Validation error: {0}")]
    Validation(String),

    /// No credential, or the credential was rejected
    #[error("Authentication required")]
    Unauthenticated,

    /// The actor's role or ownership does not permit the operation
    #[error("Not authorized: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The request collides with existing data
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// Transport or storage could not be reached
    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        CoreError::Authorization(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        CoreError::Conflict(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        CoreError::InvalidStateTransition(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }

    /// True for both a missing credential and an insufficient role
    pub fn is_authorization(&self) -> bool {
        matches!(self, CoreError::Authorization(_) | CoreError::Unauthenticated)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

impl From<PortError> for CoreError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => {
                CoreError::NotFound(format!("{} {}", entity_type, id))
            }
            PortError::Validation { message, field } => match field {
                Some(field) => CoreError::Validation(format!("{}: {}", field, message)),
                None => CoreError::Validation(message),
            },
            PortError::Conflict { message } => CoreError::Conflict(message),
            PortError::Unauthorized { message } => CoreError::Authorization(message),
            PortError::Connection { message, .. } => CoreError::Network(message),
            PortError::Timeout { operation, duration_ms } => {
                CoreError::Network(format!("{} timed out after {}ms", operation, duration_ms))
            }
            PortError::ServiceUnavailable { service } => {
                CoreError::Network(format!("{} unavailable", service))
            }
            PortError::Transformation { message } => CoreError::Internal(message),
            PortError::Internal { message, .. } => CoreError::Internal(message),
        }
    }
}
