//! Claims domain errors

use thiserror::Error;

use core_kernel::CoreError;

/// Errors that can occur in the claims domain
///
/// None of these are returned after a claim has been mutated; a failed
/// operation leaves the claim as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimError {
    /// A required field is missing, e.g. empty review notes
    #[error("Invalid claim input: {0}")]
    Validation(String),

    #[error("Cannot {action} a claim that is {phase}")]
    InvalidTransition { phase: String, action: String },

    /// The actor's role or ownership does not allow the action
    #[error("Not permitted: {0}")]
    Forbidden(String),

    #[error("Visitor already holds a claim for item {0}")]
    DuplicateClaim(String),
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ClaimError::Forbidden(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClaimError::Validation(_))
    }
}

impl From<ClaimError> for CoreError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::Validation(msg) => CoreError::Validation(msg),
            e @ ClaimError::InvalidTransition { .. } => CoreError::InvalidStateTransition(e.to_string()),
            ClaimError::Forbidden(msg) => CoreError::Authorization(msg),
            e @ ClaimError::DuplicateClaim(_) => CoreError::Conflict(e.to_string()),
        }
    }
}
