//! Found item domain errors

use thiserror::Error;

use core_kernel::CoreError;

/// Errors that can occur in the found item domain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("Invalid found item: {0}")]
    Validation(String),

    /// Listed in public views only while FOUND/CLAIMED and not picked up
    #[error("Found item is no longer available: {0}")]
    NoLongerAvailable(String),
}

impl ItemError {
    pub fn validation(message: impl Into<String>) -> Self {
        ItemError::Validation(message.into())
    }
}

impl From<ItemError> for CoreError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::Validation(msg) => CoreError::Validation(msg),
            ItemError::NoLongerAvailable(id) => {
                CoreError::NotFound(format!("Found item {} is no longer available", id))
            }
        }
    }
}
