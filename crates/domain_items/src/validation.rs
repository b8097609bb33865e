//! Found item validation rules
//!
//! - Title, public description and location found are required
//! - The first photo URL is required
//! - At least two verification questions, each with question and answer
//! - The date found cannot be in the future

use chrono::Utc;

use crate::error::ItemError;
use crate::item::FoundItem;

/// Minimum number of verification questions per item
pub const MIN_VERIFICATION_QUESTIONS: usize = 2;

/// Result of item validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the item is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Converts into a `Result`, joining all errors into one message
    pub fn into_result(self) -> Result<(), ItemError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ItemError::Validation(self.errors.join("; ")))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for found items
pub struct ItemValidator;

impl ItemValidator {
    /// Validates every rule and collects all failures
    pub fn validate(item: &FoundItem) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if item.title.trim().is_empty() {
            result.add_error("Title is required");
        }
        if item.public_description.trim().is_empty() {
            result.add_error("Public description is required");
        }
        if item.location_found.trim().is_empty() {
            result.add_error("Location found is required");
        }

        match item.image_urls.first() {
            Some(url) if !url.trim().is_empty() => {}
            _ => result.add_error("At least one photo is required"),
        }

        if item.date_found > Utc::now().date_naive() {
            result.add_error("Date found cannot be in the future");
        }

        Self::validate_questions(item, &mut result);

        result
    }

    fn validate_questions(item: &FoundItem, result: &mut ValidationResult) {
        if item.verification_questions.len() < MIN_VERIFICATION_QUESTIONS {
            result.add_error(format!(
                "At least {} verification questions are required",
                MIN_VERIFICATION_QUESTIONS
            ));
        }

        for (index, q) in item.verification_questions.iter().enumerate() {
            if q.question.trim().is_empty() {
                result.add_error(format!("Verification question {} is empty", index + 1));
            }
            if q.answer.trim().is_empty() {
                result.add_error(format!("Verification question {} has no answer", index + 1));
            }
        }
    }
}
