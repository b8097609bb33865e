//! Custom Test Assertions
//!
//! Assertion helpers with messages that say what went wrong in domain terms.

use serde_json::Value;

use core_kernel::CoreError;

/// JSON keys that only staff may ever receive
pub const STAFF_ONLY_KEYS: [&str; 4] = [
    "privateNotes",
    "storageLocation",
    "requiresIdForPickup",
    "answer",
];

/// Asserts that no staff-only key appears anywhere in a serialized view
///
/// Claim answers live under `answers`, so a claimant's own claim is allowed
/// to carry `answer` keys inside that array; everything else is checked.
///
/// # Panics
///
/// Panics naming the first staff-only key found and its JSON path
pub fn assert_no_staff_fields(json: &Value) {
    if let Some(path) = find_staff_key(json, "$") {
        panic!("Staff-only field exposed at {}: {}", path, json);
    }
}

fn find_staff_key(json: &Value, path: &str) -> Option<String> {
    match json {
        Value::Object(map) => map.iter().find_map(|(key, value)| {
            let child = format!("{}.{}", path, key);
            if STAFF_ONLY_KEYS.contains(&key.as_str()) {
                return Some(child);
            }
            if key == "answers" {
                return None;
            }
            find_staff_key(value, &child)
        }),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, value)| find_staff_key(value, &format!("{}[{}]", path, i))),
        _ => None,
    }
}

/// Asserts the error is a validation error and returns its message
pub fn assert_validation_error<T: std::fmt::Debug>(result: Result<T, CoreError>) -> String {
    match result {
        Err(CoreError::Validation(message)) => message,
        other => panic!("Expected validation error, got {:?}", other),
    }
}

/// Asserts the error is an authorization error
pub fn assert_authorization_error<T: std::fmt::Debug>(result: Result<T, CoreError>) {
    match result {
        Err(CoreError::Authorization(_)) => {}
        other => panic!("Expected authorization error, got {:?}", other),
    }
}

/// Asserts the error is an invalid state transition
pub fn assert_invalid_transition<T: std::fmt::Debug>(result: Result<T, CoreError>) {
    match result {
        Err(CoreError::InvalidStateTransition(_)) => {}
        other => panic!("Expected invalid state transition, got {:?}", other),
    }
}

/// Asserts the error is a not-found error
pub fn assert_not_found<T: std::fmt::Debug>(result: Result<T, CoreError>) {
    match result {
        Err(CoreError::NotFound(_)) => {}
        other => panic!("Expected not found, got {:?}", other),
    }
}

/// Asserts that `values` is in non-decreasing order
pub fn assert_sorted_ascending<T: PartialOrd + std::fmt::Debug>(values: &[T]) {
    if let Some(pair) = values.windows(2).find(|pair| pair[0] > pair[1]) {
        panic!("Out of order: {:?} before {:?} in {:?}", pair[0], pair[1], values);
    }
}
