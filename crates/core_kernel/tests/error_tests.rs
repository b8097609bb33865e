//! Tests for core_kernel error types

use core_kernel::{CoreError, PortError};

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_invalid_state() {
    let error = CoreError::invalid_state("Cannot review a claim that is picked up");

    match error {
        CoreError::InvalidStateTransition(msg) => assert!(msg.contains("picked up")),
        _ => panic!("Expected InvalidStateTransition error"),
    }
}

#[test]
fn test_core_error_not_found() {
    let error = CoreError::not_found("Claim not found");

    assert!(error.is_not_found());
    assert!(!error.is_validation());
}

#[test]
fn test_unauthenticated_counts_as_authorization_failure() {
    assert!(CoreError::Unauthenticated.is_authorization());
    assert!(CoreError::authorization("Staff access required").is_authorization());
    assert!(!CoreError::conflict("duplicate").is_authorization());
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("Test error");
    let display = format!("{}", error);

    assert!(display.contains("Validation error"));
}

mod port_error_conversion {
    use super::*;

    #[test]
    fn test_not_found_keeps_entity_and_id() {
        let error: CoreError = PortError::not_found("FoundItem", "ITM-1").into();

        match error {
            CoreError::NotFound(msg) => {
                assert!(msg.contains("FoundItem"));
                assert!(msg.contains("ITM-1"));
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_field_is_prefixed() {
        let error: CoreError = PortError::validation_field("must contain @", "contactEmail").into();
        assert!(matches!(error, CoreError::Validation(ref msg) if msg == "contactEmail: must contain @"));
    }

    #[test]
    fn test_conflict_and_unauthorized() {
        let conflict: CoreError = PortError::conflict("already claimed").into();
        assert!(matches!(conflict, CoreError::Conflict(_)));

        let denied: CoreError = PortError::Unauthorized { message: "no".into() }.into();
        assert!(matches!(denied, CoreError::Authorization(_)));
    }

    #[test]
    fn test_transient_failures_become_network_errors() {
        let timeout: CoreError = PortError::Timeout {
            operation: "find_claims".into(),
            duration_ms: 250,
        }
        .into();
        assert!(matches!(timeout, CoreError::Network(ref msg) if msg.contains("250ms")));

        let down: CoreError = PortError::ServiceUnavailable { service: "postgres".into() }.into();
        assert!(matches!(down, CoreError::Network(_)));

        let refused: CoreError = PortError::connection("refused").into();
        assert!(matches!(refused, CoreError::Network(_)));
    }

    #[test]
    fn test_bad_stored_data_is_internal() {
        let error: CoreError = PortError::transformation("status: Unknown item status").into();
        assert!(matches!(error, CoreError::Internal(_)));
    }
}
