//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use std::fmt::Debug;

use core_kernel::PersonId;
use domain_person::{Person, PersonError};

/// Asserts that `a` and `b` list each other as family
///
/// # Panics
///
/// Panics if either direction of the link is missing.
pub fn assert_family_symmetric(a: &Person, b: &Person) {
    assert!(a.is_family(b), "{a} does not list {b} as family");
    assert!(b.is_family(a), "{b} does not list {a} as family");
}

/// Asserts that `a` and `b` are not linked in either direction
pub fn assert_not_family(a: &Person, b: &Person) {
    assert!(!a.is_family(b), "{a} unexpectedly lists {b} as family");
    assert!(!b.is_family(a), "{b} unexpectedly lists {a} as family");
}

/// Asserts that every family entry of `person` is distinct
pub fn assert_family_unique(person: &Person) {
    let family = person.family();
    for (i, member) in family.iter().enumerate() {
        let duplicates = family[i + 1..].iter().filter(|other| other.same_entity(member)).count();
        assert_eq!(duplicates, 0, "{member} appears more than once in the family of {person}");
    }
}

/// Asserts that a result is a validation error with exactly `message`
///
/// # Panics
///
/// Panics if the result is `Ok`, a different error kind, or a different message.
pub fn assert_validation_error<T: Debug>(result: Result<T, PersonError>, message: &str) {
    match result {
        Err(PersonError::Validation(actual)) => assert_eq!(
            actual, message,
            "Validation message mismatch: actual='{actual}', expected='{message}'"
        ),
        other => panic!("Expected validation error '{message}', got {other:?}"),
    }
}

/// Asserts that a result is an invalid-state error with exactly `message`
pub fn assert_invalid_state<T: Debug>(result: Result<T, PersonError>, message: &str) {
    match result {
        Err(PersonError::InvalidState(actual)) => assert_eq!(actual, message),
        other => panic!("Expected invalid state '{message}', got {other:?}"),
    }
}

/// Asserts that a result is `NotFound` for `id`
pub fn assert_not_found<T: Debug>(result: Result<T, PersonError>, id: PersonId) {
    match result {
        Err(PersonError::NotFound(actual)) => {
            assert_eq!(actual, id, "NotFound for the wrong id")
        }
        other => panic!("Expected NotFound for id {id}, got {other:?}"),
    }
}

/// Asserts that two floats are equal within `tolerance`
pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "Values differ by more than tolerance: actual={actual}, expected={expected}, tolerance={tolerance}"
    );
}
