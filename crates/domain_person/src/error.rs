//! Person domain errors
//!
//! Three kinds of failure reach callers: invalid arguments, missing persons,
//! and operations requested on an entity that is not in a usable state.
//! Adapter and configuration failures pass through unchanged.

use thiserror::Error;

use core_kernel::{PersonId, PortError};

/// Errors that can occur in the person domain
#[derive(Debug, Error)]
pub enum PersonError {
    /// An argument failed validation
    #[error("{0}")]
    Validation(String),

    /// No person is stored under the given id
    #[error("Person not found with id: {0}")]
    NotFound(PersonId),

    /// The entity cannot answer the request in its current state
    #[error("{0}")]
    InvalidState(String),

    /// A collaborator (repository) failed
    #[error("Port error: {0}")]
    Port(#[from] PortError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl PersonError {
    /// Creates a Validation error with a message
    pub fn validation(message: impl Into<String>) -> Self {
        PersonError::Validation(message.into())
    }

    /// Creates an InvalidState error with a message
    pub fn invalid_state(message: impl Into<String>) -> Self {
        PersonError::InvalidState(message.into())
    }

    /// Creates a NotFound error for an id
    pub fn not_found(id: PersonId) -> Self {
        PersonError::NotFound(id)
    }

    /// Returns true for argument validation failures
    pub fn is_validation(&self) -> bool {
        matches!(self, PersonError::Validation(_))
    }

    /// Returns true when a lookup found nothing
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersonError::NotFound(_))
    }
}

/// Result alias for person domain operations
pub type PersonResult<T> = Result<T, PersonError>;
