//! Ports and Adapters Infrastructure
//!
//! The domain talks to the outside world (storage, mail delivery) only
//! through port traits. Each domain crate defines its own port traits on top
//! of the [`DomainPort`] marker, and every adapter reports failures as a
//! [`PortError`] so that the service layer handles them uniformly.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            Application services          │
//! └──────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────┐
//! │   Port traits (PersonRepository, ...)    │
//! └──────────────────────────────────────────┘
//!           ▲                      ▲
//!    ┌──────┴───────┐      ┌──────┴───────┐
//!    │  In-memory   │      │  Real store  │
//!    │  test double │      │  (embedder)  │
//!    └──────────────┘      └──────────────┘
//! ```

use thiserror::Error;

/// Error type for port operations
///
/// Lookups that find nothing are not errors: ports report them as `None`,
/// `false`, or an empty list. A `PortError` always means the adapter itself
/// failed.
#[derive(Debug, Error)]
pub enum PortError {
    /// An internal adapter failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }
}

/// Marker trait for all domain ports
///
/// Ports are consumed from a single thread, so unlike the entities they
/// carry, they are not required to be `Send`.
pub trait DomainPort: 'static {
    /// Short name of the adapter, used in log fields
    fn adapter_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
