//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! person registry test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for people, addresses, CPFs, and dates
//! - `builders`: Builder patterns for test data construction
//! - `generators`: Property-based test data generators
//! - `assertions`: Custom assertion helpers for domain types
//! - `logging`: One-time tracing setup for test binaries

pub mod fixtures;
pub mod builders;
pub mod generators;
pub mod assertions;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use generators::*;
pub use assertions::*;
pub use logging::init_test_tracing;
