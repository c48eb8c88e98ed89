//! Strongly-typed identifiers for domain entities
//!
//! Persons are keyed by a numeric surrogate assigned by the repository. The
//! newtype keeps those keys from being mixed up with ages, counts, or any
//! other integer flowing through the service layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a persisted person
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i64);

impl PersonId {
    /// Creates an identifier from its raw value
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Returns the identifier that follows this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PersonId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for PersonId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<PersonId> for i64 {
    fn from(id: PersonId) -> i64 {
        id.0
    }
}
