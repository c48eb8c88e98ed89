//! Core Kernel - Foundational types shared by the person registry crates
//!
//! This crate provides the building blocks used by the domain and test crates:
//! - An injectable `Clock` so that date-dependent rules stay deterministic
//! - Calendar arithmetic for exact age calculations
//! - The numeric `PersonId` identifier
//! - The `PortError` type every adapter reports failures with

pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use temporal::{Clock, SystemClock, FixedClock, CalendarPeriod, SharedClock, system_clock, days_between};
pub use identifiers::PersonId;
pub use ports::{PortError, DomainPort};
