//! Person Registry Domain
//!
//! This crate models people, their postal addresses and Brazilian CPF tax
//! IDs, and the direct family relationships between them. A small
//! application service persists people through a repository port and
//! notifies them through an email port.
//!
//! # Family Model
//!
//! - Relationships are **direct**: being family of family does not count
//! - Relationships are **symmetric**: linking A to B also links B to A
//! - Relationships are **identity based**: two people with equal names are
//!   still two relatives
//!
//! # Examples
//!
//! ```rust
//! use std::rc::Rc;
//! use chrono::NaiveDate;
//! use core_kernel::FixedClock;
//! use domain_person::{Person, PersonService};
//! use domain_person::ports::mock::{InMemoryPersonRepository, RecordingEmailService};
//!
//! let clock = FixedClock::from_ymd(2024, 1, 15).unwrap().shared();
//! let repository = Rc::new(InMemoryPersonRepository::with_clock(clock.clone()));
//! let emails = Rc::new(RecordingEmailService::new());
//! let service = PersonService::new(repository, emails.clone()).with_clock(clock.clone());
//!
//! let parent = Person::with_clock(clock.clone());
//! parent.set_first_name("Maria").unwrap();
//! parent.set_birthday(NaiveDate::from_ymd_opt(1970, 3, 2).unwrap()).unwrap();
//! let parent = service.create_person(&parent).unwrap();
//!
//! let child = Person::with_clock(clock);
//! child.set_first_name("Joana").unwrap();
//! let child = service.create_person(&child).unwrap();
//!
//! service.add_family_member(parent.id().unwrap(), child.id().unwrap()).unwrap();
//!
//! assert!(child.is_family(&parent));
//! assert_eq!(emails.welcome_emails().len(), 2);
//! ```

pub mod person;
pub mod address;
pub mod cpf;
pub mod error;
pub mod config;
pub mod ports;
pub mod services;

pub use person::{Person, ADULT_AGE};
pub use address::{Address, AddressBuilder, DEFAULT_COUNTRY};
pub use error::{PersonError, PersonResult};
pub use config::ServiceConfig;
pub use ports::{EmailService, PersonRepository};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{FailingPersonRepository, InMemoryPersonRepository, RecordingEmailService, SentEmail};
pub use services::{PersonPatch, PersonService, PersonStatistics};
