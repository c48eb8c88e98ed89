//! Ports for the Person domain
//!
//! [`PersonService`](crate::services::PersonService) reaches storage and mail
//! delivery only through the traits in this module. Real adapters live with
//! the embedding application; the `mock` module ships in-memory doubles for
//! tests and local experiments.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use domain_person::ports::{EmailService, PersonRepository};
//! use domain_person::services::PersonService;
//!
//! let service = PersonService::new(
//!     Rc::new(MyRepository::connect(&settings)?),
//!     Rc::new(MySmtpMailer::new(&settings)),
//! );
//! ```
//!
//! # Semantics
//!
//! - `save` assigns an id when the person has none and stores the handle;
//!   the returned handle is the stored one.
//! - Lookups return `Ok(None)` or an empty vector when nothing matches.
//!   `Err` is reserved for adapter failures.
//! - Email delivery is fire-and-forget: senders report nothing back and a
//!   failed delivery never aborts the operation that triggered it.

use core_kernel::{DomainPort, PersonId, PortError};

use crate::person::Person;

/// Storage port for people
pub trait PersonRepository: DomainPort {
    /// Stores the person, assigning an id if it has none
    fn save(&self, person: &Person) -> Result<Person, PortError>;

    /// Finds a person by id
    fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PortError>;

    /// Finds every person whose last name matches exactly
    fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Person>, PortError>;

    /// Returns every stored person
    fn find_all(&self) -> Result<Vec<Person>, PortError>;

    /// Removes a person, returning true if one was stored under `id`
    fn delete_by_id(&self, id: PersonId) -> Result<bool, PortError>;

    /// Number of stored people
    fn count(&self) -> Result<u64, PortError>;

    /// Returns true if a person is stored under `id`
    fn exists_by_id(&self, id: PersonId) -> Result<bool, PortError>;

    /// Returns every stored person whose birthday falls on the adapter's today
    fn find_birthday_today(&self) -> Result<Vec<Person>, PortError>;
}

/// Outbound mail port
pub trait EmailService: DomainPort {
    fn send_welcome_email(&self, email: &str, name: &str);

    fn send_birthday_greeting(&self, email: &str, name: &str, age: i32);

    fn send_notification(&self, email: &str, subject: &str, body: &str);
}

// ============================================================================
// Mock Implementation (for testing)
// ============================================================================

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeMap;

    use core_kernel::{system_clock, SharedClock};

    /// In-memory repository keyed by id
    ///
    /// Ids are assigned sequentially starting at 1. Stored values are the
    /// caller's handles, so changes made after `save` are visible on lookup.
    #[derive(Debug)]
    pub struct InMemoryPersonRepository {
        people: RefCell<BTreeMap<PersonId, Person>>,
        next_id: Cell<PersonId>,
        clock: SharedClock,
    }

    impl InMemoryPersonRepository {
        /// Creates an empty repository that uses the system clock for birthdays
        pub fn new() -> Self {
            Self::with_clock(system_clock())
        }

        /// Creates an empty repository that uses `clock` for birthdays
        pub fn with_clock(clock: SharedClock) -> Self {
            Self {
                people: RefCell::new(BTreeMap::new()),
                next_id: Cell::new(PersonId::new(1)),
                clock,
            }
        }

        /// Pre-populates with people for testing
        pub fn with_people(clock: SharedClock, people: impl IntoIterator<Item = Person>) -> Self {
            let repository = Self::with_clock(clock);
            for person in people {
                repository.store(&person);
            }
            repository
        }

        fn store(&self, person: &Person) -> PersonId {
            let id = match person.id() {
                Some(id) => {
                    if id >= self.next_id.get() {
                        self.next_id.set(id.next());
                    }
                    id
                }
                None => {
                    let id = self.assign_id();
                    person.set_id(id);
                    id
                }
            };
            self.people.borrow_mut().insert(id, person.clone());
            id
        }

        fn assign_id(&self) -> PersonId {
            let id = self.next_id.get();
            self.next_id.set(id.next());
            id
        }
    }

    impl Default for InMemoryPersonRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl DomainPort for InMemoryPersonRepository {}

    impl PersonRepository for InMemoryPersonRepository {
        fn save(&self, person: &Person) -> Result<Person, PortError> {
            self.store(person);
            Ok(person.clone())
        }

        fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PortError> {
            Ok(self.people.borrow().get(&id).cloned())
        }

        fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Person>, PortError> {
            Ok(self
                .people
                .borrow()
                .values()
                .filter(|p| p.last_name().as_deref() == Some(last_name))
                .cloned()
                .collect())
        }

        fn find_all(&self) -> Result<Vec<Person>, PortError> {
            Ok(self.people.borrow().values().cloned().collect())
        }

        fn delete_by_id(&self, id: PersonId) -> Result<bool, PortError> {
            Ok(self.people.borrow_mut().remove(&id).is_some())
        }

        fn count(&self) -> Result<u64, PortError> {
            Ok(self.people.borrow().len() as u64)
        }

        fn exists_by_id(&self, id: PersonId) -> Result<bool, PortError> {
            Ok(self.people.borrow().contains_key(&id))
        }

        fn find_birthday_today(&self) -> Result<Vec<Person>, PortError> {
            let today = self.clock.today();
            Ok(self
                .people
                .borrow()
                .values()
                .filter(|p| p.is_birthday_on(today))
                .cloned()
                .collect())
        }
    }

    /// Repository whose every call fails, for error-path tests
    #[derive(Debug, Clone)]
    pub struct FailingPersonRepository {
        message: String,
    }

    impl FailingPersonRepository {
        pub fn new(message: impl Into<String>) -> Self {
            Self { message: message.into() }
        }

        fn fail<T>(&self) -> Result<T, PortError> {
            Err(PortError::internal(self.message.clone()))
        }
    }

    impl Default for FailingPersonRepository {
        fn default() -> Self {
            Self::new("storage unavailable")
        }
    }

    impl DomainPort for FailingPersonRepository {}

    impl PersonRepository for FailingPersonRepository {
        fn save(&self, _person: &Person) -> Result<Person, PortError> {
            self.fail()
        }

        fn find_by_id(&self, _id: PersonId) -> Result<Option<Person>, PortError> {
            self.fail()
        }

        fn find_by_last_name(&self, _last_name: &str) -> Result<Vec<Person>, PortError> {
            self.fail()
        }

        fn find_all(&self) -> Result<Vec<Person>, PortError> {
            self.fail()
        }

        fn delete_by_id(&self, _id: PersonId) -> Result<bool, PortError> {
            self.fail()
        }

        fn count(&self) -> Result<u64, PortError> {
            self.fail()
        }

        fn exists_by_id(&self, _id: PersonId) -> Result<bool, PortError> {
            self.fail()
        }

        fn find_birthday_today(&self) -> Result<Vec<Person>, PortError> {
            self.fail()
        }
    }

    /// A message captured by [`RecordingEmailService`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SentEmail {
        Welcome {
            to: String,
            name: String,
        },
        BirthdayGreeting {
            to: String,
            name: String,
            age: i32,
        },
        Notification {
            to: String,
            subject: String,
            body: String,
        },
    }

    impl SentEmail {
        /// Recipient address
        pub fn to(&self) -> &str {
            match self {
                SentEmail::Welcome { to, .. }
                | SentEmail::BirthdayGreeting { to, .. }
                | SentEmail::Notification { to, .. } => to,
            }
        }
    }

    /// Email sender that records every message instead of delivering it
    #[derive(Debug, Default)]
    pub struct RecordingEmailService {
        sent: RefCell<Vec<SentEmail>>,
    }

    impl RecordingEmailService {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every message in send order
        pub fn sent(&self) -> Vec<SentEmail> {
            self.sent.borrow().clone()
        }

        pub fn count(&self) -> usize {
            self.sent.borrow().len()
        }

        pub fn welcome_emails(&self) -> Vec<SentEmail> {
            self.filtered(|e| matches!(e, SentEmail::Welcome { .. }))
        }

        pub fn birthday_greetings(&self) -> Vec<SentEmail> {
            self.filtered(|e| matches!(e, SentEmail::BirthdayGreeting { .. }))
        }

        pub fn notifications(&self) -> Vec<SentEmail> {
            self.filtered(|e| matches!(e, SentEmail::Notification { .. }))
        }

        /// Forgets every recorded message
        pub fn clear(&self) {
            self.sent.borrow_mut().clear();
        }

        fn filtered(&self, keep: impl Fn(&SentEmail) -> bool) -> Vec<SentEmail> {
            self.sent.borrow().iter().filter(|e| keep(e)).cloned().collect()
        }

        fn record(&self, email: SentEmail) {
            self.sent.borrow_mut().push(email);
        }
    }

    impl DomainPort for RecordingEmailService {}

    impl EmailService for RecordingEmailService {
        fn send_welcome_email(&self, email: &str, name: &str) {
            self.record(SentEmail::Welcome {
                to: email.to_string(),
                name: name.to_string(),
            });
        }

        fn send_birthday_greeting(&self, email: &str, name: &str, age: i32) {
            self.record(SentEmail::BirthdayGreeting {
                to: email.to_string(),
                name: name.to_string(),
                age,
            });
        }

        fn send_notification(&self, email: &str, subject: &str, body: &str) {
            self.record(SentEmail::Notification {
                to: email.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        }
    }
}
