//! Person domain services
//!
//! [`PersonService`] orchestrates the repository and email ports: it creates,
//! updates, and deletes people, links family members, greets people on their
//! birthday, and reports simple statistics.

use std::rc::Rc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, instrument};

use core_kernel::{system_clock, PersonId, SharedClock};

use crate::config::ServiceConfig;
use crate::error::{PersonError, PersonResult};
use crate::person::Person;
use crate::ports::{EmailService, PersonRepository};

/// Partial update applied by [`PersonService::update_person`]
///
/// Only the fields that are `Some` overwrite the stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl PersonPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// Returns true if applying the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.birthday.is_none()
    }
}

/// Snapshot of the stored population
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PersonStatistics {
    pub total_count: u64,
    pub adult_count: u64,
    /// Mean age in years, counting people without a birthday as 0
    pub average_age: f64,
}

/// Application service for people
pub struct PersonService {
    repository: Rc<dyn PersonRepository>,
    email_service: Rc<dyn EmailService>,
    clock: SharedClock,
    config: ServiceConfig,
}

impl PersonService {
    /// Creates a service with the system clock and default configuration
    pub fn new(repository: Rc<dyn PersonRepository>, email_service: Rc<dyn EmailService>) -> Self {
        Self {
            repository,
            email_service,
            clock: system_clock(),
            config: ServiceConfig::default(),
        }
    }

    /// Replaces the clock used for ages
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the configuration
    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Persists a new person and sends a welcome email
    ///
    /// # Errors
    ///
    /// Returns a validation error if the person has neither a first nor a
    /// last name, or a port error if the repository fails. No email is sent
    /// in either case.
    #[instrument(skip_all, fields(adapter = self.repository.adapter_name()))]
    pub fn create_person(&self, person: &Person) -> PersonResult<Person> {
        if !person.has_name() {
            return Err(PersonError::validation("Person must have at least one name"));
        }

        let saved = self.repository.save(person)?;

        let email = self.email_address(person);
        let name = person.name()?;
        self.email_service.send_welcome_email(&email, &name);

        info!(person_id = ?saved.id(), %email, "Person created");
        Ok(saved)
    }

    /// Loads a person by id
    #[instrument(skip(self), fields(person_id = %id), level = "debug")]
    pub fn find_person(&self, id: PersonId) -> PersonResult<Person> {
        self.repository
            .find_by_id(id)?
            .ok_or(PersonError::NotFound(id))
    }

    /// Applies a partial update and persists the result
    ///
    /// Fields are applied first name, last name, birthday. A setter
    /// rejecting its value stops the update; fields applied before it stay
    /// applied on the in-memory handle but are not persisted.
    #[instrument(skip(self, patch), fields(person_id = %id))]
    pub fn update_person(&self, id: PersonId, patch: PersonPatch) -> PersonResult<Person> {
        let existing = self.find_person(id)?;

        if let Some(first_name) = patch.first_name {
            existing.set_first_name(first_name)?;
        }
        if let Some(last_name) = patch.last_name {
            existing.set_last_name(last_name)?;
        }
        if let Some(birthday) = patch.birthday {
            existing.set_birthday(birthday)?;
        }

        let saved = self.repository.save(&existing)?;
        debug!("Person updated");
        Ok(saved)
    }

    /// Deletes a person by id
    #[instrument(skip(self), fields(person_id = %id))]
    pub fn delete_person(&self, id: PersonId) -> PersonResult<()> {
        if !self.repository.exists_by_id(id)? {
            return Err(PersonError::NotFound(id));
        }
        self.repository.delete_by_id(id)?;
        info!("Person deleted");
        Ok(())
    }

    /// Returns every stored person at or above the configured adult age
    pub fn find_adults(&self) -> PersonResult<Vec<Person>> {
        let today = self.clock.today();
        let adults: Vec<Person> = self
            .repository
            .find_all()?
            .into_iter()
            .filter(|person| self.is_adult_on(person, today))
            .collect();
        debug!(count = adults.len(), "Adults found");
        Ok(adults)
    }

    /// Sends a birthday greeting to everyone whose birthday is today
    ///
    /// Returns the number of people greeted.
    ///
    /// # Errors
    ///
    /// Fails if the repository fails, or if a celebrating person has no
    /// name; greetings already sent stay sent.
    #[instrument(skip(self))]
    pub fn send_birthday_greetings(&self) -> PersonResult<usize> {
        let today = self.clock.today();
        let celebrating = self.repository.find_birthday_today()?;

        for person in &celebrating {
            let email = self.email_address(person);
            let age = person.age_on(today).unwrap_or(0);
            self.email_service
                .send_birthday_greeting(&email, &person.name()?, age);
        }

        info!(greetings_sent = celebrating.len(), "Birthday greetings sent");
        Ok(celebrating.len())
    }

    /// Returns the family of a stored person
    #[instrument(skip(self), fields(person_id = %id), level = "debug")]
    pub fn find_family_members(&self, id: PersonId) -> PersonResult<Vec<Person>> {
        Ok(self.find_person(id)?.family())
    }

    /// Links two stored people as family and persists both
    ///
    /// # Errors
    ///
    /// Returns a validation error if both ids are the same, and `NotFound`
    /// if either person is missing.
    #[instrument(skip(self), fields(person_id = %id, family_member_id = %family_member_id))]
    pub fn add_family_member(&self, id: PersonId, family_member_id: PersonId) -> PersonResult<()> {
        if id == family_member_id {
            return Err(PersonError::validation("Cannot add self as family member"));
        }

        let person = self.find_person(id)?;
        let family_member = self.find_person(family_member_id)?;

        person.add_to_family(&family_member);

        self.repository.save(&person)?;
        self.repository.save(&family_member)?;
        info!("Family member added");
        Ok(())
    }

    /// Computes statistics over every stored person
    pub fn statistics(&self) -> PersonResult<PersonStatistics> {
        let today = self.clock.today();
        let people = self.repository.find_all()?;

        let total_count = people.len() as u64;
        let adult_count = people
            .iter()
            .filter(|person| self.is_adult_on(person, today))
            .count() as u64;
        let average_age = if people.is_empty() {
            0.0
        } else {
            let sum: i64 = people
                .iter()
                .map(|person| i64::from(person.age_on(today).unwrap_or(0)))
                .sum();
            sum as f64 / people.len() as f64
        };

        Ok(PersonStatistics {
            total_count,
            adult_count,
            average_age,
        })
    }

    /// Derives the contact address of a person
    ///
    /// `first.last@domain` in lower case, or the single name present.
    pub fn email_address(&self, person: &Person) -> String {
        let first = person.first_name().map(|n| n.to_lowercase()).unwrap_or_default();
        let last = person.last_name().map(|n| n.to_lowercase()).unwrap_or_default();

        let local_part = match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{first}.{last}"),
            (false, true) => first,
            _ => last,
        };
        format!("{local_part}@{}", self.config.email_domain)
    }

    fn is_adult_on(&self, person: &Person, today: NaiveDate) -> bool {
        person
            .age_on(today)
            .is_some_and(|age| age >= self.config.adult_age)
    }
}
