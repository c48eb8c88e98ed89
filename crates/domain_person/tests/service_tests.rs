//! Tests for PersonService against test doubles

use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDate;

use core_kernel::{DomainPort, PersonId, PortError};
use domain_person::ports::mock::{
    FailingPersonRepository, InMemoryPersonRepository, RecordingEmailService, SentEmail,
};
use domain_person::{Person, PersonError, PersonPatch, PersonRepository, PersonService};
use test_utils::{
    assert_approx_eq, assert_family_symmetric, assert_not_found, assert_validation_error,
    init_test_tracing, IdFixtures, StringFixtures, TemporalFixtures, TestPersonBuilder,
};

/// Repository spy that counts writes before delegating to the in-memory store
#[derive(Debug)]
struct CountingRepository {
    inner: InMemoryPersonRepository,
    saves: Cell<usize>,
    deletes: Cell<usize>,
}

impl CountingRepository {
    fn new() -> Self {
        Self {
            inner: InMemoryPersonRepository::with_clock(TemporalFixtures::clock()),
            saves: Cell::new(0),
            deletes: Cell::new(0),
        }
    }
}

impl DomainPort for CountingRepository {}

impl PersonRepository for CountingRepository {
    fn save(&self, person: &Person) -> Result<Person, PortError> {
        self.saves.set(self.saves.get() + 1);
        self.inner.save(person)
    }

    fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PortError> {
        self.inner.find_by_id(id)
    }

    fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Person>, PortError> {
        self.inner.find_by_last_name(last_name)
    }

    fn find_all(&self) -> Result<Vec<Person>, PortError> {
        self.inner.find_all()
    }

    fn delete_by_id(&self, id: PersonId) -> Result<bool, PortError> {
        self.deletes.set(self.deletes.get() + 1);
        self.inner.delete_by_id(id)
    }

    fn count(&self) -> Result<u64, PortError> {
        self.inner.count()
    }

    fn exists_by_id(&self, id: PersonId) -> Result<bool, PortError> {
        self.inner.exists_by_id(id)
    }

    fn find_birthday_today(&self) -> Result<Vec<Person>, PortError> {
        self.inner.find_birthday_today()
    }
}

struct Harness {
    service: PersonService,
    repository: Rc<CountingRepository>,
    emails: Rc<RecordingEmailService>,
}

fn harness() -> Harness {
    init_test_tracing();
    let repository = Rc::new(CountingRepository::new());
    let emails = Rc::new(RecordingEmailService::new());
    let service = PersonService::new(repository.clone(), emails.clone())
        .with_clock(TemporalFixtures::clock());
    Harness {
        service,
        repository,
        emails,
    }
}

fn stored(harness: &Harness, builder: TestPersonBuilder) -> Person {
    harness.repository.inner.save(&builder.build()).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Create
// ============================================================================

mod create_tests {
    use super::*;

    #[test]
    fn test_create_saves_and_welcomes() {
        let h = harness();
        let saved = h.service.create_person(&TestPersonBuilder::new().build()).unwrap();

        assert_eq!(saved.id(), Some(PersonId::new(1)));
        assert_eq!(h.repository.saves.get(), 1);
        assert_eq!(
            h.emails.welcome_emails(),
            vec![SentEmail::Welcome {
                to: StringFixtures::email().to_string(),
                name: StringFixtures::full_name().to_string(),
            }]
        );
    }

    #[test]
    fn test_create_returns_same_entity() {
        let h = harness();
        let person = TestPersonBuilder::new().build();
        let saved = h.service.create_person(&person).unwrap();
        assert!(saved.same_entity(&person));
    }

    #[test]
    fn test_create_without_names_rejected_before_saving() {
        let h = harness();
        let result = h.service.create_person(&TestPersonBuilder::empty().build());

        assert_validation_error(result, "Person must have at least one name");
        assert_eq!(h.repository.saves.get(), 0);
        assert_eq!(h.emails.count(), 0);
    }

    #[test]
    fn test_email_with_first_name_only() {
        let h = harness();
        let person = TestPersonBuilder::empty().with_first_name("John").build();
        h.service.create_person(&person).unwrap();

        assert_eq!(h.emails.sent()[0].to(), "john@example.com");
    }

    #[test]
    fn test_email_with_last_name_only_is_lowercased() {
        let h = harness();
        let person = TestPersonBuilder::empty().with_last_name("McDONALD").build();
        h.service.create_person(&person).unwrap();

        assert_eq!(h.emails.sent()[0].to(), "mcdonald@example.com");
    }

    #[test]
    fn test_repository_failure_sends_no_email() {
        let emails = Rc::new(RecordingEmailService::new());
        let service = PersonService::new(Rc::new(FailingPersonRepository::default()), emails.clone());

        let error = service.create_person(&TestPersonBuilder::new().build()).unwrap_err();

        assert!(matches!(error, PersonError::Port(PortError::Internal { .. })));
        assert_eq!(emails.count(), 0);
    }
}

// ============================================================================
// Find, Update, Delete
// ============================================================================

mod crud_tests {
    use super::*;

    #[test]
    fn test_find_existing() {
        let h = harness();
        let person = stored(&h, TestPersonBuilder::new());
        let found = h.service.find_person(person.id().unwrap()).unwrap();
        assert!(found.same_entity(&person));
    }

    #[test]
    fn test_find_missing() {
        let h = harness();
        let missing = IdFixtures::missing_person_id();
        let result = h.service.find_person(missing);
        assert_eq!(
            result.as_ref().unwrap_err().to_string(),
            "Person not found with id: 999"
        );
        assert_not_found(result, missing);
    }

    #[test]
    fn test_update_all_fields() {
        let h = harness();
        let id = stored(&h, TestPersonBuilder::new()).id().unwrap();

        let patch = PersonPatch::new()
            .first_name("Jane")
            .last_name("Smith")
            .birthday(date(1995, 5, 20));
        let updated = h.service.update_person(id, patch).unwrap();

        assert_eq!(updated.name().unwrap(), "Jane Smith");
        assert_eq!(updated.birthday(), Some(date(1995, 5, 20)));
        assert_eq!(h.repository.saves.get(), 1);
    }

    #[test]
    fn test_update_partial_keeps_other_fields() {
        let h = harness();
        let id = stored(&h, TestPersonBuilder::new()).id().unwrap();

        let updated = h.service.update_person(id, PersonPatch::new().first_name("Jane")).unwrap();

        assert_eq!(updated.first_name().as_deref(), Some("Jane"));
        assert_eq!(updated.last_name().as_deref(), Some("Doe"));
        assert_eq!(updated.birthday(), Some(TemporalFixtures::adult_birthday()));
    }

    #[test]
    fn test_empty_patch_still_saves() {
        let h = harness();
        let id = stored(&h, TestPersonBuilder::new()).id().unwrap();
        assert!(PersonPatch::new().is_empty());

        h.service.update_person(id, PersonPatch::new()).unwrap();
        assert_eq!(h.repository.saves.get(), 1);
    }

    #[test]
    fn test_update_validation_applies() {
        let h = harness();
        let id = stored(&h, TestPersonBuilder::new()).id().unwrap();

        let result = h
            .service
            .update_person(id, PersonPatch::new().birthday(TemporalFixtures::tomorrow()));

        assert_validation_error(result, "Birthday cannot be in the future");
        assert_eq!(h.repository.saves.get(), 0);
    }

    #[test]
    fn test_update_missing() {
        let h = harness();
        let missing = IdFixtures::missing_person_id();
        assert_not_found(h.service.update_person(missing, PersonPatch::new()), missing);
    }

    #[test]
    fn test_delete_existing() {
        let h = harness();
        let id = stored(&h, TestPersonBuilder::new()).id().unwrap();

        h.service.delete_person(id).unwrap();

        assert_eq!(h.repository.deletes.get(), 1);
        assert!(!h.repository.exists_by_id(id).unwrap());
    }

    #[test]
    fn test_delete_missing_never_calls_delete() {
        let h = harness();
        let missing = IdFixtures::missing_person_id();
        assert_not_found(h.service.delete_person(missing), missing);
        assert_eq!(h.repository.deletes.get(), 0);
    }
}

// ============================================================================
// Queries
// ============================================================================

mod query_tests {
    use super::*;

    #[test]
    fn test_find_adults_filters() {
        let h = harness();
        stored(&h, TestPersonBuilder::new().with_first_name("Adult").aged(30));
        stored(&h, TestPersonBuilder::new().with_first_name("Edge").aged(18));
        stored(&h, TestPersonBuilder::new().with_first_name("Teen").aged(17));
        stored(&h, TestPersonBuilder::new().with_first_name("Unknown").without_birthday());

        let names: Vec<String> = h
            .service
            .find_adults()
            .unwrap()
            .iter()
            .filter_map(Person::first_name)
            .collect();

        assert_eq!(names, vec!["Adult", "Edge"]);
    }

    #[test]
    fn test_statistics() {
        let h = harness();
        stored(&h, TestPersonBuilder::new().aged(25));
        stored(&h, TestPersonBuilder::new().aged(35));
        stored(&h, TestPersonBuilder::new().aged(16));
        stored(&h, TestPersonBuilder::new().aged(10));
        stored(&h, TestPersonBuilder::new().without_birthday());

        let stats = h.service.statistics().unwrap();

        assert_eq!(stats.total_count, 5);
        assert_eq!(stats.adult_count, 2);
        assert_approx_eq(stats.average_age, 17.2, 1e-9);
    }

    #[test]
    fn test_statistics_empty() {
        let h = harness();
        let stats = h.service.statistics().unwrap();
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.adult_count, 0);
        assert_approx_eq(stats.average_age, 0.0, 0.0);
    }

    #[test]
    fn test_statistics_serializes() {
        let h = harness();
        stored(&h, TestPersonBuilder::new().aged(20));
        let json = serde_json::to_value(h.service.statistics().unwrap()).unwrap();
        assert_eq!(json["total_count"], 1);
        assert_eq!(json["adult_count"], 1);
    }

    #[test]
    fn test_queries_propagate_port_errors() {
        let service = PersonService::new(
            Rc::new(FailingPersonRepository::new("offline")),
            Rc::new(RecordingEmailService::new()),
        );
        let id = IdFixtures::person_id();

        assert!(matches!(service.find_person(id), Err(PersonError::Port(_))));
        assert!(matches!(service.delete_person(id), Err(PersonError::Port(_))));
        assert!(matches!(service.find_adults(), Err(PersonError::Port(_))));
        assert!(matches!(service.statistics(), Err(PersonError::Port(_))));
        assert!(matches!(service.send_birthday_greetings(), Err(PersonError::Port(_))));
    }
}

// ============================================================================
// Birthday Greetings
// ============================================================================

mod greeting_tests {
    use super::*;

    #[test]
    fn test_greets_everyone_celebrating() {
        let h = harness();
        stored(&h, TestPersonBuilder::new().with_first_name("Alice").with_last_name("Smith").aged(25));
        stored(&h, TestPersonBuilder::new().with_first_name("Bob").with_last_name("Jones").aged(30));
        stored(&h, TestPersonBuilder::new().with_birthday(date(1990, 7, 4)));

        let sent = h.service.send_birthday_greetings().unwrap();

        assert_eq!(sent, 2);
        let greetings = h.emails.birthday_greetings();
        assert!(greetings.contains(&SentEmail::BirthdayGreeting {
            to: "alice.smith@example.com".to_string(),
            name: "Alice Smith".to_string(),
            age: 25,
        }));
        assert!(greetings.contains(&SentEmail::BirthdayGreeting {
            to: "bob.jones@example.com".to_string(),
            name: "Bob Jones".to_string(),
            age: 30,
        }));
    }

    #[test]
    fn test_no_birthdays_sends_nothing() {
        let h = harness();
        stored(&h, TestPersonBuilder::new().with_birthday(date(1990, 7, 4)));

        assert_eq!(h.service.send_birthday_greetings().unwrap(), 0);
        assert_eq!(h.emails.count(), 0);
    }
}

// ============================================================================
// Family
// ============================================================================

mod family_tests {
    use super::*;

    #[test]
    fn test_add_family_member_links_and_saves_both() {
        let h = harness();
        let a = stored(&h, TestPersonBuilder::new().with_first_name("A"));
        let b = stored(&h, TestPersonBuilder::new().with_first_name("B"));

        h.service.add_family_member(a.id().unwrap(), b.id().unwrap()).unwrap();

        assert_family_symmetric(&a, &b);
        assert_eq!(h.repository.saves.get(), 2);
    }

    #[test]
    fn test_add_self_rejected_without_lookup() {
        let h = harness();
        let id = IdFixtures::missing_person_id();
        assert_validation_error(
            h.service.add_family_member(id, id),
            "Cannot add self as family member",
        );
    }

    #[test]
    fn test_add_with_missing_member() {
        let h = harness();
        let a = stored(&h, TestPersonBuilder::new());
        let missing = IdFixtures::missing_person_id();

        assert_not_found(h.service.add_family_member(a.id().unwrap(), missing), missing);
        assert!(a.family().is_empty());
        assert_eq!(h.repository.saves.get(), 0);
    }

    #[test]
    fn test_find_family_members() {
        let h = harness();
        let parent = stored(&h, TestPersonBuilder::new().with_first_name("Parent"));
        let child = stored(&h, TestPersonBuilder::new().with_first_name("Child"));
        parent.add_to_family(&child);

        let family = h.service.find_family_members(parent.id().unwrap()).unwrap();

        assert_eq!(family.len(), 1);
        assert!(family[0].same_entity(&child));
    }

    #[test]
    fn test_find_family_of_missing_person() {
        let h = harness();
        let missing = IdFixtures::missing_person_id();
        assert_not_found(h.service.find_family_members(missing), missing);
    }
}
