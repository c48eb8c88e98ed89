//! Person entity and family relationships
//!
//! A [`Person`] is a handle to a single entity. Cloning the handle does not
//! copy the person: every clone observes the same names, birthday, and
//! family. This is what lets two people point at each other in the family
//! graph while both remain independently usable by their owners.
//!
//! # Family graph
//!
//! Family membership is direct and symmetric. Adding B to A's family also
//! adds A to B's family, and the relation never becomes transitive: if A is
//! family of B and B of C, A and C are unrelated until linked explicitly.
//! Entries are compared by identity, never by field equality, so two
//! different people with the same name are two different relatives.
//!
//! Family entries keep their members alive: a relative stays listed even
//! after every other owner has dropped it. Linked people form a reference
//! cycle, so call [`Person::clear_family`] to release a person's links when
//! the graph is no longer needed.
//!
//! # Time
//!
//! Future-birthday validation, ages, and birthday checks read "today" from
//! the person's [`Clock`](core_kernel::Clock). [`Person::new`] uses the
//! system clock; tests freeze time with [`Person::with_clock`].
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::FixedClock;
//! use domain_person::person::Person;
//!
//! let clock = FixedClock::from_ymd(2024, 1, 15).unwrap().shared();
//!
//! let john = Person::with_clock(clock.clone());
//! john.set_first_name("John").unwrap();
//! john.set_last_name("Doe").unwrap();
//! john.set_birthday(NaiveDate::from_ymd_opt(2000, 1, 15).unwrap()).unwrap();
//!
//! assert_eq!(john.name().unwrap(), "John Doe");
//! assert_eq!(john.age(), Some(24));
//! assert!(john.is_adult());
//!
//! let jane = Person::with_clock(clock);
//! john.add_to_family(&jane);
//! assert!(jane.is_family(&john));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::rc::Rc;

use chrono::{Datelike, NaiveDate};

use core_kernel::{days_between, system_clock, CalendarPeriod, PersonId, SharedClock};

use crate::address::Address;
use crate::cpf;
use crate::error::{PersonError, PersonResult};

/// Minimum age, in whole years, of an adult
pub const ADULT_AGE: i32 = 18;

struct PersonState {
    id: Option<PersonId>,
    first_name: Option<String>,
    last_name: Option<String>,
    birthday: Option<NaiveDate>,
    address: Option<Address>,
    cpf: Option<String>,
    family: Vec<Rc<RefCell<PersonState>>>,
    clock: SharedClock,
}

impl PersonState {
    fn lists(&self, other: &Rc<RefCell<PersonState>>) -> bool {
        let target = Rc::as_ptr(other);
        self.family.iter().any(|member| Rc::as_ptr(member) == target)
    }

    fn unlist(&mut self, other: &Rc<RefCell<PersonState>>) {
        self.family.retain(|member| !Rc::ptr_eq(member, other));
    }
}

/// Handle to a person entity
#[derive(Clone)]
pub struct Person {
    inner: Rc<RefCell<PersonState>>,
}

impl Person {
    /// Creates an empty person that reads dates from the system clock
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    /// Creates an empty person that reads dates from `clock`
    pub fn with_clock(clock: SharedClock) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PersonState {
                id: None,
                first_name: None,
                last_name: None,
                birthday: None,
                address: None,
                cpf: None,
                family: Vec::new(),
                clock,
            })),
        }
    }

    /// Returns the clock this person reads "today" from
    pub fn clock(&self) -> SharedClock {
        self.inner.borrow().clock.clone()
    }

    fn today(&self) -> NaiveDate {
        self.inner.borrow().clock.today()
    }

    /// Returns true if both handles refer to the same entity
    pub fn same_entity(&self, other: &Person) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ------------------------------------------------------------------
    // Identity and personal data
    // ------------------------------------------------------------------

    pub fn id(&self) -> Option<PersonId> {
        self.inner.borrow().id
    }

    /// Sets or clears the identifier
    pub fn set_id(&self, id: impl Into<Option<PersonId>>) {
        self.inner.borrow_mut().id = id.into();
    }

    pub fn first_name(&self) -> Option<String> {
        self.inner.borrow().first_name.clone()
    }

    /// Sets the first name
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty or whitespace only.
    pub fn set_first_name(&self, first_name: impl Into<String>) -> PersonResult<()> {
        let first_name = first_name.into();
        if first_name.trim().is_empty() {
            return Err(PersonError::validation("First name cannot be null or empty"));
        }
        self.inner.borrow_mut().first_name = Some(first_name);
        Ok(())
    }

    pub fn last_name(&self) -> Option<String> {
        self.inner.borrow().last_name.clone()
    }

    /// Sets the last name
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty or whitespace only.
    pub fn set_last_name(&self, last_name: impl Into<String>) -> PersonResult<()> {
        let last_name = last_name.into();
        if last_name.trim().is_empty() {
            return Err(PersonError::validation("Last name cannot be null or empty"));
        }
        self.inner.borrow_mut().last_name = Some(last_name);
        Ok(())
    }

    /// Returns the display name
    ///
    /// Both names joined by a space when both are set, otherwise whichever
    /// one is set.
    ///
    /// # Errors
    ///
    /// Returns an invalid-state error when neither name is set.
    pub fn name(&self) -> PersonResult<String> {
        let state = self.inner.borrow();
        match (&state.first_name, &state.last_name) {
            (Some(first), Some(last)) => Ok(format!("{first} {last}")),
            (Some(first), None) => Ok(first.clone()),
            (None, Some(last)) => Ok(last.clone()),
            (None, None) => Err(PersonError::invalid_state("Name must be filled")),
        }
    }

    /// Returns true if at least one name is set
    pub fn has_name(&self) -> bool {
        let state = self.inner.borrow();
        state.first_name.is_some() || state.last_name.is_some()
    }

    pub fn birthday(&self) -> Option<NaiveDate> {
        self.inner.borrow().birthday
    }

    /// Sets the birthday
    ///
    /// # Errors
    ///
    /// Returns a validation error if the date is after today.
    pub fn set_birthday(&self, birthday: NaiveDate) -> PersonResult<()> {
        if birthday > self.today() {
            return Err(PersonError::validation("Birthday cannot be in the future"));
        }
        self.inner.borrow_mut().birthday = Some(birthday);
        Ok(())
    }

    pub fn address(&self) -> Option<Address> {
        self.inner.borrow().address.clone()
    }

    /// Sets or clears the postal address
    pub fn set_address(&self, address: impl Into<Option<Address>>) {
        self.inner.borrow_mut().address = address.into();
    }

    /// Returns the CPF in `XXX.XXX.XXX-XX` form, if set
    pub fn cpf(&self) -> Option<String> {
        self.inner.borrow().cpf.clone()
    }

    /// Sets or clears the CPF
    ///
    /// Formatted and bare input are both accepted; the stored value is
    /// always formatted. `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the CPF fails the checksum.
    pub fn set_cpf<'a>(&self, value: impl Into<Option<&'a str>>) -> PersonResult<()> {
        let normalized = match value.into() {
            None => None,
            Some(raw) if cpf::is_valid(raw) => cpf::format(raw),
            Some(raw) => return Err(PersonError::validation(format!("Invalid CPF: {raw}"))),
        };
        self.inner.borrow_mut().cpf = normalized;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Age
    // ------------------------------------------------------------------

    /// Age in whole years as of today, `None` without a birthday
    pub fn age(&self) -> Option<i32> {
        self.age_on(self.today())
    }

    /// Age in whole years as of `date`
    pub fn age_on(&self, date: NaiveDate) -> Option<i32> {
        self.birthday()
            .map(|birthday| CalendarPeriod::between(birthday, date).years)
    }

    /// Age in whole months as of today
    ///
    /// Someone aged 2 years and 3 months is 27 months old.
    pub fn age_in_months(&self) -> Option<i32> {
        self.age_in_months_on(self.today())
    }

    /// Age in whole months as of `date`
    pub fn age_in_months_on(&self, date: NaiveDate) -> Option<i32> {
        self.birthday()
            .map(|birthday| CalendarPeriod::between(birthday, date).total_months())
    }

    /// Age in days as of today
    pub fn age_in_days(&self) -> Option<i64> {
        self.age_in_days_on(self.today())
    }

    /// Age in days as of `date`
    pub fn age_in_days_on(&self, date: NaiveDate) -> Option<i64> {
        self.birthday().map(|birthday| days_between(birthday, date))
    }

    /// Returns true if the person is at least [`ADULT_AGE`] years old
    pub fn is_adult(&self) -> bool {
        self.age().is_some_and(|age| age >= ADULT_AGE)
    }

    /// Returns true if month and day of the birthday match today
    pub fn is_birthday_today(&self) -> bool {
        self.is_birthday_on(self.today())
    }

    /// Returns true if month and day of the birthday match `date`
    pub fn is_birthday_on(&self, date: NaiveDate) -> bool {
        self.birthday()
            .is_some_and(|birthday| birthday.month() == date.month() && birthday.day() == date.day())
    }

    // ------------------------------------------------------------------
    // Family
    // ------------------------------------------------------------------

    /// Links `other` as family of this person, in both directions
    ///
    /// Adding oneself or someone already present is a no-op, so the call is
    /// idempotent and never produces duplicates.
    pub fn add_to_family(&self, other: &Person) {
        if self.same_entity(other) || self.inner.borrow().lists(&other.inner) {
            return;
        }

        {
            let mut state = self.inner.borrow_mut();
            state.family.push(Rc::clone(&other.inner));
        }

        let mut counterpart = other.inner.borrow_mut();
        if !counterpart.lists(&self.inner) {
            counterpart.family.push(Rc::clone(&self.inner));
        }
    }

    /// Returns true if `other` is a direct family member
    pub fn is_family(&self, other: &Person) -> bool {
        self.inner.borrow().lists(&other.inner)
    }

    /// Returns the current family members
    ///
    /// The vector is freshly built on every call; changing it has no effect
    /// on the person.
    pub fn family(&self) -> Vec<Person> {
        self.inner
            .borrow()
            .family
            .iter()
            .map(|inner| Person {
                inner: Rc::clone(inner),
            })
            .collect()
    }

    /// Unlinks every family member, in both directions
    ///
    /// Returns how many relatives were removed. Afterwards neither this
    /// person nor its former relatives list each other.
    pub fn clear_family(&self) -> usize {
        let members = mem::take(&mut self.inner.borrow_mut().family);
        for member in &members {
            member.borrow_mut().unlist(&self.inner);
        }
        members.len()
    }

    /// Returns true if both people have an address in the same city and state
    pub fn lives_in_same_city(&self, other: &Person) -> bool {
        match (self.address(), other.address()) {
            (Some(mine), Some(theirs)) => mine.is_same_city(&theirs),
            _ => false,
        }
    }
}

impl Default for Person {
    fn default() -> Self {
        Self::new()
    }
}

/// Field equality over id, names, and birthday
///
/// Address, CPF, family, and clock do not participate.
impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        if self.same_entity(other) {
            return true;
        }
        let (a, b) = (self.inner.borrow(), other.inner.borrow());
        a.id == b.id
            && a.first_name == b.first_name
            && a.last_name == b.last_name
            && a.birthday == b.birthday
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let inner = self.inner.borrow();
        inner.id.hash(state);
        inner.first_name.hash(state);
        inner.last_name.hash(state);
        inner.birthday.hash(state);
    }
}

impl fmt::Debug for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Person")
            .field("id", &state.id)
            .field("first_name", &state.first_name)
            .field("last_name", &state.last_name)
            .field("birthday", &state.birthday)
            .field("cpf", &state.cpf)
            .field("address", &state.address)
            .field("family_size", &state.family.len())
            .finish()
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name().unwrap_or_else(|_| "No Name".to_string());
        let id = self.id().map_or_else(|| "none".to_string(), |id| id.to_string());
        let age = self.age().map_or_else(|| "none".to_string(), |age| age.to_string());
        let birthday = self
            .birthday()
            .map_or_else(|| "none".to_string(), |birthday| birthday.to_string());
        write!(f, "Person{{id={id}, name='{name}', age={age}, birthday={birthday}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::FixedClock;

    fn clock() -> SharedClock {
        FixedClock::from_ymd(2024, 1, 15).unwrap().shared()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_person_is_empty() {
        let person = Person::with_clock(clock());
        assert_eq!(person.id(), None);
        assert_eq!(person.first_name(), None);
        assert_eq!(person.age(), None);
        assert!(person.family().is_empty());
        assert!(!person.has_name());
    }

    #[test]
    fn test_clones_share_the_entity() {
        let person = Person::with_clock(clock());
        let handle = person.clone();
        handle.set_first_name("Ana").unwrap();

        assert_eq!(person.first_name().as_deref(), Some("Ana"));
        assert!(person.same_entity(&handle));
    }

    #[test]
    fn test_blank_names_rejected() {
        let person = Person::with_clock(clock());
        assert!(person.set_first_name("  ").unwrap_err().is_validation());
        assert!(person.set_last_name("").unwrap_err().is_validation());
        assert_eq!(person.first_name(), None);
    }

    #[test]
    fn test_name_combinations() {
        let person = Person::with_clock(clock());
        assert!(matches!(person.name(), Err(PersonError::InvalidState(_))));

        person.set_last_name("Snow").unwrap();
        assert_eq!(person.name().unwrap(), "Snow");

        person.set_first_name("Jon").unwrap();
        assert_eq!(person.name().unwrap(), "Jon Snow");
    }

    #[test]
    fn test_birthday_today_is_allowed_tomorrow_is_not() {
        let person = Person::with_clock(clock());
        assert!(person.set_birthday(date(2024, 1, 15)).is_ok());

        let error = person.set_birthday(date(2024, 1, 16)).unwrap_err();
        assert_eq!(error.to_string(), "Birthday cannot be in the future");
        assert_eq!(person.birthday(), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_age_in_all_units() {
        let person = Person::with_clock(clock());
        person.set_birthday(date(2000, 1, 15)).unwrap();

        assert_eq!(person.age(), Some(24));
        assert_eq!(person.age_in_months(), Some(288));
        assert_eq!(person.age_in_days(), Some(8766));
    }

    #[test]
    fn test_adult_threshold() {
        let person = Person::with_clock(clock());
        assert!(!person.is_adult());

        person.set_birthday(date(2006, 1, 15)).unwrap();
        assert!(person.is_adult());

        person.set_birthday(date(2006, 1, 16)).unwrap();
        assert!(!person.is_adult());
    }

    #[test]
    fn test_birthday_ignores_year() {
        let person = Person::with_clock(clock());
        assert!(!person.is_birthday_today());

        person.set_birthday(date(1990, 1, 15)).unwrap();
        assert!(person.is_birthday_today());

        person.set_birthday(date(1990, 1, 14)).unwrap();
        assert!(!person.is_birthday_today());
    }

    #[test]
    fn test_cpf_is_normalized_and_clearable() {
        let person = Person::with_clock(clock());
        person.set_cpf("12345678909").unwrap();
        assert_eq!(person.cpf().as_deref(), Some("123.456.789-09"));

        let error = person.set_cpf("111.111.111-11").unwrap_err();
        assert_eq!(error.to_string(), "Invalid CPF: 111.111.111-11");
        assert_eq!(person.cpf().as_deref(), Some("123.456.789-09"));

        person.set_cpf(None).unwrap();
        assert_eq!(person.cpf(), None);
    }

    #[test]
    fn test_family_is_symmetric_and_deduplicated() {
        let a = Person::with_clock(clock());
        let b = Person::with_clock(clock());

        a.add_to_family(&b);
        a.add_to_family(&b);
        b.add_to_family(&a);

        assert_eq!(a.family().len(), 1);
        assert_eq!(b.family().len(), 1);
        assert!(a.is_family(&b));
        assert!(b.is_family(&a));
    }

    #[test]
    fn test_family_rejects_self() {
        let a = Person::with_clock(clock());
        a.add_to_family(&a);
        a.add_to_family(&a.clone());
        assert!(a.family().is_empty());
        assert!(!a.is_family(&a));
    }

    #[test]
    fn test_family_uses_identity_not_field_equality() {
        let a = Person::with_clock(clock());
        let twin_one = Person::with_clock(clock());
        let twin_two = Person::with_clock(clock());
        assert_eq!(twin_one, twin_two);

        a.add_to_family(&twin_one);
        a.add_to_family(&twin_two);

        assert_eq!(a.family().len(), 2);
    }

    #[test]
    fn test_family_keeps_dropped_relative() {
        let a = Person::with_clock(clock());
        {
            let b = Person::with_clock(clock());
            b.set_first_name("Jane").unwrap();
            a.add_to_family(&b);
        }
        let family = a.family();
        assert_eq!(family.len(), 1);
        assert_eq!(family[0].first_name().as_deref(), Some("Jane"));
        assert!(family[0].is_family(&a));
    }

    #[test]
    fn test_clear_family_unlinks_both_sides() {
        let a = Person::with_clock(clock());
        let b = Person::with_clock(clock());
        let c = Person::with_clock(clock());
        a.add_to_family(&b);
        a.add_to_family(&c);
        b.add_to_family(&c);

        assert_eq!(a.clear_family(), 2);

        assert!(a.family().is_empty());
        assert!(!b.is_family(&a));
        assert!(!c.is_family(&a));
        assert!(b.is_family(&c));
        assert_eq!(a.clear_family(), 0);
    }

    #[test]
    fn test_clear_family_releases_cycle() {
        let a = Person::with_clock(clock());
        let b = Person::with_clock(clock());
        a.add_to_family(&b);
        assert_eq!(Rc::strong_count(&b.inner), 2);

        a.clear_family();

        assert_eq!(Rc::strong_count(&a.inner), 1);
        assert_eq!(Rc::strong_count(&b.inner), 1);
    }

    #[test]
    fn test_display_without_name() {
        let person = Person::with_clock(clock());
        assert_eq!(
            person.to_string(),
            "Person{id=none, name='No Name', age=none, birthday=none}"
        );
    }

    #[test]
    fn test_display_with_data() {
        let person = Person::with_clock(clock());
        person.set_id(PersonId::new(7));
        person.set_first_name("Ana").unwrap();
        person.set_birthday(date(2000, 1, 15)).unwrap();
        assert_eq!(
            person.to_string(),
            "Person{id=7, name='Ana', age=24, birthday=2000-01-15}"
        );
    }
}
