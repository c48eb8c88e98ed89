//! Test Data Builders
//!
//! Builder patterns for constructing people and addresses with sensible
//! defaults. Tests specify only the fields they care about; everything else
//! comes from the fixtures. Every built person reads dates from the frozen
//! clock in [`TemporalFixtures`] unless told otherwise.

use chrono::{Datelike, NaiveDate};
use fake::faker::address::en::{CityName, StateAbbr, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

use core_kernel::{PersonId, SharedClock};
use domain_person::{cpf, Address, Person};

use crate::fixtures::{StringFixtures, TemporalFixtures};

/// Builder for constructing test people
///
/// Unlike the entity's own setters, the builder panics on invalid input:
/// a test that feeds it bad data is itself broken.
#[derive(Clone)]
pub struct TestPersonBuilder {
    id: Option<PersonId>,
    first_name: Option<String>,
    last_name: Option<String>,
    birthday: Option<NaiveDate>,
    address: Option<Address>,
    cpf: Option<String>,
    clock: SharedClock,
}

impl Default for TestPersonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPersonBuilder {
    /// Creates a builder for "John Doe", born 2000-01-15
    pub fn new() -> Self {
        Self {
            id: None,
            first_name: Some(StringFixtures::first_name().to_string()),
            last_name: Some(StringFixtures::last_name().to_string()),
            birthday: Some(TemporalFixtures::adult_birthday()),
            address: None,
            cpf: None,
            clock: TemporalFixtures::clock(),
        }
    }

    /// Creates a builder with nothing set
    pub fn empty() -> Self {
        Self {
            id: None,
            first_name: None,
            last_name: None,
            birthday: None,
            address: None,
            cpf: None,
            clock: TemporalFixtures::clock(),
        }
    }

    /// Creates a builder with fake names, a random adult birthday, and a random CPF
    pub fn random() -> Self {
        let years_back: i64 = (19i64..80).fake();
        let extra_days: i64 = (0i64..365).fake();
        let birthday = TemporalFixtures::today()
            - chrono::Duration::days(years_back * 365 + extra_days);

        Self::empty()
            .with_first_name(FirstName().fake::<String>())
            .with_last_name(LastName().fake::<String>())
            .with_birthday(birthday)
            .with_cpf(cpf::generate_random())
    }

    /// Sets the id
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(PersonId::new(id));
        self
    }

    /// Sets the first name
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Clears the first name
    pub fn without_first_name(mut self) -> Self {
        self.first_name = None;
        self
    }

    /// Sets the last name
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Clears the last name
    pub fn without_last_name(mut self) -> Self {
        self.last_name = None;
        self
    }

    /// Sets the birthday
    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// Clears the birthday
    pub fn without_birthday(mut self) -> Self {
        self.birthday = None;
        self
    }

    /// Sets the birthday so the person is exactly `years` old today
    pub fn aged(mut self, years: i32) -> Self {
        let today = TemporalFixtures::today();
        self.birthday = today.with_year(today.year() - years);
        self
    }

    /// Sets the address
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Sets the CPF (validated on build)
    pub fn with_cpf(mut self, cpf: impl Into<String>) -> Self {
        self.cpf = Some(cpf.into());
        self
    }

    /// Sets the clock the person reads "today" from
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the person
    ///
    /// # Panics
    ///
    /// Panics if a field is rejected by the entity's validation.
    pub fn build(self) -> Person {
        let person = Person::with_clock(self.clock);
        person.set_id(self.id);
        if let Some(first_name) = self.first_name {
            person.set_first_name(first_name).expect("valid first name");
        }
        if let Some(last_name) = self.last_name {
            person.set_last_name(last_name).expect("valid last name");
        }
        if let Some(birthday) = self.birthday {
            person.set_birthday(birthday).expect("birthday not in the future");
        }
        if let Some(cpf) = self.cpf.as_deref() {
            person.set_cpf(cpf).expect("valid CPF");
        }
        person.set_address(self.address);
        person
    }
}

/// Builder for constructing test addresses
///
/// Starts from a complete address in Recife, so each field can be
/// overridden or blanked independently.
#[derive(Debug, Clone)]
pub struct TestAddressBuilder {
    street: String,
    number: String,
    complement: Option<String>,
    neighborhood: Option<String>,
    city: String,
    state: String,
    zip_code: String,
    country: Option<String>,
}

impl Default for TestAddressBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAddressBuilder {
    pub fn new() -> Self {
        Self {
            street: "Rua da Aurora".to_string(),
            number: "100".to_string(),
            complement: None,
            neighborhood: None,
            city: "Recife".to_string(),
            state: "PE".to_string(),
            zip_code: "50050-000".to_string(),
            country: None,
        }
    }

    /// Creates a builder with fake street, city, and state
    pub fn random() -> Self {
        let zip: u32 = (10_000u32..100_000).fake();
        Self::new()
            .with_street(StreetName().fake::<String>())
            .with_number((1..9999u32).fake::<u32>().to_string())
            .with_city(CityName().fake::<String>())
            .with_state(StateAbbr().fake::<String>())
            .with_zip_code(zip.to_string())
    }

    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = street.into();
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    pub fn with_complement(mut self, complement: impl Into<String>) -> Self {
        self.complement = Some(complement.into());
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhood = Some(neighborhood.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn with_zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.zip_code = zip_code.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Converts into the domain builder without validating
    pub fn into_domain(self) -> domain_person::AddressBuilder {
        let mut builder = Address::builder()
            .street(self.street)
            .number(self.number)
            .city(self.city)
            .state(self.state)
            .zip_code(self.zip_code);
        if let Some(complement) = self.complement {
            builder = builder.complement(complement);
        }
        if let Some(neighborhood) = self.neighborhood {
            builder = builder.neighborhood(neighborhood);
        }
        if let Some(country) = self.country {
            builder = builder.country(country);
        }
        builder
    }

    /// Builds the address
    ///
    /// # Panics
    ///
    /// Panics if the address fails validation.
    pub fn build(self) -> Address {
        self.into_domain().build().expect("valid test address")
    }
}
