//! Pre-built Test Fixtures
//!
//! Deterministic test data for people, addresses, CPFs, and dates. Every
//! fixture that depends on "today" is anchored to [`TemporalFixtures::today`],
//! so tests built from these values never drift with the calendar.

use chrono::NaiveDate;
use core_kernel::{FixedClock, PersonId, SharedClock};
use domain_person::Address;

/// Fixture for CPF test data
pub struct CpfFixtures;

impl CpfFixtures {
    /// A valid CPF in `XXX.XXX.XXX-XX` form
    pub fn valid_formatted() -> &'static str {
        "123.456.789-09"
    }

    /// The same valid CPF without punctuation
    pub fn valid_unformatted() -> &'static str {
        "12345678909"
    }

    /// A second valid CPF, distinct from the first
    pub fn another_valid() -> &'static str {
        "111.444.777-35"
    }

    /// Passes the checksum but is a repeated digit, so never issued
    pub fn repeated_digits() -> &'static str {
        "111.111.111-11"
    }

    /// Right length with a wrong second check digit
    pub fn wrong_check_digit() -> &'static str {
        "123.456.789-08"
    }

    /// Fewer than 11 digits
    pub fn too_short() -> &'static str {
        "123.456.789"
    }

    /// Every valid sample above
    pub fn all_valid() -> Vec<&'static str> {
        vec![Self::valid_formatted(), Self::valid_unformatted(), Self::another_valid()]
    }

    /// Every invalid sample above
    pub fn all_invalid() -> Vec<&'static str> {
        vec![
            Self::repeated_digits(),
            Self::wrong_check_digit(),
            Self::too_short(),
            "",
            "abc.def.ghi-jk",
        ]
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The frozen "today" used across the test suite (Jan 15, 2024)
    pub fn today() -> NaiveDate {
        date(2024, 1, 15)
    }

    /// A clock frozen on [`Self::today`]
    pub fn clock() -> SharedClock {
        FixedClock::new(Self::today()).shared()
    }

    /// A clock frozen on an arbitrary date
    pub fn clock_on(year: i32, month: u32, day: u32) -> SharedClock {
        FixedClock::new(date(year, month, day)).shared()
    }

    /// Birthday of someone turning 24 today
    pub fn adult_birthday() -> NaiveDate {
        date(2000, 1, 15)
    }

    /// Birthday of someone who turns 18 today
    pub fn eighteenth_birthday() -> NaiveDate {
        date(2006, 1, 15)
    }

    /// Birthday of someone who turns 18 tomorrow
    pub fn almost_adult_birthday() -> NaiveDate {
        date(2006, 1, 16)
    }

    /// Birthday of a ten-year-old, not today
    pub fn child_birthday() -> NaiveDate {
        date(2013, 6, 1)
    }

    /// Birthday of a senior, not today
    pub fn senior_birthday() -> NaiveDate {
        date(1950, 11, 30)
    }

    /// Leap day birthday
    pub fn leap_day_birthday() -> NaiveDate {
        date(2000, 2, 29)
    }

    /// The day after today
    pub fn tomorrow() -> NaiveDate {
        date(2024, 1, 16)
    }
}

/// Fixture for address test data
pub struct AddressFixtures;

impl AddressFixtures {
    /// A complete address in Recife
    pub fn recife() -> Address {
        Address::builder()
            .street("Rua da Aurora")
            .number("100")
            .complement("Apto 101")
            .neighborhood("Boa Vista")
            .city("Recife")
            .state("PE")
            .zip_code("50050-000")
            .build()
            .expect("fixture address is valid")
    }

    /// Another address in Recife, on a different street
    pub fn recife_other_street() -> Address {
        Address::builder()
            .street("Avenida Boa Viagem")
            .number("5000")
            .city("Recife")
            .state("PE")
            .zip_code("51020-000")
            .build()
            .expect("fixture address is valid")
    }

    /// An address in São Paulo
    pub fn sao_paulo() -> Address {
        Address::builder()
            .street("Avenida Paulista")
            .number("1578")
            .city("São Paulo")
            .state("SP")
            .zip_code("01310-200")
            .build()
            .expect("fixture address is valid")
    }

    /// A US address with a ZIP+4 code
    pub fn springfield_us() -> Address {
        Address::builder()
            .street("Evergreen Terrace")
            .number("742")
            .city("Springfield")
            .state("OR")
            .zip_code("97403-1234")
            .country("USA")
            .build()
            .expect("fixture address is valid")
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    pub fn first_name() -> &'static str {
        "John"
    }

    pub fn last_name() -> &'static str {
        "Doe"
    }

    pub fn full_name() -> &'static str {
        "John Doe"
    }

    /// Welcome address derived for [`Self::full_name`]
    pub fn email() -> &'static str {
        "john.doe@example.com"
    }

    /// Inputs every name setter rejects
    pub fn blank_names() -> Vec<&'static str> {
        vec!["", " ", "   ", "\t", "\n"]
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn person_id() -> PersonId {
        PersonId::new(1)
    }

    /// An id no test repository ever assigns
    pub fn missing_person_id() -> PersonId {
        PersonId::new(999)
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture date is valid")
}
