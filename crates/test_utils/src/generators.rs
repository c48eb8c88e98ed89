//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data that
//! maintains domain invariants: names are never blank, birthdays are never
//! after [`TemporalFixtures::today`], and CPFs carry correct check digits
//! unless the strategy says otherwise.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use domain_person::{cpf, Person};

use crate::fixtures::TemporalFixtures;

/// Strategy for generating non-blank names
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,15}"
}

/// Strategy for generating strings every name setter rejects
pub fn blank_name_strategy() -> impl Strategy<Value = String> {
    "[ \t\n]{0,5}"
}

/// Strategy for generating birthdays up to 120 years before today, today included
pub fn birthday_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..=120 * 366).prop_map(|days_back| TemporalFixtures::today() - Duration::days(days_back))
}

/// Strategy for generating dates strictly after today
pub fn future_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1i64..=3650).prop_map(|days_ahead| TemporalFixtures::today() + Duration::days(days_ahead))
}

/// Strategy for generating nine-digit CPF seeds
pub fn cpf_seed_strategy() -> impl Strategy<Value = [u8; cpf::SEED_LENGTH]> {
    proptest::array::uniform9(0u8..=9)
}

/// Strategy for generating seeds that are not a single repeated digit
pub fn issuable_cpf_seed_strategy() -> impl Strategy<Value = [u8; cpf::SEED_LENGTH]> {
    cpf_seed_strategy().prop_filter("repeated-digit seeds complete to invalid CPFs", |seed| {
        seed.iter().any(|&d| d != seed[0])
    })
}

/// Strategy for generating valid formatted CPFs
pub fn valid_cpf_strategy() -> impl Strategy<Value = String> {
    issuable_cpf_seed_strategy()
        .prop_filter_map("seed entries are single digits", |seed| cpf::from_seed(&seed))
}

/// Strategy for generating 11-digit strings of one repeated digit
pub fn repeated_digit_cpf_strategy() -> impl Strategy<Value = String> {
    (0u8..=9).prop_map(|d| d.to_string().repeat(cpf::CPF_LENGTH))
}

/// Strategy for generating arbitrary CPF-like input with punctuation noise
pub fn cpf_like_strategy() -> impl Strategy<Value = String> {
    "[0-9.\\- ]{0,20}"
}

/// Strategy for generating zip codes the address builder accepts
pub fn valid_zip_code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{5}",
        "[0-9]{5}-[0-9]{3}",
        "[0-9]{5}-[0-9]{4}",
    ]
}

/// Strategy for generating zip codes the address builder rejects
pub fn invalid_zip_code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,4}",
        "[0-9]{6,9}",
        "[0-9]{5}-[0-9]{1,2}",
        "[0-9]{5}-[0-9]{5,6}",
        "[A-Za-z]{5}",
    ]
}

/// Strategy for generating people with names and a birthday, frozen on today
pub fn person_strategy() -> impl Strategy<Value = Person> {
    (name_strategy(), name_strategy(), birthday_strategy()).prop_map(|(first, last, birthday)| {
        let person = Person::with_clock(TemporalFixtures::clock());
        person.set_first_name(first).expect("generated first name is not blank");
        person.set_last_name(last).expect("generated last name is not blank");
        person.set_birthday(birthday).expect("generated birthday is not in the future");
        person
    })
}

/// Strategy for generating groups of distinct people
pub fn people_strategy(max: usize) -> impl Strategy<Value = Vec<Person>> {
    proptest::collection::vec(person_strategy(), 1..=max)
}
