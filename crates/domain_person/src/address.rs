//! Postal addresses
//!
//! An [`Address`] is an immutable value object. The only way to obtain one is
//! through [`AddressBuilder::build`], which checks the required fields in a
//! fixed order (street, number, city, state, zip code) and then the zip code
//! shape. The first failure is reported, so callers always see the same
//! message for the same input.
//!
//! Accepted zip codes are five digits, optionally followed by a hyphen and a
//! three-digit (Brazilian CEP) or four-digit (US ZIP+4) suffix.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PersonError;

/// Country used when the builder is not given one
pub const DEFAULT_COUNTRY: &str = "Brazil";

static ZIP_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{3,4})?$").expect("zip code pattern is valid"));

/// A validated postal address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: String,
    complement: Option<String>,
    neighborhood: Option<String>,
    city: String,
    state: String,
    zip_code: String,
    country: String,
}

impl Address {
    /// Starts building an address
    pub fn builder() -> AddressBuilder {
        AddressBuilder::new()
    }

    /// Returns the address as two display lines
    ///
    /// ```text
    /// street, number[ - complement][, neighborhood]
    /// city - state, zip code, country
    /// ```
    pub fn formatted(&self) -> String {
        let mut first_line = format!("{}, {}", self.street, self.number);
        if let Some(complement) = non_blank(&self.complement) {
            first_line.push_str(" - ");
            first_line.push_str(complement);
        }
        if let Some(neighborhood) = non_blank(&self.neighborhood) {
            first_line.push_str(", ");
            first_line.push_str(neighborhood);
        }

        format!(
            "{}\n{} - {}, {}, {}",
            first_line, self.city, self.state, self.zip_code, self.country
        )
    }

    /// Returns true if both addresses share city and state
    pub fn is_same_city(&self, other: &Address) -> bool {
        self.city == other.city && self.state == other.state
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn complement(&self) -> Option<&str> {
        self.complement.as_deref()
    }

    pub fn neighborhood(&self) -> Option<&str> {
        self.neighborhood.as_deref()
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

/// Builder for [`Address`]
///
/// # Example
///
/// ```rust
/// use domain_person::address::Address;
///
/// let address = Address::builder()
///     .street("Rua da Aurora")
///     .number("100")
///     .city("Recife")
///     .state("PE")
///     .zip_code("50050-000")
///     .build()
///     .unwrap();
///
/// assert_eq!(address.country(), "Brazil");
/// ```
#[derive(Debug, Clone)]
pub struct AddressBuilder {
    street: Option<String>,
    number: Option<String>,
    complement: Option<String>,
    neighborhood: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    country: String,
}

impl AddressBuilder {
    /// Creates a builder with no fields set and the default country
    pub fn new() -> Self {
        Self {
            street: None,
            number: None,
            complement: None,
            neighborhood: None,
            city: None,
            state: None,
            zip_code: None,
            country: DEFAULT_COUNTRY.to_string(),
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn complement(mut self, complement: impl Into<String>) -> Self {
        self.complement = Some(complement.into());
        self
    }

    pub fn neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhood = Some(neighborhood.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.zip_code = Some(zip_code.into());
        self
    }

    /// Overrides the default country
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Validates the accumulated fields and builds the address
    ///
    /// # Errors
    ///
    /// Returns `PersonError::Validation` naming the first missing field, or
    /// "Invalid zip code format" when the zip code has the wrong shape.
    pub fn build(self) -> Result<Address, PersonError> {
        let street = required(self.street, "Street is required")?;
        let number = required(self.number, "Number is required")?;
        let city = required(self.city, "City is required")?;
        let state = required(self.state, "State is required")?;
        let zip_code = required(self.zip_code, "Zip code is required")?;

        if !ZIP_CODE_PATTERN.is_match(&zip_code) {
            return Err(PersonError::validation("Invalid zip code format"));
        }

        Ok(Address {
            street,
            number,
            complement: self.complement,
            neighborhood: self.neighborhood,
            city,
            state,
            zip_code,
            country: self.country,
        })
    }
}

impl Default for AddressBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn required(value: Option<String>, message: &str) -> Result<String, PersonError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PersonError::validation(message)),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
