//! Service configuration

use serde::Deserialize;

use crate::error::PersonError;
use crate::person::ADULT_AGE;

/// Prefix of the environment variables read by [`ServiceConfig::from_env`]
pub const ENV_PREFIX: &str = "PERSON";

/// Person service configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// Domain of the derived email addresses
    pub email_domain: String,
    /// Minimum age counted as adult by the service
    pub adult_age: i32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            email_domain: "example.com".to_string(),
            adult_age: ADULT_AGE,
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from `PERSON_*` environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    /// Unset keys keep their defaults.
    pub fn from_env() -> Result<Self, PersonError> {
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Loads configuration from any `config` source layered over the defaults
    pub fn from_source<S>(source: S) -> Result<Self, PersonError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("email_domain", defaults.email_domain)?
            .set_default("adult_age", i64::from(defaults.adult_age))?
            .add_source(source)
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
