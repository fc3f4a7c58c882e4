//! The fixed set of EU member identifiers processed by an ingestion run.
//!
//! Codes follow ISO 3166-1 alpha-2 with one exception: Greece is `EL`, the
//! convention used by the upstream data source, not `GR`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All EU member identifiers, in processing order.
pub const EU_COUNTRIES: [&str; 27] = [
    "DE", "FR", "IT", "ES", "PL", "NL", "SE", "FI", "BE", "AT", "CZ", "SK", "HU", "PT", "IE", "DK",
    "EE", "LT", "LV", "SI", "HR", "RO", "BG", "CY", "LU", "MT", "EL",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CountryError {
    #[error("unknown country code \"{0}\" (expected one of the 27 EU member codes; Greece is EL)")]
    Unknown(String),
}

/// A validated EU country identifier.
///
/// Serializes as the bare code; deserialization goes through
/// [`CountryCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parses a country code, case-insensitively, against [`EU_COUNTRIES`].
    ///
    /// # Errors
    ///
    /// Returns [`CountryError::Unknown`] if the code is not an EU member
    /// identifier. `GR` is rejected; use `EL`.
    pub fn parse(raw: &str) -> Result<Self, CountryError> {
        let upper = raw.trim().to_ascii_uppercase();
        if EU_COUNTRIES.contains(&upper.as_str()) {
            Ok(Self(upper))
        } else {
            Err(CountryError::Unknown(raw.to_owned()))
        }
    }

    /// Every EU member identifier, in processing order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        EU_COUNTRIES.iter().map(|c| Self((*c).to_owned())).collect()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CountryCode {
    type Err = CountryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CountryError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}
