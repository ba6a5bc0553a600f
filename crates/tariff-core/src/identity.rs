//! # Code Newtypes
//!
//! Validated wrappers for the codes that key every request. A
//! `CountryCode` cannot be passed where a `CommodityCode` is expected, and
//! neither can be constructed from malformed input.

use serde::{Deserialize, Serialize};

use crate::error::TariffError;

/// ISO 3166-1 alpha-2 country code, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate and normalise a country code.
    ///
    /// # Errors
    ///
    /// Returns [`TariffError::InvalidCode`] unless the input is exactly two
    /// ASCII letters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TariffError> {
        let raw = raw.as_ref().trim();
        if raw.len() != 2 || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(TariffError::InvalidCode {
                kind: "country code",
                value: raw.to_string(),
                reason: "expected two ASCII letters".to_string(),
            });
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    /// Access the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CountryCode {
    type Error = TariffError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ten-digit commodity code from the UK tariff nomenclature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommodityCode(String);

/// Digit lengths of the nomenclature levels: chapter, heading, subheading,
/// CN8 and the full commodity.
const HIERARCHY_LEVELS: [usize; 5] = [2, 4, 6, 8, 10];

impl CommodityCode {
    /// Validate a commodity code.
    ///
    /// # Errors
    ///
    /// Returns [`TariffError::InvalidCode`] unless the input is exactly ten
    /// ASCII digits.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TariffError> {
        let raw = raw.as_ref().trim();
        if raw.len() != 10 || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(TariffError::InvalidCode {
                kind: "commodity code",
                value: raw.to_string(),
                reason: "expected ten digits".to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// Access the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two-digit chapter this commodity belongs to.
    pub fn chapter(&self) -> &str {
        &self.0[..2]
    }

    /// Every ancestor code in the nomenclature, chapter first, ending with
    /// the commodity itself.
    pub fn hierarchy(&self) -> Vec<String> {
        HIERARCHY_LEVELS
            .iter()
            .map(|&len| self.0[..len].to_string())
            .collect()
    }
}

impl TryFrom<String> for CommodityCode {
    type Error = TariffError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommodityCode> for String {
    fn from(value: CommodityCode) -> Self {
        value.0
    }
}

impl std::fmt::Display for CommodityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_code_is_upper_cased() {
        assert_eq!(CountryCode::new("cn").unwrap().as_str(), "CN");
    }

    #[test]
    fn country_code_rejects_numeric_group_ids() {
        assert!(CountryCode::new("1011").is_err());
        assert!(CountryCode::new("C1").is_err());
        assert!(CountryCode::new("").is_err());
    }

    #[test]
    fn country_code_deserialises_with_validation() {
        let ok: CountryCode = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(ok.as_str(), "FR");
        assert!(serde_json::from_str::<CountryCode>("\"FRA\"").is_err());
    }

    #[test]
    fn commodity_code_requires_ten_digits() {
        assert!(CommodityCode::new("0102291010").is_ok());
        assert!(CommodityCode::new("01022910").is_err());
        assert!(CommodityCode::new("01022910AB").is_err());
    }

    #[test]
    fn commodity_hierarchy_lists_every_level() {
        let code = CommodityCode::new("0102291010").unwrap();
        assert_eq!(code.chapter(), "01");
        assert_eq!(
            code.hierarchy(),
            vec!["01", "0102", "010229", "01022910", "0102291010"]
        );
    }
}
