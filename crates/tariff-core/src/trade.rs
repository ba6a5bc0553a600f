//! # Request Dimensions
//!
//! The three closed enums every guidance request is keyed by: the trade
//! direction, the locale responses are rendered in, and the user type
//! guidance content is written for.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TariffError;

/// Direction of a trade relative to the UK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    /// Goods entering the UK.
    Import,
    /// Goods leaving the UK.
    Export,
}

impl TradeType {
    /// Returns both trade types in canonical order.
    pub fn all() -> &'static [TradeType] {
        &[Self::Import, Self::Export]
    }

    /// Returns the wire identifier for this trade type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Import => "IMPORT",
            Self::Export => "EXPORT",
        }
    }
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IMPORT" => Ok(Self::Import),
            "EXPORT" => Ok(Self::Export),
            _ => Err(TariffError::UnknownValue {
                kind: "trade type",
                value: s.to_string(),
            }),
        }
    }
}

/// Language a response is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Welsh.
    Cy,
}

impl Locale {
    /// Returns both locales in canonical order.
    pub fn all() -> &'static [Locale] {
        &[Self::En, Self::Cy]
    }

    /// Returns the ISO 639-1 code for this locale.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Cy => "cy",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "cy" => Ok(Self::Cy),
            _ => Err(TariffError::UnknownValue {
                kind: "locale",
                value: s.to_string(),
            }),
        }
    }
}

/// The role a guidance reader acts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    /// The business importing the goods.
    Importer,
    /// The business exporting the goods.
    Exporter,
    /// A customs agent or freight forwarder acting for a trader.
    Intermediary,
}

impl UserType {
    /// Returns the wire identifier for this user type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Importer => "IMPORTER",
            Self::Exporter => "EXPORTER",
            Self::Intermediary => "INTERMEDIARY",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IMPORTER" => Ok(Self::Importer),
            "EXPORTER" => Ok(Self::Exporter),
            "INTERMEDIARY" => Ok(Self::Intermediary),
            _ => Err(TariffError::UnknownValue {
                kind: "user type",
                value: s.to_string(),
            }),
        }
    }
}
