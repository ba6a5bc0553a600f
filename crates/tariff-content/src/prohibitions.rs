//! # Prohibition Descriptions
//!
//! Trader-facing explanations for prohibitive measures, keyed by the legal
//! act that imposes them. The snapshot is loaded once at process start (or
//! refreshed by whatever owns it) and handed to the pipeline as an
//! immutable value; the pipeline never reaches for ambient state.
//!
//! ## Matching
//!
//! 1. Legal act, origin country and locale all match.
//! 2. Otherwise legal act and locale match on a record with no country.
//! 3. Otherwise no description; the caller emits a bare prohibition.

use serde::{Deserialize, Serialize};
use tariff_core::Locale;

/// One prohibition description record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProhibitionDescription {
    /// Legal act id the prohibition is imposed by.
    pub legal_act: String,
    /// Origin country the text is specific to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to_country: Option<String>,
    /// Locale of the text.
    pub locale: Locale,
    /// Trader-facing text.
    pub description: String,
}

/// Immutable set of prohibition descriptions.
#[derive(Debug, Clone, Default)]
pub struct ProhibitionSnapshot {
    records: Vec<ProhibitionDescription>,
}

impl ProhibitionSnapshot {
    /// Build a snapshot from records.
    pub fn new(records: Vec<ProhibitionDescription>) -> Self {
        Self { records }
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find the description for a legal act as seen from `origin_country`.
    ///
    /// Records must match the legal act and locale. A record naming the
    /// origin country wins; otherwise the record with no country applies.
    /// Records for other countries are never used as a fallback.
    pub fn resolve(
        &self,
        legal_act: &str,
        origin_country: &str,
        locale: Locale,
    ) -> Option<&ProhibitionDescription> {
        let candidates: Vec<&ProhibitionDescription> = self
            .records
            .iter()
            .filter(|r| r.legal_act == legal_act && r.locale == locale)
            .collect();
        candidates
            .iter()
            .find(|r| r.applies_to_country.as_deref() == Some(origin_country))
            .or_else(|| candidates.iter().find(|r| r.applies_to_country.is_none()))
            .copied()
    }
}
