//! # Document Description Store
//!
//! Trader-facing text for certificate and exception document codes. The
//! raw tariff data carries a terse official description for every document
//! code; the content store holds rewritten, plain-English overrides per
//! trade type and locale. Callers fall back to the raw description when no
//! override exists.
//!
//! Lookups are batched: the option synthesizer asks once per measure for
//! every document code it needs, never once per condition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tariff_core::{Locale, TradeType};

use crate::error::ContentError;

/// One override record for a document code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescription {
    /// Document code, e.g. `"C669"` or `"Y929"`.
    pub document_code: String,
    /// Trade direction this text is written for.
    pub trade_type: TradeType,
    /// Locale of the text.
    pub locale: Locale,
    /// The trader-facing text.
    pub description: String,
}

/// Batched lookup of document description overrides.
///
/// Implementations return every record matching one of `document_codes`
/// for the trade type and locale, in any order. Codes with no override are
/// simply absent. More than one record for the same code is returned as-is;
/// detecting that inconsistency is the caller's job.
#[async_trait]
pub trait DocumentDescriptionStore: Send + Sync {
    /// Resolve overrides for a batch of document codes.
    async fn resolve_document_descriptions(
        &self,
        document_codes: &[String],
        trade_type: TradeType,
        locale: Locale,
    ) -> Result<Vec<DocumentDescription>, ContentError>;
}

/// Document store backed by a vector of records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    records: Vec<DocumentDescription>,
}

impl InMemoryDocumentStore {
    /// Build a store from records.
    pub fn new(records: Vec<DocumentDescription>) -> Self {
        Self { records }
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl DocumentDescriptionStore for InMemoryDocumentStore {
    async fn resolve_document_descriptions(
        &self,
        document_codes: &[String],
        trade_type: TradeType,
        locale: Locale,
    ) -> Result<Vec<DocumentDescription>, ContentError> {
        let matches: Vec<DocumentDescription> = self
            .records
            .iter()
            .filter(|r| r.trade_type == trade_type && r.locale == locale)
            .filter(|r| document_codes.iter().any(|c| c == &r.document_code))
            .cloned()
            .collect();
        tracing::debug!(
            requested = document_codes.len(),
            resolved = matches.len(),
            %trade_type,
            %locale,
            "resolved document descriptions"
        );
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, trade_type: TradeType, locale: Locale, text: &str) -> DocumentDescription {
        DocumentDescription {
            document_code: code.to_string(),
            trade_type,
            locale,
            description: text.to_string(),
        }
    }

    fn store() -> InMemoryDocumentStore {
        InMemoryDocumentStore::new(vec![
            record("C669", TradeType::Import, Locale::En, "You need a catch certificate."),
            record("C669", TradeType::Export, Locale::En, "You need an export catch certificate."),
            record("C669", TradeType::Import, Locale::Cy, "Mae angen tystysgrif dal arnoch."),
            record("Y929", TradeType::Import, Locale::En, "Your goods are not fish."),
        ])
    }

    #[tokio::test]
    async fn filters_by_code_trade_type_and_locale() {
        let resolved = store()
            .resolve_document_descriptions(
                &["C669".to_string(), "Y929".to_string()],
                TradeType::Import,
                Locale::En,
            )
            .await
            .unwrap();
        assert_eq!(resolved.len(), 2);
        assert!(resolved.iter().all(|r| r.trade_type == TradeType::Import));
        assert!(resolved.iter().all(|r| r.locale == Locale::En));
    }

    #[tokio::test]
    async fn missing_codes_are_absent() {
        let resolved = store()
            .resolve_document_descriptions(&["N853".to_string()], TradeType::Import, Locale::En)
            .await
            .unwrap();
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn duplicate_records_are_returned_unmerged() {
        let mut records = store().records;
        records.push(record("Y929", TradeType::Import, Locale::En, "Duplicate."));
        let resolved = InMemoryDocumentStore::new(records)
            .resolve_document_descriptions(&["Y929".to_string()], TradeType::Import, Locale::En)
            .await
            .unwrap();
        assert_eq!(resolved.len(), 2);
    }
}
