//! # Commodity Source
//!
//! Seam to the commodity data source. The pipeline asks for one commodity
//! per request; an absent commodity becomes a not-found response.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tariff_content::ContentError;
use tariff_core::CommodityCode;
use tariff_measures::CommodityData;

/// Source of flattened commodity records.
#[async_trait]
pub trait CommoditySource: Send + Sync {
    /// The commodity, or `None` if the tariff has no such code.
    async fn commodity(&self, code: &CommodityCode) -> Result<Option<CommodityData>, ContentError>;
}

/// Commodity source backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryCommoditySource {
    commodities: RwLock<HashMap<CommodityCode, CommodityData>>,
}

impl InMemoryCommoditySource {
    /// Build a source holding `commodities`.
    pub fn new(commodities: impl IntoIterator<Item = CommodityData>) -> Self {
        let source = Self::default();
        for commodity in commodities {
            source.insert(commodity);
        }
        source
    }

    /// Add or replace a commodity.
    pub fn insert(&self, commodity: CommodityData) {
        self.commodities
            .write()
            .insert(commodity.commodity_code.clone(), commodity);
    }

    /// Number of commodities held.
    pub fn len(&self) -> usize {
        self.commodities.read().len()
    }

    /// Whether the source is empty.
    pub fn is_empty(&self) -> bool {
        self.commodities.read().is_empty()
    }
}

#[async_trait]
impl CommoditySource for InMemoryCommoditySource {
    async fn commodity(&self, code: &CommodityCode) -> Result<Option<CommodityData>, ContentError> {
        Ok(self.commodities.read().get(code).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commodity(code: &str) -> CommodityData {
        serde_json::from_value(serde_json::json!({
            "commodity_code": code,
            "section_id": "1",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn returns_known_commodities_only() {
        let source = InMemoryCommoditySource::new([commodity("0302110000")]);
        assert_eq!(source.len(), 1);
        let hit = source
            .commodity(&CommodityCode::new("0302110000").unwrap())
            .await
            .unwrap();
        assert_eq!(hit.unwrap().section_id, "1");
        let miss = source
            .commodity(&CommodityCode::new("0101210000").unwrap())
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn insert_replaces_existing_commodity() {
        let source = InMemoryCommoditySource::default();
        source.insert(commodity("0302110000"));
        let mut updated = commodity("0302110000");
        updated.section_id = "2".into();
        source.insert(updated);
        assert_eq!(source.len(), 1);
        let hit = source
            .commodity(&CommodityCode::new("0302110000").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit.section_id, "2");
    }
}
