//! # Request and Response Tree
//!
//! ```text
//! TradeGuidanceResponse
//! ├── restrictive_measures: [RestrictiveMeasure]   (each with [MeasureOptions])
//! ├── prohibitions:         [Prohibition]
//! ├── tax_and_duty:         TaxAndDutyStatus
//! └── guidance:             [SuperHeaderGroup]      (by order_index)
//!                             └── headers: [HeaderGroup]   (by order_index)
//!                                   ├── steps
//!                                   ├── restrictive_measures  (IMPORT_CONTROLS only)
//!                                   └── tax_and_duty_applicable (TAX_AND_DUTY only)
//! ```
//!
//! Lists are always present, possibly empty.

use serde::{Deserialize, Serialize};
use tariff_content::{GuidanceStep, RelatedEntity};
use tariff_core::{CommodityCode, CountryCode, Locale, TradeType, UserType};
use tariff_measures::{Measure, MeasureOptions};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A guidance request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    /// Commodity being traded.
    pub commodity_code: CommodityCode,
    /// Direction of the movement.
    pub trade_type: TradeType,
    /// Where the goods come from.
    pub origin_country: CountryCode,
    /// Where the goods go.
    pub destination_country: CountryCode,
    /// Role of the reader.
    pub user_type: UserType,
    /// Response language.
    #[serde(default)]
    pub locale: Locale,
    /// Optional additional code narrowing the commodity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_code: Option<String>,
}

impl TradeRequest {
    /// The country measures are compared against: origin for imports,
    /// destination for exports.
    pub fn comparison_country(&self) -> &str {
        match self.trade_type {
            TradeType::Import => self.origin_country.as_str(),
            TradeType::Export => self.destination_country.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// A condition-based restrictive measure with its option groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictiveMeasure {
    /// Measure id.
    pub measure_id: String,
    /// Measure type id.
    pub measure_type_id: String,
    /// Measure type description.
    pub measure_type_description: String,
    /// Geographical area id.
    pub geographical_area_id: String,
    /// Additional code, if the measure carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_code: Option<String>,
    /// Independent alternative sets of options.
    pub measure_options: Vec<MeasureOptions>,
}

impl RestrictiveMeasure {
    /// Wrap a measure and its synthesized options.
    pub fn new(measure: &Measure, measure_options: Vec<MeasureOptions>) -> Self {
        Self {
            measure_id: measure.id.clone(),
            measure_type_id: measure.measure_type.id.clone(),
            measure_type_description: measure.measure_type.description.clone(),
            geographical_area_id: measure.geographical_area.id.clone(),
            additional_code: measure.additional_code_value().map(str::to_string),
            measure_options,
        }
    }

    /// Whether the measure offers at least one option group.
    pub fn has_options(&self) -> bool {
        !self.measure_options.is_empty()
    }
}

/// An outright prohibition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prohibition {
    /// Measure id.
    pub measure_id: String,
    /// Legal act imposing the prohibition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_act: Option<String>,
    /// Trader-facing explanation; absent for a bare prohibition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Whether import tax and duty apply, and which measures carry them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAndDutyStatus {
    /// Tax-and-duty guidance applies to this movement.
    pub applicable: bool,
    /// Ids of the applicable tax-and-duty measures.
    pub measure_ids: Vec<String>,
}

/// A header with its steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderGroup {
    /// Header id.
    pub id: u32,
    /// Position among its siblings.
    pub order_index: u32,
    /// Header title.
    pub description: String,
    /// Content category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_entity: Option<RelatedEntity>,
    /// Steps listed under this header, by step id.
    pub steps: Vec<GuidanceStep>,
    /// Restrictive measures, for import-control headers.
    pub restrictive_measures: Vec<RestrictiveMeasure>,
    /// Tax-and-duty flag, for tax-and-duty headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_and_duty_applicable: Option<bool>,
}

/// A super-header with its headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperHeaderGroup {
    /// Super-header id.
    pub id: u32,
    /// Position among its siblings.
    pub order_index: u32,
    /// Super-header title.
    pub description: String,
    /// Explanatory text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanatory_text: Option<String>,
    /// Headers, by order index.
    pub headers: Vec<HeaderGroup>,
}

/// The full answer to a guidance request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeGuidanceResponse {
    /// Commodity.
    pub commodity_code: CommodityCode,
    /// Direction.
    pub trade_type: TradeType,
    /// Origin.
    pub origin_country: CountryCode,
    /// Destination.
    pub destination_country: CountryCode,
    /// Locale the text is rendered in.
    pub locale: Locale,
    /// Condition-based restrictive measures, by measure type then id.
    pub restrictive_measures: Vec<RestrictiveMeasure>,
    /// Prohibitions, by measure id.
    pub prohibitions: Vec<Prohibition>,
    /// Tax-and-duty status.
    pub tax_and_duty: TaxAndDutyStatus,
    /// Guidance content tree.
    pub guidance: Vec<SuperHeaderGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(trade_type: TradeType) -> TradeRequest {
        TradeRequest {
            commodity_code: CommodityCode::new("0302110000").unwrap(),
            trade_type,
            origin_country: CountryCode::new("CN").unwrap(),
            destination_country: CountryCode::new("GB").unwrap(),
            user_type: UserType::Importer,
            locale: Locale::En,
            additional_code: None,
        }
    }

    #[test]
    fn imports_compare_against_origin() {
        assert_eq!(request(TradeType::Import).comparison_country(), "CN");
    }

    #[test]
    fn exports_compare_against_destination() {
        assert_eq!(request(TradeType::Export).comparison_country(), "GB");
    }

    #[test]
    fn request_deserialises_with_default_locale() {
        let parsed: TradeRequest = serde_json::from_value(serde_json::json!({
            "commodity_code": "0302110000",
            "trade_type": "IMPORT",
            "origin_country": "cn",
            "destination_country": "GB",
            "user_type": "IMPORTER"
        }))
        .unwrap();
        assert_eq!(parsed.locale, Locale::En);
        assert_eq!(parsed.origin_country.as_str(), "CN");
    }
}
