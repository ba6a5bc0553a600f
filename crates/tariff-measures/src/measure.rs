//! # Measures
//!
//! A measure is one regulatory rule attached to a commodity, a geography
//! and one or both trade directions. Measures are assembled once per
//! request from commodity data (see [`crate::commodity`]) and never mutated.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tariff_core::TradeType;

use crate::condition::MeasureCondition;

/// Measure type: what kind of rule this is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureType {
    /// Measure type id, e.g. `"750"`.
    pub id: String,
    /// Series id: the coarse category that decides whether the measure is
    /// restrictive (`A`, `B`), tax/duty (`C`, `D`, `J`, `P`, `Q`) or neither.
    pub series_id: String,
    /// Official description.
    pub description: String,
}

/// Geographical area a measure applies to: a single country or a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeographicalArea {
    /// Area id: an ISO country code, `"EU"`, or a numeric group id.
    pub id: String,
    /// Official description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ids of the areas this group directly contains.
    #[serde(default)]
    pub child_area_ids: BTreeSet<String>,
}

impl GeographicalArea {
    /// Whether this group directly contains `area_id`.
    pub fn covers(&self, area_id: &str) -> bool {
        self.child_area_ids.contains(area_id)
    }
}

/// Additional code narrowing a measure to part of a commodity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCode {
    /// Code, e.g. `"4200"`.
    pub code: String,
    /// Official description.
    #[serde(default)]
    pub description: String,
    /// Whether this is a catch-all "other" code.
    #[serde(default)]
    pub residual: bool,
}

/// One regulatory rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    /// Measure id.
    pub id: String,
    /// Whether this is a tax (VAT/excise) measure.
    #[serde(default)]
    pub tax_measure: bool,
    /// Directions the measure applies to. Never empty.
    pub applicable_trade_types: BTreeSet<TradeType>,
    /// What kind of rule this is.
    pub measure_type: MeasureType,
    /// Where the rule applies.
    pub geographical_area: GeographicalArea,
    /// Optional additional code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_code: Option<AdditionalCode>,
    /// Rendered duty, e.g. `"2.00 %"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duty_value: Option<String>,
    /// Quota order number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_number: Option<String>,
    /// Conditions, in tariff order.
    #[serde(default)]
    pub measure_conditions: Vec<MeasureCondition>,
    /// Legal act imposing the measure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_act: Option<String>,
    /// Countries excluded from the geographical area.
    #[serde(default)]
    pub excluded_countries: BTreeSet<String>,
}

impl Measure {
    /// Whether the measure applies to `trade_type`.
    pub fn applies_to(&self, trade_type: TradeType) -> bool {
        self.applicable_trade_types.contains(&trade_type)
    }

    /// Series id of the measure type.
    pub fn series_id(&self) -> &str {
        &self.measure_type.series_id
    }

    /// The additional code value, if any.
    pub fn additional_code_value(&self) -> Option<&str> {
        self.additional_code.as_ref().map(|c| c.code.as_str())
    }

    /// Whether `country` is explicitly excluded.
    pub fn excludes(&self, country: &str) -> bool {
        self.excluded_countries.contains(country)
    }

    /// Whether the measure is an outright prohibition rather than a set of
    /// conditions to satisfy.
    ///
    /// Series `A` measures always are. Series `B` measures are when they
    /// carry no conditions and are not narrowed to a residual additional
    /// code.
    pub fn is_prohibitive(&self) -> bool {
        match self.series_id() {
            "A" => true,
            "B" => {
                let non_residual = self.additional_code.as_ref().map_or(true, |c| !c.residual);
                non_residual && self.measure_conditions.is_empty()
            }
            _ => false,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::condition::{ConditionKind, MeasureConditionCode};

    fn any_condition() -> MeasureCondition {
        MeasureCondition {
            id: "c1".into(),
            condition_code: MeasureConditionCode::B,
            condition: String::new(),
            requirement: None,
            action: String::new(),
            kind: ConditionKind::Negative,
        }
    }

    #[test]
    fn series_a_is_always_prohibitive() {
        let mut m = measure("1", "277", "A", "1011");
        m.measure_conditions.push(any_condition());
        assert!(m.is_prohibitive());
    }

    #[test]
    fn series_b_without_conditions_is_prohibitive() {
        assert!(measure("1", "750", "B", "1011").is_prohibitive());
        let coded = with_additional_code(measure("1", "750", "B", "1011"), "4200", false);
        assert!(coded.is_prohibitive());
    }

    #[test]
    fn series_b_with_residual_code_or_conditions_is_not() {
        let residual = with_additional_code(measure("1", "750", "B", "1011"), "4999", true);
        assert!(!residual.is_prohibitive());
        let mut conditional = measure("1", "750", "B", "1011");
        conditional.measure_conditions.push(any_condition());
        assert!(!conditional.is_prohibitive());
    }

    #[test]
    fn tax_series_is_never_prohibitive() {
        assert!(!measure("1", "305", "P", "1011").is_prohibitive());
    }

    #[test]
    fn group_area_covers_direct_children_only() {
        let m = with_children(measure("1", "750", "B", "1011"), &["CN", "EU"]);
        assert!(m.geographical_area.covers("CN"));
        assert!(m.geographical_area.covers("EU"));
        assert!(!m.geographical_area.covers("FR"));
    }
}
