//! # Commodity Assembly
//!
//! The commodity data source delivers a flat, id-keyed record set: measures
//! refer to their measure type, geographical area, additional code, duty
//! expression and conditions by id. [`assemble_measures`] joins the records
//! into immutable [`Measure`] values, rejecting dangling references.
//!
//! ## Condition Variants
//!
//! | Raw fields | Variant |
//! |------------|---------|
//! | non-blank document code | `Documentary` |
//! | amount + currency + unit | `PricePerUnitBased` |
//! | amount + currency, or amount alone | `PriceBased` |
//! | amount + unit | `WeightVolumeUnitBased` |
//! | no amount | `Negative` |

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tariff_core::{CommodityCode, TradeType};

use crate::condition::{ConditionKind, MeasureCondition, MeasureConditionCode};
use crate::error::MeasureError;
use crate::measure::{AdditionalCode, GeographicalArea, Measure, MeasureType};

/// Raw measure record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMeasure {
    /// Measure id.
    pub id: String,
    /// Applies to imports.
    #[serde(default)]
    pub import: bool,
    /// Applies to exports.
    #[serde(default)]
    pub export: bool,
    /// VAT or excise measure.
    #[serde(default)]
    pub tax_measure: bool,
    /// Id of the measure type record.
    pub measure_type_id: String,
    /// Id of the geographical area record.
    pub geographical_area_id: String,
    /// Id of the additional code record.
    #[serde(default)]
    pub additional_code_id: Option<String>,
    /// Id of the duty expression record.
    #[serde(default)]
    pub duty_expression_id: Option<String>,
    /// Ids of the condition records, in tariff order.
    #[serde(default)]
    pub measure_condition_ids: Vec<String>,
    /// Quota order number.
    #[serde(default)]
    pub quota_number: Option<String>,
    /// Legal act id.
    #[serde(default)]
    pub legal_act: Option<String>,
    /// Excluded country codes.
    #[serde(default)]
    pub excluded_countries: Vec<String>,
}

/// Raw measure condition record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMeasureCondition {
    /// Condition id.
    pub id: String,
    /// Condition code, A–Z or YA–YD.
    pub condition_code: String,
    /// Official condition description.
    #[serde(default)]
    pub condition: String,
    /// Document code, for documentary conditions.
    #[serde(default)]
    pub document_code: Option<String>,
    /// Official document description.
    #[serde(default)]
    pub certificate_description: Option<String>,
    /// Rendered requirement.
    #[serde(default)]
    pub requirement: Option<String>,
    /// Official action description.
    #[serde(default)]
    pub action: String,
    /// Threshold amount as a decimal string.
    #[serde(default)]
    pub duty_amount: Option<String>,
    /// Threshold currency.
    #[serde(default)]
    pub monetary_unit_code: Option<String>,
    /// Threshold measurement unit.
    #[serde(default)]
    pub measurement_unit_code: Option<String>,
    /// Qualifier appended to the measurement unit.
    #[serde(default)]
    pub measurement_unit_qualifier_code: Option<String>,
}

/// Raw additional code record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAdditionalCode {
    /// Record id.
    pub id: String,
    /// The code itself.
    pub code: String,
    /// Official description.
    #[serde(default)]
    pub description: String,
    /// Catch-all "other" code.
    #[serde(default)]
    pub residual: bool,
}

/// Raw duty expression record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyExpression {
    /// Record id.
    pub id: String,
    /// Rendered duty, e.g. `"2.00 %"`.
    pub base: String,
}

/// A commodity with its flattened measure records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityData {
    /// Ten-digit commodity code.
    pub commodity_code: CommodityCode,
    /// Tariff section id.
    pub section_id: String,
    /// Measures.
    #[serde(default)]
    pub measures: Vec<RawMeasure>,
    /// Measure types.
    #[serde(default)]
    pub measure_types: Vec<MeasureType>,
    /// Measure conditions.
    #[serde(default)]
    pub measure_conditions: Vec<RawMeasureCondition>,
    /// Geographical areas.
    #[serde(default)]
    pub geographical_areas: Vec<GeographicalArea>,
    /// Additional codes.
    #[serde(default)]
    pub additional_codes: Vec<RawAdditionalCode>,
    /// Duty expressions.
    #[serde(default)]
    pub duty_expressions: Vec<DutyExpression>,
}

impl CommodityData {
    /// Two-digit chapter id.
    pub fn chapter_id(&self) -> &str {
        self.commodity_code.chapter()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Build one condition from its raw record.
pub fn assemble_condition(raw: &RawMeasureCondition) -> Result<MeasureCondition, MeasureError> {
    let condition_code: MeasureConditionCode = raw.condition_code.parse()?;

    let unit = non_blank(&raw.measurement_unit_code).map(|unit| {
        let qualifier = non_blank(&raw.measurement_unit_qualifier_code).unwrap_or_default();
        format!("{unit}{qualifier}")
    });
    let currency = non_blank(&raw.monetary_unit_code).map(str::to_string);

    let kind = match (non_blank(&raw.document_code), non_blank(&raw.duty_amount)) {
        (Some(document_code), _) => ConditionKind::Documentary {
            document_code: document_code.to_string(),
            description: raw.certificate_description.clone().unwrap_or_default(),
        },
        (None, Some(amount)) => {
            let amount = amount.to_string();
            match (currency, unit) {
                (Some(monetary_unit_code), Some(measurement_unit_code)) => {
                    ConditionKind::PricePerUnitBased {
                        amount,
                        monetary_unit_code,
                        measurement_unit_code,
                    }
                }
                (None, Some(measurement_unit_code)) => ConditionKind::WeightVolumeUnitBased {
                    amount,
                    measurement_unit_code,
                },
                (monetary_unit_code, None) => ConditionKind::PriceBased {
                    amount,
                    monetary_unit_code: monetary_unit_code.unwrap_or_default(),
                },
            }
        }
        (None, None) => ConditionKind::Negative,
    };

    Ok(MeasureCondition {
        id: raw.id.clone(),
        condition_code,
        condition: raw.condition.clone(),
        requirement: raw.requirement.clone(),
        action: raw.action.clone(),
        kind,
    })
}

fn dangling(measure_id: &str, kind: &str, id: &str) -> MeasureError {
    MeasureError::InvalidMeasure {
        measure_id: measure_id.to_string(),
        reason: format!("unknown {kind} {id:?}"),
    }
}

/// Join the flat records of a commodity into measures.
pub fn assemble_measures(data: &CommodityData) -> Result<Vec<Measure>, MeasureError> {
    let measure_types: HashMap<&str, &MeasureType> =
        data.measure_types.iter().map(|t| (t.id.as_str(), t)).collect();
    let areas: HashMap<&str, &GeographicalArea> =
        data.geographical_areas.iter().map(|a| (a.id.as_str(), a)).collect();
    let additional_codes: HashMap<&str, &RawAdditionalCode> =
        data.additional_codes.iter().map(|c| (c.id.as_str(), c)).collect();
    let duties: HashMap<&str, &DutyExpression> =
        data.duty_expressions.iter().map(|d| (d.id.as_str(), d)).collect();
    let conditions: HashMap<&str, &RawMeasureCondition> =
        data.measure_conditions.iter().map(|c| (c.id.as_str(), c)).collect();

    let measures = data
        .measures
        .iter()
        .map(|raw| {
            let mut applicable_trade_types = BTreeSet::new();
            if raw.import {
                applicable_trade_types.insert(TradeType::Import);
            }
            if raw.export {
                applicable_trade_types.insert(TradeType::Export);
            }
            if applicable_trade_types.is_empty() {
                return Err(MeasureError::InvalidMeasure {
                    measure_id: raw.id.clone(),
                    reason: "applies to neither imports nor exports".to_string(),
                });
            }

            let measure_type = measure_types
                .get(raw.measure_type_id.as_str())
                .ok_or_else(|| dangling(&raw.id, "measure type", &raw.measure_type_id))?;
            let geographical_area = areas
                .get(raw.geographical_area_id.as_str())
                .ok_or_else(|| dangling(&raw.id, "geographical area", &raw.geographical_area_id))?;
            let additional_code = raw
                .additional_code_id
                .as_deref()
                .map(|id| {
                    additional_codes
                        .get(id)
                        .map(|c| AdditionalCode {
                            code: c.code.clone(),
                            description: c.description.clone(),
                            residual: c.residual,
                        })
                        .ok_or_else(|| dangling(&raw.id, "additional code", id))
                })
                .transpose()?;
            let duty_value = raw
                .duty_expression_id
                .as_deref()
                .map(|id| {
                    duties
                        .get(id)
                        .map(|d| d.base.clone())
                        .ok_or_else(|| dangling(&raw.id, "duty expression", id))
                })
                .transpose()?;
            let measure_conditions = raw
                .measure_condition_ids
                .iter()
                .map(|id| {
                    conditions
                        .get(id.as_str())
                        .ok_or_else(|| dangling(&raw.id, "measure condition", id))
                        .and_then(|c| assemble_condition(c))
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Measure {
                id: raw.id.clone(),
                tax_measure: raw.tax_measure,
                applicable_trade_types,
                measure_type: (*measure_type).clone(),
                geographical_area: (*geographical_area).clone(),
                additional_code,
                duty_value,
                quota_number: raw.quota_number.clone(),
                measure_conditions,
                legal_act: raw.legal_act.clone(),
                excluded_countries: raw.excluded_countries.iter().cloned().collect(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        commodity_code = %data.commodity_code,
        measures = measures.len(),
        "assembled measures"
    );
    Ok(measures)
}
