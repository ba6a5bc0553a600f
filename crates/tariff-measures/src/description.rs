//! # Threshold Descriptions
//!
//! Renders a threshold condition as a locale-aware exemption sentence:
//!
//! | Subtype | English template |
//! |---------|------------------|
//! | weight / volume / unit | `If your shipment {verb} {more\|less} than {amount} {unit}, then your goods are exempt.` |
//! | price | `If the value of your shipment is {more\|less} than {symbol}{amount}, then your goods are exempt.` |
//! | price per unit | `If the value of your shipment is {more\|less} than {symbol}{amount} / {unit}, then your goods are exempt.` |
//!
//! The comparison word comes from the condition code: minimum-threshold
//! codes read "more", maximum-threshold codes read "less". Amounts are
//! truncated toward zero, never rounded.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tariff_core::Locale;

use crate::condition::{ConditionKind, MeasureCondition, ThresholdType};
use crate::error::MeasureError;
use crate::option::ThresholdSubtype;
use crate::text::repair_comma_spacing;
use crate::units::{
    MeasureUnit, MonetaryUnitCode, UnitCategory, DEFAULT_MONETARY_UNIT, NO_UNIT_CODE,
};

/// Fixed sentence fragments for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Phrasebook {
    /// Opening of weight/volume/unit sentences; stripped when the sentence
    /// is joined onto an exception.
    pub shipment: &'static str,
    /// Opening of price sentences.
    pub value: &'static str,
    /// "than".
    pub than: &'static str,
    /// Minimum-threshold comparison word.
    pub more: &'static str,
    /// Maximum-threshold comparison word.
    pub less: &'static str,
    /// Closing clause.
    pub exempt: &'static str,
    /// Conjunction joining two clauses into one sentence.
    pub and: &'static str,
}

const ENGLISH: Phrasebook = Phrasebook {
    shipment: "If your shipment ",
    value: "If the value of your shipment is ",
    than: "than",
    more: "more",
    less: "less",
    exempt: ", then your goods are exempt.",
    and: " and ",
};

const WELSH: Phrasebook = Phrasebook {
    shipment: "Os yw eich llwyth ",
    value: "Os yw gwerth eich llwyth yn ",
    than: "na",
    more: "mwy",
    less: "llai",
    exempt: ", yna mae eich nwyddau wedi'u heithrio.",
    and: " a ",
};

impl Phrasebook {
    /// Fragments for `locale`.
    pub fn for_locale(locale: Locale) -> &'static Phrasebook {
        match locale {
            Locale::En => &ENGLISH,
            Locale::Cy => &WELSH,
        }
    }
}

/// A rendered threshold sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdDescription {
    /// What the threshold measures.
    pub subtype: ThresholdSubtype,
    /// The sentence.
    pub text: String,
}

/// Render a threshold condition.
///
/// Fails with a build-failure error when the condition code carries no
/// threshold semantics, the amount is not a decimal, or a unit or
/// currency code is missing from the lookup tables.
pub fn describe_threshold(
    condition: &MeasureCondition,
    locale: Locale,
) -> Result<ThresholdDescription, MeasureError> {
    let book = Phrasebook::for_locale(locale);
    let comparison = match condition.condition_code.threshold_type() {
        ThresholdType::MinThreshold => book.more,
        ThresholdType::MaxThreshold => book.less,
        ThresholdType::NoThreshold => {
            return Err(MeasureError::UnsupportedThresholdCode {
                condition_id: condition.id.clone(),
                code: condition.condition_code.to_string(),
            })
        }
    };

    let (subtype, text) = match &condition.kind {
        ConditionKind::PriceBased {
            amount,
            monetary_unit_code,
        } => {
            let amount = truncate_amount(&condition.id, amount)?;
            let symbol = currency_symbol(&condition.id, monetary_unit_code)?;
            let text = format!(
                "{}{comparison} {} {symbol}{amount}{}",
                book.value, book.than, book.exempt
            );
            (ThresholdSubtype::Price, text)
        }
        ConditionKind::PricePerUnitBased {
            amount,
            monetary_unit_code,
            measurement_unit_code,
        } => {
            let amount = truncate_amount(&condition.id, amount)?;
            let symbol = currency_symbol(&condition.id, monetary_unit_code)?;
            let unit_code = if measurement_unit_code.trim().is_empty() {
                NO_UNIT_CODE
            } else {
                measurement_unit_code.as_str()
            };
            let unit = lookup_unit(&condition.id, unit_code)?;
            let text = format!(
                "{}{comparison} {} {symbol}{amount} / {}{}",
                book.value,
                book.than,
                unit.noun(locale, 1),
                book.exempt
            );
            (ThresholdSubtype::PricePerUnit, text)
        }
        ConditionKind::WeightVolumeUnitBased {
            amount,
            measurement_unit_code,
        } => {
            let amount = truncate_amount(&condition.id, amount)?;
            let unit = lookup_unit(&condition.id, measurement_unit_code)?;
            let subtype = match unit.category {
                UnitCategory::Weight => ThresholdSubtype::Weight,
                UnitCategory::Volume => ThresholdSubtype::Volume,
                UnitCategory::Unit => ThresholdSubtype::Unit,
            };
            let text = format!(
                "{}{} {comparison} {} {amount} {}{}",
                book.shipment,
                unit.phrase(locale).verb,
                book.than,
                unit.noun(locale, amount),
                book.exempt
            );
            (subtype, text)
        }
        ConditionKind::Documentary { .. } | ConditionKind::Negative => {
            return Err(MeasureError::NotAThreshold {
                condition_id: condition.id.clone(),
            })
        }
    };

    Ok(ThresholdDescription {
        subtype,
        text: repair_comma_spacing(&text),
    })
}

/// Parse a decimal amount and truncate it toward zero.
pub fn truncate_amount(condition_id: &str, raw: &str) -> Result<i64, MeasureError> {
    let invalid = || MeasureError::InvalidAmount {
        condition_id: condition_id.to_string(),
        amount: raw.to_string(),
    };
    Decimal::from_str(raw.trim())
        .map_err(|_| invalid())?
        .trunc()
        .to_i64()
        .ok_or_else(invalid)
}

fn currency_symbol(condition_id: &str, code: &str) -> Result<&'static str, MeasureError> {
    let code = if code.trim().is_empty() {
        DEFAULT_MONETARY_UNIT
    } else {
        code.trim()
    };
    MonetaryUnitCode::lookup(code)
        .map(|m| m.symbol)
        .ok_or_else(|| MeasureError::UnknownMonetaryUnit {
            condition_id: condition_id.to_string(),
            currency_code: code.to_string(),
        })
}

fn lookup_unit(condition_id: &str, code: &str) -> Result<&'static MeasureUnit, MeasureError> {
    MeasureUnit::lookup(code.trim()).ok_or_else(|| MeasureError::UnknownMeasureUnit {
        condition_id: condition_id.to_string(),
        unit_code: code.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::MeasureConditionCode;

    fn condition(code: MeasureConditionCode, kind: ConditionKind) -> MeasureCondition {
        MeasureCondition {
            id: "cond-1".into(),
            condition_code: code,
            condition: String::new(),
            requirement: None,
            action: String::new(),
            kind,
        }
    }

    fn weight(code: MeasureConditionCode, amount: &str, unit: &str) -> MeasureCondition {
        condition(
            code,
            ConditionKind::WeightVolumeUnitBased {
                amount: amount.into(),
                measurement_unit_code: unit.into(),
            },
        )
    }

    fn price(code: MeasureConditionCode, amount: &str, currency: &str) -> MeasureCondition {
        condition(
            code,
            ConditionKind::PriceBased {
                amount: amount.into(),
                monetary_unit_code: currency.into(),
            },
        )
    }

    #[test]
    fn volume_threshold_truncates_and_pluralises() {
        let d = describe_threshold(&weight(MeasureConditionCode::F, "100.0", "LTR"), Locale::En)
            .unwrap();
        assert_eq!(d.subtype, ThresholdSubtype::Volume);
        assert_eq!(
            d.text,
            "If your shipment is more than 100 litres, then your goods are exempt."
        );
    }

    #[test]
    fn amount_is_truncated_not_rounded() {
        let d = describe_threshold(&weight(MeasureConditionCode::E, "2.99", "KGM"), Locale::En)
            .unwrap();
        assert_eq!(d.subtype, ThresholdSubtype::Weight);
        assert_eq!(
            d.text,
            "If your shipment weighs less than 2 kilograms, then your goods are exempt."
        );
    }

    #[test]
    fn single_unit_uses_singular_noun() {
        let d = describe_threshold(&weight(MeasureConditionCode::E, "1.5", "NAR"), Locale::En)
            .unwrap();
        assert_eq!(d.subtype, ThresholdSubtype::Unit);
        assert_eq!(
            d.text,
            "If your shipment contains less than 1 item, then your goods are exempt."
        );
    }

    #[test]
    fn price_threshold_uses_currency_symbol() {
        let d = describe_threshold(&price(MeasureConditionCode::E, "100", "GBP"), Locale::En)
            .unwrap();
        assert_eq!(d.subtype, ThresholdSubtype::Price);
        assert_eq!(
            d.text,
            "If the value of your shipment is less than £100, then your goods are exempt."
        );
    }

    #[test]
    fn blank_currency_defaults_to_sterling() {
        let d = describe_threshold(&price(MeasureConditionCode::L, "250.75", ""), Locale::En)
            .unwrap();
        assert_eq!(
            d.text,
            "If the value of your shipment is more than £250, then your goods are exempt."
        );
    }

    #[test]
    fn price_per_unit_uses_singular_unit() {
        let c = condition(
            MeasureConditionCode::M,
            ConditionKind::PricePerUnitBased {
                amount: "30.00".into(),
                monetary_unit_code: "EUR".into(),
                measurement_unit_code: "DTN".into(),
            },
        );
        let d = describe_threshold(&c, Locale::En).unwrap();
        assert_eq!(d.subtype, ThresholdSubtype::PricePerUnit);
        assert_eq!(
            d.text,
            "If the value of your shipment is more than €30 / hectokilogram, then your goods are exempt."
        );
    }

    #[test]
    fn price_per_unit_without_unit_uses_sentinel() {
        let c = condition(
            MeasureConditionCode::V,
            ConditionKind::PricePerUnitBased {
                amount: "5".into(),
                monetary_unit_code: String::new(),
                measurement_unit_code: String::new(),
            },
        );
        let d = describe_threshold(&c, Locale::En).unwrap();
        assert_eq!(
            d.text,
            "If the value of your shipment is more than £5 / unit, then your goods are exempt."
        );
    }

    #[test]
    fn welsh_threshold_uses_welsh_fragments() {
        let d = describe_threshold(&weight(MeasureConditionCode::E, "2", "KGM"), Locale::Cy)
            .unwrap();
        assert_eq!(
            d.text,
            "Os yw eich llwyth yn pwyso llai na 2 cilogram, yna mae eich nwyddau wedi'u heithrio."
        );
    }

    #[test]
    fn unknown_unit_is_a_build_failure() {
        let err = describe_threshold(&weight(MeasureConditionCode::E, "2", "XYZ"), Locale::En)
            .unwrap_err();
        assert!(matches!(
            err,
            MeasureError::UnknownMeasureUnit { ref unit_code, .. } if unit_code == "XYZ"
        ));
        assert!(err.is_build_failure());
    }

    #[test]
    fn unknown_currency_is_a_build_failure() {
        let err = describe_threshold(&price(MeasureConditionCode::E, "2", "JPY"), Locale::En)
            .unwrap_err();
        assert!(matches!(err, MeasureError::UnknownMonetaryUnit { .. }));
        assert!(err.is_build_failure());
    }

    #[test]
    fn code_without_threshold_semantics_is_rejected() {
        let err = describe_threshold(&weight(MeasureConditionCode::B, "2", "KGM"), Locale::En)
            .unwrap_err();
        assert!(matches!(err, MeasureError::UnsupportedThresholdCode { .. }));
    }

    #[test]
    fn unparsable_amount_is_rejected() {
        let err = describe_threshold(&weight(MeasureConditionCode::E, "two", "KGM"), Locale::En)
            .unwrap_err();
        assert!(matches!(err, MeasureError::InvalidAmount { .. }));
    }

    #[test]
    fn negative_amounts_truncate_toward_zero() {
        assert_eq!(truncate_amount("c", "-2.7").unwrap(), -2);
        assert_eq!(truncate_amount("c", " 0.999 ").unwrap(), 0);
    }
}
