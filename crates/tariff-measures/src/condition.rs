//! # Measure Conditions
//!
//! A measure condition is one concrete requirement attached to a measure:
//! present a document, stay under (or over) a threshold, or nothing the
//! trader can act on. Conditions sharing a condition code form one
//! alternative; a measure with several codes offers several alternatives.
//!
//! ## Condition Codes
//!
//! Every code statically carries its threshold semantics. Codes whose
//! official wording is "equal or less than the specified maximum" are
//! `MaxThreshold`; "equal or greater than the minimum" codes are
//! `MinThreshold`; document-only codes are `NoThreshold`.
//!
//! | Code | Threshold | Code | Threshold |
//! |------|-----------|------|-----------|
//! | E, I, J | Max | F, G, L, M, R, S, U, V | Min |
//! | all others | None | YA–YD | None |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MeasureError;

/// Threshold semantics of a condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThresholdType {
    /// The code is satisfied by documents, not amounts.
    NoThreshold,
    /// The declared amount must exceed the threshold.
    MinThreshold,
    /// The declared amount must stay under the threshold.
    MaxThreshold,
}

/// Measure condition code, A–Z plus YA–YD.
///
/// Declaration order is alphabetical by published code (`Y` < `YA` < `Z`),
/// so the derived `Ord` visits codes in ascending order.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MeasureConditionCode {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X,
    Y, YA, YB, YC, YD, Z,
}

impl MeasureConditionCode {
    /// Every code in ascending order.
    pub fn all() -> &'static [MeasureConditionCode] {
        use MeasureConditionCode::*;
        &[
            A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, YA, YB,
            YC, YD, Z,
        ]
    }

    /// The code as published in the tariff.
    pub fn as_str(&self) -> &'static str {
        use MeasureConditionCode::*;
        match self {
            A => "A", B => "B", C => "C", D => "D", E => "E", F => "F", G => "G",
            H => "H", I => "I", J => "J", K => "K", L => "L", M => "M", N => "N",
            O => "O", P => "P", Q => "Q", R => "R", S => "S", T => "T", U => "U",
            V => "V", W => "W", X => "X", Y => "Y", Z => "Z",
            YA => "YA", YB => "YB", YC => "YC", YD => "YD",
        }
    }

    /// Threshold semantics of this code.
    pub fn threshold_type(&self) -> ThresholdType {
        use MeasureConditionCode::*;
        match self {
            E | I | J => ThresholdType::MaxThreshold,
            F | G | L | M | R | S | U | V => ThresholdType::MinThreshold,
            A | B | C | D | H | K | N | O | P | Q | T | W | X | Y | Z | YA | YB | YC | YD => {
                ThresholdType::NoThreshold
            }
        }
    }
}

impl std::fmt::Display for MeasureConditionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasureConditionCode {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| MeasureError::UnknownConditionCode(s.to_string()))
    }
}

impl TryFrom<String> for MeasureConditionCode {
    type Error = MeasureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MeasureConditionCode> for String {
    fn from(value: MeasureConditionCode) -> Self {
        value.as_str().to_string()
    }
}

/// Variant-specific payload of a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum ConditionKind {
    /// Satisfied by presenting a document (certificate or exception).
    Documentary {
        /// Document code, e.g. `"C669"`.
        document_code: String,
        /// The tariff's own description of the document.
        description: String,
    },
    /// Threshold on the shipment's value.
    PriceBased {
        /// Decimal amount.
        amount: String,
        /// Currency code; blank means GBP.
        monetary_unit_code: String,
    },
    /// Threshold on the shipment's value per measurement unit.
    PricePerUnitBased {
        /// Decimal amount.
        amount: String,
        /// Currency code; blank means GBP.
        monetary_unit_code: String,
        /// Measurement unit code; blank means no unit.
        measurement_unit_code: String,
    },
    /// Threshold on the shipment's weight, volume or item count.
    WeightVolumeUnitBased {
        /// Decimal amount.
        amount: String,
        /// Measurement unit code.
        measurement_unit_code: String,
    },
    /// Informational only, e.g. "import/export not allowed after control".
    Negative,
}

/// One condition of a measure. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureCondition {
    /// Condition id.
    pub id: String,
    /// Condition code grouping this condition into an alternative.
    pub condition_code: MeasureConditionCode,
    /// Official description of the condition.
    #[serde(default)]
    pub condition: String,
    /// Rendered requirement, e.g. `"£1,000.00"` or `"2.00 kg"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
    /// Official description of the action taken.
    #[serde(default)]
    pub action: String,
    /// Variant payload.
    pub kind: ConditionKind,
}

impl MeasureCondition {
    /// The non-blank document code, for documentary conditions.
    pub fn document_code(&self) -> Option<&str> {
        match &self.kind {
            ConditionKind::Documentary { document_code, .. } if !document_code.trim().is_empty() => {
                Some(document_code.as_str())
            }
            _ => None,
        }
    }

    /// The tariff's own document description, for documentary conditions.
    pub fn document_description(&self) -> Option<&str> {
        match &self.kind {
            ConditionKind::Documentary { description, .. } => Some(description.as_str()),
            _ => None,
        }
    }

    /// The threshold amount, for threshold conditions.
    pub fn threshold_amount(&self) -> Option<&str> {
        match &self.kind {
            ConditionKind::PriceBased { amount, .. }
            | ConditionKind::PricePerUnitBased { amount, .. }
            | ConditionKind::WeightVolumeUnitBased { amount, .. } => Some(amount.as_str()),
            ConditionKind::Documentary { .. } | ConditionKind::Negative => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_code_back_from_its_string() {
        for code in MeasureConditionCode::all() {
            assert_eq!(code.as_str().parse::<MeasureConditionCode>().unwrap(), *code);
        }
        assert_eq!(MeasureConditionCode::all().len(), 30);
    }

    #[test]
    fn unknown_code_names_the_offender() {
        let err = "YZ".parse::<MeasureConditionCode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown measure condition code: \"YZ\"");
    }

    #[test]
    fn ordering_is_ascending_alphabetical() {
        let mut codes = vec![
            MeasureConditionCode::YA,
            MeasureConditionCode::Y,
            MeasureConditionCode::B,
            MeasureConditionCode::Z,
        ];
        codes.sort();
        let rendered: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(rendered, vec!["B", "Y", "YA", "Z"]);
    }

    #[test]
    fn all_codes_follow_derived_order() {
        let all = MeasureConditionCode::all();
        assert_eq!(all.len(), 30);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert!(all.windows(2).all(|w| w[0].as_str() < w[1].as_str()));
    }

    #[test]
    fn threshold_semantics_follow_code_table() {
        assert_eq!(MeasureConditionCode::E.threshold_type(), ThresholdType::MaxThreshold);
        assert_eq!(MeasureConditionCode::J.threshold_type(), ThresholdType::MaxThreshold);
        assert_eq!(MeasureConditionCode::F.threshold_type(), ThresholdType::MinThreshold);
        assert_eq!(MeasureConditionCode::V.threshold_type(), ThresholdType::MinThreshold);
        assert_eq!(MeasureConditionCode::B.threshold_type(), ThresholdType::NoThreshold);
        assert_eq!(MeasureConditionCode::YD.threshold_type(), ThresholdType::NoThreshold);
    }

    #[test]
    fn condition_code_serialises_as_plain_string() {
        let json = serde_json::to_string(&MeasureConditionCode::YB).unwrap();
        assert_eq!(json, "\"YB\"");
        let back: MeasureConditionCode = serde_json::from_str("\"L\"").unwrap();
        assert_eq!(back, MeasureConditionCode::L);
    }
}
