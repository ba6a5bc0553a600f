//! # Condition Taxonomy
//!
//! Classifies every measure condition into exactly one of four categories.
//! Classification is a pure function of the condition's fields.
//!
//! | Category | Rule |
//! |----------|------|
//! | `Exception` | document code starts with `Y`, or is a disguised exception |
//! | `Certificate` | any other non-blank document code |
//! | `Threshold` | no document code, numeric requirement present |
//! | `Negative` | neither: informational only, never shown to the trader |

use serde::{Deserialize, Serialize};

use crate::condition::{ConditionKind, MeasureCondition};

/// Document codes that do not start with `Y` but waive the measure all the
/// same.
pub const EXCEPTION_DOCUMENT_CODES: &[&str] = &[
    "C084", "9009", "9010", "9011", "9015", "9016", "9020", "9021", "9033", "9034", "9035",
    "9036", "999L",
];

/// Universal waiver code. Ignored when deciding whether a measure is complex.
pub const UNIVERSAL_WAIVER_CODE: &str = "999L";

/// The four condition categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasureConditionType {
    /// Present a certificate, licence or document.
    Certificate,
    /// A declaration that the goods are out of scope.
    Exception,
    /// A weight, volume, unit or price threshold.
    Threshold,
    /// Nothing the trader can act on.
    Negative,
}

impl MeasureConditionType {
    /// Sort rank used when ordering options: exceptions first, then
    /// certificates, then thresholds.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Exception => 0,
            Self::Certificate => 1,
            Self::Threshold => 2,
            Self::Negative => 3,
        }
    }
}

/// Classify a non-blank document code.
pub fn classify_document_code(document_code: &str) -> MeasureConditionType {
    if document_code.starts_with('Y') || EXCEPTION_DOCUMENT_CODES.contains(&document_code) {
        MeasureConditionType::Exception
    } else {
        MeasureConditionType::Certificate
    }
}

impl MeasureCondition {
    /// The condition's category.
    pub fn classification(&self) -> MeasureConditionType {
        match &self.kind {
            ConditionKind::Documentary { .. } => match self.document_code() {
                Some(code) => classify_document_code(code),
                None => MeasureConditionType::Negative,
            },
            ConditionKind::PriceBased { .. }
            | ConditionKind::PricePerUnitBased { .. }
            | ConditionKind::WeightVolumeUnitBased { .. } => MeasureConditionType::Threshold,
            ConditionKind::Negative => MeasureConditionType::Negative,
        }
    }

    /// De-duplication key: the document code for documentary conditions,
    /// the requirement text (or, failing that, the amount) for thresholds,
    /// nothing for negative conditions.
    pub fn condition_key(&self) -> Option<&str> {
        match &self.kind {
            ConditionKind::Documentary { .. } => self.document_code(),
            ConditionKind::PriceBased { .. }
            | ConditionKind::PricePerUnitBased { .. }
            | ConditionKind::WeightVolumeUnitBased { .. } => self
                .requirement
                .as_deref()
                .filter(|r| !r.trim().is_empty())
                .or_else(|| self.threshold_amount()),
            ConditionKind::Negative => None,
        }
    }

    /// Whether the condition is surfaced to the trader at all.
    pub fn is_actionable(&self) -> bool {
        self.classification() != MeasureConditionType::Negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::MeasureConditionCode;

    fn documentary(code: &str) -> MeasureCondition {
        MeasureCondition {
            id: "1".into(),
            condition_code: MeasureConditionCode::B,
            condition: String::new(),
            requirement: None,
            action: String::new(),
            kind: ConditionKind::Documentary {
                document_code: code.into(),
                description: String::new(),
            },
        }
    }

    fn threshold(requirement: Option<&str>) -> MeasureCondition {
        MeasureCondition {
            id: "2".into(),
            condition_code: MeasureConditionCode::E,
            condition: String::new(),
            requirement: requirement.map(str::to_string),
            action: String::new(),
            kind: ConditionKind::WeightVolumeUnitBased {
                amount: "2.0".into(),
                measurement_unit_code: "KGM".into(),
            },
        }
    }

    #[test]
    fn y_codes_are_exceptions() {
        assert_eq!(documentary("Y929").classification(), MeasureConditionType::Exception);
        assert_eq!(documentary("Y900").classification(), MeasureConditionType::Exception);
    }

    #[test]
    fn disguised_exception_codes_are_exceptions() {
        for code in EXCEPTION_DOCUMENT_CODES {
            assert_eq!(documentary(code).classification(), MeasureConditionType::Exception);
        }
    }

    #[test]
    fn other_document_codes_are_certificates() {
        assert_eq!(documentary("C669").classification(), MeasureConditionType::Certificate);
        assert_eq!(documentary("9012").classification(), MeasureConditionType::Certificate);
        assert_eq!(documentary("N853").classification(), MeasureConditionType::Certificate);
    }

    #[test]
    fn blank_document_code_is_negative() {
        assert_eq!(documentary("  ").classification(), MeasureConditionType::Negative);
        assert_eq!(documentary("  ").condition_key(), None);
    }

    #[test]
    fn thresholds_key_on_requirement_then_amount() {
        assert_eq!(threshold(Some("2.00 kg")).condition_key(), Some("2.00 kg"));
        assert_eq!(threshold(None).condition_key(), Some("2.0"));
        assert_eq!(threshold(Some("")).condition_key(), Some("2.0"));
        assert_eq!(threshold(None).classification(), MeasureConditionType::Threshold);
    }

    #[test]
    fn negative_conditions_have_no_key() {
        let mut c = documentary("C1");
        c.kind = ConditionKind::Negative;
        assert_eq!(c.classification(), MeasureConditionType::Negative);
        assert_eq!(c.condition_key(), None);
        assert!(!c.is_actionable());
    }

    #[test]
    fn exceptions_rank_before_certificates() {
        assert!(MeasureConditionType::Exception.rank() < MeasureConditionType::Certificate.rank());
        assert!(MeasureConditionType::Certificate.rank() < MeasureConditionType::Threshold.rank());
    }
}
