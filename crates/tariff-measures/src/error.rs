//! # Measure Errors
//!
//! Three failure classes flow through this crate:
//!
//! - **Build failures** ([`MeasureError::is_build_failure`]): one option
//!   cannot be rendered from the data (unknown unit, unsupported threshold
//!   code, unparsable amount). The synthesizer logs and drops that option.
//! - **Malformed input**: unknown condition codes and dangling references
//!   in commodity data. These fail fast with the offending key.
//! - **Content failures**: the document store errored or returned more than
//!   one record for a supposedly unique code. These fail the request.

use tariff_content::ContentError;
use thiserror::Error;

/// Errors raised while assembling, filtering or synthesizing measures.
#[derive(Error, Debug)]
pub enum MeasureError {
    /// A condition code outside A–Z and YA–YD.
    #[error("unknown measure condition code: {0:?}")]
    UnknownConditionCode(String),

    /// A measurement unit code missing from the unit table.
    #[error("unknown measurement unit {unit_code:?} on condition {condition_id}")]
    UnknownMeasureUnit {
        /// Condition carrying the unit.
        condition_id: String,
        /// The unrecognised unit code.
        unit_code: String,
    },

    /// A monetary unit code missing from the currency table.
    #[error("unknown monetary unit {currency_code:?} on condition {condition_id}")]
    UnknownMonetaryUnit {
        /// Condition carrying the currency.
        condition_id: String,
        /// The unrecognised currency code.
        currency_code: String,
    },

    /// A threshold condition whose code carries no min/max semantics.
    #[error("condition {condition_id} has code {code} which defines no threshold")]
    UnsupportedThresholdCode {
        /// The threshold condition.
        condition_id: String,
        /// Its condition code.
        code: String,
    },

    /// A condition without a threshold payload passed to the threshold builder.
    #[error("condition {condition_id} carries no threshold amount")]
    NotAThreshold {
        /// The condition.
        condition_id: String,
    },

    /// A threshold amount that is not a decimal number.
    #[error("condition {condition_id} has unparsable amount {amount:?}")]
    InvalidAmount {
        /// The threshold condition.
        condition_id: String,
        /// The raw amount.
        amount: String,
    },

    /// Commodity data violates a structural invariant.
    #[error("invalid measure {measure_id}: {reason}")]
    InvalidMeasure {
        /// The offending measure.
        measure_id: String,
        /// What was wrong.
        reason: String,
    },

    /// More than one description record for a single document code.
    #[error("inconsistent configuration: {count} description records for document code {document_code}")]
    InconsistentConfiguration {
        /// The duplicated document code.
        document_code: String,
        /// How many records matched.
        count: usize,
    },

    /// A content store failed.
    #[error("content lookup failed: {0}")]
    Content(#[from] ContentError),
}

impl MeasureError {
    /// Whether this error only prevents a single option from rendering.
    pub fn is_build_failure(&self) -> bool {
        matches!(
            self,
            Self::UnknownMeasureUnit { .. }
                | Self::UnknownMonetaryUnit { .. }
                | Self::UnsupportedThresholdCode { .. }
                | Self::NotAThreshold { .. }
                | Self::InvalidAmount { .. }
        )
    }
}
