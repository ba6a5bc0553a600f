//! # Error Types
//!
//! Errors raised while parsing the request-level primitives defined in this
//! crate. Downstream crates wrap `TariffError` in their own enums.

use thiserror::Error;

/// Top-level error type for foundational parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TariffError {
    /// A closed-enum value was not recognised.
    #[error("unknown {kind}: {value:?}")]
    UnknownValue {
        /// Which enum was being parsed (e.g. "trade type").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A code failed format validation.
    #[error("invalid {kind} {value:?}: {reason}")]
    InvalidCode {
        /// Which code was being validated (e.g. "country code").
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
