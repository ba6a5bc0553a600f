//! # tariff-measures: Measure Classification & Description Synthesis
//!
//! Turns a commodity's raw regulatory measures into the trader-facing
//! options of each applicable measure.
//!
//! ## Pipeline
//!
//! ```text
//! CommodityData ──assemble──▶ [Measure] ──filter──▶ [&Measure]
//!                                                      │
//!                       per measure: classify conditions, synthesize
//!                                                      ▼
//!                                              [MeasureOptions]
//! ```
//!
//! - [`commodity`]: joins flat id-keyed records into [`Measure`] values.
//! - [`taxonomy`]: classifies each condition as certificate, exception,
//!   threshold or negative.
//! - [`filter`]: selects restrictive and tax/duty measures for a trade
//!   direction and country, and narrows by additional code.
//! - [`synthesis`]: picks the single, multiple or complex strategy and
//!   builds option groups.
//! - [`description`] and [`text`]: render threshold sentences and compose
//!   certificate and exception text.
//! - [`units`]: static unit and currency tables.
//!
//! ## Crate Policy
//!
//! - Every entity is immutable once assembled.
//! - Document text is resolved through the
//!   [`tariff_content::DocumentDescriptionStore`] seam, once per measure.
//! - No `.unwrap()` outside tests.

pub mod commodity;
pub mod condition;
pub mod description;
pub mod error;
pub mod filter;
pub mod measure;
pub mod option;
pub mod synthesis;
pub mod taxonomy;
pub mod text;
pub mod units;

// Re-export primary types for ergonomic imports.
pub use commodity::{assemble_measures, CommodityData};
pub use condition::{ConditionKind, MeasureCondition, MeasureConditionCode, ThresholdType};
pub use description::{describe_threshold, ThresholdDescription};
pub use error::MeasureError;
pub use filter::{narrow_by_additional_code, select_restrictive_measures, select_tax_and_duty_measures};
pub use measure::{AdditionalCode, GeographicalArea, Measure, MeasureType};
pub use option::{MeasureOption, MeasureOptions, ThresholdSubtype};
pub use synthesis::{is_complex, OptionSynthesizer};
pub use taxonomy::MeasureConditionType;
pub use units::{MeasureUnit, MonetaryUnitCode, UnitCategory};
