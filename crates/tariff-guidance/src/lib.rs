//! # tariff-guidance: Aggregation Pipeline
//!
//! Turns a trade request (commodity, direction, countries, user type,
//! locale) into one response tree: the condition-based restrictive measures
//! with their option groups, outright prohibitions, tax-and-duty status, and
//! guidance steps grouped under ordered headers and super-headers.
//!
//! ## Architecture
//!
//! ```text
//! TradeRequest
//!   │
//!   ▼
//! CommoditySource ──► assemble_measures ──► select / narrow
//!                                              │
//!              ┌───────────────────────────────┼─────────────────────────┐
//!              ▼                               ▼                         ▼
//!     ProhibitionSnapshot            OptionSynthesizer          GuidanceContentStore
//!                                  (one batched lookup         (4 step queries +
//!                                     per measure)              cached headers)
//!              └───────────────────────────────┼─────────────────────────┘
//!                                              ▼
//!                                   TradeGuidanceResponse
//! ```
//!
//! The three branches run concurrently and are joined before the tree is
//! built. The first failing branch fails the request.

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod source;
pub mod tax;

pub use config::{ConfigError, PipelineConfig};
pub use error::{PipelineError, ResponseStatus};
pub use model::{
    HeaderGroup, Prohibition, RestrictiveMeasure, SuperHeaderGroup, TaxAndDutyStatus,
    TradeGuidanceResponse, TradeRequest,
};
pub use pipeline::{build_guidance_tree, GuidanceContent, GuidancePipeline};
pub use source::{CommoditySource, InMemoryCommoditySource};
pub use tax::tax_and_duty_applicable;
