//! # tariff-core: Foundational Types for Trade Guidance
//!
//! This crate is the leaf of the workspace. It defines the small set of
//! primitives every other crate shares: the trade direction, the locale a
//! response is rendered in, the user type guidance is written for, and
//! validated newtypes for country and commodity codes.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums for request dimensions.** `TradeType`, `Locale` and
//!    `UserType` are exhaustive; adding a variant forces every `match` in
//!    the workspace to handle it.
//!
//! 2. **Newtypes for codes.** `CountryCode` and `CommodityCode` are validated
//!    at construction. No bare strings cross crate boundaries for them.
//!
//! 3. **EU membership is data.** The member-state list lives in
//!    [`geography`] and is the only place the `"EU"` sentinel is produced.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tariff-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod geography;
pub mod identity;
pub mod trade;

// Re-export primary types for ergonomic imports.
pub use error::TariffError;
pub use geography::{is_eu_member, normalise_country, EU_MEMBER_STATES, EU_SENTINEL};
pub use identity::{CommodityCode, CountryCode};
pub use trade::{Locale, TradeType, UserType};
