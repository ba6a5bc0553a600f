//! # tariff-content: Content Stores for Trade Guidance
//!
//! The measure engine and the aggregation pipeline never talk to a
//! database or an HTTP service directly. Every piece of externally-sourced
//! content reaches them through one of the seams defined here:
//!
//! - [`DocumentDescriptionStore`]: trader-facing text for certificate and
//!   exception document codes, resolved in one batch per measure.
//! - [`GuidanceContentStore`]: guidance steps, navigation headers and
//!   super-headers keyed by trade type, user type and locale.
//! - [`HeaderCache`]: short-lived read-through cache for headers and
//!   super-headers keyed by user type and locale.
//! - [`ProhibitionSnapshot`]: read-only prohibition descriptions loaded
//!   once and passed in explicitly.
//!
//! Each seam has an in-memory implementation used by tests and by the CLI,
//! built from a [`ContentBundle`] file.
//!
//! ## Crate Policy
//!
//! - Traits are object-safe and `Send + Sync` so they can be shared across
//!   async tasks behind an `Arc`.
//! - In-memory adapters are deterministic: the same bundle always yields
//!   the same answers in the same order.

pub mod bundle;
pub mod cache;
pub mod documents;
pub mod error;
pub mod guidance;
pub mod prohibitions;

pub use bundle::ContentBundle;
pub use cache::{
    cached_headers, cached_super_headers, HeaderCache, HeaderCacheKey, InMemoryHeaderCache,
};
pub use documents::{DocumentDescription, DocumentDescriptionStore, InMemoryDocumentStore};
pub use error::ContentError;
pub use guidance::{
    GuidanceContentStore, GuidanceStep, InMemoryGuidanceStore, NavigationHeader,
    NavigationSuperHeader, RelatedEntity, StepAssignment, StepMatch, StepQuery,
};
pub use prohibitions::{ProhibitionDescription, ProhibitionSnapshot};
