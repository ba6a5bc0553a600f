//! # Guidance Content Store
//!
//! Guidance is authored as a two-level navigation tree: super-headers group
//! headers, headers group steps. Steps are written for a trade type, a set
//! of user types and a locale, and are either shown for every commodity or
//! assigned to part of the nomenclature (commodity codes, a section, or a
//! chapter).
//!
//! ## Match Strategies
//!
//! The pipeline asks for steps four ways and merges the answers:
//!
//! | Strategy | Matches steps assigned to |
//! |----------|---------------------------|
//! | `General` | every commodity |
//! | `CommodityHierarchy` | any ancestor code of the commodity |
//! | `Section` | the commodity's section |
//! | `Chapter` | the commodity's chapter |

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tariff_core::{Locale, TradeType, UserType};

use crate::error::ContentError;

// ---------------------------------------------------------------------------
// Content records
// ---------------------------------------------------------------------------

/// Which commodities a guidance step is shown for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StepAssignment {
    /// Shown for every commodity.
    #[default]
    General,
    /// Shown for commodities under any of these codes (any nomenclature level).
    Commodities(Vec<String>),
    /// Shown for commodities in this section.
    Section(String),
    /// Shown for commodities in this two-digit chapter.
    Chapter(String),
}

/// One actionable guidance step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceStep {
    /// Step id, unique across the store.
    pub id: u32,
    /// Header this step is listed under.
    pub header_id: u32,
    /// What the trader needs to do.
    pub description: String,
    /// Optional longer explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to: Option<String>,
    /// Optional link to GOV.UK guidance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Trade direction this step applies to.
    pub trade_type: TradeType,
    /// User types this step is written for.
    pub user_types: Vec<UserType>,
    /// Locale of the text.
    pub locale: Locale,
    /// Commodity assignment.
    #[serde(default)]
    pub assignment: StepAssignment,
}

/// Content category a header is related to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelatedEntity {
    /// Import and export controls: restrictive measures attach here.
    ImportControls,
    /// Tax and duty calculation.
    TaxAndDuty,
}

/// A navigation header grouping steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationHeader {
    /// Header id.
    pub id: u32,
    /// Position among its siblings.
    pub order_index: u32,
    /// Parent super-header.
    pub super_header_id: u32,
    /// Header title.
    pub description: String,
    /// Optional content category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_entity: Option<RelatedEntity>,
    /// User types this header is shown to.
    pub user_types: Vec<UserType>,
    /// Locale of the title.
    pub locale: Locale,
}

/// A top-level navigation group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSuperHeader {
    /// Super-header id.
    pub id: u32,
    /// Position among its siblings.
    pub order_index: u32,
    /// Super-header title.
    pub description: String,
    /// Optional explanatory text shown beneath the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanatory_text: Option<String>,
    /// User types this super-header is shown to.
    pub user_types: Vec<UserType>,
    /// Locale of the title.
    pub locale: Locale,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// How a step query selects by commodity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepMatch {
    /// Steps shown for every commodity.
    General,
    /// Steps assigned to any of these codes.
    CommodityHierarchy(Vec<String>),
    /// Steps assigned to this section.
    Section(String),
    /// Steps assigned to this chapter.
    Chapter(String),
}

impl StepMatch {
    /// Short name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::CommodityHierarchy(_) => "commodity_hierarchy",
            Self::Section(_) => "section",
            Self::Chapter(_) => "chapter",
        }
    }

    /// Whether a step's assignment satisfies this match.
    pub fn matches(&self, assignment: &StepAssignment) -> bool {
        match (self, assignment) {
            (Self::General, StepAssignment::General) => true,
            (Self::CommodityHierarchy(codes), StepAssignment::Commodities(assigned)) => {
                assigned.iter().any(|a| codes.contains(a))
            }
            (Self::Section(wanted), StepAssignment::Section(s)) => wanted == s,
            (Self::Chapter(wanted), StepAssignment::Chapter(c)) => wanted == c,
            _ => false,
        }
    }
}

/// A guidance step query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepQuery {
    /// Trade direction.
    pub trade_type: TradeType,
    /// Reader role.
    pub user_type: UserType,
    /// Locale.
    pub locale: Locale,
    /// Commodity selection.
    pub matcher: StepMatch,
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Source of guidance steps and navigation headers.
#[async_trait]
pub trait GuidanceContentStore: Send + Sync {
    /// Steps matching a query, ordered by step id.
    async fn steps(&self, query: &StepQuery) -> Result<Vec<GuidanceStep>, ContentError>;

    /// Headers shown to a user type in a locale.
    async fn headers(
        &self,
        user_type: UserType,
        locale: Locale,
    ) -> Result<Vec<NavigationHeader>, ContentError>;

    /// Super-headers shown to a user type in a locale.
    async fn super_headers(
        &self,
        user_type: UserType,
        locale: Locale,
    ) -> Result<Vec<NavigationSuperHeader>, ContentError>;
}

/// Guidance store backed by vectors of records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGuidanceStore {
    steps: Vec<GuidanceStep>,
    headers: Vec<NavigationHeader>,
    super_headers: Vec<NavigationSuperHeader>,
}

impl InMemoryGuidanceStore {
    /// Build a store from records.
    pub fn new(
        steps: Vec<GuidanceStep>,
        headers: Vec<NavigationHeader>,
        super_headers: Vec<NavigationSuperHeader>,
    ) -> Self {
        Self {
            steps,
            headers,
            super_headers,
        }
    }
}

#[async_trait]
impl GuidanceContentStore for InMemoryGuidanceStore {
    async fn steps(&self, query: &StepQuery) -> Result<Vec<GuidanceStep>, ContentError> {
        let mut steps: Vec<GuidanceStep> = self
            .steps
            .iter()
            .filter(|s| s.trade_type == query.trade_type && s.locale == query.locale)
            .filter(|s| s.user_types.contains(&query.user_type))
            .filter(|s| query.matcher.matches(&s.assignment))
            .cloned()
            .collect();
        steps.sort_by_key(|s| s.id);
        tracing::debug!(
            strategy = query.matcher.as_str(),
            matched = steps.len(),
            "guidance step lookup"
        );
        Ok(steps)
    }

    async fn headers(
        &self,
        user_type: UserType,
        locale: Locale,
    ) -> Result<Vec<NavigationHeader>, ContentError> {
        Ok(self
            .headers
            .iter()
            .filter(|h| h.locale == locale && h.user_types.contains(&user_type))
            .cloned()
            .collect())
    }

    async fn super_headers(
        &self,
        user_type: UserType,
        locale: Locale,
    ) -> Result<Vec<NavigationSuperHeader>, ContentError> {
        Ok(self
            .super_headers
            .iter()
            .filter(|h| h.locale == locale && h.user_types.contains(&user_type))
            .cloned()
            .collect())
    }
}
