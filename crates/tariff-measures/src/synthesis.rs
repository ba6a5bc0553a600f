//! # Measure Option Synthesizer
//!
//! Turns a measure's conditions into one or more [`MeasureOptions`] groups.
//!
//! ## Strategy Selection
//!
//! Negative conditions are dropped first. Then:
//!
//! - **single**: at most one distinct condition code. One group holding
//!   documentary options (exceptions before certificates, then by code)
//!   followed by threshold options (by condition key).
//! - **multiple**: several condition codes, no document code shared
//!   between them. One single-strategy group per code, codes ascending.
//! - **complex**: several condition codes and some document code (other
//!   than `999L`) appears under more than one of them. Conditions whose key
//!   recurs form a common set; the remaining disjoint conditions collapse
//!   into at most one combined option appended to the group.
//!
//! ## Failure Handling
//!
//! Threshold options that cannot be rendered are logged and omitted; the
//! rest of the measure still renders. More than one description record for
//! a document code fails the whole measure.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use tariff_content::DocumentDescriptionStore;
use tariff_core::{Locale, TradeType};

use crate::condition::{MeasureCondition, MeasureConditionCode};
use crate::description::{describe_threshold, Phrasebook};
use crate::error::MeasureError;
use crate::option::{MeasureOption, MeasureOptions};
use crate::taxonomy::{MeasureConditionType, UNIVERSAL_WAIVER_CODE};
use crate::text::{
    decorate_certificate, join_certificate_texts, join_exception_and_threshold,
    rewrite_exception,
};

// ---------------------------------------------------------------------------
// Complexity
// ---------------------------------------------------------------------------

/// Whether any document code (other than the universal waiver) appears
/// under more than one condition code.
pub fn is_complex<'a>(conditions: impl IntoIterator<Item = &'a MeasureCondition>) -> bool {
    let mut codes_by_document: HashMap<&str, BTreeSet<MeasureConditionCode>> = HashMap::new();
    for condition in conditions {
        match condition.document_code() {
            Some(UNIVERSAL_WAIVER_CODE) | None => {}
            Some(document_code) => {
                codes_by_document
                    .entry(document_code)
                    .or_default()
                    .insert(condition.condition_code);
            }
        }
    }
    codes_by_document.values().any(|codes| codes.len() > 1)
}

// ---------------------------------------------------------------------------
// Synthesizer
// ---------------------------------------------------------------------------

/// Builds option groups for measures, resolving document text through a
/// [`DocumentDescriptionStore`].
#[derive(Clone)]
pub struct OptionSynthesizer {
    documents: Arc<dyn DocumentDescriptionStore>,
}

impl std::fmt::Debug for OptionSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionSynthesizer").finish_non_exhaustive()
    }
}

impl OptionSynthesizer {
    /// Create a synthesizer over a document description store.
    pub fn new(documents: Arc<dyn DocumentDescriptionStore>) -> Self {
        Self { documents }
    }

    /// Synthesize option groups for one measure.
    ///
    /// Returns no groups when every condition is negative. Document text
    /// for all conditions is resolved with a single batched lookup.
    pub async fn synthesize(
        &self,
        measure_id: &str,
        conditions: &[MeasureCondition],
        trade_type: TradeType,
        locale: Locale,
    ) -> Result<Vec<MeasureOptions>, MeasureError> {
        let actionable: Vec<&MeasureCondition> =
            conditions.iter().filter(|c| c.is_actionable()).collect();
        if actionable.is_empty() {
            tracing::debug!(measure_id, "no actionable conditions");
            return Ok(Vec::new());
        }

        let texts = self
            .resolve_texts(measure_id, &actionable, trade_type, locale)
            .await?;

        let condition_codes: BTreeSet<MeasureConditionCode> =
            actionable.iter().map(|c| c.condition_code).collect();
        let groups = if condition_codes.len() <= 1 {
            tracing::debug!(measure_id, strategy = "single", "synthesizing options");
            vec![single_strategy(measure_id, &actionable, &texts, locale)]
        } else if is_complex(actionable.iter().copied()) {
            tracing::debug!(measure_id, strategy = "complex", "synthesizing options");
            vec![complex_strategy(measure_id, &actionable, &texts, locale)]
        } else {
            tracing::debug!(
                measure_id,
                strategy = "multiple",
                groups = condition_codes.len(),
                "synthesizing options"
            );
            multiple_strategy(measure_id, &actionable, &texts, locale)
        };
        Ok(groups)
    }

    async fn resolve_texts(
        &self,
        measure_id: &str,
        conditions: &[&MeasureCondition],
        trade_type: TradeType,
        locale: Locale,
    ) -> Result<ResolvedTexts, MeasureError> {
        let document_codes: Vec<String> = conditions
            .iter()
            .filter_map(|c| c.document_code())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        if document_codes.is_empty() {
            return Ok(ResolvedTexts::default());
        }

        let records = self
            .documents
            .resolve_document_descriptions(&document_codes, trade_type, locale)
            .await?;

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &records {
            *counts.entry(record.document_code.as_str()).or_default() += 1;
        }
        if let Some((document_code, count)) = counts.iter().find(|(_, count)| **count > 1) {
            tracing::error!(
                measure_id,
                document_code,
                count,
                "more than one description record for document code"
            );
            return Err(MeasureError::InconsistentConfiguration {
                document_code: document_code.to_string(),
                count: *count,
            });
        }

        let overrides = records
            .into_iter()
            .map(|r| (r.document_code, r.description))
            .collect();
        Ok(ResolvedTexts(overrides))
    }
}

/// Document text overrides for one measure.
#[derive(Debug, Default)]
struct ResolvedTexts(HashMap<String, String>);

impl ResolvedTexts {
    /// Override text for the condition's document code, or the condition's
    /// own description.
    fn text_for(&self, condition: &MeasureCondition) -> String {
        condition
            .document_code()
            .and_then(|code| self.0.get(code))
            .cloned()
            .unwrap_or_else(|| condition.document_description().unwrap_or_default().to_string())
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn single_strategy(
    measure_id: &str,
    conditions: &[&MeasureCondition],
    texts: &ResolvedTexts,
    locale: Locale,
) -> MeasureOptions {
    MeasureOptions::new(ordered_options(measure_id, conditions, texts, locale))
}

fn multiple_strategy(
    measure_id: &str,
    conditions: &[&MeasureCondition],
    texts: &ResolvedTexts,
    locale: Locale,
) -> Vec<MeasureOptions> {
    let mut by_code: BTreeMap<MeasureConditionCode, Vec<&MeasureCondition>> = BTreeMap::new();
    for condition in conditions.iter().copied() {
        by_code.entry(condition.condition_code).or_default().push(condition);
    }
    by_code
        .values()
        .map(|group| single_strategy(measure_id, group, texts, locale))
        .collect()
}

fn complex_strategy(
    measure_id: &str,
    conditions: &[&MeasureCondition],
    texts: &ResolvedTexts,
    locale: Locale,
) -> MeasureOptions {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut common = Vec::new();
    let mut disjoint_certificates = Vec::new();
    let mut disjoint_threshold = None;

    for (index, condition) in conditions.iter().copied().enumerate() {
        let Some(key) = condition.condition_key() else {
            continue;
        };
        if !seen.insert(key) {
            continue;
        }
        let recurs = conditions[index + 1..]
            .iter()
            .any(|later| later.condition_key() == Some(key));
        if recurs {
            common.push(condition);
        } else if condition.document_code().is_some() {
            disjoint_certificates.push(condition);
        } else if condition.classification() == MeasureConditionType::Threshold {
            if disjoint_threshold.is_none() {
                disjoint_threshold = Some(condition);
            } else {
                tracing::debug!(
                    measure_id,
                    condition_id = %condition.id,
                    "ignoring additional disjoint threshold"
                );
            }
        }
    }

    let mut options = ordered_options(measure_id, &common, texts, locale);
    disjoint_certificates.sort_by(|a, b| a.document_code().cmp(&b.document_code()));
    if let Some(option) = disjoint_option(
        measure_id,
        &disjoint_certificates,
        disjoint_threshold,
        texts,
        locale,
    ) {
        options.push(option);
    }
    MeasureOptions::new(options)
}

fn disjoint_option(
    measure_id: &str,
    certificates: &[&MeasureCondition],
    threshold: Option<&MeasureCondition>,
    texts: &ResolvedTexts,
    locale: Locale,
) -> Option<MeasureOption> {
    match (certificates, threshold) {
        ([], _) => None,
        ([first, second, ..], _) => {
            let certificate_code = format!(
                "{} & {}",
                first.document_code().unwrap_or_default(),
                second.document_code().unwrap_or_default()
            );
            let description = join_certificate_texts(
                Some(&texts.text_for(first)),
                Some(&texts.text_for(second)),
                Phrasebook::for_locale(locale).and,
            );
            Some(MeasureOption::MultiCertificate {
                certificate_code,
                description,
            })
        }
        ([only], Some(threshold)) => match describe_threshold(threshold, locale) {
            Ok(rendered) => Some(MeasureOption::ExceptionAndThreshold {
                certificate_code: only.document_code().unwrap_or_default().to_string(),
                subtype: rendered.subtype,
                description: join_exception_and_threshold(
                    &texts.text_for(only),
                    &rendered.text,
                    Phrasebook::for_locale(locale).shipment,
                    Phrasebook::for_locale(locale).and,
                ),
            }),
            Err(error) => {
                tracing::warn!(
                    measure_id,
                    condition_id = %threshold.id,
                    document_code = only.document_code().unwrap_or_default(),
                    %error,
                    "omitting exception and threshold option"
                );
                None
            }
        },
        ([only], None) => {
            tracing::debug!(
                measure_id,
                document_code = only.document_code().unwrap_or_default(),
                "single disjoint certificate without threshold, no combined option"
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Documentary options (type rank, then document code) followed by
/// threshold options (condition key).
fn ordered_options(
    measure_id: &str,
    conditions: &[&MeasureCondition],
    texts: &ResolvedTexts,
    locale: Locale,
) -> Vec<MeasureOption> {
    let mut documentary: Vec<&MeasureCondition> = conditions
        .iter()
        .copied()
        .filter(|c| c.document_code().is_some())
        .collect();
    documentary.sort_by(|a, b| {
        (a.classification().rank(), a.document_code())
            .cmp(&(b.classification().rank(), b.document_code()))
    });

    let mut thresholds: Vec<&MeasureCondition> = conditions
        .iter()
        .copied()
        .filter(|c| c.classification() == MeasureConditionType::Threshold)
        .collect();
    thresholds.sort_by(|a, b| a.condition_key().cmp(&b.condition_key()));

    let certificates = documentary
        .iter()
        .filter(|c| c.classification() == MeasureConditionType::Certificate)
        .count();

    documentary
        .into_iter()
        .chain(thresholds)
        .filter_map(|c| to_option(measure_id, c, certificates, texts, locale))
        .collect()
}

fn to_option(
    measure_id: &str,
    condition: &MeasureCondition,
    certificates: usize,
    texts: &ResolvedTexts,
    locale: Locale,
) -> Option<MeasureOption> {
    match condition.classification() {
        MeasureConditionType::Certificate => {
            let text = texts.text_for(condition);
            let description = if certificates > 1 {
                decorate_certificate(&text)
            } else {
                text
            };
            Some(MeasureOption::Certificate {
                certificate_code: condition.document_code()?.to_string(),
                description,
            })
        }
        MeasureConditionType::Exception => Some(MeasureOption::Exception {
            certificate_code: condition.document_code()?.to_string(),
            description: rewrite_exception(&texts.text_for(condition)),
        }),
        MeasureConditionType::Threshold => match describe_threshold(condition, locale) {
            Ok(rendered) => Some(MeasureOption::Threshold {
                subtype: rendered.subtype,
                description: rendered.text,
            }),
            Err(error) => {
                tracing::warn!(
                    measure_id,
                    condition_id = %condition.id,
                    %error,
                    "omitting threshold option"
                );
                None
            }
        },
        MeasureConditionType::Negative => None,
    }
}
