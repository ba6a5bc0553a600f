//! # Measure Filtering Engine
//!
//! Selects the measures of a commodity that apply to one trade direction
//! and one comparison country (origin for imports, destination for
//! exports).
//!
//! ## Geography
//!
//! EU member states are compared as the `"EU"` sentinel. A measure
//! applies when its area is the country itself (country-specific), or when
//! its area is a group whose direct children include the country and the
//! country is not excluded (group-level). For restrictive measures a
//! country-specific measure suppresses group-level measures of the same
//! measure type; tax and duty measures are unioned unconditionally.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use tariff_core::{normalise_country, TradeType};

use crate::measure::Measure;

/// Measure type series treated as restrictive.
pub const RESTRICTIVE_SERIES: &[&str] = &["A", "B"];

/// Restrictive-series measure types that carry no trader-facing restriction.
pub const EXCLUDED_RESTRICTIVE_MEASURE_TYPES: &[&str] =
    &["464", "481", "482", "483", "484", "495", "496", "730"];

/// Measure type series treated as tax or duty.
pub const TAX_AND_DUTY_SERIES: &[&str] = &["C", "D", "J", "P", "Q"];

/// Restrictive measures applying to `trade_type` and `country`.
///
/// Order of the result is not significant.
pub fn select_restrictive_measures<'a>(
    measures: &'a [Measure],
    trade_type: TradeType,
    country: &str,
) -> Vec<&'a Measure> {
    let candidates = measures.iter().filter(|m| {
        m.applies_to(trade_type)
            && RESTRICTIVE_SERIES.contains(&m.series_id())
            && !EXCLUDED_RESTRICTIVE_MEASURE_TYPES.contains(&m.measure_type.id.as_str())
    });
    let (specific, group) = split_by_geography(candidates, country);

    let specific_types: BTreeSet<&str> =
        specific.iter().map(|m| m.measure_type.id.as_str()).collect();
    let group = group
        .into_iter()
        .filter(|m| !specific_types.contains(m.measure_type.id.as_str()));

    let selected: Vec<&Measure> = specific.iter().copied().chain(group).collect();
    tracing::debug!(
        %trade_type,
        country,
        country_specific = specific.len(),
        selected = selected.len(),
        "selected restrictive measures"
    );
    selected
}

/// Tax and duty measures applying to `trade_type` and `country`.
pub fn select_tax_and_duty_measures<'a>(
    measures: &'a [Measure],
    trade_type: TradeType,
    country: &str,
) -> Vec<&'a Measure> {
    let candidates = measures
        .iter()
        .filter(|m| m.applies_to(trade_type) && TAX_AND_DUTY_SERIES.contains(&m.series_id()));
    let (specific, group) = split_by_geography(candidates, country);
    specific.into_iter().chain(group).collect()
}

/// Narrow measures to those relevant to an additional code.
///
/// With no code, or a code no measure carries, the input is returned
/// unchanged. A residual code keeps only measures without an additional
/// code; any other code keeps those plus the measures carrying it.
pub fn narrow_by_additional_code<M: Borrow<Measure>>(
    measures: Vec<M>,
    additional_code: Option<&str>,
) -> Vec<M> {
    let Some(code) = additional_code else {
        return measures;
    };
    let residual = match measures
        .iter()
        .find_map(|m| m.borrow().additional_code.as_ref().filter(|ac| ac.code == code))
    {
        Some(found) => found.residual,
        None => return measures,
    };

    measures
        .into_iter()
        .filter(|m| match m.borrow().additional_code_value() {
            None => true,
            Some(_) if residual => false,
            Some(own) => own == code,
        })
        .collect()
}

/// Split candidates into (country-specific, group-level) measures.
fn split_by_geography<'a>(
    candidates: impl Iterator<Item = &'a Measure>,
    country: &str,
) -> (Vec<&'a Measure>, Vec<&'a Measure>) {
    let normalised = normalise_country(country);
    let mut specific = Vec::new();
    let mut group = Vec::new();
    for measure in candidates {
        let area = &measure.geographical_area;
        if area.id == normalised {
            specific.push(measure);
        } else if area.covers(normalised) && !measure.excludes(country) && !measure.excludes(normalised)
        {
            group.push(measure);
        }
    }
    (specific, group)
}
