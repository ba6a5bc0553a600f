//! # Aggregation Pipeline
//!
//! Answers one guidance request:
//!
//! 1. Load the commodity and assemble its measures.
//! 2. Select restrictive and tax-and-duty measures for the trade direction
//!    and comparison country, narrowed by the additional code.
//! 3. Split restrictive measures into outright prohibitions and
//!    condition-based measures.
//! 4. Concurrently resolve prohibition text, synthesize option groups for
//!    every condition-based measure, and fetch guidance content (four step
//!    queries plus cached headers and super-headers).
//! 5. Merge everything into the ordered response tree.
//!
//! Any failing lookup fails the whole request. Options that cannot be
//! built are dropped inside the synthesizer and never reach this layer.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::try_join_all;
use tariff_content::{
    cached_headers, cached_super_headers, ContentBundle, GuidanceContentStore, GuidanceStep,
    HeaderCache, InMemoryHeaderCache, NavigationHeader, NavigationSuperHeader, ProhibitionSnapshot,
    RelatedEntity, StepMatch, StepQuery,
};
use tariff_measures::{
    assemble_measures, narrow_by_additional_code, select_restrictive_measures,
    select_tax_and_duty_measures, CommodityData, Measure, OptionSynthesizer,
};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::model::{
    HeaderGroup, Prohibition, RestrictiveMeasure, SuperHeaderGroup, TaxAndDutyStatus,
    TradeGuidanceResponse, TradeRequest,
};
use crate::source::CommoditySource;
use crate::tax::tax_and_duty_applicable;

/// Guidance content fetched for one request, before it is shaped into a tree.
#[derive(Debug, Clone, Default)]
pub struct GuidanceContent {
    /// Matching steps, unique by id, in id order.
    pub steps: Vec<GuidanceStep>,
    /// Headers for the user type and locale.
    pub headers: Vec<NavigationHeader>,
    /// Super-headers for the user type and locale.
    pub super_headers: Vec<NavigationSuperHeader>,
}

/// The aggregation pipeline. Cheap to clone; every collaborator is shared.
#[derive(Clone)]
pub struct GuidancePipeline {
    commodities: Arc<dyn CommoditySource>,
    guidance: Arc<dyn GuidanceContentStore>,
    header_cache: Arc<dyn HeaderCache>,
    prohibitions: Arc<ProhibitionSnapshot>,
    synthesizer: OptionSynthesizer,
}

impl std::fmt::Debug for GuidancePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuidancePipeline")
            .field("prohibitions", &self.prohibitions.len())
            .finish_non_exhaustive()
    }
}

impl GuidancePipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        commodities: Arc<dyn CommoditySource>,
        guidance: Arc<dyn GuidanceContentStore>,
        header_cache: Arc<dyn HeaderCache>,
        prohibitions: Arc<ProhibitionSnapshot>,
        synthesizer: OptionSynthesizer,
    ) -> Self {
        Self {
            commodities,
            guidance,
            header_cache,
            prohibitions,
            synthesizer,
        }
    }

    /// Build a pipeline serving content from an in-memory bundle.
    pub fn from_bundle(
        commodities: Arc<dyn CommoditySource>,
        bundle: ContentBundle,
        config: &PipelineConfig,
    ) -> Self {
        let (documents, guidance, prohibitions) = bundle.into_adapters();
        Self::new(
            commodities,
            Arc::new(guidance),
            Arc::new(InMemoryHeaderCache::new(config.header_cache_ttl_secs)),
            Arc::new(prohibitions),
            OptionSynthesizer::new(Arc::new(documents)),
        )
    }

    /// Answer a guidance request.
    pub async fn evaluate(
        &self,
        request: &TradeRequest,
    ) -> Result<TradeGuidanceResponse, PipelineError> {
        let commodity = self
            .commodities
            .commodity(&request.commodity_code)
            .await?
            .ok_or_else(|| {
                PipelineError::NotFound(format!("commodity {}", request.commodity_code))
            })?;
        let measures = assemble_measures(&commodity)?;

        let country = request.comparison_country();
        let additional_code = request.additional_code.as_deref();
        let restrictive = narrow_by_additional_code(
            select_restrictive_measures(&measures, request.trade_type, country),
            additional_code,
        );
        let (prohibitive, conditional): (Vec<&Measure>, Vec<&Measure>) =
            restrictive.into_iter().partition(|m| m.is_prohibitive());

        let tax_measures = narrow_by_additional_code(
            select_tax_and_duty_measures(&measures, request.trade_type, country),
            additional_code,
        );
        let mut tax_ids: Vec<String> = tax_measures.iter().map(|m| m.id.clone()).collect();
        tax_ids.sort();
        let tax_and_duty = TaxAndDutyStatus {
            applicable: tax_and_duty_applicable(
                request.trade_type,
                request.origin_country.as_str(),
                request.destination_country.as_str(),
            ),
            measure_ids: tax_ids,
        };

        let (prohibitions, restrictive_measures, content) = tokio::try_join!(
            async { Ok::<_, PipelineError>(self.resolve_prohibitions(&prohibitive, request)) },
            self.resolve_restrictive_measures(&conditional, request),
            self.fetch_guidance(&commodity, request),
        )?;

        let guidance = build_guidance_tree(content, &restrictive_measures, tax_and_duty.applicable);

        tracing::info!(
            commodity_code = %request.commodity_code,
            trade_type = %request.trade_type,
            country,
            restrictive = restrictive_measures.len(),
            prohibitions = prohibitions.len(),
            tax_and_duty = tax_and_duty.applicable,
            super_headers = guidance.len(),
            "evaluated trade guidance"
        );

        Ok(TradeGuidanceResponse {
            commodity_code: request.commodity_code.clone(),
            trade_type: request.trade_type,
            origin_country: request.origin_country.clone(),
            destination_country: request.destination_country.clone(),
            locale: request.locale,
            restrictive_measures,
            prohibitions,
            tax_and_duty,
            guidance,
        })
    }

    /// Prohibition records, by measure id.
    fn resolve_prohibitions(&self, measures: &[&Measure], request: &TradeRequest) -> Vec<Prohibition> {
        let origin = request.origin_country.as_str();
        let mut prohibitions: Vec<Prohibition> = measures
            .iter()
            .map(|m| {
                let description = m
                    .legal_act
                    .as_deref()
                    .and_then(|act| self.prohibitions.resolve(act, origin, request.locale))
                    .map(|d| d.description.clone());
                if description.is_none() {
                    tracing::debug!(measure_id = %m.id, legal_act = ?m.legal_act, "bare prohibition");
                }
                Prohibition {
                    measure_id: m.id.clone(),
                    legal_act: m.legal_act.clone(),
                    description,
                }
            })
            .collect();
        prohibitions.sort_by(|a, b| a.measure_id.cmp(&b.measure_id));
        prohibitions
    }

    /// Option groups for every condition-based measure, by measure type
    /// then measure id.
    async fn resolve_restrictive_measures(
        &self,
        measures: &[&Measure],
        request: &TradeRequest,
    ) -> Result<Vec<RestrictiveMeasure>, PipelineError> {
        let mut blocks = try_join_all(measures.iter().map(|m| async move {
            let options = self
                .synthesizer
                .synthesize(&m.id, &m.measure_conditions, request.trade_type, request.locale)
                .await?;
            Ok::<_, PipelineError>(RestrictiveMeasure::new(m, options))
        }))
        .await?;
        blocks.sort_by(|a, b| {
            a.measure_type_id
                .cmp(&b.measure_type_id)
                .then_with(|| a.measure_id.cmp(&b.measure_id))
        });
        Ok(blocks)
    }

    /// Steps by all four match strategies plus headers and super-headers.
    async fn fetch_guidance(
        &self,
        commodity: &CommodityData,
        request: &TradeRequest,
    ) -> Result<GuidanceContent, PipelineError> {
        let query = |matcher| StepQuery {
            trade_type: request.trade_type,
            user_type: request.user_type,
            locale: request.locale,
            matcher,
        };
        let general = query(StepMatch::General);
        let hierarchy = query(StepMatch::CommodityHierarchy(commodity.commodity_code.hierarchy()));
        let section = query(StepMatch::Section(commodity.section_id.clone()));
        let chapter = query(StepMatch::Chapter(commodity.chapter_id().to_string()));

        let store = self.guidance.as_ref();
        let cache = self.header_cache.as_ref();
        let (general, hierarchy, section, chapter, headers, super_headers) = tokio::try_join!(
            store.steps(&general),
            store.steps(&hierarchy),
            store.steps(&section),
            store.steps(&chapter),
            cached_headers(store, cache, request.user_type, request.locale),
            cached_super_headers(store, cache, request.user_type, request.locale),
        )?;

        let mut unique: BTreeMap<u32, GuidanceStep> = BTreeMap::new();
        for step in general.into_iter().chain(hierarchy).chain(section).chain(chapter) {
            unique.entry(step.id).or_insert(step);
        }
        tracing::debug!(
            commodity_code = %commodity.commodity_code,
            steps = unique.len(),
            headers = headers.len(),
            super_headers = super_headers.len(),
            "fetched guidance content"
        );
        Ok(GuidanceContent {
            steps: unique.into_values().collect(),
            headers,
            super_headers,
        })
    }
}

/// Shape guidance content into the ordered super-header tree.
///
/// Every header lists its steps (possibly none). Import-control headers
/// carry the restrictive measures that offer at least one option group;
/// tax-and-duty headers carry the tax flag. Headers whose super-header is
/// unknown are dropped.
pub fn build_guidance_tree(
    content: GuidanceContent,
    restrictive_measures: &[RestrictiveMeasure],
    tax_and_duty_applicable: bool,
) -> Vec<SuperHeaderGroup> {
    let mut steps_by_header: BTreeMap<u32, Vec<GuidanceStep>> = BTreeMap::new();
    for step in content.steps {
        steps_by_header.entry(step.header_id).or_default().push(step);
    }
    let attachable: Vec<RestrictiveMeasure> = restrictive_measures
        .iter()
        .filter(|m| m.has_options())
        .cloned()
        .collect();

    let mut groups: Vec<SuperHeaderGroup> = content
        .super_headers
        .into_iter()
        .map(|s| SuperHeaderGroup {
            id: s.id,
            order_index: s.order_index,
            description: s.description,
            explanatory_text: s.explanatory_text,
            headers: Vec::new(),
        })
        .collect();

    for header in content.headers {
        let Some(group) = groups.iter_mut().find(|g| g.id == header.super_header_id) else {
            tracing::warn!(
                header_id = header.id,
                super_header_id = header.super_header_id,
                "dropping header with unknown super-header"
            );
            continue;
        };
        let related_entity = header.related_entity;
        group.headers.push(HeaderGroup {
            id: header.id,
            order_index: header.order_index,
            description: header.description,
            related_entity,
            steps: steps_by_header.get(&header.id).cloned().unwrap_or_default(),
            restrictive_measures: match related_entity {
                Some(RelatedEntity::ImportControls) => attachable.clone(),
                _ => Vec::new(),
            },
            tax_and_duty_applicable: (related_entity == Some(RelatedEntity::TaxAndDuty))
                .then_some(tax_and_duty_applicable),
        });
    }

    groups.sort_by_key(|g| (g.order_index, g.id));
    for group in &mut groups {
        group.headers.sort_by_key(|h| (h.order_index, h.id));
    }
    groups
}
