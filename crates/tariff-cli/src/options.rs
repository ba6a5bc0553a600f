//! # Options Subcommand
//!
//! Synthesizes the option groups of a single measure, for checking how a
//! measure's conditions read without building a full response.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tariff_core::{CommodityCode, Locale, TradeType};
use tariff_guidance::PipelineConfig;
use tariff_measures::{assemble_measures, is_complex, OptionSynthesizer};

use crate::input::{load_commodities, load_content};

/// Arguments for the options subcommand.
#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Commodity file (YAML or JSON, one commodity or a list).
    #[arg(long)]
    pub commodities: PathBuf,

    /// Content bundle providing document text overrides.
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Ten-digit commodity code.
    #[arg(long)]
    pub code: String,

    /// Measure id within the commodity.
    #[arg(long)]
    pub measure_id: String,

    /// Trade direction the document text is written for.
    #[arg(long, default_value = "import")]
    pub trade_type: TradeType,

    /// Output locale; defaults to the configured locale.
    #[arg(long)]
    pub locale: Option<Locale>,
}

/// Execute the options subcommand.
pub async fn run_options(args: &OptionsArgs, config: &PipelineConfig) -> Result<u8> {
    let code = CommodityCode::new(&args.code).context("invalid --code")?;
    let commodity = load_commodities(&args.commodities)?
        .into_iter()
        .find(|c| c.commodity_code == code)
        .with_context(|| format!("commodity {code} not in {}", args.commodities.display()))?;
    let measures = assemble_measures(&commodity)
        .with_context(|| format!("failed to assemble measures for {code}"))?;
    let measure = measures
        .iter()
        .find(|m| m.id == args.measure_id)
        .with_context(|| format!("measure {} not found for {code}", args.measure_id))?;

    let (documents, _, _) = load_content(args.content.as_deref())?.into_adapters();
    let synthesizer = OptionSynthesizer::new(Arc::new(documents));
    let locale = args.locale.unwrap_or(config.default_locale);
    tracing::debug!(
        measure_id = %measure.id,
        complex = is_complex(&measure.measure_conditions),
        "synthesizing measure options"
    );
    let groups = synthesizer
        .synthesize(&measure.id, &measure.measure_conditions, args.trade_type, locale)
        .await
        .with_context(|| format!("failed to synthesize options for measure {}", measure.id))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&groups).context("failed to serialise options")?
    );
    Ok(0)
}
