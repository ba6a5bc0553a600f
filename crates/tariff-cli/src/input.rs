//! # Input Files
//!
//! Loading of the commodity file, the content bundle and the pipeline
//! configuration, shared by every subcommand.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tariff_content::ContentBundle;
use tariff_guidance::PipelineConfig;
use tariff_measures::CommodityData;

/// A commodity file holds one commodity or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum CommodityFile {
    Many(Vec<CommodityData>),
    One(Box<CommodityData>),
}

/// Parse commodities from YAML or JSON text.
pub fn parse_commodities(raw: &str) -> Result<Vec<CommodityData>> {
    let file: CommodityFile =
        serde_yaml::from_str(raw).context("commodity file is neither a commodity nor a list")?;
    Ok(match file {
        CommodityFile::Many(list) => list,
        CommodityFile::One(one) => vec![*one],
    })
}

/// Read the commodity file.
pub fn load_commodities(path: &Path) -> Result<Vec<CommodityData>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read commodity file {}", path.display()))?;
    let commodities = parse_commodities(&raw)
        .with_context(|| format!("failed to parse commodity file {}", path.display()))?;
    tracing::info!(path = %path.display(), commodities = commodities.len(), "loaded commodities");
    Ok(commodities)
}

/// Read the content bundle, or start from an empty one.
pub fn load_content(path: Option<&Path>) -> Result<ContentBundle> {
    match path {
        Some(path) => ContentBundle::load(path)
            .with_context(|| format!("failed to load content bundle {}", path.display())),
        None => {
            tracing::warn!("no content bundle given; guidance and document text will be empty");
            Ok(ContentBundle::default())
        }
    }
}

/// Read the configuration file, if any, then apply environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let base = match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    base.with_env_overrides()
        .context("invalid configuration in environment")
}
