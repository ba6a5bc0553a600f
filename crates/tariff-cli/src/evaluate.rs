//! # Evaluate Subcommand
//!
//! Answers one trade request and prints the response tree as JSON.
//!
//! ```bash
//! tariff evaluate --commodities trout.yaml --content content.yaml \
//!     --code 0302110000 --trade-type import --origin CN --destination GB
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tariff_core::{CommodityCode, CountryCode, Locale, TradeType, UserType};
use tariff_guidance::{
    GuidancePipeline, InMemoryCommoditySource, PipelineConfig, ResponseStatus, TradeRequest,
};

use crate::input::{load_commodities, load_content};

/// Arguments for the evaluate subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Commodity file (YAML or JSON, one commodity or a list).
    #[arg(long)]
    pub commodities: PathBuf,

    /// Content bundle with guidance, document text and prohibitions.
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Ten-digit commodity code.
    #[arg(long)]
    pub code: String,

    /// Trade direction: import or export.
    #[arg(long, default_value = "import")]
    pub trade_type: TradeType,

    /// Origin country code.
    #[arg(long)]
    pub origin: String,

    /// Destination country code.
    #[arg(long)]
    pub destination: String,

    /// Reader role: importer, exporter or intermediary.
    #[arg(long, default_value = "importer")]
    pub user_type: UserType,

    /// Response locale; defaults to the configured locale.
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Additional code narrowing the commodity.
    #[arg(long)]
    pub additional_code: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

impl EvaluateArgs {
    /// Build the pipeline request.
    pub fn request(&self, config: &PipelineConfig) -> Result<TradeRequest> {
        Ok(TradeRequest {
            commodity_code: CommodityCode::new(&self.code).context("invalid --code")?,
            trade_type: self.trade_type,
            origin_country: CountryCode::new(&self.origin).context("invalid --origin")?,
            destination_country: CountryCode::new(&self.destination)
                .context("invalid --destination")?,
            user_type: self.user_type,
            locale: self.locale.unwrap_or(config.default_locale),
            additional_code: self.additional_code.clone(),
        })
    }
}

/// Process exit code for a failed request.
pub fn exit_code(status: ResponseStatus) -> u8 {
    match status {
        ResponseStatus::Internal => 1,
        ResponseStatus::Validation => 2,
        ResponseStatus::NotFound => 3,
    }
}

/// Execute the evaluate subcommand.
pub async fn run_evaluate(args: &EvaluateArgs, config: &PipelineConfig) -> Result<u8> {
    let request = args.request(config)?;
    let commodities = load_commodities(&args.commodities)?;
    let bundle = load_content(args.content.as_deref())?;
    let pipeline = GuidancePipeline::from_bundle(
        Arc::new(InMemoryCommoditySource::new(commodities)),
        bundle,
        config,
    );

    match pipeline.evaluate(&request).await {
        Ok(response) => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&response)
            } else {
                serde_json::to_string(&response)
            }
            .context("failed to serialise response")?;
            println!("{json}");
            Ok(0)
        }
        Err(e) => {
            tracing::error!(status = e.status_code(), "{e}");
            Ok(exit_code(e.status()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> EvaluateArgs {
        EvaluateArgs {
            commodities: PathBuf::from("trout.yaml"),
            content: None,
            code: "0302110000".into(),
            trade_type: TradeType::Import,
            origin: "cn".into(),
            destination: "GB".into(),
            user_type: UserType::Importer,
            locale: None,
            additional_code: None,
            pretty: false,
        }
    }

    #[test]
    fn request_uses_configured_locale_by_default() {
        let config = PipelineConfig {
            default_locale: Locale::Cy,
            ..PipelineConfig::default()
        };
        let request = args().request(&config).unwrap();
        assert_eq!(request.locale, Locale::Cy);
        assert_eq!(request.origin_country.as_str(), "CN");
    }

    #[test]
    fn explicit_locale_wins() {
        let mut args = args();
        args.locale = Some(Locale::En);
        let config = PipelineConfig {
            default_locale: Locale::Cy,
            ..PipelineConfig::default()
        };
        assert_eq!(args.request(&config).unwrap().locale, Locale::En);
    }

    #[test]
    fn malformed_codes_are_rejected() {
        let mut args = args();
        args.code = "0302".into();
        assert!(args.request(&PipelineConfig::default()).is_err());
    }

    #[test]
    fn exit_codes_are_distinct() {
        assert_eq!(exit_code(ResponseStatus::Internal), 1);
        assert_eq!(exit_code(ResponseStatus::Validation), 2);
        assert_eq!(exit_code(ResponseStatus::NotFound), 3);
    }
}
