//! # tariff CLI entry point
//!
//! Parses command-line arguments, installs logging and dispatches to the
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tariff_cli::evaluate::{run_evaluate, EvaluateArgs};
use tariff_cli::input::load_config;
use tariff_cli::options::{run_options, OptionsArgs};

/// Trade guidance CLI.
///
/// Classifies the measures on a commodity, renders their options as
/// trader-facing text, and assembles the guidance for a trade request.
#[derive(Parser, Debug)]
#[command(name = "tariff", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a trade request and print the guidance response.
    Evaluate(EvaluateArgs),

    /// Print the option groups synthesized for one measure.
    Options(OptionsArgs),
}

fn log_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .with_target(false);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let result = match load_config(cli.config.as_deref()) {
        Ok(config) => match &cli.command {
            Commands::Evaluate(args) => run_evaluate(args, &config).await,
            Commands::Options(args) => run_options(args, &config).await,
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tariff_core::{Locale, TradeType, UserType};

    #[test]
    fn cli_parse_evaluate() {
        let cli = Cli::try_parse_from([
            "tariff",
            "evaluate",
            "--commodities",
            "trout.yaml",
            "--code",
            "0302110000",
            "--origin",
            "CN",
            "--destination",
            "GB",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 0);
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(args.trade_type, TradeType::Import);
        assert_eq!(args.user_type, UserType::Importer);
        assert!(args.locale.is_none());
        assert!(args.content.is_none());
    }

    #[test]
    fn cli_parse_evaluate_with_all_flags() {
        let cli = Cli::try_parse_from([
            "tariff",
            "-vv",
            "--json-logs",
            "evaluate",
            "--commodities",
            "trout.yaml",
            "--content",
            "content.yaml",
            "--code",
            "0302110000",
            "--trade-type",
            "export",
            "--origin",
            "GB",
            "--destination",
            "US",
            "--user-type",
            "intermediary",
            "--locale",
            "cy",
            "--additional-code",
            "4200",
            "--pretty",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json_logs);
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(args.trade_type, TradeType::Export);
        assert_eq!(args.user_type, UserType::Intermediary);
        assert_eq!(args.locale, Some(Locale::Cy));
        assert_eq!(args.additional_code.as_deref(), Some("4200"));
        assert!(args.pretty);
    }

    #[test]
    fn cli_parse_options() {
        let cli = Cli::try_parse_from([
            "tariff",
            "options",
            "--commodities",
            "trout.yaml",
            "--code",
            "0302110000",
            "--measure-id",
            "m1",
        ])
        .unwrap();
        let Commands::Options(args) = cli.command else {
            panic!("expected options");
        };
        assert_eq!(args.measure_id, "m1");
    }

    #[test]
    fn cli_rejects_unknown_trade_type() {
        let result = Cli::try_parse_from([
            "tariff",
            "evaluate",
            "--commodities",
            "trout.yaml",
            "--code",
            "0302110000",
            "--trade-type",
            "transit",
            "--origin",
            "CN",
            "--destination",
            "GB",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["tariff"]).is_err());
    }

    #[test]
    fn cli_config_is_global() {
        let cli = Cli::try_parse_from([
            "tariff",
            "options",
            "--config",
            "tariff.yaml",
            "--commodities",
            "trout.yaml",
            "--code",
            "0302110000",
            "--measure-id",
            "m1",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("tariff.yaml")));
    }
}
