//! CLI interface for over-under
//!
//! Provides subcommands for:
//! - `analyze`: Value one instrument
//! - `list`: Show selectable identifiers
//! - `config`: Show the effective configuration

mod analyze;
mod list;

pub use analyze::AnalyzeArgs;
pub use list::ListArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "over-under")]
#[command(about = "Rule-based over/under valuation verdicts for equities, bonds and options")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Value one instrument
    Analyze(AnalyzeArgs),
    /// Show selectable identifiers for an asset class
    List(ListArgs),
    /// Show configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::AssetClass;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "over-under",
            "analyze",
            "derivative",
            "TSLA_call_250",
            "--json",
            "--no-insight",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.asset_class, AssetClass::Derivative);
                assert_eq!(args.identifier, "TSLA_call_250");
                assert!(args.json);
                assert!(args.no_insight);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.config, "config.toml");
    }

    #[test]
    fn test_parse_list_with_config() {
        let cli = Cli::try_parse_from(["over-under", "-c", "alt.toml", "list", "bond"]).unwrap();
        assert_eq!(cli.config, "alt.toml");
        assert!(matches!(
            cli.command,
            Commands::List(ListArgs {
                asset_class: AssetClass::Bond
            })
        ));
    }

    #[test]
    fn test_rejects_unknown_class() {
        assert!(Cli::try_parse_from(["over-under", "list", "crypto"]).is_err());
    }
}
