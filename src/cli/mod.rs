//! CLI command implementations

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("augment-harness")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Discover, dispatch and test text augmentation plugins")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file (defaults to .augment-harness.yaml if present)")
                    .global(true),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Enable debug logging")
                    .action(ArgAction::SetTrue)
                    .global(true),
            )
            .subcommand(commands::test::command())
            .subcommand(commands::list::command())
            .subcommand(commands::info::command())
            .subcommand(commands::generate::command())
    }

    /// Run the CLI application
    pub fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("test", sub_matches)) => commands::test::run(sub_matches),
            Some(("list", sub_matches)) => commands::list::run(sub_matches),
            Some(("info", sub_matches)) => commands::info::run(sub_matches),
            Some(("generate", sub_matches)) => commands::generate::run(sub_matches),
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::Result;
    use std::path::PathBuf;

    use crate::{AugmentHarness, HarnessConfig};

    /// Configuration file path from arguments, if one was given
    pub fn get_config_path(matches: &clap::ArgMatches) -> Option<PathBuf> {
        matches.get_one::<String>("config").map(PathBuf::from)
    }

    /// Load configuration from `--config`, a default file or built-in defaults
    pub fn load_config(matches: &clap::ArgMatches) -> Result<HarnessConfig> {
        let config_path = get_config_path(matches);
        Ok(HarnessConfig::discover(config_path.as_deref())?)
    }

    /// Create a harness over the built-in catalog
    pub fn create_app(matches: &clap::ArgMatches) -> Result<AugmentHarness> {
        let config = load_config(matches)?;
        Ok(AugmentHarness::new(config)?)
    }
}
