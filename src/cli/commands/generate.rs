//! Generate command implementation

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::cli::utils;

pub fn command() -> Command {
    Command::new("generate")
        .about("Run a sentence through every sentence-level transformation")
        .arg(
            Arg::new("sentence")
                .help("Input sentence")
                .required(true),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .help("Include heavy transformations")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .value_name("LOCALE")
                .help("Only transformations supporting this locale (defaults to the configured one)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let harness = utils::create_app(matches)?;
    let sentence = matches
        .get_one::<String>("sentence")
        .ok_or_else(|| anyhow::anyhow!("sentence is required"))?;
    let include_heavy = matches.get_flag("all") || harness.config().include_heavy;
    let locale = matches
        .get_one::<String>("locale")
        .cloned()
        .unwrap_or_else(|| harness.config().locale.clone());

    let generations = harness
        .plugin_set()
        .generate_all(sentence, include_heavy, Some(&locale))?;

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => println!("{}", serde_json::to_string_pretty(&generations)?),
        _ => {
            for (name, output) in &generations.entries {
                println!("{name}: {output}");
            }
        }
    }

    Ok(())
}
