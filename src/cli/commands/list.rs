//! List command implementation

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::cli::utils;
use crate::TaskType;

pub fn command() -> Command {
    Command::new("list")
        .about("List plugin package ids")
        .arg(
            Arg::new("all")
                .long("all")
                .help("Include heavy transformations")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("task")
                .long("task")
                .value_name("TASK_TYPE")
                .help("Only transformations declaring this task type")
                .value_parser(clap::value_parser!(TaskType))
                .conflicts_with("filters"),
        )
        .arg(
            Arg::new("filters")
                .long("filters")
                .help("List filter packages instead of transformations")
                .action(ArgAction::SetTrue),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let harness = utils::create_app(matches)?;
    let include_heavy = matches.get_flag("all") || harness.config().include_heavy;

    let names: Vec<String> = if matches.get_flag("filters") {
        harness
            .filters()
            .resolve_all()?
            .into_iter()
            .map(|package| package.package_id)
            .collect()
    } else if let Some(task) = matches.get_one::<TaskType>("task") {
        harness
            .plugin_set()
            .plugins_for_task(*task, include_heavy)?
            .into_iter()
            .map(|plugin| plugin.package_id)
            .collect()
    } else {
        harness.plugin_set().all_names(include_heavy)?.collect()
    };

    if names.is_empty() {
        println!("No plugins found.");
    }
    for name in names {
        println!("{name}");
    }

    Ok(())
}
