//! Info command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};

use crate::cli::utils;
use crate::plugin::{ClassRegistration, ResolvedPackage};

pub fn command() -> Command {
    Command::new("info")
        .about("Show plugin package information")
        .arg(
            clap::Arg::new("package_id")
                .help("Package id, e.g. butter_fingers_perturbation")
                .required(true),
        )
        .arg(
            clap::Arg::new("filter")
                .long("filter")
                .help("Look the package up in the filter tree")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let harness = utils::create_app(matches)?;
    let package_id = matches
        .get_one::<String>("package_id")
        .ok_or_else(|| anyhow::anyhow!("package id is required"))?;

    let registry = if matches.get_flag("filter") {
        harness.filters()
    } else {
        harness.transformations()
    };
    let package = registry.resolve(package_id)?;

    println!("Package: {}", package.package_id);
    println!("Directory: {}", package.package_dir.display());
    print_fixtures(&package);

    for class in &package.registration.classes {
        println!();
        print_class(class);
    }

    Ok(())
}

fn print_fixtures(package: &ResolvedPackage) {
    let fixture_path = package.fixture_path();
    match package.load_fixtures() {
        Ok(cases) => println!("Fixtures: {} ({} cases)", fixture_path.display(), cases.len()),
        Err(e) => println!("Fixtures: {e}"),
    }
}

fn print_class(class: &ClassRegistration) {
    let descriptor = class.descriptor;
    let tasks: Vec<&str> = descriptor.tasks.iter().map(|task| task.as_str()).collect();

    println!("Class: {}", descriptor.class_name);
    println!("  Interface: {}", descriptor.capability);
    println!("  Tasks: {}", tasks.join(", "));
    if let Some(task) = descriptor.default_task() {
        println!("  Default task: {task}");
    }
    if descriptor.locales.is_empty() {
        println!("  Locales: any");
    } else {
        println!("  Locales: {}", descriptor.locales.join(", "));
    }
    println!("  Heavy: {}", if descriptor.is_heavy() { "yes" } else { "no" });
}
