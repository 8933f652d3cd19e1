//! Augmentation harness CLI binary

use anyhow::Result;

use augment_harness::cli::CliApp;

fn main() -> Result<()> {
    // Parse command line arguments
    let matches = CliApp::app().get_matches();

    // Initialize logging
    let default_filter = if matches.get_flag("verbose") {
        "augment_harness=debug"
    } else {
        "augment_harness=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    // Run the CLI application
    CliApp::run(&matches)
}
