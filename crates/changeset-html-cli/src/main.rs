//! changeset-html: render changesets and git commits as highlighted HTML
//!
//! This binary reads changeset text from a file, stdin, or a git repository
//! and writes a minimal HTML document with diff lines colored.

use std::process::ExitCode;

use changeset_html_cli::config::Config;
use changeset_html_cli::run::run;
use clap::Parser;
use tracing::{debug, error};

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the document
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "parsed configuration");

    if let Err(err) = config.validate() {
        error!("{err}");
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
