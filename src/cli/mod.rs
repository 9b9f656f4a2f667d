//! CLI command implementations

pub mod check;
pub mod connect;
pub mod definition;
pub mod update;

pub use definition::{Cli, Commands, ConnectArgs};

use crossterm::style::Stylize;

use crate::resolve::ResolveError;

pub const EXIT_FAILURE: i32 = 1;

/// Runs the parsed command line and returns the process exit code.
pub async fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Some(Commands::Check) => check::run(),
        Some(Commands::Update) => update::run().await,
        None => connect::run(cli.connect).await,
    }
}

/// Writes the one-line diagnostic for `err` (plus any remediation) to stderr.
pub fn report_error(err: &anyhow::Error) {
    eprintln!("{}", format_error(err).red());

    if let Some(remediation) = err
        .downcast_ref::<ResolveError>()
        .and_then(ResolveError::remediation)
    {
        eprintln!();
        eprintln!("{}", remediation);
    }
}

fn format_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ResolveError>() {
        // API errors carry the failing call as context; show the whole chain
        Some(ResolveError::Api(inner)) => format!("✗ {:#}", inner),
        _ => format!("✗ {:#}", err),
    }
}
