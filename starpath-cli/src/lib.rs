//! Command-line interface for the Starpath odds engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod odds;
mod serve;

pub use error::CliError;

const ARG_ODDS_VESSEL: &str = "vessel";
const ARG_ODDS_SCHEDULE: &str = "schedule";
const ARG_ODDS_WAIT_POLICY: &str = "wait-policy";
const ARG_ODDS_LOG_LEVEL: &str = "log-level";
const ENV_ODDS_VESSEL: &str = "STARPATH_CMDS_ODDS_VESSEL";
const ENV_ODDS_SCHEDULE: &str = "STARPATH_CMDS_ODDS_SCHEDULE";
const ARG_SERVE_VESSEL: &str = "vessel";
const ARG_SERVE_BIND: &str = "bind";
const ARG_SERVE_WAIT_POLICY: &str = "wait-policy";
const ARG_SERVE_LOG_LEVEL: &str = "log-level";
const ENV_SERVE_VESSEL: &str = "STARPATH_CMDS_SERVE_VESSEL";

/// Log filter used when none is configured.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Run the Starpath CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, loading, estimation or
/// serving fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Odds(args) => odds::run_odds(args),
        Command::Serve(args) => serve::run_serve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "starpath",
    about = "Estimate the odds of a vessel reaching its destination",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute success odds for a vessel manifest against a bounty hunter
    /// schedule.
    Odds(odds::OddsArgs),
    /// Answer odds requests over HTTP for one vessel manifest.
    Serve(serve::ServeArgs),
}

#[cfg(test)]
mod tests;
