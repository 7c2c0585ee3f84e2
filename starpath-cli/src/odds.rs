//! `odds` command implementation for the Starpath CLI.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use starpath_core::{LogObserver, OddsConfig, OddsEstimator, OddsReport, WaitPolicy};
use starpath_data::{Mission, load_schedule};

use crate::{
    ARG_ODDS_LOG_LEVEL, ARG_ODDS_SCHEDULE, ARG_ODDS_VESSEL, ARG_ODDS_WAIT_POLICY, CliError,
    DEFAULT_LOG_LEVEL, ENV_ODDS_SCHEDULE, ENV_ODDS_VESSEL,
};

/// How long the vessel keeps waiting to dodge bounty hunters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum WaitPolicyArg {
    /// Keep re-testing the originally scheduled day.
    ScheduledDay,
    /// Stop waiting as soon as the delayed day is clear.
    DelayedDay,
}

impl From<WaitPolicyArg> for WaitPolicy {
    fn from(value: WaitPolicyArg) -> Self {
        match value {
            WaitPolicyArg::ScheduledDay => Self::ScheduledDay,
            WaitPolicyArg::DelayedDay => Self::DelayedDay,
        }
    }
}

/// CLI arguments for the `odds` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Compute the probability that the vessel described by the \
                 manifest reaches its destination before the countdown ends \
                 without being captured. Paths can come from CLI arguments, \
                 configuration files, or environment variables.",
    about = "Give me the odds"
)]
#[ortho_config(prefix = "STARPATH")]
pub(crate) struct OddsArgs {
    /// Path to the vessel manifest JSON (`millennium-falcon.json`).
    #[arg(value_name = "vessel")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) vessel: Option<Utf8PathBuf>,
    /// Path to the bounty hunter schedule JSON (`empire.json`).
    #[arg(value_name = "schedule")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) schedule: Option<Utf8PathBuf>,
    /// Which day to re-test while waiting out bounty hunters.
    #[arg(long = ARG_ODDS_WAIT_POLICY, value_enum, value_name = "policy")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) wait_policy: Option<WaitPolicyArg>,
    /// Log filter in `env_logger` syntax (e.g. "debug" or "starpath_core=trace").
    #[arg(long = ARG_ODDS_LOG_LEVEL, value_name = "filter")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) log_level: Option<String>,
}

impl OddsArgs {
    pub(crate) fn into_config(self) -> Result<OddsCommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OddsCommandConfig::try_from(merged)
    }
}

/// Resolved `odds` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OddsCommandConfig {
    /// Path to the vessel manifest.
    pub(crate) vessel: Utf8PathBuf,
    /// Path to the bounty hunter schedule.
    pub(crate) schedule: Utf8PathBuf,
    /// Waiting rule handed to the schedule adjuster.
    pub(crate) wait_policy: WaitPolicy,
    /// `env_logger` filter string.
    pub(crate) log_level: String,
}

impl OddsCommandConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.vessel, ARG_ODDS_VESSEL)?;
        require_existing(&self.schedule, ARG_ODDS_SCHEDULE)?;
        Ok(())
    }

    fn odds_config(&self) -> OddsConfig {
        OddsConfig {
            wait_policy: self.wait_policy,
        }
    }
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match starpath_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl TryFrom<OddsArgs> for OddsCommandConfig {
    type Error = CliError;

    fn try_from(args: OddsArgs) -> Result<Self, Self::Error> {
        let vessel = args.vessel.ok_or(CliError::MissingArgument {
            field: ARG_ODDS_VESSEL,
            env: ENV_ODDS_VESSEL,
        })?;
        let schedule = args.schedule.ok_or(CliError::MissingArgument {
            field: ARG_ODDS_SCHEDULE,
            env: ENV_ODDS_SCHEDULE,
        })?;
        Ok(Self {
            vessel,
            schedule,
            wait_policy: args.wait_policy.map(WaitPolicy::from).unwrap_or_default(),
            log_level: args
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }
}

/// Builds an estimator for the current odds invocation.
pub(crate) trait EstimatorBuilder {
    fn build(&self, config: &OddsCommandConfig) -> Result<Box<dyn OddsEstimator>, CliError>;
}

/// Loads the mission from disk and estimates with the core calculator.
pub(crate) struct DefaultEstimatorBuilder;

impl EstimatorBuilder for DefaultEstimatorBuilder {
    fn build(&self, config: &OddsCommandConfig) -> Result<Box<dyn OddsEstimator>, CliError> {
        let mission = Mission::load(&config.vessel)?;
        Ok(Box::new(
            mission.into_calculator(config.odds_config(), LogObserver),
        ))
    }
}

pub(crate) fn run_odds(args: OddsArgs) -> Result<(), CliError> {
    let config = resolve_odds_config(args)?;
    init_logging(&config.log_level);
    let mut stdout = io::stdout().lock();
    execute_odds(&config, &DefaultEstimatorBuilder, &mut stdout)
}

pub(crate) fn run_odds_with(
    args: OddsArgs,
    builder: &dyn EstimatorBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_odds_config(args)?;
    execute_odds(&config, builder, writer)
}

fn resolve_odds_config(args: OddsArgs) -> Result<OddsCommandConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_odds(
    config: &OddsCommandConfig,
    builder: &dyn EstimatorBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let schedule = load_schedule(&config.schedule)?;
    let estimator = builder.build(config)?;
    let report = estimator.estimate(&schedule)?;
    info!(
        "success rate {}% after scoring {} itineraries in {:?}",
        report.success_rate,
        report.diagnostics.itineraries_within_deadline,
        report.diagnostics.solve_time
    );
    write_report(writer, &report)
}

/// Install `env_logger` with `filter`, writing to stderr.
///
/// A logger installed earlier in the process is kept.
pub(crate) fn init_logging(filter: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if builder.try_init().is_err() {
        debug!("logger already initialised; ignoring filter {filter:?}");
    }
}

fn write_report(writer: &mut dyn Write, report: &OddsReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OddsCommandConfig, CliError> {
    let merged = OddsArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OddsCommandConfig::try_from(merged)
}
