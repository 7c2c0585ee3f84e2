//! `serve` command: odds over HTTP.
//!
//! The vessel manifest and its routes database are loaded once at startup.
//! Each `POST /uploader` carries an adversary schedule as its JSON body and
//! is answered with `{"odds": <success rate>, "data": <the body>}`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use camino::Utf8PathBuf;
use clap::Parser;
use log::{error, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use starpath_core::{LogObserver, OddsConfig, OddsError, OddsEstimator, WaitPolicy};
use starpath_data::{Mission, ScheduleFileError, parse_schedule};
use thiserror::Error;
use tokio::task::JoinError;
use tower_http::cors::CorsLayer;

use crate::odds::{WaitPolicyArg, init_logging, require_existing};
use crate::{
    ARG_SERVE_BIND, ARG_SERVE_LOG_LEVEL, ARG_SERVE_VESSEL, ARG_SERVE_WAIT_POLICY, CliError,
    DEFAULT_LOG_LEVEL, ENV_SERVE_VESSEL,
};

/// Path accepting adversary schedules.
pub(crate) const UPLOADER_ROUTE: &str = "/uploader";

/// Address used when none is configured.
pub(crate) const DEFAULT_BIND: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5000);

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the vessel manifest once and answer odds requests over \
                 HTTP. POST an adversary schedule to /uploader to receive the \
                 success rate alongside the submitted schedule.",
    about = "Serve odds over HTTP"
)]
#[ortho_config(prefix = "STARPATH")]
pub(crate) struct ServeArgs {
    /// Path to the vessel manifest JSON (`millennium-falcon.json`).
    #[arg(value_name = "vessel")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) vessel: Option<Utf8PathBuf>,
    /// Socket address to listen on.
    #[arg(long = ARG_SERVE_BIND, value_name = "addr")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) bind: Option<SocketAddr>,
    /// Which day to re-test while waiting out bounty hunters.
    #[arg(long = ARG_SERVE_WAIT_POLICY, value_enum, value_name = "policy")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) wait_policy: Option<WaitPolicyArg>,
    /// Log filter in `env_logger` syntax.
    #[arg(long = ARG_SERVE_LOG_LEVEL, value_name = "filter")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) log_level: Option<String>,
}

impl ServeArgs {
    fn into_config(self) -> Result<ServeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ServeConfig::try_from(merged)
    }
}

/// Resolved `serve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServeConfig {
    pub(crate) vessel: Utf8PathBuf,
    pub(crate) bind: SocketAddr,
    pub(crate) wait_policy: WaitPolicy,
    pub(crate) log_level: String,
}

impl ServeConfig {
    /// Load the mission and wrap a calculator for the handlers.
    pub(crate) fn build_state(&self) -> Result<ServeState, CliError> {
        require_existing(&self.vessel, ARG_SERVE_VESSEL)?;
        let mission = Mission::load(&self.vessel)?;
        let config = OddsConfig {
            wait_policy: self.wait_policy,
        };
        Ok(ServeState::new(Arc::new(
            mission.into_calculator(config, LogObserver),
        )))
    }
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = CliError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let vessel = args.vessel.ok_or(CliError::MissingArgument {
            field: ARG_SERVE_VESSEL,
            env: ENV_SERVE_VESSEL,
        })?;
        Ok(Self {
            vessel,
            bind: args.bind.unwrap_or(DEFAULT_BIND),
            wait_policy: args.wait_policy.map(WaitPolicy::from).unwrap_or_default(),
            log_level: args
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }
}

/// State shared by every request.
#[derive(Clone)]
pub(crate) struct ServeState {
    estimator: Arc<dyn OddsEstimator>,
}

impl ServeState {
    pub(crate) fn new(estimator: Arc<dyn OddsEstimator>) -> Self {
        Self { estimator }
    }
}

/// Body returned by [`UPLOADER_ROUTE`].
#[derive(Debug, Serialize)]
pub(crate) struct OddsResponse {
    /// Success rate in percent.
    pub(crate) odds: f64,
    /// The schedule exactly as submitted.
    pub(crate) data: Value,
}

/// Failures answering a single request.
#[derive(Debug, Error)]
pub(crate) enum RequestError {
    /// The body is not a valid adversary schedule.
    #[error(transparent)]
    Schedule(#[from] ScheduleFileError),
    /// Estimating the odds failed.
    #[error("failed to estimate odds: {0}")]
    Estimate(#[from] OddsError),
    /// The estimation task panicked or was cancelled.
    #[error("estimation task failed: {0}")]
    Task(#[from] JoinError),
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Schedule(_) => StatusCode::BAD_REQUEST,
            Self::Estimate(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("odds request failed: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Routes served by the `serve` command.
pub(crate) fn router(state: ServeState) -> Router {
    Router::new()
        .route(UPLOADER_ROUTE, post(uploader))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn uploader(
    State(state): State<ServeState>,
    body: String,
) -> Result<Json<OddsResponse>, RequestError> {
    let data: Value = serde_json::from_str(&body).map_err(ScheduleFileError::from)?;
    let schedule = parse_schedule(&body)?;
    let estimator = Arc::clone(&state.estimator);
    // The search is CPU-bound; keep it off the request workers.
    let report = tokio::task::spawn_blocking(move || estimator.estimate(&schedule)).await??;
    info!(
        "answered odds request: {}% over {} itineraries",
        report.success_rate, report.diagnostics.itineraries_within_deadline
    );
    Ok(Json(OddsResponse {
        odds: report.success_rate,
        data,
    }))
}

pub(crate) fn run_serve(args: ServeArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    init_logging(&config.log_level);
    let state = config.build_state()?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(serve(config.bind, state))
}

async fn serve(bind: SocketAddr, state: ServeState) -> Result<(), CliError> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|source| CliError::Bind { addr: bind, source })?;
    info!("serving odds on http://{bind}{UPLOADER_ROUTE}");
    axum::serve(listener, router(state))
        .await
        .map_err(CliError::Serve)
}

#[cfg(test)]
pub(crate) fn serve_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ServeConfig, CliError> {
    let merged = ServeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ServeConfig::try_from(merged)
}
