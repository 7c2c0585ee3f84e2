//! Error types emitted by the Starpath CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::net::SocketAddr;
use std::sync::Arc;

use camino::Utf8PathBuf;
use starpath_core::OddsError;
use starpath_data::{MissionError, ScheduleFileError};
use thiserror::Error;

/// Errors emitted by the Starpath CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set it on the command line or via {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The vessel manifest or its routes database could not be loaded.
    #[error(transparent)]
    Mission(#[from] MissionError),
    /// The adversary schedule could not be loaded.
    #[error(transparent)]
    Schedule(#[from] ScheduleFileError),
    /// Estimating the odds failed.
    #[error("failed to estimate odds: {0}")]
    Estimate(#[from] OddsError),
    /// Serialising the odds report failed.
    #[error("failed to serialise odds report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the odds report failed.
    #[error("failed to write odds report: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// The async runtime for the HTTP server could not be built.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The HTTP listener could not bind its address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested listen address.
        addr: SocketAddr,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP server stopped with an error.
    #[error("HTTP server failed: {0}")]
    Serve(#[source] std::io::Error),
}
