//! Shared test harness modules for the Starpath CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::odds::{
    EstimatorBuilder, OddsArgs, OddsCommandConfig, WaitPolicyArg, config_from_layers_for_test,
    run_odds_with,
};
use crate::serve::{
    DEFAULT_BIND, ServeArgs, ServeConfig, ServeState, UPLOADER_ROUTE, router,
    serve_config_from_layers_for_test,
};

mod helpers;
