//! Loaders turning on-disk mission files into core domain values.
//!
//! Responsibilities:
//! - Read the SQLite `routes` table into a [`Network`].
//! - Parse the vessel manifest and adversary schedule JSON documents.
//!
//! Boundaries:
//! - Do not encode search or scoring rules (live in `starpath-core`).
//! - Validation errors from the core surface unchanged as error sources.

#![forbid(unsafe_code)]

mod routes;
mod schedule;
mod vessel;

pub mod test_support;

use camino::Utf8Path;
use log::info;
use starpath_core::{Network, OddsCalculator, OddsConfig, SearchObserver, VesselProfile};
use thiserror::Error;

pub use routes::{RouteStoreError, SqliteRouteStore};
pub use schedule::{ScheduleFileError, load_schedule, parse_schedule};
pub use vessel::{VesselFileError, VesselManifest, load_vessel_manifest};

/// Error raised by [`Mission::load`].
#[derive(Debug, Error)]
pub enum MissionError {
    /// The vessel manifest was unusable.
    #[error(transparent)]
    Vessel(#[from] VesselFileError),
    /// The routes database referenced by the manifest was unusable.
    #[error(transparent)]
    Routes(#[from] RouteStoreError),
}

/// A vessel and the network it flies over, loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mission {
    /// Travel network read from the manifest's routes database.
    pub network: Network,
    /// Vessel described by the manifest.
    pub vessel: VesselProfile,
}

impl Mission {
    /// Load the manifest at `vessel_path` and the routes database it names.
    ///
    /// # Errors
    /// Returns [`MissionError`] when either file cannot be loaded.
    pub fn load(vessel_path: &Utf8Path) -> Result<Self, MissionError> {
        let VesselManifest { vessel, routes_db } = load_vessel_manifest(vessel_path)?;
        let network = SqliteRouteStore::open(&routes_db)?.load_network()?;
        info!(
            "mission {} -> {} over {} locations and {} routes",
            vessel.origin(),
            vessel.destination(),
            network.location_count(),
            network.route_count()
        );
        Ok(Self { network, vessel })
    }

    /// Build an estimator for this mission.
    pub fn into_calculator<O>(self, config: OddsConfig, observer: O) -> OddsCalculator<O>
    where
        O: SearchObserver,
    {
        OddsCalculator::with_config(self.network, self.vessel, config, observer)
    }
}
