//! Facade crate for the Starpath odds engine.
//!
//! This crate re-exports the core domain types and exposes the on-disk
//! mission loaders behind the `store-sqlite` feature.

#![forbid(unsafe_code)]

pub use starpath_core::{
    AdversarySchedule, Assessment, Diagnostics, Itinerary, ItineraryEnumerator, Location,
    LogObserver, Network, NetworkError, NoopObserver, OddsCalculator, OddsConfig, OddsError,
    OddsEstimator, OddsReport, RiskScorer, ScheduleAdjuster, SearchObserver, VesselProfile,
    VesselProfileError, VisitInfo, WaitPolicy, capture_probability, compute_success_rate,
    success_percentage,
};

#[cfg(feature = "store-sqlite")]
pub use starpath_data::{
    Mission, MissionError, RouteStoreError, ScheduleFileError, SqliteRouteStore, VesselFileError,
    VesselManifest, load_schedule, load_vessel_manifest, parse_schedule,
};
