//! Core domain types and search for the Starpath odds engine.
//!
//! A [`Network`] of locations joined by bidirectional routes is searched for
//! every simple [`Itinerary`] a [`VesselProfile`] can fly from its origin to
//! its destination, refuelling when the tank runs short. Each itinerary is
//! then delayed by a [`ScheduleAdjuster`] to dodge the adversaries listed in
//! an [`AdversarySchedule`], and the [`RiskScorer`] turns the fewest remaining
//! encounters into a success percentage.
//!
//! Constructors return `Result` to surface invalid input early. The crate
//! performs no I/O and never configures logging; events flow through a
//! [`SearchObserver`].

#![forbid(unsafe_code)]

mod adjuster;
mod enumerator;
mod itinerary;
mod location;
mod network;
mod observer;
mod odds;
mod risk;
mod schedule;
mod vessel;

pub mod test_support;

pub use adjuster::{ScheduleAdjuster, WaitPolicy};
pub use enumerator::ItineraryEnumerator;
pub use itinerary::{Itinerary, VisitInfo};
pub use location::Location;
pub use network::{Network, NetworkError};
pub use observer::{LogObserver, NoopObserver, SearchObserver};
pub use odds::{
    Diagnostics, OddsCalculator, OddsConfig, OddsError, OddsEstimator, OddsReport,
    compute_success_rate,
};
pub use risk::{Assessment, ESCAPE_CHANCE, RiskScorer, capture_probability, success_percentage};
pub use schedule::AdversarySchedule;
pub use vessel::{VesselProfile, VesselProfileError};
