//! Shared fixtures for unit, behaviour and property tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    AdversarySchedule, Itinerary, Location, Network, SearchObserver, VesselProfile, VisitInfo,
};

/// Two hops of two days each: `A - B - C`.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture routes are valid")]
pub fn linear_network() -> Network {
    Network::from_routes([("A", "B", 2), ("B", "C", 2)]).expect("linear routes")
}

/// Vessel flying `A` to `C` with exactly enough fuel for the whole trip.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture capacity is non-zero")]
pub fn linear_vessel() -> VesselProfile {
    VesselProfile::new("A", "C", 4).expect("linear vessel")
}

/// The reference galaxy from Tatooine to Endor.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture routes are valid")]
pub fn falcon_network() -> Network {
    Network::from_routes([
        ("Tatooine", "Dagobah", 6),
        ("Dagobah", "Endor", 4),
        ("Dagobah", "Hoth", 1),
        ("Hoth", "Endor", 1),
        ("Tatooine", "Hoth", 6),
    ])
    .expect("reference routes")
}

/// Vessel with a six-day tank flying Tatooine to Endor.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture capacity is non-zero")]
pub fn falcon_vessel() -> VesselProfile {
    VesselProfile::new("Tatooine", "Endor", 6).expect("reference vessel")
}

/// Hunters stationed at Hoth on days six to eight.
#[must_use]
pub fn empire(countdown: u32) -> AdversarySchedule {
    AdversarySchedule::from_sightings(countdown, [("Hoth", 6), ("Hoth", 7), ("Hoth", 8)])
}

/// Observer counting each event it receives.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    found: AtomicUsize,
    overdrawn: AtomicUsize,
    too_late: AtomicUsize,
    scored: AtomicUsize,
}

impl RecordingObserver {
    /// Itineraries that reached the destination.
    #[must_use]
    pub fn found(&self) -> usize {
        self.found.load(Ordering::Relaxed)
    }

    /// Hops taken that left the tank negative.
    #[must_use]
    pub fn overdrawn_hops(&self) -> usize {
        self.overdrawn.load(Ordering::Relaxed)
    }

    /// Itineraries rejected by the deadline.
    #[must_use]
    pub fn too_late(&self) -> usize {
        self.too_late.load(Ordering::Relaxed)
    }

    /// Itineraries adjusted and scored.
    #[must_use]
    pub fn scored(&self) -> usize {
        self.scored.load(Ordering::Relaxed)
    }
}

impl SearchObserver for RecordingObserver {
    fn itinerary_found(&self, _itinerary: &Itinerary) {
        self.found.fetch_add(1, Ordering::Relaxed);
    }

    fn tank_overdrawn(&self, _from: &VisitInfo, _to: &Location, _travel_time: u32) {
        self.overdrawn.fetch_add(1, Ordering::Relaxed);
    }

    fn itinerary_too_late(&self, _itinerary: &Itinerary, _deadline: u32) {
        self.too_late.fetch_add(1, Ordering::Relaxed);
    }

    fn itinerary_scored(&self, _adjusted: &Itinerary, _encounters: u32) {
        self.scored.fetch_add(1, Ordering::Relaxed);
    }
}
