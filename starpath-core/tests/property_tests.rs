//! Property-based tests for the odds engine.
//!
//! # Invariants tested
//!
//! - **Symmetry:** every route has the same duration in both directions.
//! - **Well-formed itineraries:** each starts at the origin on day zero with
//!   a full tank, ends at the destination, and never revisits a location.
//! - **Fuel and days:** hops cost exactly their travel time in days and fuel,
//!   refuel stays cost one day and add a full tank, and a hop the tank cannot
//!   cover is always preceded by exactly one refuel stay.
//! - **Adjustment:** days never decrease, the deadline is never overrun, and
//!   an itinerary with no slack is left untouched.
//! - **Scoring:** success is a whole percentage in `0..=100` up to the
//!   residue left by scaling, and capture odds follow `1 - 0.9^n`.

use std::collections::HashSet;

use proptest::prelude::*;
use starpath_core::{
    AdversarySchedule, Itinerary, ItineraryEnumerator, Network, NoopObserver, ScheduleAdjuster,
    VesselProfile, WaitPolicy, capture_probability, compute_success_rate,
};

const PLANETS: [&str; 6] = ["P0", "P1", "P2", "P3", "P4", "P5"];

/// Random undirected routes between up to six planets.
fn routes_strategy() -> impl Strategy<Value = Vec<(usize, usize, u32)>> {
    prop::collection::vec((0_usize..6, 0_usize..6, 1_u32..=5), 0..12)
        .prop_map(|edges| edges.into_iter().filter(|(a, b, _)| a != b).collect())
}

fn sightings_strategy() -> impl Strategy<Value = Vec<(usize, u32)>> {
    prop::collection::vec((0_usize..6, 0_u32..20), 0..10)
}

fn build_network(routes: &[(usize, usize, u32)]) -> Network {
    Network::from_routes(
        routes
            .iter()
            .map(|&(a, b, time)| (PLANETS[a], PLANETS[b], time)),
    )
    .expect("generated routes are valid")
}

fn build_schedule(deadline: u32, sightings: &[(usize, u32)]) -> AdversarySchedule {
    AdversarySchedule::from_sightings(
        deadline,
        sightings.iter().map(|&(planet, day)| (PLANETS[planet], day)),
    )
}

fn enumerate(network: &Network, vessel: &VesselProfile) -> Vec<Itinerary> {
    ItineraryEnumerator::new(network, vessel)
        .enumerate(&NoopObserver)
        .expect("enumerate")
}

fn check_itinerary(
    network: &Network,
    vessel: &VesselProfile,
    itinerary: &Itinerary,
) -> Result<(), TestCaseError> {
    let origin = itinerary.origin();
    prop_assert_eq!(&origin.location, vessel.origin());
    prop_assert_eq!(origin.day, 0);
    prop_assert_eq!(origin.fuel_remaining, i64::from(vessel.fuel_capacity()));
    prop_assert_eq!(&itinerary.arrival().location, vessel.destination());

    let capacity = i64::from(vessel.fuel_capacity());
    let steps = itinerary.to_vec();
    let mut seen = HashSet::new();
    seen.insert(origin.location.clone());
    let mut refuelled = false;
    for pair in steps.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        if previous.location == next.location {
            prop_assert!(!refuelled, "two refuel stays before one hop");
            prop_assert_eq!(next.day, previous.day + 1);
            prop_assert_eq!(next.fuel_remaining, previous.fuel_remaining + capacity);
            refuelled = true;
        } else {
            let time = network
                .time_between(previous.location.as_str(), next.location.as_str())
                .expect("hop follows a route");
            prop_assert_eq!(next.day, previous.day + time);
            prop_assert!(refuelled || previous.can_cover(time));
            prop_assert_eq!(next.fuel_remaining, previous.fuel_remaining - i64::from(time));
            prop_assert!(
                seen.insert(next.location.clone()),
                "location {} visited twice",
                next.location
            );
            refuelled = false;
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: travel time is the same in both directions.
    #[test]
    fn routes_are_symmetric(routes in routes_strategy()) {
        let network = build_network(&routes);
        for &(a, b, _) in &routes {
            let there = network.time_between(PLANETS[a], PLANETS[b]).expect("route");
            let back = network.time_between(PLANETS[b], PLANETS[a]).expect("route");
            prop_assert_eq!(there, back);
        }
    }

    /// Property: every enumerated itinerary is a simple path with consistent
    /// fuel and day accounting.
    #[test]
    fn itineraries_are_well_formed(
        routes in routes_strategy(),
        destination in 0_usize..6,
        capacity in 1_u32..=8,
    ) {
        let network = build_network(&routes);
        let vessel = VesselProfile::new(PLANETS[0], PLANETS[destination], capacity)
            .expect("vessel");
        for itinerary in enumerate(&network, &vessel) {
            check_itinerary(&network, &vessel, &itinerary)?;
        }
    }

    /// Property: adjustment never reorders days or overruns the deadline.
    #[test]
    fn adjustment_keeps_days_ordered(
        routes in routes_strategy(),
        destination in 1_usize..6,
        capacity in 1_u32..=8,
        deadline in 0_u32..25,
        sightings in sightings_strategy(),
        delayed in any::<bool>(),
    ) {
        let network = build_network(&routes);
        let vessel = VesselProfile::new(PLANETS[0], PLANETS[destination], capacity)
            .expect("vessel");
        let schedule = build_schedule(deadline, &sightings);
        let policy = if delayed { WaitPolicy::DelayedDay } else { WaitPolicy::ScheduledDay };
        let adjuster = ScheduleAdjuster::new(policy);

        for itinerary in enumerate(&network, &vessel) {
            let adjusted = adjuster.adjust(&itinerary, &schedule);
            let days: Vec<_> = adjusted.iter().map(|step| step.day).collect();
            prop_assert!(days.windows(2).all(|pair| pair[0] <= pair[1]));
            prop_assert_eq!(adjusted.origin(), itinerary.origin());
            if itinerary.arrival_day() >= deadline {
                prop_assert_eq!(&adjusted, &itinerary);
            } else {
                prop_assert!(adjusted.arrival_day() <= deadline);
                // Exhausted slack leaves nothing more to adjust.
                if adjusted.arrival_day() == deadline {
                    prop_assert_eq!(&adjuster.adjust(&adjusted, &schedule), &adjusted);
                }
            }
        }
    }

    /// Property: success is a whole percentage within `0..=100`.
    #[test]
    fn success_rate_is_whole_percent(
        routes in routes_strategy(),
        destination in 0_usize..6,
        capacity in 1_u32..=8,
        deadline in 0_u32..25,
        sightings in sightings_strategy(),
    ) {
        let network = build_network(&routes);
        let vessel = VesselProfile::new(PLANETS[0], PLANETS[destination], capacity)
            .expect("vessel");
        let schedule = build_schedule(deadline, &sightings);
        let rate = compute_success_rate(&network, &vessel, &schedule).expect("odds");
        prop_assert!((0.0..=100.0).contains(&rate));
        prop_assert!((rate - rate.round()).abs() <= 1e-9);
    }

    /// Property: capture odds match the closed form and never decrease.
    #[test]
    fn capture_follows_closed_form(encounters in 0_u32..60) {
        let expected = 1.0 - 0.9_f64.powi(i32::try_from(encounters).expect("small"));
        prop_assert!((capture_probability(encounters) - expected).abs() <= 1e-12);
        prop_assert!(capture_probability(encounters + 1) >= capture_probability(encounters));
    }
}
