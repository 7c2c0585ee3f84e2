//! End-to-end odds estimation: enumerate, adjust, score.

use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

use crate::{
    AdversarySchedule, Itinerary, ItineraryEnumerator, LogObserver, Network, NetworkError,
    RiskScorer, ScheduleAdjuster, SearchObserver, VesselProfile, WaitPolicy, capture_probability,
    success_percentage,
};

/// Errors returned by [`OddsEstimator::estimate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OddsError {
    /// The network is malformed.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Counters describing one estimation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnostics {
    /// Itineraries reaching the destination, regardless of deadline.
    pub itineraries_enumerated: u64,
    /// Itineraries arriving on or before the deadline.
    pub itineraries_within_deadline: u64,
    /// Wall-clock time spent estimating.
    pub solve_time: Duration,
}

/// Outcome of an estimation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OddsReport {
    /// Success chance in percent, within `0.0..=100.0`.
    pub success_rate: f64,
    /// Probability of capture on the best itinerary; `1.0` when no
    /// itinerary meets the deadline.
    pub capture_probability: f64,
    /// Fewest encounters on any itinerary meeting the deadline.
    pub min_encounters: Option<u32>,
    /// Schedule-adjusted itinerary achieving `min_encounters`.
    pub best_itinerary: Option<Itinerary>,
    /// Run counters.
    pub diagnostics: Diagnostics,
}

/// Estimate mission success odds against an adversary schedule.
///
/// Implementations must be `Send + Sync` so one estimator can serve many
/// schedules across threads.
pub trait OddsEstimator: Send + Sync {
    /// Estimate the odds of reaching the destination within `schedule`.
    ///
    /// # Errors
    /// Returns [`OddsError`] when the underlying network is malformed.
    fn estimate(&self, schedule: &AdversarySchedule) -> Result<OddsReport, OddsError>;
}

/// Configuration for [`OddsCalculator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OddsConfig {
    /// How the schedule adjuster decides to keep waiting.
    pub wait_policy: WaitPolicy,
}

/// Default [`OddsEstimator`] over a fixed network and vessel.
///
/// Itineraries are enumerated afresh for every schedule; no state is kept
/// between calls.
///
/// # Examples
/// ```
/// use starpath_core::{AdversarySchedule, Network, OddsCalculator, OddsEstimator, VesselProfile};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let network = Network::from_routes([("A", "B", 2), ("B", "C", 2)])?;
/// let vessel = VesselProfile::new("A", "C", 4)?;
/// let calculator = OddsCalculator::new(network, vessel);
///
/// let report = calculator.estimate(&AdversarySchedule::from_sightings(4, [("B", 2)]))?;
/// assert_eq!(report.success_rate, 90.0);
/// assert_eq!(report.min_encounters, Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OddsCalculator<O = LogObserver>
where
    O: SearchObserver,
{
    network: Network,
    vessel: VesselProfile,
    config: OddsConfig,
    observer: O,
}

impl OddsCalculator<LogObserver> {
    /// Construct a calculator with default configuration that logs through
    /// the `log` facade.
    #[must_use]
    pub fn new(network: Network, vessel: VesselProfile) -> Self {
        Self::with_config(network, vessel, OddsConfig::default(), LogObserver)
    }
}

impl<O> OddsCalculator<O>
where
    O: SearchObserver,
{
    /// Construct a calculator with explicit configuration and observer.
    #[must_use]
    pub const fn with_config(
        network: Network,
        vessel: VesselProfile,
        config: OddsConfig,
        observer: O,
    ) -> Self {
        Self {
            network,
            vessel,
            config,
            observer,
        }
    }

    /// The network searched.
    #[must_use]
    pub const fn network(&self) -> &Network {
        &self.network
    }

    /// The vessel flown.
    #[must_use]
    pub const fn vessel(&self) -> &VesselProfile {
        &self.vessel
    }

    /// The configuration in force.
    #[must_use]
    pub const fn config(&self) -> OddsConfig {
        self.config
    }
}

impl<O> OddsEstimator for OddsCalculator<O>
where
    O: SearchObserver,
{
    fn estimate(&self, schedule: &AdversarySchedule) -> Result<OddsReport, OddsError> {
        estimate_odds(
            &self.network,
            &self.vessel,
            self.config,
            &self.observer,
            schedule,
        )
    }
}

fn estimate_odds(
    network: &Network,
    vessel: &VesselProfile,
    config: OddsConfig,
    observer: &dyn SearchObserver,
    schedule: &AdversarySchedule,
) -> Result<OddsReport, OddsError> {
    let started_at = Instant::now();
    let itineraries = ItineraryEnumerator::new(network, vessel).enumerate(observer)?;
    let within_deadline = itineraries
        .iter()
        .filter(|itinerary| itinerary.arrival_day() <= schedule.deadline())
        .count();

    let scorer = RiskScorer::new(ScheduleAdjuster::new(config.wait_policy));
    let best = scorer.assess(&itineraries, schedule, observer);
    let capture = best
        .as_ref()
        .map_or(1.0, |assessment| capture_probability(assessment.encounters));

    Ok(OddsReport {
        success_rate: success_percentage(capture),
        capture_probability: capture,
        min_encounters: best.as_ref().map(|assessment| assessment.encounters),
        best_itinerary: best.map(|assessment| assessment.itinerary),
        diagnostics: Diagnostics {
            itineraries_enumerated: itineraries.len() as u64,
            itineraries_within_deadline: within_deadline as u64,
            solve_time: started_at.elapsed(),
        },
    })
}

/// Success percentage for `vessel` crossing `network` under `schedule`.
///
/// Uses the default wait policy and logs through the `log` facade.
///
/// # Errors
/// Returns [`OddsError`] when the network is malformed.
///
/// # Examples
/// ```
/// use starpath_core::{AdversarySchedule, Network, VesselProfile, compute_success_rate};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let network = Network::from_routes([("A", "B", 2), ("B", "C", 2)])?;
/// let vessel = VesselProfile::new("A", "C", 4)?;
/// let rate = compute_success_rate(&network, &vessel, &AdversarySchedule::new(8))?;
/// assert_eq!(rate, 100.0);
/// # Ok(())
/// # }
/// ```
pub fn compute_success_rate(
    network: &Network,
    vessel: &VesselProfile,
    schedule: &AdversarySchedule,
) -> Result<f64, OddsError> {
    estimate_odds(
        network,
        vessel,
        OddsConfig::default(),
        &LogObserver,
        schedule,
    )
    .map(|report| report.success_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        RecordingObserver, empire, falcon_network, falcon_vessel, linear_network, linear_vessel,
    };
    use rstest::rstest;

    #[rstest]
    #[case::arrives_too_late(7, 0.0)]
    #[case::no_slack(8, 81.0)]
    #[case::one_day_slack(9, 90.0)]
    #[case::two_days_slack(10, 100.0)]
    fn reference_galaxy_odds(#[case] countdown: u32, #[case] expected: f64) {
        let rate = compute_success_rate(&falcon_network(), &falcon_vessel(), &empire(countdown))
            .expect("well-formed network");
        assert_eq!(rate, expected);
    }

    #[rstest]
    fn hop_beyond_one_refuel_still_counts() {
        let network = Network::from_routes([("A", "B", 5)]).expect("routes");
        let vessel = VesselProfile::new("A", "B", 2).expect("vessel");
        let observer = RecordingObserver::default();
        let calculator = OddsCalculator::with_config(
            network.clone(),
            vessel.clone(),
            OddsConfig::default(),
            &observer,
        );

        let report = calculator.estimate(&AdversarySchedule::new(10)).expect("estimate");
        assert_eq!(report.success_rate, 100.0);
        assert_eq!(observer.overdrawn_hops(), 1);
        let best = report.best_itinerary.expect("best itinerary");
        assert_eq!(best.arrival().fuel_remaining, -1);

        let rate = compute_success_rate(&network, &vessel, &AdversarySchedule::new(10))
            .expect("well-formed network");
        assert_eq!(rate, 100.0);
    }

    #[rstest]
    fn dodging_into_hunters_is_scored_as_adjusted() {
        let network = Network::from_routes([("A", "B", 1), ("B", "C", 1)]).expect("routes");
        let vessel = VesselProfile::new("A", "C", 5).expect("vessel");
        let schedule = AdversarySchedule::from_sightings(3, [("B", 1), ("A", 1), ("C", 3)]);
        let report = OddsCalculator::new(network, vessel)
            .estimate(&schedule)
            .expect("estimate");
        assert_eq!(report.min_encounters, Some(2));
        assert_eq!(report.success_rate, 81.0);
    }

    #[rstest]
    fn report_carries_diagnostics() {
        let calculator = OddsCalculator::with_config(
            falcon_network(),
            falcon_vessel(),
            OddsConfig::default(),
            RecordingObserver::default(),
        );
        let report = calculator.estimate(&empire(9)).expect("estimate");

        assert_eq!(report.success_rate, 90.0);
        assert_eq!(report.min_encounters, Some(1));
        assert_eq!(report.diagnostics.itineraries_enumerated, 4);
        assert_eq!(report.diagnostics.itineraries_within_deadline, 2);
        let best = report.best_itinerary.expect("best itinerary");
        assert!(best.visits("Dagobah"));
        assert_eq!(best.arrival_day(), 9);
    }

    #[rstest]
    fn no_feasible_itinerary_reports_certain_capture() {
        let calculator = OddsCalculator::new(falcon_network(), falcon_vessel());
        let report = calculator.estimate(&empire(7)).expect("estimate");
        assert_eq!(report.success_rate, 0.0);
        assert_eq!(report.capture_probability, 1.0);
        assert!(report.min_encounters.is_none());
        assert!(report.best_itinerary.is_none());
    }

    #[rstest]
    fn estimator_is_reusable_across_schedules() {
        let calculator = OddsCalculator::new(linear_network(), linear_vessel());
        let clear = calculator.estimate(&AdversarySchedule::new(8)).expect("estimate");
        let watched = calculator
            .estimate(&AdversarySchedule::from_sightings(4, [("B", 2)]))
            .expect("estimate");
        assert_eq!(clear.success_rate, 100.0);
        assert_eq!(watched.success_rate, 90.0);
    }

    #[rstest]
    fn delayed_day_policy_is_applied() {
        let network = Network::from_routes([("A", "B", 2), ("B", "C", 3)]).expect("routes");
        let vessel = VesselProfile::new("A", "C", 10).expect("vessel");
        let schedule = AdversarySchedule::from_sightings(7, [("B", 2), ("C", 7)]);
        let config = OddsConfig {
            wait_policy: WaitPolicy::DelayedDay,
        };
        let scheduled = OddsCalculator::new(network.clone(), vessel.clone())
            .estimate(&schedule)
            .expect("estimate");
        let delayed = OddsCalculator::with_config(network, vessel, config, LogObserver)
            .estimate(&schedule)
            .expect("estimate");

        assert_eq!(scheduled.min_encounters, Some(1));
        assert_eq!(delayed.min_encounters, Some(0));
    }
}
