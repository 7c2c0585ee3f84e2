//! Turn encounter counts into capture and success odds.
//!
//! Each encounter independently carries a one-in-ten capture chance, so
//! surviving `n` encounters has probability `0.9^n`.

use crate::{AdversarySchedule, Itinerary, ScheduleAdjuster, SearchObserver};

/// Probability of escaping a single encounter.
pub const ESCAPE_CHANCE: f64 = 0.9;

/// Probability of being captured after `encounters` encounters.
///
/// Equals `sum(9^i / 10^(i+1))` for `i` in `0..encounters`, i.e.
/// `1 - 0.9^encounters`.
///
/// # Examples
/// ```
/// use starpath_core::capture_probability;
///
/// assert_eq!(capture_probability(0), 0.0);
/// assert!((capture_probability(1) - 0.1).abs() < 1e-9);
/// assert!((capture_probability(2) - 0.19).abs() < 1e-9);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "capture odds are a floating-point probability"
)]
pub fn capture_probability(encounters: u32) -> f64 {
    if encounters == 0 {
        return 0.0;
    }
    let exponent = i32::try_from(encounters).unwrap_or(i32::MAX);
    1.0 - ESCAPE_CHANCE.powi(exponent)
}

/// Success chance, in percent, for a capture probability.
///
/// The complement is rounded to two decimal places and only then scaled by
/// a hundred. The scaling is done in floating point, so a whole percentage
/// can carry a residue in the last bits: twelve encounters give
/// `28.000000000000004`, not `28.0`.
///
/// # Examples
/// ```
/// use starpath_core::{capture_probability, success_percentage};
///
/// assert_eq!(success_percentage(0.19), 81.0);
/// assert_eq!(success_percentage(1.0), 0.0);
/// assert_eq!(success_percentage(capture_probability(12)), 28.000000000000004);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "percentages are derived from floating-point probabilities"
)]
pub fn success_percentage(capture_probability: f64) -> f64 {
    let hundredths = ((1.0 - capture_probability) * 100.0).round();
    hundredths / 100.0 * 100.0
}

/// The best outcome found across a set of itineraries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    /// Fewest encounters achieved by any itinerary within the deadline.
    pub encounters: u32,
    /// The schedule-adjusted itinerary that achieved `encounters`.
    pub itinerary: Itinerary,
}

/// Scores enumerated itineraries against an adversary schedule.
///
/// # Examples
/// ```
/// use starpath_core::{AdversarySchedule, RiskScorer};
///
/// let schedule = AdversarySchedule::new(8);
/// assert_eq!(RiskScorer::default().score(&[], &schedule), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskScorer {
    adjuster: ScheduleAdjuster,
}

impl RiskScorer {
    /// Score with a specific adjuster.
    #[must_use]
    pub const fn new(adjuster: ScheduleAdjuster) -> Self {
        Self { adjuster }
    }

    /// Find the itinerary with the fewest encounters after adjustment.
    ///
    /// Only itineraries whose unadjusted arrival is on or before the
    /// deadline qualify. Returns `None` when none do. Ties keep the first
    /// itinerary in input order.
    pub fn assess(
        &self,
        itineraries: &[Itinerary],
        schedule: &AdversarySchedule,
        observer: &dyn SearchObserver,
    ) -> Option<Assessment> {
        let mut best: Option<Assessment> = None;
        for itinerary in itineraries {
            if itinerary.arrival_day() > schedule.deadline() {
                observer.itinerary_too_late(itinerary, schedule.deadline());
                continue;
            }
            let adjusted = self.adjuster.adjust(itinerary, schedule);
            let encounters = schedule.encounters(&adjusted);
            observer.itinerary_scored(&adjusted, encounters);
            if best.as_ref().is_none_or(|current| encounters < current.encounters) {
                best = Some(Assessment {
                    encounters,
                    itinerary: adjusted,
                });
            }
        }
        best
    }

    /// Capture probability of the best itinerary, or certain capture when
    /// no itinerary meets the deadline.
    #[must_use]
    pub fn capture_probability(
        &self,
        itineraries: &[Itinerary],
        schedule: &AdversarySchedule,
    ) -> f64 {
        self.assess(itineraries, schedule, &crate::NoopObserver)
            .map_or(1.0, |best| capture_probability(best.encounters))
    }

    /// Success percentage in `0.0..=100.0` for the best itinerary.
    #[must_use]
    pub fn score(&self, itineraries: &[Itinerary], schedule: &AdversarySchedule) -> f64 {
        success_percentage(self.capture_probability(itineraries, schedule))
    }
}
