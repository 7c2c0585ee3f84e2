//! Delay itineraries to dodge known adversary positions.
//!
//! The adjuster walks an itinerary once, left to right. When a step lands on
//! a location and day the adversaries occupy, and some wait within the
//! remaining delay budget would clear it, the vessel lingers at the previous
//! step for extra days. Every later step shifts by the accumulated delay.
//! The budget is the slack between the itinerary's arrival and the deadline.
//!
//! The pass is greedy and only looks at the step it is delaying. Under
//! either [`WaitPolicy`] an adjusted itinerary can meet more adversaries than
//! the original: the wait days themselves may be occupied, and shifting the
//! rest of the itinerary can push a later step onto an occupied day. Odds are
//! scored from the adjusted itineraries as they are.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AdversarySchedule, Itinerary, VisitInfo};

/// Which day the adjuster re-tests while deciding whether to keep waiting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum WaitPolicy {
    /// Re-test the step's originally scheduled day.
    ///
    /// Once waiting starts it continues until the budget is spent, because
    /// the tested day never moves. This reproduces the reference odds.
    #[default]
    ScheduledDay,
    /// Re-test the step's day shifted by the delay accumulated so far.
    ///
    /// Waiting stops as soon as the delayed day is clear, which keeps
    /// unspent budget for later steps.
    DelayedDay,
}

/// Greedy schedule-avoidance pass over one itinerary.
///
/// # Examples
/// ```
/// use starpath_core::{AdversarySchedule, Itinerary, Location, ScheduleAdjuster, VisitInfo};
///
/// let itinerary = Itinerary::from_steps([
///     VisitInfo::new(Location::new("A"), 0, 4),
///     VisitInfo::new(Location::new("B"), 2, 2),
///     VisitInfo::new(Location::new("C"), 4, 0),
/// ])
/// .expect("non-empty");
/// let schedule = AdversarySchedule::from_sightings(5, [("B", 2)]);
///
/// let adjusted = ScheduleAdjuster::default().adjust(&itinerary, &schedule);
/// assert_eq!(schedule.encounters(&adjusted), 0);
/// assert_eq!(adjusted.arrival_day(), 5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleAdjuster {
    policy: WaitPolicy,
}

impl ScheduleAdjuster {
    /// Construct an adjuster with an explicit wait policy.
    #[must_use]
    pub const fn new(policy: WaitPolicy) -> Self {
        Self { policy }
    }

    /// The wait policy in force.
    #[must_use]
    pub const fn policy(&self) -> WaitPolicy {
        self.policy
    }

    /// Return a copy of `itinerary` with waits inserted to dodge `schedule`.
    ///
    /// The departure step is never delayed. When the itinerary already
    /// arrives on or after the deadline there is no budget and the copy is
    /// unchanged.
    #[must_use]
    pub fn adjust(&self, itinerary: &Itinerary, schedule: &AdversarySchedule) -> Itinerary {
        let Some(mut budget) = schedule
            .deadline()
            .checked_sub(itinerary.arrival_day())
            .filter(|slack| *slack > 0)
        else {
            return itinerary.clone();
        };

        let mut adjusted = Itinerary::starting_at(itinerary.origin().clone());
        let mut delay = 0_u32;
        for step in itinerary.iter().skip(1) {
            if self.exposed(schedule, step, delay)
                && can_dodge(schedule, step, budget, delay, self.policy)
            {
                while budget > 0 && self.exposed(schedule, step, delay) {
                    let wait = adjusted.arrival().waited();
                    adjusted.push(wait);
                    budget -= 1;
                    delay += 1;
                }
            }
            adjusted.push(step.delayed_by(delay));
        }
        adjusted
    }

    fn exposed(&self, schedule: &AdversarySchedule, step: &VisitInfo, delay: u32) -> bool {
        schedule.is_present(step.location.as_str(), tested_day(step, delay, self.policy))
    }
}

const fn tested_day(step: &VisitInfo, delay: u32, policy: WaitPolicy) -> u32 {
    match policy {
        WaitPolicy::ScheduledDay => step.day,
        WaitPolicy::DelayedDay => step.day.saturating_add(delay),
    }
}

/// Whether waiting up to `budget` extra days would find a clear day.
fn can_dodge(
    schedule: &AdversarySchedule,
    step: &VisitInfo,
    budget: u32,
    delay: u32,
    policy: WaitPolicy,
) -> bool {
    let day = tested_day(step, delay, policy);
    (1..=budget).any(|wait| {
        !schedule.is_present(step.location.as_str(), day.saturating_add(wait))
    })
}
