//! Known adversary whereabouts and the mission deadline.

use std::collections::{BTreeSet, HashMap};

use crate::{Itinerary, Location};

/// Deadline plus the days on which adversaries are stationed at each
/// location.
///
/// # Examples
/// ```
/// use starpath_core::AdversarySchedule;
///
/// let schedule = AdversarySchedule::from_sightings(8, [("Hoth", 6), ("Hoth", 7)]);
/// assert_eq!(schedule.deadline(), 8);
/// assert!(schedule.is_present("Hoth", 7));
/// assert!(!schedule.is_present("Hoth", 8));
/// assert!(!schedule.is_present("Endor", 7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdversarySchedule {
    deadline: u32,
    presence: HashMap<Location, BTreeSet<u32>>,
}

impl AdversarySchedule {
    /// A schedule with no adversaries and the given deadline.
    #[must_use]
    pub fn new(deadline: u32) -> Self {
        Self {
            deadline,
            presence: HashMap::new(),
        }
    }

    /// Build a schedule from `(location, day)` sightings.
    ///
    /// Repeated sightings of the same pair collapse into one.
    pub fn from_sightings<I, L>(deadline: u32, sightings: I) -> Self
    where
        I: IntoIterator<Item = (L, u32)>,
        L: Into<Location>,
    {
        let mut schedule = Self::new(deadline);
        for (location, day) in sightings {
            schedule.add_sighting(location, day);
        }
        schedule
    }

    /// Record an adversary at `location` on `day`.
    pub fn add_sighting(&mut self, location: impl Into<Location>, day: u32) {
        self.presence.entry(location.into()).or_default().insert(day);
    }

    /// Last day on which arrival still counts.
    #[must_use]
    pub const fn deadline(&self) -> u32 {
        self.deadline
    }

    /// Whether an adversary is stationed at `location` on `day`.
    #[must_use]
    pub fn is_present(&self, location: &str, day: u32) -> bool {
        self.presence
            .get(location)
            .is_some_and(|days| days.contains(&day))
    }

    /// Days on which adversaries occupy `location`, ascending.
    pub fn days_at(&self, location: &str) -> impl Iterator<Item = u32> + '_ {
        self.presence
            .get(location)
            .into_iter()
            .flat_map(|days| days.iter().copied())
    }

    /// Total number of `(location, day)` sightings.
    #[must_use]
    pub fn sighting_count(&self) -> usize {
        self.presence.values().map(BTreeSet::len).sum()
    }

    /// Count the steps of `itinerary` that coincide with an adversary.
    #[must_use]
    pub fn encounters(&self, itinerary: &Itinerary) -> u32 {
        let hits = itinerary
            .iter()
            .filter(|step| self.is_present(step.location.as_str(), step.day))
            .count();
        u32::try_from(hits).unwrap_or(u32::MAX)
    }
}
