//! Day-by-day itineraries through the network.
//!
//! An [`Itinerary`] is never empty: it always begins with the departure step
//! at day zero with a full tank. Further steps are hops to a new location,
//! refuel stays at the same location, or schedule-dodging waits.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize, Serializer};

use crate::Location;

/// One step of an itinerary: where the vessel is, on which day, with how
/// much fuel left.
///
/// # Examples
/// ```
/// use starpath_core::{Location, VisitInfo};
///
/// let departure = VisitInfo::departure(Location::new("Tatooine"), 6);
/// let arrival = departure.hop(Location::new("Hoth"), 6);
/// assert_eq!(arrival.day, 6);
/// assert_eq!(arrival.fuel_remaining, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VisitInfo {
    /// Location occupied on `day`.
    pub location: Location,
    /// Days elapsed since departure.
    pub day: u32,
    /// Fuel left, measured in days of travel.
    ///
    /// Goes negative after a hop longer than a single refuel stay can
    /// cover; such itineraries are still reported.
    pub fuel_remaining: i64,
}

impl VisitInfo {
    /// Construct a step from its parts.
    #[must_use]
    pub const fn new(location: Location, day: u32, fuel_remaining: i64) -> Self {
        Self {
            location,
            day,
            fuel_remaining,
        }
    }

    /// The first step of every itinerary: day zero with a full tank.
    #[must_use]
    pub fn departure(origin: Location, fuel_capacity: u32) -> Self {
        Self::new(origin, 0, i64::from(fuel_capacity))
    }

    /// Stay one day at the same location and take on `fuel` units.
    #[must_use]
    pub fn refuelled(&self, fuel: u32) -> Self {
        Self::new(
            self.location.clone(),
            self.day.saturating_add(1),
            self.fuel_remaining.saturating_add(i64::from(fuel)),
        )
    }

    /// Stay one day at the same location without refuelling.
    #[must_use]
    pub fn waited(&self) -> Self {
        Self::new(
            self.location.clone(),
            self.day.saturating_add(1),
            self.fuel_remaining,
        )
    }

    /// Travel to `destination`, spending `travel_time` days and as much fuel.
    ///
    /// Callers refuel beforehand when the tank is short. Fuel is not
    /// clamped, so a hop the tank cannot cover leaves it negative.
    #[must_use]
    pub fn hop(&self, destination: Location, travel_time: u32) -> Self {
        Self::new(
            destination,
            self.day.saturating_add(travel_time),
            self.fuel_remaining.saturating_sub(i64::from(travel_time)),
        )
    }

    /// Whether the tank holds at least `travel_time` units.
    #[must_use]
    pub fn can_cover(&self, travel_time: u32) -> bool {
        self.fuel_remaining >= i64::from(travel_time)
    }

    /// The same step shifted `delay` days later.
    #[must_use]
    pub fn delayed_by(&self, delay: u32) -> Self {
        Self::new(
            self.location.clone(),
            self.day.saturating_add(delay),
            self.fuel_remaining,
        )
    }
}

impl fmt::Display for VisitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(day:{}, fuel:{})",
            self.location, self.day, self.fuel_remaining
        )
    }
}

/// An ordered, non-empty sequence of [`VisitInfo`] steps.
///
/// # Examples
/// ```
/// use starpath_core::{Itinerary, Location};
///
/// let mut itinerary = Itinerary::departing(Location::new("A"), 4);
/// let hop = itinerary.arrival().hop(Location::new("B"), 2);
/// itinerary.push(hop);
///
/// assert_eq!(itinerary.len(), 2);
/// assert_eq!(itinerary.arrival().day, 2);
/// assert_eq!(itinerary.to_string(), "A(day:0, fuel:4) -> B(day:2, fuel:2)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Itinerary {
    origin: VisitInfo,
    rest: Vec<VisitInfo>,
}

impl Itinerary {
    /// Start an itinerary at `origin` on day zero with a full tank.
    #[must_use]
    pub fn departing(origin: Location, fuel_capacity: u32) -> Self {
        Self::starting_at(VisitInfo::departure(origin, fuel_capacity))
    }

    /// Start an itinerary from an arbitrary first step.
    #[must_use]
    pub const fn starting_at(origin: VisitInfo) -> Self {
        Self {
            origin,
            rest: Vec::new(),
        }
    }

    /// Build an itinerary from a step sequence, or `None` when it is empty.
    pub fn from_steps<I>(steps: I) -> Option<Self>
    where
        I: IntoIterator<Item = VisitInfo>,
    {
        let mut iter = steps.into_iter();
        let origin = iter.next()?;
        Some(Self {
            origin,
            rest: iter.collect(),
        })
    }

    /// Append a step.
    pub fn push(&mut self, step: VisitInfo) {
        self.rest.push(step);
    }

    /// The departure step.
    #[must_use]
    pub const fn origin(&self) -> &VisitInfo {
        &self.origin
    }

    /// The latest step; the destination once the itinerary is complete.
    #[must_use]
    pub fn arrival(&self) -> &VisitInfo {
        self.rest.last().unwrap_or(&self.origin)
    }

    /// Day of the latest step.
    #[must_use]
    pub fn arrival_day(&self) -> u32 {
        self.arrival().day
    }

    /// Iterate over all steps in order.
    pub fn iter(&self) -> impl Iterator<Item = &VisitInfo> {
        std::iter::once(&self.origin).chain(self.rest.iter())
    }

    /// Number of steps, including the departure.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always `false`; itineraries hold at least the departure step.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether any step occupies `location`.
    #[must_use]
    pub fn visits(&self, location: &str) -> bool {
        self.iter().any(|step| step.location.as_str() == location)
    }

    /// Copy the steps into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<VisitInfo> {
        self.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a Itinerary {
    type Item = &'a VisitInfo;
    type IntoIter =
        std::iter::Chain<std::iter::Once<&'a VisitInfo>, std::slice::Iter<'a, VisitInfo>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(&self.origin).chain(self.rest.iter())
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)?;
        for step in &self.rest {
            write!(f, " -> {step}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Itinerary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn step(name: &str, day: u32, fuel: i64) -> VisitInfo {
        VisitInfo::new(Location::new(name), day, fuel)
    }

    #[rstest]
    fn refuel_adds_capacity_and_a_day() {
        let refuelled = step("Dagobah", 6, 0).refuelled(6);
        assert_eq!(refuelled, step("Dagobah", 7, 6));
    }

    #[rstest]
    fn hop_beyond_the_tank_leaves_it_negative() {
        let arrival = step("Hoth", 7, 6).hop(Location::new("Endor"), 9);
        assert_eq!(arrival, step("Endor", 16, -3));
        assert!(!step("Hoth", 7, 6).can_cover(9));
        assert!(step("Hoth", 7, 6).can_cover(6));
    }

    #[rstest]
    fn waiting_keeps_fuel() {
        assert_eq!(step("Dagobah", 7, 3).waited(), step("Dagobah", 8, 3));
    }

    #[rstest]
    fn arrival_falls_back_to_origin() {
        let itinerary = Itinerary::departing(Location::new("A"), 4);
        assert_eq!(itinerary.arrival(), itinerary.origin());
        assert_eq!(itinerary.len(), 1);
        assert_eq!(itinerary.arrival_day(), 0);
    }

    #[rstest]
    fn from_steps_rejects_empty_sequences() {
        assert!(Itinerary::from_steps(Vec::new()).is_none());
        let itinerary =
            Itinerary::from_steps(vec![step("A", 0, 4), step("B", 2, 2)]).expect("non-empty");
        assert!(itinerary.visits("B"));
        assert!(!itinerary.visits("C"));
        assert_eq!(itinerary.to_vec(), vec![step("A", 0, 4), step("B", 2, 2)]);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_as_step_sequence() {
        let itinerary =
            Itinerary::from_steps(vec![step("A", 0, 4), step("B", 2, 2)]).expect("non-empty");
        let json = serde_json::to_value(&itinerary).expect("serialise itinerary");
        assert_eq!(
            json,
            serde_json::json!([
                { "location": "A", "day": 0, "fuel_remaining": 4 },
                { "location": "B", "day": 2, "fuel_remaining": 2 },
            ])
        );
    }
}
