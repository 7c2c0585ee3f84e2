//! Depth-first enumeration of every simple itinerary from origin to
//! destination.
//!
//! The search keeps an explicit stack of owned partial itineraries instead
//! of mutating one shared path. A location counts as visited when any step of
//! the partial itinerary occupies it, so the visited set lives and dies with
//! each branch and nothing carries over between calls.

use crate::{Itinerary, Location, Network, NetworkError, SearchObserver, VesselProfile};

/// Enumerates feasible itineraries for one vessel over one network.
///
/// # Examples
/// ```
/// use starpath_core::{ItineraryEnumerator, Network, NoopObserver, VesselProfile};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let network = Network::from_routes([("A", "B", 2), ("B", "C", 2)])?;
/// let vessel = VesselProfile::new("A", "C", 4)?;
/// let itineraries = ItineraryEnumerator::new(&network, &vessel).enumerate(&NoopObserver)?;
///
/// assert_eq!(itineraries.len(), 1);
/// assert_eq!(itineraries[0].arrival_day(), 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ItineraryEnumerator<'a> {
    network: &'a Network,
    vessel: &'a VesselProfile,
}

impl<'a> ItineraryEnumerator<'a> {
    /// Prepare a search over `network` for `vessel`.
    #[must_use]
    pub const fn new(network: &'a Network, vessel: &'a VesselProfile) -> Self {
        Self { network, vessel }
    }

    /// Produce every itinerary reaching the destination without revisiting a
    /// location.
    ///
    /// A refuel stay inserts one extra step at the current location whenever
    /// the tank holds less than the next hop needs. Itineraries are returned
    /// in depth-first order over the network's neighbour lists, but callers
    /// must not rely on any particular order.
    ///
    /// # Errors
    /// Returns [`NetworkError::UnknownRoute`] when a neighbour has no travel
    /// time, which only happens for a malformed network.
    pub fn enumerate(
        &self,
        observer: &dyn SearchObserver,
    ) -> Result<Vec<Itinerary>, NetworkError> {
        let destination = self.vessel.destination();
        let mut pending = vec![Itinerary::departing(
            self.vessel.origin().clone(),
            self.vessel.fuel_capacity(),
        )];
        let mut complete = Vec::new();

        while let Some(partial) = pending.pop() {
            if partial.arrival().location == *destination {
                observer.itinerary_found(&partial);
                complete.push(partial);
                continue;
            }
            let branches = self.branches(&partial, observer)?;
            // Reverse so the first neighbour is explored first.
            pending.extend(branches.into_iter().rev());
        }

        Ok(complete)
    }

    fn branches(
        &self,
        partial: &Itinerary,
        observer: &dyn SearchObserver,
    ) -> Result<Vec<Itinerary>, NetworkError> {
        let current = partial.arrival();
        let mut branches = Vec::new();
        for neighbour in self.network.neighbours(current.location.as_str()) {
            if partial.visits(neighbour.as_str()) {
                continue;
            }
            let travel_time = self
                .network
                .time_between(current.location.as_str(), neighbour.as_str())?;
            branches.push(self.extend(partial, neighbour, travel_time, observer));
        }
        Ok(branches)
    }

    /// Copy `partial`, refuel when the tank is short, then hop.
    ///
    /// Only one refuel stay is inserted per hop. When even that leaves the
    /// tank short the hop is still taken and the fuel goes negative.
    fn extend(
        &self,
        partial: &Itinerary,
        neighbour: &Location,
        travel_time: u32,
        observer: &dyn SearchObserver,
    ) -> Itinerary {
        let mut next = partial.clone();
        let current = partial.arrival();
        if !current.can_cover(travel_time) {
            next.push(current.refuelled(self.vessel.fuel_capacity()));
        }
        let departure = next.arrival();
        if !departure.can_cover(travel_time) {
            observer.tank_overdrawn(departure, neighbour, travel_time);
        }
        let hop = departure.hop(neighbour.clone(), travel_time);
        next.push(hop);
        next
    }
}
