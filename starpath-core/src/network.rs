//! Undirected travel network with integer travel times.
//!
//! Every route is registered in both directions, so
//! `time_between(a, b) == time_between(b, a)` holds by construction.
//! Neighbour lists keep insertion order; the enumerator explores them in
//! that order.

use std::collections::{BTreeSet, HashMap};

use log::trace;
use thiserror::Error;

use crate::Location;

/// Errors raised while building or querying a [`Network`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// No route was registered between the two locations.
    #[error("no route registered between {from} and {to}")]
    UnknownRoute {
        /// Location the lookup started from.
        from: Location,
        /// Location the lookup targeted.
        to: Location,
    },
    /// A route was registered with a zero travel time.
    #[error("travel time between {from} and {to} must be positive")]
    NonPositiveTravelTime {
        /// One end of the rejected route.
        from: Location,
        /// The other end of the rejected route.
        to: Location,
    },
}

/// Undirected weighted graph of locations.
///
/// # Examples
/// ```
/// use starpath_core::Network;
///
/// # fn main() -> Result<(), starpath_core::NetworkError> {
/// let mut network = Network::new();
/// network.add_route("Tatooine", "Dagobah", 6)?;
/// assert_eq!(network.time_between("Dagobah", "Tatooine")?, 6);
/// assert_eq!(network.neighbours("Tatooine").len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Network {
    locations: BTreeSet<Location>,
    neighbours: HashMap<Location, Vec<Location>>,
    travel_times: HashMap<Location, HashMap<Location, u32>>,
}

impl Network {
    /// Construct an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from `(origin, destination, travel_time)` records.
    ///
    /// # Errors
    /// Returns [`NetworkError::NonPositiveTravelTime`] for the first record
    /// with a zero travel time.
    pub fn from_routes<I, A, B>(routes: I) -> Result<Self, NetworkError>
    where
        I: IntoIterator<Item = (A, B, u32)>,
        A: Into<Location>,
        B: Into<Location>,
    {
        let mut network = Self::new();
        for (origin, destination, travel_time) in routes {
            network.add_route(origin, destination, travel_time)?;
        }
        Ok(network)
    }

    /// Register a route in both directions.
    ///
    /// Re-registering an existing pair replaces its travel time without
    /// duplicating the neighbour entries.
    ///
    /// # Errors
    /// Returns [`NetworkError::NonPositiveTravelTime`] when `travel_time` is
    /// zero.
    pub fn add_route(
        &mut self,
        a: impl Into<Location>,
        b: impl Into<Location>,
        travel_time: u32,
    ) -> Result<(), NetworkError> {
        let from = a.into();
        let to = b.into();
        if travel_time == 0 {
            return Err(NetworkError::NonPositiveTravelTime { from, to });
        }

        self.locations.insert(from.clone());
        self.locations.insert(to.clone());
        self.link(&from, &to, travel_time);
        self.link(&to, &from, travel_time);
        trace!("added route {from} -> {to} in time {travel_time}");
        Ok(())
    }

    fn link(&mut self, from: &Location, to: &Location, travel_time: u32) {
        let previous = self
            .travel_times
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), travel_time);
        if previous.is_none() {
            self.neighbours
                .entry(from.clone())
                .or_default()
                .push(to.clone());
        }
    }

    /// Locations directly reachable from `location`, in insertion order.
    ///
    /// Unknown locations have no neighbours.
    #[must_use]
    pub fn neighbours(&self, location: &str) -> &[Location] {
        self.neighbours
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Travel time between two directly connected locations.
    ///
    /// # Errors
    /// Returns [`NetworkError::UnknownRoute`] when the pair was never added.
    pub fn time_between(&self, a: &str, b: &str) -> Result<u32, NetworkError> {
        self.travel_times
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .ok_or_else(|| NetworkError::UnknownRoute {
                from: Location::new(a),
                to: Location::new(b),
            })
    }

    /// Whether `location` appears on any registered route.
    #[must_use]
    pub fn contains(&self, location: &str) -> bool {
        self.locations.contains(location)
    }

    /// All known locations in lexical order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Number of distinct locations.
    #[must_use]
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of distinct undirected routes, counting self-loops once.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.travel_times
            .iter()
            .map(|(from, row)| row.keys().filter(|to| from <= *to).count())
            .sum()
    }
}
