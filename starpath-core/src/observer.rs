//! Tracing hooks for the search.
//!
//! The engine never configures logging itself. Callers pass a
//! [`SearchObserver`] to watch the enumeration and scoring; [`LogObserver`]
//! forwards events to the `log` facade and [`NoopObserver`] drops them.

use log::{debug, trace};

use crate::{Itinerary, Location, VisitInfo};

/// Receives events as itineraries are enumerated, filtered and scored.
///
/// Every method defaults to doing nothing, so implementers override only the
/// events they care about. Observers must be `Send + Sync` so estimators that
/// hold one can be shared across threads.
///
/// # Examples
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use starpath_core::{Itinerary, SearchObserver};
///
/// #[derive(Default)]
/// struct CountingObserver(AtomicUsize);
///
/// impl SearchObserver for CountingObserver {
///     fn itinerary_found(&self, _itinerary: &Itinerary) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
///
/// let observer = CountingObserver::default();
/// assert_eq!(observer.0.load(Ordering::Relaxed), 0);
/// ```
pub trait SearchObserver: Send + Sync {
    /// A complete itinerary reached the destination.
    fn itinerary_found(&self, _itinerary: &Itinerary) {}

    /// A hop from `from` to `to` needs more fuel than the tank holds even
    /// after refuelling. The hop is still taken and the tank goes negative.
    fn tank_overdrawn(&self, _from: &VisitInfo, _to: &Location, _travel_time: u32) {}

    /// An itinerary arrives after the deadline and was not scored.
    fn itinerary_too_late(&self, _itinerary: &Itinerary, _deadline: u32) {}

    /// An itinerary was adjusted for the schedule and scored.
    fn itinerary_scored(&self, _adjusted: &Itinerary, _encounters: u32) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Observer that forwards events to the `log` facade.
///
/// Enumeration details go to `trace`, per-itinerary verdicts to `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn itinerary_found(&self, itinerary: &Itinerary) {
        trace!("found itinerary {itinerary}");
    }

    fn tank_overdrawn(&self, from: &VisitInfo, to: &Location, travel_time: u32) {
        trace!("hop from {from} to {to} takes {travel_time} days and overdraws the tank");
    }

    fn itinerary_too_late(&self, itinerary: &Itinerary, deadline: u32) {
        debug!(
            "itinerary {itinerary} arrives on day {} after the deadline ({deadline})",
            itinerary.arrival_day()
        );
    }

    fn itinerary_scored(&self, adjusted: &Itinerary, encounters: u32) {
        debug!("itinerary {adjusted} has {encounters} encounter(s)");
    }
}

impl<T: SearchObserver + ?Sized> SearchObserver for &T {
    fn itinerary_found(&self, itinerary: &Itinerary) {
        (**self).itinerary_found(itinerary);
    }

    fn tank_overdrawn(&self, from: &VisitInfo, to: &Location, travel_time: u32) {
        (**self).tank_overdrawn(from, to, travel_time);
    }

    fn itinerary_too_late(&self, itinerary: &Itinerary, deadline: u32) {
        (**self).itinerary_too_late(itinerary, deadline);
    }

    fn itinerary_scored(&self, adjusted: &Itinerary, encounters: u32) {
        (**self).itinerary_scored(adjusted, encounters);
    }
}
