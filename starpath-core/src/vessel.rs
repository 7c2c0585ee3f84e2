use thiserror::Error;

use crate::Location;

/// Errors returned by [`VesselProfile::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VesselProfileError {
    /// The vessel cannot travel at all without fuel.
    #[error("fuel capacity must be positive")]
    ZeroFuelCapacity,
}

/// Where the vessel starts, where it must go, and how far one tank takes it.
///
/// The fuel capacity doubles as the amount taken on during a refuel stay.
///
/// # Examples
/// ```
/// use starpath_core::VesselProfile;
///
/// # fn main() -> Result<(), starpath_core::VesselProfileError> {
/// let vessel = VesselProfile::new("Tatooine", "Endor", 6)?;
/// assert_eq!(vessel.fuel_capacity(), 6);
/// assert_eq!(vessel.destination().as_str(), "Endor");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VesselProfile {
    origin: Location,
    destination: Location,
    fuel_capacity: u32,
}

impl VesselProfile {
    /// Validate and construct a profile.
    ///
    /// # Errors
    /// Returns [`VesselProfileError::ZeroFuelCapacity`] when `fuel_capacity`
    /// is zero.
    pub fn new(
        origin: impl Into<Location>,
        destination: impl Into<Location>,
        fuel_capacity: u32,
    ) -> Result<Self, VesselProfileError> {
        if fuel_capacity == 0 {
            return Err(VesselProfileError::ZeroFuelCapacity);
        }
        Ok(Self {
            origin: origin.into(),
            destination: destination.into(),
            fuel_capacity,
        })
    }

    /// Departure location.
    #[must_use]
    pub const fn origin(&self) -> &Location {
        &self.origin
    }

    /// Arrival location.
    #[must_use]
    pub const fn destination(&self) -> &Location {
        &self.destination
    }

    /// Days of travel a full tank allows.
    #[must_use]
    pub const fn fuel_capacity(&self) -> u32 {
        self.fuel_capacity
    }
}
