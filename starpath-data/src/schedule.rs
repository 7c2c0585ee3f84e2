//! Adversary schedule JSON.
//!
//! ```json
//! { "countdown": 7, "bounty_hunters": [{ "planet": "Hoth", "day": 6 }] }
//! ```

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use starpath_core::AdversarySchedule;
use thiserror::Error;

/// Error raised while loading an adversary schedule.
#[derive(Debug, Error)]
pub enum ScheduleFileError {
    /// The schedule could not be read.
    #[error("failed to read schedule {path}: {source}")]
    Read {
        /// Schedule location.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The schedule is not valid JSON, lacks a field or holds a negative
    /// number.
    #[error("invalid schedule: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RawSchedule {
    countdown: u32,
    bounty_hunters: Vec<RawSighting>,
}

#[derive(Debug, Deserialize)]
struct RawSighting {
    planet: String,
    day: u32,
}

/// Parse a schedule from its JSON text.
///
/// # Errors
/// Returns [`ScheduleFileError::Parse`] for malformed input.
///
/// # Examples
/// ```
/// use starpath_data::parse_schedule;
///
/// # fn main() -> Result<(), starpath_data::ScheduleFileError> {
/// let schedule = parse_schedule(
///     r#"{"countdown": 7, "bounty_hunters": [{"planet": "Hoth", "day": 6}]}"#,
/// )?;
/// assert_eq!(schedule.deadline(), 7);
/// assert!(schedule.is_present("Hoth", 6));
/// # Ok(())
/// # }
/// ```
pub fn parse_schedule(json: &str) -> Result<AdversarySchedule, ScheduleFileError> {
    let raw: RawSchedule = serde_json::from_str(json)?;
    Ok(AdversarySchedule::from_sightings(
        raw.countdown,
        raw.bounty_hunters
            .into_iter()
            .map(|sighting| (sighting.planet, sighting.day)),
    ))
}

/// Read and parse the schedule at `path`.
///
/// # Errors
/// Returns [`ScheduleFileError`] when the file cannot be read or parsed.
pub fn load_schedule(path: &Utf8Path) -> Result<AdversarySchedule, ScheduleFileError> {
    let contents = starpath_fs::read_utf8_file(path).map_err(|source| ScheduleFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let schedule = parse_schedule(&contents)?;
    debug!(
        "loaded schedule {path}: countdown {} with {} sighting(s)",
        schedule.deadline(),
        schedule.sighting_count()
    );
    Ok(schedule)
}
