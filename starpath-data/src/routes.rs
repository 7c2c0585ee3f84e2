//! SQLite-backed route table.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use rusqlite::{Connection, OpenFlags};
use starpath_core::{Network, NetworkError};
use thiserror::Error;

/// Error raised when reading the persisted route table.
#[derive(Debug, Error)]
pub enum RouteStoreError {
    /// The database file does not exist or is not a regular file.
    #[error("routes database {path} does not exist")]
    MissingDatabase {
        /// Location of the SQLite database on disk.
        path: Utf8PathBuf,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored travel time was zero, negative or too large.
    #[error("route {origin} -> {destination} has invalid travel time {value}")]
    InvalidTravelTime {
        /// Origin column of the offending row.
        origin: String,
        /// Destination column of the offending row.
        destination: String,
        /// Stored travel time.
        value: i64,
    },
    /// The rows could not be assembled into a network.
    #[error(transparent)]
    Network(#[from] NetworkError),
    /// Generic SQLite error when reading route rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only view over a `routes(origin, destination, travel_time)` table.
pub struct SqliteRouteStore {
    path: Utf8PathBuf,
    connection: Connection,
}

impl fmt::Debug for SqliteRouteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteRouteStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteRouteStore {
    /// Open the database at `path` read-only.
    ///
    /// # Errors
    /// Returns [`RouteStoreError::MissingDatabase`] when the file is absent
    /// and [`RouteStoreError::OpenDatabase`] when SQLite rejects it.
    pub fn open(path: &Utf8Path) -> Result<Self, RouteStoreError> {
        if !matches!(starpath_fs::file_is_file(path), Ok(true)) {
            return Err(RouteStoreError::MissingDatabase {
                path: path.to_path_buf(),
            });
        }
        debug!("opening routes database at {path}");
        let connection =
            Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
                |source| RouteStoreError::OpenDatabase {
                    path: path.to_path_buf(),
                    source,
                },
            )?;
        Ok(Self {
            path: path.to_path_buf(),
            connection,
        })
    }

    /// Location of the backing database.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Build a [`Network`] from every row of the `routes` table.
    ///
    /// # Errors
    /// Returns [`RouteStoreError::InvalidTravelTime`] for rows whose travel
    /// time is not a positive 32-bit integer, and
    /// [`RouteStoreError::Database`] when the table is missing or malformed.
    pub fn load_network(&self) -> Result<Network, RouteStoreError> {
        let mut statement = self
            .connection
            .prepare("SELECT origin, destination, travel_time FROM routes")?;
        let mut rows = statement.query([])?;
        let mut network = Network::new();
        let mut loaded = 0_usize;

        while let Some(row) = rows.next()? {
            let origin: String = row.get(0)?;
            let destination: String = row.get(1)?;
            let value: i64 = row.get(2)?;
            let travel_time = u32::try_from(value)
                .ok()
                .filter(|time| *time > 0)
                .ok_or_else(|| RouteStoreError::InvalidTravelTime {
                    origin: origin.clone(),
                    destination: destination.clone(),
                    value,
                })?;
            network.add_route(origin, destination, travel_time)?;
            loaded += 1;
        }

        debug!(
            "loaded {loaded} route rows covering {} locations from {}",
            network.location_count(),
            self.path
        );
        Ok(network)
    }
}
