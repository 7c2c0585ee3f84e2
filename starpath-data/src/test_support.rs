//! On-disk fixtures shared by unit, behaviour and CLI tests.

use camino::Utf8Path;
use rusqlite::{Connection, params};

/// Routes of the reference galaxy, as stored in its `universe.db`.
pub const REFERENCE_ROUTES: &[(&str, &str, i64)] = &[
    ("Tatooine", "Dagobah", 6),
    ("Dagobah", "Endor", 4),
    ("Dagobah", "Hoth", 1),
    ("Hoth", "Endor", 1),
    ("Tatooine", "Hoth", 6),
];

/// Persist `routes` into a fresh `routes` table at `path`.
///
/// # Errors
/// Propagates any SQLite error.
pub fn write_routes_database(
    path: &Utf8Path,
    routes: &[(&str, &str, i64)],
) -> rusqlite::Result<()> {
    let mut connection = Connection::open(path)?;
    let transaction = connection.transaction()?;
    transaction.execute(
        "CREATE TABLE routes (
            origin TEXT NOT NULL,
            destination TEXT NOT NULL,
            travel_time INTEGER NOT NULL
        )",
        [],
    )?;
    {
        let mut insert = transaction.prepare(
            "INSERT INTO routes (origin, destination, travel_time) VALUES (?1, ?2, ?3)",
        )?;
        for (origin, destination, travel_time) in routes {
            insert.execute(params![origin, destination, travel_time])?;
        }
    }
    transaction.commit()
}
