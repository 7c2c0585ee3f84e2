//! Vessel manifest JSON.
//!
//! ```json
//! { "autonomy": 6, "departure": "Tatooine", "arrival": "Endor", "routes_db": "universe.db" }
//! ```

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use starpath_core::{VesselProfile, VesselProfileError};
use thiserror::Error;

/// Error raised while loading a vessel manifest.
#[derive(Debug, Error)]
pub enum VesselFileError {
    /// The manifest could not be read.
    #[error("failed to read vessel manifest {path}: {source}")]
    Read {
        /// Manifest location.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The manifest is not valid JSON or lacks a required field.
    #[error("invalid vessel manifest {path}: {source}")]
    Parse {
        /// Manifest location.
        path: Utf8PathBuf,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The manifest describes an impossible vessel.
    #[error("invalid vessel in {path}: {source}")]
    Profile {
        /// Manifest location.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: VesselProfileError,
    },
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    departure: String,
    arrival: String,
    autonomy: u32,
    routes_db: Utf8PathBuf,
}

/// A validated vessel together with the routes database it flies over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VesselManifest {
    /// Origin, destination and fuel capacity.
    pub vessel: VesselProfile,
    /// Routes database, resolved against the manifest's directory.
    pub routes_db: Utf8PathBuf,
}

/// Load and validate the manifest at `path`.
///
/// A relative `routes_db` is resolved against the directory holding the
/// manifest.
///
/// # Errors
/// Returns [`VesselFileError`] when the file cannot be read, parsed or
/// validated.
pub fn load_vessel_manifest(path: &Utf8Path) -> Result<VesselManifest, VesselFileError> {
    let contents = starpath_fs::read_utf8_file(path).map_err(|source| VesselFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawManifest =
        serde_json::from_str(&contents).map_err(|source| VesselFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let vessel = VesselProfile::new(raw.departure, raw.arrival, raw.autonomy).map_err(
        |source| VesselFileError::Profile {
            path: path.to_path_buf(),
            source,
        },
    )?;
    let routes_db = starpath_fs::resolve_beside(path, &raw.routes_db);
    debug!("vessel manifest {path} uses routes database {routes_db}");
    Ok(VesselManifest { vessel, routes_db })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    #[fixture]
    fn manifest_dir() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("millennium-falcon.json"))
            .expect("utf-8 temp path");
        (dir, path)
    }

    #[rstest]
    fn resolves_routes_beside_manifest(manifest_dir: (TempDir, Utf8PathBuf)) {
        let (_dir, path) = manifest_dir;
        fs::write(
            &path,
            r#"{"autonomy": 6, "departure": "Tatooine", "arrival": "Endor", "routes_db": "universe.db"}"#,
        )
        .expect("write manifest");

        let manifest = load_vessel_manifest(&path).expect("load manifest");
        assert_eq!(manifest.vessel.fuel_capacity(), 6);
        assert_eq!(manifest.vessel.origin().as_str(), "Tatooine");
        assert_eq!(
            manifest.routes_db,
            path.parent().expect("parent").join("universe.db")
        );
    }

    #[rstest]
    fn absolute_routes_path_is_kept(manifest_dir: (TempDir, Utf8PathBuf)) {
        let (_dir, path) = manifest_dir;
        fs::write(
            &path,
            r#"{"autonomy": 6, "departure": "A", "arrival": "B", "routes_db": "/srv/universe.db"}"#,
        )
        .expect("write manifest");

        let manifest = load_vessel_manifest(&path).expect("load manifest");
        assert_eq!(manifest.routes_db, Utf8PathBuf::from("/srv/universe.db"));
    }

    #[rstest]
    #[case::missing_field(r#"{"autonomy": 6, "departure": "A", "arrival": "B"}"#)]
    #[case::negative_autonomy(
        r#"{"autonomy": -1, "departure": "A", "arrival": "B", "routes_db": "u.db"}"#
    )]
    #[case::not_json("autonomy = 6")]
    fn malformed_manifest_is_a_parse_error(
        manifest_dir: (TempDir, Utf8PathBuf),
        #[case] contents: &str,
    ) {
        let (_dir, path) = manifest_dir;
        fs::write(&path, contents).expect("write manifest");
        let error = load_vessel_manifest(&path).expect_err("malformed manifest");
        assert!(matches!(error, VesselFileError::Parse { .. }));
    }

    #[rstest]
    fn zero_autonomy_is_rejected(manifest_dir: (TempDir, Utf8PathBuf)) {
        let (_dir, path) = manifest_dir;
        fs::write(
            &path,
            r#"{"autonomy": 0, "departure": "A", "arrival": "B", "routes_db": "u.db"}"#,
        )
        .expect("write manifest");
        let error = load_vessel_manifest(&path).expect_err("zero autonomy");
        assert!(matches!(
            error,
            VesselFileError::Profile {
                source: VesselProfileError::ZeroFuelCapacity,
                ..
            }
        ));
    }

    #[rstest]
    fn missing_manifest_is_a_read_error(manifest_dir: (TempDir, Utf8PathBuf)) {
        let (_dir, path) = manifest_dir;
        let error = load_vessel_manifest(&path).expect_err("missing manifest");
        assert!(matches!(error, VesselFileError::Read { .. }));
    }
}
