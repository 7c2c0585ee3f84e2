//! Test helpers for laying out mission files on disk.

use camino::{Utf8Path, Utf8PathBuf};
use starpath_data::test_support::{REFERENCE_ROUTES, write_routes_database};
use std::fs;
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture file");
}

/// Reference mission files inside a temporary directory.
#[derive(Debug)]
pub(super) struct MissionFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl MissionFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        write_routes_database(&root.join("universe.db"), REFERENCE_ROUTES)
            .expect("persist routes");
        write_utf8(
            &root.join("millennium-falcon.json"),
            br#"{"autonomy": 6, "departure": "Tatooine", "arrival": "Endor", "routes_db": "universe.db"}"#,
        );
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn vessel(&self) -> Utf8PathBuf {
        self.root.join("millennium-falcon.json")
    }

    pub(super) fn schedule(&self) -> Utf8PathBuf {
        self.root.join("empire.json")
    }

    /// Write `empire.json` with hunters at Hoth on days six to eight.
    pub(super) fn write_schedule(&self, countdown: u32) {
        let payload = format!(
            r#"{{"countdown": {countdown}, "bounty_hunters": [
                {{"planet": "Hoth", "day": 6}},
                {{"planet": "Hoth", "day": 7}},
                {{"planet": "Hoth", "day": 8}}
            ]}}"#
        );
        write_utf8(&self.schedule(), payload.as_bytes());
    }
}
