//! Capability-based UTF-8 file helpers shared by the loaders and the CLI.
#![forbid(unsafe_code)]

use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path using ambient authority.
///
/// # Errors
/// Propagates the underlying I/O error.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole file into a string.
///
/// # Errors
/// Fails when the file cannot be opened or is not valid UTF-8.
pub fn read_utf8_file(path: &Utf8Path) -> io::Result<String> {
    let mut contents = String::new();
    open_utf8_file(path)?.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Open the directory containing `path` and return it with the file name.
///
/// # Errors
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Whether `path` exists and is a regular file.
///
/// # Errors
/// Propagates I/O errors; a missing file surfaces as `NotFound`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Resolve `target` against the directory holding `anchor`.
///
/// Absolute targets are returned unchanged.
#[must_use]
pub fn resolve_beside(anchor: &Utf8Path, target: &Utf8Path) -> Utf8PathBuf {
    if target.is_absolute() {
        return target.to_path_buf();
    }
    anchor
        .parent()
        .map_or_else(|| target.to_path_buf(), |parent| parent.join(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path.to_path_buf()).expect("utf-8 temp path")
    }

    #[rstest]
    fn reads_file_contents() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = utf8(&dir.path().join("mission.json"));
        fs::write(&path, "{}").expect("write");
        assert_eq!(read_utf8_file(&path).expect("read"), "{}");
        assert!(file_is_file(&path).expect("metadata"));
    }

    #[rstest]
    fn directories_are_not_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let nested = utf8(&dir.path().join("nested"));
        fs::create_dir(&nested).expect("mkdir");
        assert!(!file_is_file(&nested).expect("metadata"));
    }

    #[rstest]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = utf8(&dir.path().join("absent.json"));
        let err = file_is_file(&path).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    #[case("data/mission.json", "universe.db", "data/universe.db")]
    #[case("mission.json", "universe.db", "universe.db")]
    #[case("data/mission.json", "/srv/universe.db", "/srv/universe.db")]
    fn resolves_relative_to_anchor(
        #[case] anchor: &str,
        #[case] target: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            resolve_beside(Utf8Path::new(anchor), Utf8Path::new(target)),
            Utf8PathBuf::from(expected)
        );
    }
}
