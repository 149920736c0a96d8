//! Paths and common operations for the `kvlt/` directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// Walk upward from `start` to find the directory containing `kvlt/map.kvlt`.
pub fn find_root_from(start: &Path) -> Result<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join("kvlt").join("map.kvlt").exists() {
            return Ok(dir.to_path_buf());
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => bail!("no kvlt map found — run `kvlt init` to scaffold one here"),
        }
    }
}

/// Walk upward from the current working directory to find the map root.
pub fn find_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    find_root_from(&cwd)
}

pub fn kvlt_dir(root: &Path) -> PathBuf {
    root.join("kvlt")
}

pub fn map_path(root: &Path) -> PathBuf {
    root.join("kvlt").join("map.kvlt")
}

/// Directory holding the persisted key-value state (filters, theme).
pub fn state_dir(root: &Path) -> PathBuf {
    root.join("kvlt").join("state")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_root_from_direct() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("kvlt")).unwrap();
        fs::write(dir.path().join("kvlt/map.kvlt"), "").unwrap();
        let root = find_root_from(dir.path()).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn find_root_from_subdir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("kvlt")).unwrap();
        fs::write(dir.path().join("kvlt/map.kvlt"), "").unwrap();
        fs::create_dir_all(dir.path().join("deep/nested")).unwrap();
        let root = find_root_from(&dir.path().join("deep/nested")).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn find_root_fails_without_init() {
        let dir = TempDir::new().unwrap();
        assert!(find_root_from(dir.path()).is_err());
    }
}
