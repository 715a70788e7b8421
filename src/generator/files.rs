//! File store abstraction
//!
//! The patch engines never touch `std::fs` directly; they go through this
//! narrow interface so the line-splicing logic stays testable against an
//! on-disk fixture or nothing at all.

use crate::error::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Minimal file operations the generators need.
pub trait FileStore: Send + Sync {
    /// Find files in `dir` (non-recursive) whose name ends with `suffix`,
    /// sorted by path.
    fn search_files(&self, dir: &Path, suffix: &str) -> Result<Vec<PathBuf>>;

    /// Read a whole file as text.
    fn read_file(&self, path: &Path) -> Result<String>;

    /// Overwrite a whole file with text.
    fn write_file(&self, path: &Path, text: &str) -> Result<()>;

    /// Delete a file. Deleting a file that does not exist is not an error.
    fn delete_file(&self, path: &Path) -> Result<()>;
}

/// [`FileStore`] backed by the local filesystem.
pub struct DiskStore;

impl FileStore for DiskStore {
    fn search_files(&self, dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
        let mut matches: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
            .map(|entry| entry.into_path())
            .collect();

        matches.sort();
        Ok(matches)
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn write_file(&self, path: &Path, text: &str) -> Result<()> {
        Ok(fs::write(path, text)?)
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
