//! Flat-file progress store.

use super::{ProgressError, ProgressStore};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Progress store backed by a plain-text file with one identifier per line.
///
/// The file is read fully when opened and only ever appended to afterwards.
/// There is no locking; two concurrent runs against the same file are not
/// supported.
#[derive(Debug)]
pub struct FileProgressStore {
    path: PathBuf,
    entries: HashSet<String>,
}

impl FileProgressStore {
    /// Opens the store, loading every existing entry.
    ///
    /// A missing file is treated as an empty store and is created on the
    /// first append.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::Io`] if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ProgressError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(source) => {
                return Err(ProgressError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        debug!(path = %path.display(), count = entries.len(), "Loaded tracking entries");
        Ok(Self { path, entries })
    }

    /// Returns the tracking file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn io_error(&self, source: std::io::Error) -> ProgressError {
        ProgressError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl ProgressStore for FileProgressStore {
    fn has(&self, id: &str) -> bool {
        self.entries.contains(id)
    }

    fn append(&mut self, id: &str) -> Result<(), ProgressError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        writeln!(file, "{id}").map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))?;

        self.entries.insert(id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn open_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileProgressStore::open(temp.path().join("migrated.txt")).unwrap();
        assert!(store.is_empty());
        assert!(!store.has("PRO-1"));
    }

    #[test]
    fn open_reads_existing_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("migrated.txt");
        fs::write(&path, "PRO-1\n\nPRO-2\r\n").unwrap();

        let store = FileProgressStore::open(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.has("PRO-1"));
        assert!(store.has("PRO-2"));
    }

    #[test]
    fn append_persists_across_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("migrated.txt");

        let mut store = FileProgressStore::open(&path).unwrap();
        store.append("PRO-1").unwrap();
        store.append("PRO-2").unwrap();
        assert!(store.has("PRO-2"));

        let reopened = FileProgressStore::open(&path).unwrap();
        assert!(reopened.has("PRO-1"));
        assert!(reopened.has("PRO-2"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "PRO-1\nPRO-2\n");
    }

    #[test]
    fn append_keeps_existing_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("migrated.txt");
        fs::write(&path, "OLD-1\n").unwrap();

        let mut store = FileProgressStore::open(&path).unwrap();
        store.append("NEW-1").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "OLD-1\nNEW-1\n");
    }
}
