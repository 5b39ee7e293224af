//! In-memory progress store.

use super::{ProgressError, ProgressStore};

/// Progress store that only lives for the current process.
///
/// Used when tracking is disabled and as a test double.
#[derive(Debug, Default, Clone)]
pub struct MemoryProgressStore {
    entries: Vec<String>,
}

impl MemoryProgressStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the entries in append order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl ProgressStore for MemoryProgressStore {
    fn has(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry == id)
    }

    fn append(&mut self, id: &str) -> Result<(), ProgressError> {
        self.entries.push(id.to_string());
        Ok(())
    }
}
