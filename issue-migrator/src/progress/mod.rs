//! Resumable progress tracking.
//!
//! Every source record that finished producing its target-side effects gets
//! one entry in an append-only [`ProgressStore`]. Later runs consult the store
//! before touching a record, so an identifier that is present is never
//! processed again.
//!
//! A record interrupted between its first target write and its tracking commit
//! has no entry and will be recreated in full by the next run. With
//! [`TrackingGranularity::PerContainer`] the window shrinks to a single target
//! project.

mod error;
mod file;
mod memory;

pub use error::ProgressError;
pub use file::FileProgressStore;
pub use memory::MemoryProgressStore;

use serde::Deserialize;

/// Append-only set of migrated source identifiers.
pub trait ProgressStore {
    /// Returns true if `id` was recorded by this or an earlier run.
    fn has(&self, id: &str) -> bool;

    /// Records `id` as migrated.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError`] if the entry cannot be persisted.
    fn append(&mut self, id: &str) -> Result<(), ProgressError>;
}

/// When tracking entries are committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingGranularity {
    /// One entry per source record, written after every target project got
    /// its copy.
    #[default]
    PerRecord,

    /// Additionally one entry per (record, target project) pair, written as
    /// soon as that project's copy is complete.
    PerContainer,
}

/// Builds the tracking entry for one record copied into one project.
#[must_use]
pub fn container_entry(key: &str, project_id: u64) -> String {
    format!("{key}@{project_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_entry_joins_key_and_project() {
        assert_eq!(container_entry("PRO-7", 42), "PRO-7@42");
    }

    #[test]
    fn granularity_parses_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            granularity: TrackingGranularity,
        }

        let parsed: Wrapper = toml::from_str(r#"granularity = "per-container""#).unwrap();
        assert_eq!(parsed.granularity, TrackingGranularity::PerContainer);
        assert_eq!(TrackingGranularity::default(), TrackingGranularity::PerRecord);
    }
}
