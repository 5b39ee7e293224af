//! Processing result types.

use crate::issues::MigratedIssue;

/// Result of processing a single source record.
#[derive(Debug, Clone)]
pub enum ProcessingResult {
    /// The record was migrated. `issues` is empty when no component routed
    /// it to a project.
    Migrated {
        /// Source record key.
        key: String,
        /// Issues created, one per target project.
        issues: Vec<MigratedIssue>,
    },

    /// The record was not migrated.
    Skipped {
        /// Source record key.
        key: String,
        /// Reason for skipping.
        reason: String,
    },
}
