//! Export result and reporting
//!
//! This module defines the structure returned by an export run.

use crate::domain::CharacterId;
use std::path::PathBuf;
use std::time::Duration;

/// Result of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportResult {
    /// Written artifacts in creation order; in Canvas mode the shared runtime
    /// comes last
    pub files: Vec<PathBuf>,

    /// Records skipped after the operator chose to ignore a write failure
    pub skipped: Vec<CharacterId>,

    /// Number of qualifying morph shape records
    pub total: usize,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// True when no record was skipped
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Number of morph shapes actually written
    pub fn exported(&self) -> usize {
        self.total - self.skipped.len()
    }

    /// Log the result
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total,
            exported = self.exported(),
            skipped = self.skipped.len(),
            files = self.files.len(),
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        if !self.skipped.is_empty() {
            tracing::warn!(
                skipped_count = self.skipped.len(),
                "Export completed with skipped records"
            );
            for id in &self.skipped {
                tracing::warn!(character_id = %id, "Skipped morph shape");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_result_creation() {
        let result = ExportResult::new();

        assert!(result.is_empty());
        assert!(result.is_complete());
        assert_eq!(result.total, 0);
        assert_eq!(result.duration, Duration::from_secs(0));
    }

    #[test]
    fn test_export_result_with_duration() {
        let result = ExportResult::new().with_duration(Duration::from_secs(3));
        assert_eq!(result.duration, Duration::from_secs(3));
    }

    #[test]
    fn test_exported_excludes_skipped() {
        let result = ExportResult {
            files: vec![PathBuf::from("out/5.svg")],
            skipped: vec![CharacterId::new(9)],
            total: 2,
            duration: Duration::ZERO,
        };

        assert!(!result.is_complete());
        assert_eq!(result.exported(), 1);
    }
}
