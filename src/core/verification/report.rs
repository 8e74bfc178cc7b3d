//! Verification report structures
//!
//! This module defines the structures for reporting verification results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Verification report containing results of post-export validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Total number of artifacts verified
    pub total_verified: usize,

    /// Number of artifacts that passed verification
    pub passed: usize,

    /// Number of artifacts that failed verification
    pub failed: usize,

    /// Checksums of every artifact that could be read
    pub checksums: Vec<ArtifactChecksum>,

    /// List of failed verifications with details
    pub failures: Vec<VerificationFailure>,

    /// Duration of verification in milliseconds
    pub duration_ms: u64,
}

/// Checksum of one artifact on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactChecksum {
    pub path: PathBuf,
    pub checksum: String,
}

/// Details of a failed verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// Artifact path
    pub path: PathBuf,

    /// Checksum of a fresh render, when one could be produced
    pub expected_checksum: Option<String>,

    /// Checksum of the file on disk, when it could be read
    pub actual_checksum: Option<String>,

    /// Reason for failure
    pub reason: String,
}

impl VerificationReport {
    /// Create a new verification report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful verification
    pub fn record_pass(&mut self, checksum: ArtifactChecksum) {
        self.total_verified += 1;
        self.passed += 1;
        self.checksums.push(checksum);
    }

    /// Record a failed verification
    pub fn record_failure(&mut self, failure: VerificationFailure) {
        self.total_verified += 1;
        self.failed += 1;
        if let Some(actual) = &failure.actual_checksum {
            self.checksums.push(ArtifactChecksum {
                path: failure.path.clone(),
                checksum: actual.clone(),
            });
        }
        self.failures.push(failure);
    }

    /// Set the duration of verification
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    /// Check if all verifications passed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Format the report as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("📊 Verification Report\n");
        summary.push_str(&format!("  Duration: {} ms\n", self.duration_ms));
        summary.push_str(&format!("  Total verified: {}\n", self.total_verified));
        summary.push_str(&format!("  ✅ Passed: {}\n", self.passed));
        summary.push_str(&format!("  ❌ Failed: {}\n", self.failed));

        if !self.checksums.is_empty() {
            summary.push_str("\n🔒 Checksums (SHA-256):\n");
            for entry in &self.checksums {
                summary.push_str(&format!("  {}  {}\n", entry.checksum, entry.path.display()));
            }
        }

        if !self.failures.is_empty() {
            summary.push_str("\n❌ Failures:\n");
            for (i, failure) in self.failures.iter().enumerate() {
                summary.push_str(&format!("  {}. {}\n", i + 1, failure.path.display()));
                summary.push_str(&format!("     Reason: {}\n", failure.reason));
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checksum(path: &str) -> ArtifactChecksum {
        ArtifactChecksum {
            path: PathBuf::from(path),
            checksum: "abc123".to_string(),
        }
    }

    #[test]
    fn test_verification_report_new() {
        let report = VerificationReport::new();
        assert_eq!(report.total_verified, 0);
        assert!(report.failures.is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn test_record_pass() {
        let mut report = VerificationReport::new();
        report.record_pass(checksum("out/5.svg"));
        report.record_pass(checksum("out/9.svg"));

        assert_eq!(report.total_verified, 2);
        assert_eq!(report.passed, 2);
        assert_eq!(report.checksums.len(), 2);
        assert!(report.is_success());
    }

    #[test]
    fn test_record_failure() {
        let mut report = VerificationReport::new();
        report.record_failure(VerificationFailure {
            path: PathBuf::from("out/5.svg"),
            expected_checksum: Some("abc123".to_string()),
            actual_checksum: Some("def456".to_string()),
            reason: "Checksum mismatch".to_string(),
        });

        assert_eq!(report.failed, 1);
        assert_eq!(report.checksums[0].checksum, "def456");
        assert!(!report.is_success());
    }

    #[test]
    fn test_format_summary() {
        let mut report = VerificationReport::new();
        report.record_pass(checksum("out/5.svg"));
        report.record_failure(VerificationFailure {
            path: PathBuf::from("out/9.svg"),
            expected_checksum: None,
            actual_checksum: None,
            reason: "Artifact missing".to_string(),
        });

        let summary = report.format_summary();
        assert!(summary.contains("Total verified: 2"));
        assert!(summary.contains("abc123  out/5.svg"));
        assert!(summary.contains("Reason: Artifact missing"));
    }
}
