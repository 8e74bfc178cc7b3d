//! Verification logic for post-export validation
//!
//! Each artifact listed in an [`ExportResult`] is read back, checksummed and
//! compared with what the exporter would write for it now.

use crate::core::export::ExportResult;
use crate::core::render::canvas::{CANVAS_RUNTIME, CANVAS_RUNTIME_FILE};
use crate::core::render::{render_morph_shape, ExportSettings};
use crate::core::verification::checksum::{calculate_checksum_bytes, calculate_file_checksum};
use crate::core::verification::report::{ArtifactChecksum, VerificationFailure, VerificationReport};
use crate::domain::{CharacterId, Document};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

/// Verifier for post-export validation
pub struct Verifier<'a> {
    document: &'a Document,
    settings: ExportSettings,
}

impl<'a> Verifier<'a> {
    /// Create a verifier for artifacts exported from `document` with `settings`
    pub fn new(document: &'a Document, settings: ExportSettings) -> Self {
        Self { document, settings }
    }

    /// Verify every artifact in `result`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use morphex::core::export::{Decision, FixedDecision, MorphShapeExporter};
    /// use morphex::core::render::ExportSettings;
    /// use morphex::core::verification::Verifier;
    /// use morphex::domain::Document;
    /// use std::path::Path;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let document = Document::from_json_file("shapes.json")?;
    /// let settings = ExportSettings::default();
    /// let result = MorphShapeExporter::new(&document, settings).export_all(
    ///     Path::new("out"),
    ///     &mut FixedDecision(Decision::Abort),
    ///     None,
    /// )?;
    /// let report = Verifier::new(&document, settings).verify_export(&result);
    /// println!("{}", report.format_summary());
    /// # Ok(())
    /// # }
    /// ```
    pub fn verify_export(&self, result: &ExportResult) -> VerificationReport {
        let start = Instant::now();
        let mut report = VerificationReport::new();

        tracing::info!(
            artifacts = result.files.len(),
            "Starting post-export verification"
        );

        for path in &result.files {
            match self.verify_artifact(path) {
                Ok(checksum) => report.record_pass(ArtifactChecksum {
                    path: path.clone(),
                    checksum,
                }),
                Err(failure) => {
                    tracing::warn!(
                        path = %path.display(),
                        reason = %failure.reason,
                        "Artifact failed verification"
                    );
                    report.record_failure(failure);
                }
            }
        }

        report.set_duration(start.elapsed().as_millis() as u64);

        tracing::info!(
            passed = report.passed,
            failed = report.failed,
            duration_ms = report.duration_ms,
            "Verification completed"
        );

        report
    }

    fn verify_artifact(&self, path: &Path) -> Result<String, VerificationFailure> {
        let failure = |reason: String, expected: Option<String>, actual: Option<String>| {
            VerificationFailure {
                path: path.to_path_buf(),
                expected_checksum: expected,
                actual_checksum: actual,
                reason,
            }
        };

        let actual = calculate_file_checksum(path)
            .map_err(|e| failure(format!("Artifact unreadable: {e}"), None, None))?;

        let expected = self
            .expected_bytes(path)
            .map(|bytes| calculate_checksum_bytes(&bytes))
            .map_err(|reason| failure(reason, None, Some(actual.clone())))?;

        if expected == actual {
            Ok(actual)
        } else {
            Err(failure(
                "Checksum mismatch with a fresh render".to_string(),
                Some(expected),
                Some(actual),
            ))
        }
    }

    /// Bytes the exporter would write to `path`
    fn expected_bytes(&self, path: &Path) -> Result<Vec<u8>, String> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| "Artifact has no file name".to_string())?;

        if file_name == CANVAS_RUNTIME_FILE {
            return Ok(CANVAS_RUNTIME.to_vec());
        }

        let stem = file_name
            .strip_suffix(&format!(".{}", self.settings.mode.extension()))
            .ok_or_else(|| format!("Unexpected artifact name {file_name}"))?;
        let id = CharacterId::from_str(stem)?;
        let record = self
            .document
            .character(id)
            .and_then(|tag| tag.as_morph_shape())
            .ok_or_else(|| format!("No morph shape {id} in document"))?;

        render_morph_shape(record, &self.settings, self.document)
            .map(String::into_bytes)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::{Decision, FixedDecision, MorphShapeExporter};
    use crate::core::render::MorphShapeExportMode;
    use crate::domain::{MorphShapeRecord, Rect, Tag};
    use std::fs;
    use tempfile::TempDir;

    fn document() -> Document {
        Document::new(vec![Tag::MorphShape(MorphShapeRecord {
            character_id: CharacterId::new(4),
            name: None,
            start_bounds: Rect::new(0, 20, 0, 20),
            end_bounds: Rect::new(0, 40, 0, 40),
            fill_styles: vec![],
            line_styles: vec![],
            start_paths: vec![],
            end_paths: vec![],
        })])
        .unwrap()
    }

    fn export(document: &Document, settings: ExportSettings, dir: &Path) -> ExportResult {
        MorphShapeExporter::new(document, settings)
            .export_all(dir, &mut FixedDecision(Decision::Abort), None)
            .unwrap()
    }

    #[test]
    fn test_fresh_export_verifies() {
        let dir = TempDir::new().unwrap();
        let document = document();
        let settings = ExportSettings::new(MorphShapeExportMode::Canvas, 1.0);
        let result = export(&document, settings, dir.path());

        let report = Verifier::new(&document, settings).verify_export(&result);

        assert!(report.is_success());
        assert_eq!(report.passed, 2);
        assert_eq!(report.checksums.len(), 2);
    }

    #[test]
    fn test_modified_artifact_fails() {
        let dir = TempDir::new().unwrap();
        let document = document();
        let settings = ExportSettings::default();
        let result = export(&document, settings, dir.path());
        fs::write(&result.files[0], b"<svg/>").unwrap();

        let report = Verifier::new(&document, settings).verify_export(&result);

        assert_eq!(report.failed, 1);
        assert!(report.failures[0].expected_checksum.is_some());
        assert_eq!(
            report.failures[0].actual_checksum.as_deref(),
            Some(calculate_checksum_bytes(b"<svg/>").as_str())
        );
    }

    #[test]
    fn test_missing_artifact_fails() {
        let dir = TempDir::new().unwrap();
        let document = document();
        let settings = ExportSettings::default();
        let result = export(&document, settings, dir.path());
        fs::remove_file(&result.files[0]).unwrap();

        let report = Verifier::new(&document, settings).verify_export(&result);
        assert!(report.failures[0].reason.contains("unreadable"));
    }
}
