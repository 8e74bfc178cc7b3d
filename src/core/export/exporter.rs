//! Batch export driver
//!
//! Walks the tag list in order, renders every morph shape with the selected
//! strategy and writes one artifact per record through the retryable writer.
//! Canvas runs finish by dropping the shared runtime next to the pages.

use crate::core::export::progress::{ExportEventListener, ProgressEvent, MORPH_SHAPE_CATEGORY};
use crate::core::export::summary::ExportResult;
use crate::core::export::writer::{write_with_retry, AbortRetryIgnoreHandler, WriteOutcome};
use crate::core::render::canvas::{CANVAS_RUNTIME, CANVAS_RUNTIME_FILE};
use crate::core::render::{render_morph_shape, ExportSettings, MorphShapeExportMode};
use crate::domain::{CharacterId, Document, MorphShapeRecord, MorphexError, Result, Tag};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Exports the morph shapes of one document
pub struct MorphShapeExporter<'a> {
    document: &'a Document,
    settings: ExportSettings,
}

impl<'a> MorphShapeExporter<'a> {
    pub fn new(document: &'a Document, settings: ExportSettings) -> Self {
        Self { document, settings }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Exports every morph shape in the document
    pub fn export_all(
        &self,
        out_dir: &Path,
        handler: &mut dyn AbortRetryIgnoreHandler,
        listener: Option<&mut dyn ExportEventListener>,
    ) -> Result<ExportResult> {
        let tags: Vec<&Tag> = self.document.tags().iter().collect();
        self.export_morph_shapes(out_dir, &tags, handler, listener)
    }

    /// Exports the morph shapes among `tags` into `out_dir`
    ///
    /// An empty tag list returns an empty result without touching the
    /// filesystem. Otherwise `out_dir` is created first; if no morph shape is
    /// among the tags the result is empty and, in Canvas mode, no runtime is
    /// written.
    ///
    /// Artifacts are named `{character_id}.svg` or `{character_id}.html`.
    /// A record listed more than once is exported once, at its first position.
    /// Records whose write failure the handler ignores are listed in
    /// [`ExportResult::skipped`] instead of [`ExportResult::files`].
    pub fn export_morph_shapes(
        &self,
        out_dir: &Path,
        tags: &[&Tag],
        handler: &mut dyn AbortRetryIgnoreHandler,
        mut listener: Option<&mut dyn ExportEventListener>,
    ) -> Result<ExportResult> {
        let start_time = Instant::now();
        self.validate_settings()?;

        let mut result = ExportResult::new();
        if tags.is_empty() {
            return Ok(result);
        }

        fs::create_dir_all(out_dir).map_err(|e| MorphexError::DirectoryCreation {
            path: out_dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut seen = BTreeSet::<CharacterId>::new();
        let records: Vec<&MorphShapeRecord> = tags
            .iter()
            .filter_map(|tag| tag.as_morph_shape())
            .filter(|record| seen.insert(record.character_id))
            .collect();
        result.total = records.len();
        if records.is_empty() {
            tracing::info!(out_dir = %out_dir.display(), "No morph shapes to export");
            return Ok(result.with_duration(start_time.elapsed()));
        }

        crate::log_export_start!(self.settings.mode, records.len());
        let extension = self.settings.mode.extension();

        for (position, record) in records.iter().enumerate() {
            let path = out_dir.join(record.character_id.file_name(extension));
            let event = ProgressEvent {
                category: MORPH_SHAPE_CATEGORY,
                index: position + 1,
                total: records.len(),
                name: record.display_name(),
            };

            if let Some(listener) = listener.as_deref_mut() {
                listener.exporting(&event);
            }

            let outcome = write_with_retry(
                &path,
                || {
                    render_morph_shape(record, &self.settings, self.document)
                        .map(String::into_bytes)
                },
                handler,
            )?;

            match outcome {
                WriteOutcome::Written => result.files.push(path),
                WriteOutcome::Skipped => result.skipped.push(record.character_id),
            }

            if let Some(listener) = listener.as_deref_mut() {
                listener.exported(&event);
            }
        }

        if self.settings.mode == MorphShapeExportMode::Canvas {
            let runtime = out_dir.join(CANVAS_RUNTIME_FILE);
            fs::write(&runtime, CANVAS_RUNTIME)
                .map_err(|e| MorphexError::artifact_write(&runtime, &e))?;
            tracing::debug!(path = %runtime.display(), "Wrote canvas runtime");
            result.files.push(runtime);
        }

        let result = result.with_duration(start_time.elapsed());
        crate::log_export_complete!(result.files.len(), result.duration);
        Ok(result)
    }

    fn validate_settings(&self) -> Result<()> {
        let zoom = self.settings.zoom;
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(MorphexError::Validation(format!(
                "zoom must be a positive number, got {zoom}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::writer::{Decision, FixedDecision};
    use crate::domain::Rect;
    use tempfile::TempDir;

    fn morph(id: u16) -> Tag {
        Tag::MorphShape(MorphShapeRecord {
            character_id: CharacterId::new(id),
            name: None,
            start_bounds: Rect::new(0, 20, 0, 20),
            end_bounds: Rect::new(0, 40, 0, 40),
            fill_styles: vec![],
            line_styles: vec![],
            start_paths: vec![],
            end_paths: vec![],
        })
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<(String, usize, usize)>,
    }

    impl ExportEventListener for Recorder {
        fn exporting(&mut self, event: &ProgressEvent) {
            self.events
                .push(("exporting".to_string(), event.index, event.total));
        }

        fn exported(&mut self, event: &ProgressEvent) {
            self.events
                .push(("exported".to_string(), event.index, event.total));
        }
    }

    #[test]
    fn test_empty_tag_list_leaves_filesystem_alone() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let document = Document::default();

        let result = MorphShapeExporter::new(&document, ExportSettings::default())
            .export_morph_shapes(&out, &[], &mut FixedDecision(Decision::Abort), None)
            .unwrap();

        assert!(result.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn test_progress_events_are_one_based() {
        let dir = TempDir::new().unwrap();
        let document = Document::new(vec![
            morph(5),
            Tag::Other {
                name: "ShowFrame".to_string(),
            },
            morph(9),
        ])
        .unwrap();
        let mut recorder = Recorder::default();

        let result = MorphShapeExporter::new(&document, ExportSettings::default())
            .export_all(
                dir.path(),
                &mut FixedDecision(Decision::Abort),
                Some(&mut recorder),
            )
            .unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(
            recorder.events,
            vec![
                ("exporting".to_string(), 1, 2),
                ("exported".to_string(), 1, 2),
                ("exporting".to_string(), 2, 2),
                ("exported".to_string(), 2, 2),
            ]
        );
    }

    #[test]
    fn test_invalid_zoom_rejected() {
        let dir = TempDir::new().unwrap();
        let document = Document::new(vec![morph(1)]).unwrap();
        let settings = ExportSettings::new(MorphShapeExportMode::Svg, 0.0);

        let err = MorphShapeExporter::new(&document, settings)
            .export_all(dir.path(), &mut FixedDecision(Decision::Abort), None)
            .unwrap_err();
        assert!(matches!(err, MorphexError::Validation(_)));
    }

    #[test]
    fn test_directory_creation_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        let document = Document::new(vec![morph(1)]).unwrap();

        let err = MorphShapeExporter::new(&document, ExportSettings::default())
            .export_all(
                &blocker.join("out"),
                &mut FixedDecision(Decision::Abort),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, MorphexError::DirectoryCreation { .. }));
    }

    #[test]
    fn test_repeated_tag_exported_once() {
        let dir = TempDir::new().unwrap();
        let document = Document::new(vec![morph(5), morph(9)]).unwrap();
        let five = &document.tags()[0];
        let nine = &document.tags()[1];

        let result = MorphShapeExporter::new(&document, ExportSettings::default())
            .export_morph_shapes(
                dir.path(),
                &[five, nine, five],
                &mut FixedDecision(Decision::Abort),
                None,
            )
            .unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(
            result.files,
            vec![dir.path().join("5.svg"), dir.path().join("9.svg")]
        );
    }
}
