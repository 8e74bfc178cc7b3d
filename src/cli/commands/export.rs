//! Export command implementation
//!
//! This module implements the `export` command, which writes every morph
//! shape of a document as an SVG document or a Canvas page.

use super::{resolve_config, EXIT_CONFIG, EXIT_FATAL, EXIT_INPUT, EXIT_OK, EXIT_PARTIAL};
use crate::cli::prompt::PromptHandler;
use crate::config::{ExportConfig, IoErrorPolicy};
use crate::core::export::{
    AbortRetryIgnoreHandler, Decision, FixedDecision, MorphShapeExporter, RetryPolicy,
    TracingProgress,
};
use crate::core::verification::Verifier;
use crate::domain::ids::parse_id_list;
use crate::domain::{CharacterId, Document, Tag};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Input document (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Override the output directory
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override export mode (svg or canvas)
    #[arg(long)]
    pub mode: Option<String>,

    /// Override the SVG zoom factor
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Export only these character id(s) (comma-separated)
    #[arg(long, value_name = "IDS")]
    pub character_id: Option<String>,

    /// Override the reaction to write failures (prompt, abort, ignore, retry)
    #[arg(long, value_name = "POLICY")]
    pub on_error: Option<String>,

    /// Re-read and checksum every artifact after the export
    #[arg(long)]
    pub verify: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        self.apply_overrides(&mut config.export);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let (settings, policy) = match (config.export.settings(), config.export.io_error_policy())
        {
            (Ok(settings), Ok(policy)) => (settings, policy),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("Invalid export configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let selection = match self.character_id.as_deref().map(parse_id_list).transpose() {
            Ok(ids) => ids,
            Err(e) => {
                eprintln!("Invalid --character-id: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let document = match Document::from_json_file(&self.input) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(error = %e, input = %self.input.display(), "Failed to load document");
                eprintln!("Failed to load {}: {e}", self.input.display());
                return Ok(EXIT_INPUT);
            }
        };

        let tags = select_tags(&document, selection.as_deref());
        let out_dir = Path::new(&config.export.output_dir);

        println!("🚀 Starting export...");
        println!("  Input: {}", self.input.display());
        println!("  Output: {}", out_dir.display());
        println!("  Mode: {}", settings.mode);
        println!("  Zoom: {}", settings.zoom);
        println!();

        let mut handler = build_handler(policy, config.export.max_retries);
        let mut progress = TracingProgress;
        let exporter = MorphShapeExporter::new(&document, settings);

        let result = match exporter.export_morph_shapes(
            out_dir,
            &tags,
            handler.as_mut(),
            Some(&mut progress),
        ) {
            Ok(r) => r,
            Err(e) => {
                crate::log_error_with_context!(&e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(EXIT_FATAL);
            }
        };
        result.log_summary();

        println!("📊 Export Summary:");
        println!("  Morph Shapes: {}", result.total);
        println!("  Exported: {}", result.exported());
        println!("  Skipped: {}", result.skipped.len());
        println!("  Files Written: {}", result.files.len());
        println!("  Duration: {:.2}s", result.duration.as_secs_f64());
        println!();

        if !result.skipped.is_empty() {
            let skipped: Vec<String> = result.skipped.iter().map(|id| id.to_string()).collect();
            println!("⚠️  Skipped character ids: {}", skipped.join(", "));
            println!();
        }

        let mut verified = true;
        if self.verify {
            let report = Verifier::new(&document, settings).verify_export(&result);
            println!("{}", report.format_summary());
            verified = report.is_success();
        }

        let exit_code = if result.total == 0 {
            println!("✅ Nothing to export");
            EXIT_OK
        } else if result.is_complete() && verified {
            println!("✅ Export completed successfully!");
            EXIT_OK
        } else {
            println!("⚠️  Export completed with failures");
            EXIT_PARTIAL
        };

        Ok(exit_code)
    }

    fn apply_overrides(&self, export: &mut ExportConfig) {
        if let Some(output) = &self.output {
            tracing::info!(output_dir = %output, "Overriding output directory from CLI");
            export.output_dir = output.clone();
        }
        if let Some(mode) = &self.mode {
            tracing::info!(mode = %mode, "Overriding export mode from CLI");
            export.mode = mode.to_lowercase();
        }
        if let Some(zoom) = self.zoom {
            tracing::info!(zoom, "Overriding zoom from CLI");
            export.zoom = zoom;
        }
        if let Some(policy) = &self.on_error {
            tracing::info!(on_io_error = %policy, "Overriding I/O error policy from CLI");
            export.on_io_error = policy.clone();
        }
    }
}

/// Tags to export; every tag when no ids are given
fn select_tags<'a>(document: &'a Document, ids: Option<&[CharacterId]>) -> Vec<&'a Tag> {
    match ids {
        None => document.tags().iter().collect(),
        Some(ids) => {
            let tags = document.select(ids);
            for id in ids {
                if !tags.iter().any(|tag| tag.character_id() == Some(*id)) {
                    tracing::warn!(character_id = %id, "Character not found in document");
                }
            }
            tags
        }
    }
}

fn build_handler(policy: IoErrorPolicy, max_retries: u32) -> Box<dyn AbortRetryIgnoreHandler> {
    match policy {
        IoErrorPolicy::Prompt => Box::new(PromptHandler::stdio()),
        IoErrorPolicy::Abort => Box::new(FixedDecision(Decision::Abort)),
        IoErrorPolicy::Ignore => Box::new(FixedDecision(Decision::Ignore)),
        IoErrorPolicy::Retry => Box::new(RetryPolicy::new(max_retries, Decision::Abort)),
    }
}
