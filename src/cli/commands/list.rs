//! List command implementation
//!
//! This module implements the `list` command, which prints the tags of a
//! document and how many of them the exporter would write.

use super::{EXIT_INPUT, EXIT_OK};
use crate::domain::{Document, Tag};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Input document (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Only list morph shapes
    #[arg(long)]
    pub morph_shapes_only: bool,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Listing document");

        let document = match Document::from_json_file(&self.input) {
            Ok(d) => d,
            Err(e) => {
                println!("❌ Failed to load {}", self.input.display());
                println!("   Error: {e}");
                return Ok(EXIT_INPUT);
            }
        };

        println!("📄 {}", self.input.display());
        println!();
        for line in self.lines(&document) {
            println!("  {line}");
        }
        println!();
        println!(
            "  {} tag(s), {} morph shape(s)",
            document.tags().len(),
            document.morph_shape_count()
        );

        Ok(EXIT_OK)
    }

    fn lines(&self, document: &Document) -> Vec<String> {
        document
            .tags()
            .iter()
            .filter(|tag| !self.morph_shapes_only || tag.as_morph_shape().is_some())
            .map(format_tag)
            .collect()
    }
}

fn format_tag(tag: &Tag) -> String {
    let id = tag
        .character_id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let line = format!("{id:>6}  {:<12} {}", tag.kind(), tag.name());
    match tag.validate() {
        Ok(()) => line,
        Err(e) => format!("{line}  ⚠️  {e}"),
    }
}
