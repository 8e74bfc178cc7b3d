//! Core export logic for Morphex.
//!
//! # Modules
//!
//! - [`bounds`] - Export rectangles and Canvas coordinate offsets
//! - [`dependencies`] - Transitive character dependency collection
//! - [`render`] - SVG and Canvas rendering strategies
//! - [`export`] - Export driver, retryable writes and progress
//! - [`verification`] - Post-export checksum verification
//!
//! # Export Workflow
//!
//! 1. **Load**: Parse the document into an ordered tag list
//! 2. **Filter**: Keep morph shape records only
//! 3. **Render**: SVG document or Canvas page per record
//! 4. **Write**: One artifact per record, retried or skipped on operator request
//! 5. **Runtime**: Canvas runs add the shared `canvas.js`
//! 6. **Verify** (optional): Re-render and compare checksums
//!
//! # Example
//!
//! ```rust,no_run
//! use morphex::core::export::{Decision, FixedDecision, MorphShapeExporter};
//! use morphex::core::render::{ExportSettings, MorphShapeExportMode};
//! use morphex::domain::Document;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let document = Document::from_json_file("shapes.json")?;
//! let settings = ExportSettings::new(MorphShapeExportMode::Canvas, 1.0);
//!
//! let result = MorphShapeExporter::new(&document, settings).export_all(
//!     Path::new("out"),
//!     &mut FixedDecision(Decision::Ignore),
//!     None,
//! )?;
//!
//! println!("Written: {}", result.files.len());
//! println!("Skipped: {}", result.skipped.len());
//! # Ok(())
//! # }
//! ```

pub mod bounds;
pub mod dependencies;
pub mod export;
pub mod render;
pub mod verification;
