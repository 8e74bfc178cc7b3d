// Morphex - morph shape exporter
// Copyright (c) 2025 Morphex Contributors
// Licensed under the MIT License

//! # Morphex - morph shape exporter
//!
//! Morphex reads a document of vector characters and writes every morph
//! shape in it as a standalone animated artifact.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Loading** documents of shapes, morph shapes, bitmaps and sprites
//! - **Rendering** morph shapes as SVG documents with SMIL animation
//! - **Rendering** morph shapes as HTML pages driving a `<canvas>`, with every
//!   referenced character embedded in a script library
//! - **Writing** one artifact per record, with abort/retry/ignore handling of
//!   I/O failures
//! - **Verifying** exported artifacts against a fresh render
//!
//! ## Architecture
//!
//! Morphex follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (bounds, dependencies, render, export, verification)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use morphex::config::load_config;
//! use morphex::core::export::{MorphShapeExporter, RetryPolicy, Decision};
//! use morphex::domain::Document;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("morphex.toml")?;
//!     let document = Document::from_json_file("shapes.json")?;
//!
//!     let exporter = MorphShapeExporter::new(&document, config.export.settings()?);
//!     let mut handler = RetryPolicy::new(config.export.max_retries, Decision::Abort);
//!     let result = exporter.export_all(
//!         Path::new(&config.export.output_dir),
//!         &mut handler,
//!         None,
//!     )?;
//!
//!     println!("Exported {} morph shapes", result.exported());
//!     Ok(())
//! }
//! ```
//!
//! ## Export Modes
//!
//! - **SVG**: one `{id}.svg` per morph shape, animating from the start to the
//!   end shape and back with `<animate>` elements
//! - **Canvas**: one `{id}.html` per morph shape plus a shared `canvas.js`
//!   runtime written once per run
//!
//! ## Error Handling
//!
//! Morphex uses the [`domain::MorphexError`] type for all errors:
//!
//! ```rust,no_run
//! use morphex::domain::MorphexError;
//!
//! fn example() -> Result<(), MorphexError> {
//!     let config = morphex::config::load_config("morphex.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Morphex uses structured logging with the `tracing` crate; see [`logging`].

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
