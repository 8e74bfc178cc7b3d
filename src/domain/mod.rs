//! Domain models and types for Morphex.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Character identifiers** ([`CharacterId`])
//! - **Geometry** ([`Rect`], [`Rgba`], [`ColorTransform`])
//! - **Records** ([`MorphShapeRecord`], [`ShapeRecord`], [`BitmapRecord`], [`SpriteRecord`])
//! - **The owning container** ([`Document`]) with its ordered [`Tag`] list
//! - **Error types** ([`MorphexError`], [`EncodingError`])
//! - **Result type alias** ([`Result`])
//!
//! # Loading a document
//!
//! ```rust,no_run
//! use morphex::domain::Document;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let document = Document::from_json_file("shapes.json")?;
//! for tag in document.tags() {
//!     println!("{} {}", tag.kind(), tag.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod errors;
pub mod geometry;
pub mod ids;
pub mod morph;
pub mod result;
pub mod shape;

// Re-export commonly used types for convenience
pub use document::{Document, Tag};
pub use errors::{EncodingError, MorphexError};
pub use geometry::{ColorTransform, Point, Rect, Rgba, MAX_RATIO, UNIT_DIVISOR};
pub use ids::CharacterId;
pub use morph::{MorphFillStyle, MorphGradientStop, MorphLineStyle, MorphShapeRecord};
pub use result::Result;
pub use shape::{
    BitmapRecord, FillStyle, GradientStop, LineStyle, Path, PathCommand, Shape, ShapeRecord,
    SpriteRecord,
};
