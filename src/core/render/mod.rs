//! Morph shape rendering
//!
//! Two output strategies are supported:
//!
//! - **SVG**: one standalone `.svg` document per morph shape, geometry scaled
//!   by the zoom factor, the morph animated with SMIL, bitmaps inlined
//! - **Canvas**: one `.html` page per morph shape carrying its own character
//!   library, drawn by the shared `canvas.js` runtime

pub mod canvas;
pub mod library;
pub mod svg;

use crate::core::bounds::{CoordinateOffset, ExportRectangle};
use crate::core::dependencies::AssetDependencyCollector;
use crate::domain::errors::EncodingError;
use crate::domain::{ColorTransform, Document, MorphShapeRecord, MorphexError, Result};
use crate::domain::UNIT_DIVISOR;
use canvas::CanvasMorphShapeExporter;
use std::fmt;
use std::str::FromStr;
use svg::{RatioMarker, SvgExporter};

/// Output format for exported morph shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphShapeExportMode {
    /// Standalone SVG documents
    #[default]
    Svg,
    /// HTML pages drawing onto a canvas
    Canvas,
}

impl MorphShapeExportMode {
    /// File extension of artifacts produced in this mode
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Canvas => "html",
        }
    }
}

impl FromStr for MorphShapeExportMode {
    type Err = MorphexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "canvas" | "html" => Ok(Self::Canvas),
            _ => Err(MorphexError::Configuration(format!(
                "Invalid export mode: {s}. Expected 'svg' or 'canvas'"
            ))),
        }
    }
}

impl fmt::Display for MorphShapeExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg => write!(f, "svg"),
            Self::Canvas => write!(f, "canvas"),
        }
    }
}

/// Settings for one export run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSettings {
    pub mode: MorphShapeExportMode,
    /// Uniform scale factor; applies to SVG output only
    pub zoom: f64,
}

impl ExportSettings {
    pub fn new(mode: MorphShapeExportMode, zoom: f64) -> Self {
        Self { mode, zoom }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::new(MorphShapeExportMode::Svg, 1.0)
    }
}

/// Render a morph shape with the strategy selected by `settings`
///
/// Both strategies resolve the characters the morph shape depends on through
/// `document`.
pub fn render_morph_shape(
    record: &MorphShapeRecord,
    settings: &ExportSettings,
    document: &Document,
) -> Result<String> {
    match settings.mode {
        MorphShapeExportMode::Svg => {
            render_svg(record, document, settings.zoom).map_err(Into::into)
        }
        MorphShapeExportMode::Canvas => render_canvas(record, document),
    }
}

/// Animated SVG document for `record`
///
/// # Examples
///
/// ```
/// use morphex::core::render::render_svg;
/// use morphex::domain::{CharacterId, Document, MorphShapeRecord, Rect};
///
/// let record = MorphShapeRecord {
///     character_id: CharacterId::new(1),
///     name: None,
///     start_bounds: Rect::new(0, 200, 0, 200),
///     end_bounds: Rect::new(0, 400, 0, 400),
///     fill_styles: vec![],
///     line_styles: vec![],
///     start_paths: vec![],
///     end_paths: vec![],
/// };
/// let svg = render_svg(&record, &Document::default(), 2.0).unwrap();
/// assert!(svg.contains("width=\"40\""));
/// ```
pub fn render_svg(
    record: &MorphShapeRecord,
    document: &Document,
    zoom: f64,
) -> std::result::Result<String, EncodingError> {
    let rect = ExportRectangle::scaled(&record.rect(), zoom);
    let mut exporter = SvgExporter::new(rect);
    svg::morph_shape_to_svg(
        &mut exporter,
        record,
        document,
        RatioMarker::Animated,
        &ColorTransform::IDENTITY,
        0,
        zoom,
    )?;
    Ok(exporter.get_svg())
}

/// HTML page for `record`, embedding the record and its dependencies
pub fn render_canvas(record: &MorphShapeRecord, document: &Document) -> Result<String> {
    let start = record.shape_at_ratio(0)?;
    let end = record.shape_at_ratio(record.max_ratio())?;
    let offset = CoordinateOffset::for_record(record);

    let mut exporter = CanvasMorphShapeExporter::new(
        record.character_id,
        start,
        end,
        ColorTransform::IDENTITY,
        UNIT_DIVISOR,
        offset,
    );
    exporter.export()?;

    let needed = AssetDependencyCollector::new(document).collect(record.character_id)?;
    let mut buffer = Vec::new();
    library::write_library(document, &needed, &mut buffer)?;
    let library = String::from_utf8(buffer).map_err(EncodingError::from)?;

    Ok(exporter.get_html(&library))
}
