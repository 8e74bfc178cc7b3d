//! Static shape model and the other character kinds a document may hold
//!
//! A [`Shape`] is a list of paths, each drawn with an optional fill style and
//! an optional line style referenced by index. Morph shapes resolve to this
//! same model at a given ratio (see [`crate::domain::morph`]).

use super::errors::EncodingError;
use super::geometry::{Point, Rect, Rgba};
use super::ids::CharacterId;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One drawing command, coordinates in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { x: i32, y: i32 },
    LineTo { x: i32, y: i32 },
    CurveTo { cx: i32, cy: i32, x: i32, y: i32 },
}

impl PathCommand {
    /// Short name used in mismatch diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            PathCommand::MoveTo { .. } => "move_to",
            PathCommand::LineTo { .. } => "line_to",
            PathCommand::CurveTo { .. } => "curve_to",
        }
    }

    /// Anchor point the command ends at
    pub fn anchor(&self) -> Point {
        match *self {
            PathCommand::MoveTo { x, y }
            | PathCommand::LineTo { x, y }
            | PathCommand::CurveTo { x, y, .. } => Point::new(x, y),
        }
    }
}

/// A single path within a shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// Index into the owning shape's fill styles
    #[serde(default)]
    pub fill_style: Option<usize>,
    /// Index into the owning shape's line styles
    #[serde(default)]
    pub line_style: Option<usize>,
    pub commands: Vec<PathCommand>,
}

/// Colour stop inside a gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, 0..=255
    pub ratio: u8,
    pub color: Rgba,
}

/// Fill style of a static shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FillStyle {
    Solid { color: Rgba },
    LinearGradient { stops: Vec<GradientStop> },
    RadialGradient { stops: Vec<GradientStop> },
    Bitmap {
        bitmap_id: CharacterId,
        #[serde(default)]
        smoothed: bool,
    },
}

impl FillStyle {
    /// Character this fill pulls in, if any
    pub fn referenced_character(&self) -> Option<CharacterId> {
        match self {
            FillStyle::Bitmap { bitmap_id, .. } => Some(*bitmap_id),
            _ => None,
        }
    }
}

/// Line style of a static shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Stroke width in twips
    pub width: u16,
    pub color: Rgba,
}

/// Resolved vector shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub bounds: Rect,
    #[serde(default)]
    pub fill_styles: Vec<FillStyle>,
    #[serde(default)]
    pub line_styles: Vec<LineStyle>,
    #[serde(default)]
    pub paths: Vec<Path>,
}

impl Shape {
    /// Adds every character referenced by this shape's fill styles
    pub fn needed_characters(&self, needed: &mut BTreeSet<CharacterId>) {
        needed.extend(
            self.fill_styles
                .iter()
                .filter_map(FillStyle::referenced_character),
        );
    }

    /// Checks that every path references existing styles
    pub fn validate(&self, character_id: CharacterId) -> Result<(), EncodingError> {
        check_style_indices(
            character_id,
            &self.paths,
            self.fill_styles.len(),
            self.line_styles.len(),
        )
    }
}

pub(crate) fn check_style_indices(
    character_id: CharacterId,
    paths: &[Path],
    fill_count: usize,
    line_count: usize,
) -> Result<(), EncodingError> {
    for path in paths {
        if let Some(index) = path.fill_style {
            if index >= fill_count {
                return Err(EncodingError::MissingFillStyle {
                    character_id: character_id.get(),
                    index,
                    available: fill_count,
                });
            }
        }
        if let Some(index) = path.line_style {
            if index >= line_count {
                return Err(EncodingError::MissingLineStyle {
                    character_id: character_id.get(),
                    index,
                    available: line_count,
                });
            }
        }
    }
    Ok(())
}

/// A static shape character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub character_id: CharacterId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub shape: Shape,
}

/// An embedded image character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitmapRecord {
    pub character_id: CharacterId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_mime")]
    pub mime: String,
    /// Encoded image bytes (base64 in the JSON document)
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl BitmapRecord {
    /// `data:` URI carrying the encoded image
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.data))
    }
}

fn default_mime() -> String {
    "image/png".to_string()
}

/// A sprite (movie clip) character placing other characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRecord {
    pub character_id: CharacterId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub children: Vec<CharacterId>,
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text.as_bytes()).map_err(serde::de::Error::custom)
    }
}
