//! Tagged records and the document that owns them
//!
//! Records arrive as an ordered list of tags. The record kind is a closed
//! enum decided when the document is loaded, so the exporter filters with a
//! plain match instead of inspecting types at export time.

use super::errors::{EncodingError, MorphexError};
use super::ids::CharacterId;
use super::morph::MorphShapeRecord;
use super::result::Result;
use super::shape::{BitmapRecord, ShapeRecord, SpriteRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// One record of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tag {
    MorphShape(MorphShapeRecord),
    Shape(ShapeRecord),
    Bitmap(BitmapRecord),
    Sprite(SpriteRecord),
    /// Any non-character record (frame markers, scripts, metadata)
    Other {
        #[serde(default)]
        name: String,
    },
}

impl Tag {
    /// Character id, for records that define a character
    pub fn character_id(&self) -> Option<CharacterId> {
        match self {
            Tag::MorphShape(r) => Some(r.character_id),
            Tag::Shape(r) => Some(r.character_id),
            Tag::Bitmap(r) => Some(r.character_id),
            Tag::Sprite(r) => Some(r.character_id),
            Tag::Other { .. } => None,
        }
    }

    /// Morph shape payload, if this is a morph shape record
    pub fn as_morph_shape(&self) -> Option<&MorphShapeRecord> {
        match self {
            Tag::MorphShape(record) => Some(record),
            _ => None,
        }
    }

    /// Short kind label used in listings
    pub fn kind(&self) -> &'static str {
        match self {
            Tag::MorphShape(_) => "morph_shape",
            Tag::Shape(_) => "shape",
            Tag::Bitmap(_) => "bitmap",
            Tag::Sprite(_) => "sprite",
            Tag::Other { .. } => "other",
        }
    }

    /// Display name used in progress events and listings
    pub fn name(&self) -> String {
        match self {
            Tag::MorphShape(r) => r.display_name(),
            Tag::Shape(r) => labelled("DefineShape", r.character_id, r.name.as_deref()),
            Tag::Bitmap(r) => labelled("DefineBits", r.character_id, r.name.as_deref()),
            Tag::Sprite(r) => labelled("DefineSprite", r.character_id, r.name.as_deref()),
            Tag::Other { name } => name.clone(),
        }
    }

    /// Checks shape records for dangling style indices and unpaired edges
    pub fn validate(&self) -> std::result::Result<(), EncodingError> {
        match self {
            Tag::MorphShape(r) => r.validate(),
            Tag::Shape(r) => r.shape.validate(r.character_id),
            Tag::Bitmap(_) | Tag::Sprite(_) | Tag::Other { .. } => Ok(()),
        }
    }

    /// Adds the characters this record references directly
    pub fn needed_characters(&self, needed: &mut BTreeSet<CharacterId>) {
        match self {
            Tag::MorphShape(r) => r.needed_characters(needed),
            Tag::Shape(r) => r.shape.needed_characters(needed),
            Tag::Sprite(r) => needed.extend(r.children.iter().copied()),
            Tag::Bitmap(_) | Tag::Other { .. } => {}
        }
    }
}

fn labelled(prefix: &str, id: CharacterId, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{prefix} ({id}: {name})"),
        None => format!("{prefix} ({id})"),
    }
}

#[derive(Deserialize)]
struct DocumentFile {
    tags: Vec<Tag>,
}

/// Ordered record container with a character index
///
/// # Examples
///
/// ```
/// use morphex::domain::document::{Document, Tag};
///
/// let doc = Document::new(vec![Tag::Other { name: "ShowFrame".to_string() }]).unwrap();
/// assert_eq!(doc.tags().len(), 1);
/// assert_eq!(doc.morph_shape_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    tags: Vec<Tag>,
    characters: BTreeMap<CharacterId, usize>,
}

impl Document {
    /// Builds a document, rejecting duplicate character ids
    pub fn new(tags: Vec<Tag>) -> Result<Self> {
        let mut characters = BTreeMap::new();
        for (position, tag) in tags.iter().enumerate() {
            if let Some(id) = tag.character_id() {
                if characters.insert(id, position).is_some() {
                    return Err(MorphexError::Input(format!(
                        "Duplicate character id {id} in document"
                    )));
                }
            }
        }
        Ok(Self { tags, characters })
    }

    /// Parses a JSON document (`{"tags": [...]}`)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: DocumentFile = serde_json::from_str(json)
            .map_err(|e| MorphexError::Input(format!("Failed to parse document: {e}")))?;
        Self::new(file.tags)
    }

    /// Loads a JSON document from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MorphexError::Input(format!(
                "Input document not found: {}",
                path.display()
            )));
        }
        let contents = fs::read_to_string(path).map_err(|e| {
            MorphexError::Input(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Looks up the record defining `id`
    pub fn character(&self, id: CharacterId) -> Option<&Tag> {
        self.characters.get(&id).map(|&position| &self.tags[position])
    }

    pub fn morph_shape_count(&self) -> usize {
        self.tags
            .iter()
            .filter(|tag| tag.as_morph_shape().is_some())
            .count()
    }

    /// Tags defining one of `ids`, in document order
    pub fn select(&self, ids: &[CharacterId]) -> Vec<&Tag> {
        let wanted: BTreeSet<CharacterId> = ids.iter().copied().collect();
        self.tags
            .iter()
            .filter(|tag| tag.character_id().is_some_and(|id| wanted.contains(&id)))
            .collect()
    }
}
