//! Character library embedded in Canvas pages
//!
//! Writes a `var library = {...}` script block holding one JSON entry per
//! needed character, in ascending id order. Bitmaps become data URIs so the
//! page has no external assets besides the shared runtime.

use crate::core::dependencies::DependencySet;
use crate::domain::errors::EncodingError;
use crate::domain::{Document, MorphexError, Result, Tag};
use serde_json::json;
use std::io::Write;

/// Writes the library for `needed` into `out`
pub fn write_library<W: Write>(
    document: &Document,
    needed: &DependencySet,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "var library = {{}};")?;

    for &id in needed {
        let tag = document
            .character(id)
            .ok_or(EncodingError::UnknownCharacter(id.get()))?;
        let entry = library_entry(tag)?;
        writeln!(out, "library[{id}] = {};", escape_script(&entry))?;
    }

    Ok(())
}

fn library_entry(tag: &Tag) -> Result<String> {
    let value = match tag {
        Tag::Bitmap(bitmap) => json!({
            "kind": "bitmap",
            "name": bitmap.name,
            "src": bitmap.data_uri(),
        }),
        other => serde_json::to_value(other)?,
    };
    serde_json::to_string(&value).map_err(MorphexError::from)
}

/// Keeps embedded JSON from closing the surrounding `<script>` element
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}
