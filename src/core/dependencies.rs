//! Transitive character dependencies
//!
//! A Canvas artifact must carry every character its morph shape draws,
//! including characters reached through sprites. The closure is computed
//! against the owning [`Document`]; ids referenced but not defined are
//! reported as an encoding error since the output would be incomplete.

use crate::domain::errors::EncodingError;
use crate::domain::{CharacterId, Document};
use std::collections::BTreeSet;

/// Set of character ids, ordered for deterministic output
pub type DependencySet = BTreeSet<CharacterId>;

/// Collects the dependency closure of a character
pub struct AssetDependencyCollector<'a> {
    document: &'a Document,
}

impl<'a> AssetDependencyCollector<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// `root` plus every character it transitively references
    ///
    /// Walks an explicit worklist, so nesting depth is bounded by the
    /// document size rather than the stack. Each character is expanded once,
    /// which also ends reference cycles.
    pub fn collect(&self, root: CharacterId) -> Result<DependencySet, EncodingError> {
        let mut needed = DependencySet::new();
        needed.insert(root);

        let mut pending = vec![root];
        let mut direct = DependencySet::new();
        while let Some(id) = pending.pop() {
            let tag = self
                .document
                .character(id)
                .ok_or(EncodingError::UnknownCharacter(id.get()))?;

            direct.clear();
            tag.needed_characters(&mut direct);
            for &dependency in &direct {
                if needed.insert(dependency) {
                    pending.push(dependency);
                }
            }
        }

        tracing::debug!(
            character_id = %root,
            dependencies = needed.len() - 1,
            "Collected character dependencies"
        );
        Ok(needed)
    }
}
