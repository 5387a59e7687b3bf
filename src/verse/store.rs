use anyhow::Context;

use crate::foundation::error::{BoothError, BoothResult};

/// Ordered, immutable sequence of verse strings loaded from a JSON array.
///
/// The collection may be empty; callers guard on [`VerseStore::current`]
/// returning `None` before rendering any verse text.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VerseCollection(Vec<String>);

impl VerseCollection {
    /// Parse a JSON array of UTF-8 strings.
    pub fn from_json_bytes(bytes: &[u8]) -> BoothResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| BoothError::verse_load(format!("malformed verse list: {e}")))
    }

    /// Read and parse a verse list file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> BoothResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read verse list '{}'", path.display()))
            .map_err(|e| BoothError::verse_load(e.to_string()))?;
        Self::from_json_bytes(&bytes)
    }

    /// Number of verses.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no verses were loaded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for VerseCollection {
    fn from(verses: Vec<String>) -> Self {
        Self(verses)
    }
}

/// Cyclic cursor over a [`VerseCollection`].
///
/// The position is always reduced modulo the collection length, so no amount
/// of advancing can move it out of bounds.
#[derive(Clone, Debug, Default)]
pub struct VerseStore {
    verses: VerseCollection,
    cursor: usize,
}

impl VerseStore {
    /// Wrap a loaded collection with the cursor at position 0.
    pub fn new(verses: VerseCollection) -> Self {
        Self { verses, cursor: 0 }
    }

    /// Verse at the active cursor, or `None` when the collection is empty.
    pub fn current(&self) -> Option<&str> {
        if self.verses.is_empty() {
            return None;
        }
        Some(self.verses.0[self.cursor % self.verses.len()].as_str())
    }

    /// Advance the cursor by one, wrapping cyclically, and return the new
    /// current verse. No-op returning `None` on an empty collection.
    pub fn advance(&mut self) -> Option<&str> {
        if self.verses.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.verses.len();
        self.current()
    }

    /// The underlying collection.
    pub fn collection(&self) -> &VerseCollection {
        &self.verses
    }
}

#[cfg(test)]
#[path = "../../tests/unit/verse/store.rs"]
mod tests;
