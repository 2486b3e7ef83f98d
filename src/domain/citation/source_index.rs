//! SourceIndex - citations keyed by message position.
//!
//! Keys count backwards from the end of the transcript as it stood when the
//! citations arrived, not by turn id. The mapping stays correct only while
//! nothing is inserted between receipt and render, so callers must set
//! citations in the same step that appends the triggering response. All
//! knowledge of this keying lives here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

/// One opaque citation record, passed through unvalidated.
pub type Citation = serde_json::Value;

/// Distance from the end of the transcript, as a string key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionKey(String);

impl PositionKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Derives the key for the turn rendered at `render_index`.
    ///
    /// Returns `None` when `render_index` is past the end of the transcript.
    pub fn for_render(turn_count: usize, render_index: usize) -> Option<Self> {
        turn_count
            .checked_sub(1)
            .and_then(|last| last.checked_sub(render_index))
            .map(|distance| Self(distance.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PositionKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Citation lists keyed by [`PositionKey`].
#[derive(Debug, Default)]
pub struct SourceIndex {
    entries: RwLock<HashMap<PositionKey, Vec<Citation>>>,
}

impl SourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores citations for a key, replacing any previous list for it.
    pub fn set(&self, key: PositionKey, citations: Vec<Citation>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, citations);
    }

    /// Returns the citations for a key, or an empty list.
    pub fn get(&self, key: &PositionKey) -> Vec<Citation> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the citations for the turn rendered at `render_index`.
    pub fn for_render(&self, turn_count: usize, render_index: usize) -> Vec<Citation> {
        PositionKey::for_render(turn_count, render_index)
            .map(|key| self.get(&key))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_unknown_key_is_empty() {
        let index = SourceIndex::new();
        assert!(index.get(&PositionKey::from("3")).is_empty());
    }

    #[test]
    fn set_overwrites_previous_list() {
        let index = SourceIndex::new();
        index.set("2".into(), vec![json!({ "url": "a" })]);
        index.set("2".into(), vec![json!({ "url": "b" }), json!({ "url": "c" })]);

        let citations = index.get(&"2".into());
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0]["url"], "b");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn render_key_counts_from_end() {
        assert_eq!(PositionKey::for_render(4, 0), Some(PositionKey::from("3")));
        assert_eq!(PositionKey::for_render(4, 3), Some(PositionKey::from("0")));
        assert_eq!(PositionKey::for_render(4, 4), None);
        assert_eq!(PositionKey::for_render(0, 0), None);
    }

    #[test]
    fn for_render_resolves_through_derived_key() {
        let index = SourceIndex::new();
        index.set("1".into(), vec![json!("doc")]);

        // Three turns: render index 1 sits one position from the end.
        assert_eq!(index.for_render(3, 1), vec![json!("doc")]);
        assert!(index.for_render(3, 0).is_empty());
    }
}
