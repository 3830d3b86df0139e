//! Insertion-ordered child storage

use serde_json::Value;

use crate::node::Node;

/// A single child slot: either a nested node (sub-trees and leaves not yet
/// flattened into a value) or a directly materialized decoded value.
#[derive(Debug)]
pub enum Entry {
    Node(Node),
    Value(Value),
}

/// Insertion-ordered map from segment name to [`Entry`].
///
/// Directory listings are small and merge order matters (aggregation
/// results are position-keyed), so a Vec-backed map keeps lookups simple
/// and iteration order equal to insertion order. Replacing an existing key
/// keeps its original position.
#[derive(Debug, Default)]
pub struct Children {
    entries: Vec<(String, Entry)>,
}

impl Children {
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, entry)| entry)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == key)
            .map(|(_, entry)| entry)
    }

    /// Insert or replace the entry for `key`, preserving its position when
    /// the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) {
        let key = key.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Entry)> {
        self.entries
            .iter_mut()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}
