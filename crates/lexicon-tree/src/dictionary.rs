//! Dictionary facade
//!
//! The embedding application's handle on a resource tree: a root node plus
//! the language/storage accessors. The tree is plainly owned; dropping the
//! dictionary tears everything down, there is no process-global state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Result;
use crate::node::{Lookup, Node};

/// A language-addressed resource tree rooted at a storage directory.
///
/// # Examples
///
/// ```
/// use lexicon_tree::Dictionary;
///
/// let mut dictionary = Dictionary::new("en", "/nonexistent/storage");
/// assert_eq!(dictionary.language(), "en");
/// assert!(dictionary.get("missing.key").unwrap().is_absent());
/// ```
#[derive(Debug)]
pub struct Dictionary {
    root: Node,
}

impl Dictionary {
    /// Construct a dictionary for a language over a storage root. No I/O
    /// happens until the first read.
    pub fn new(language: impl Into<String>, storage: impl Into<PathBuf>) -> Self {
        Self {
            root: Node::root(language, storage),
        }
    }

    pub fn language(&self) -> &str {
        self.root.language()
    }

    pub fn storage_root(&self) -> &Path {
        self.root.storage_root()
    }

    /// Switch the dictionary to another language.
    ///
    /// The root is rebuilt: materialized content is discarded and reloaded
    /// lazily under the new language. The fallback chain is preserved.
    pub fn set_language(&mut self, language: impl Into<String>) -> &mut Self {
        self.root = Node::with_chain(
            language.into(),
            self.root.storage_root().to_path_buf(),
            self.root.fallback_chain().to_vec(),
        );
        self
    }

    /// Append fallback languages, consulted to fill gaps before the
    /// dictionary's own language is applied. See [`Node::extend`].
    pub fn extend<I, S>(&mut self, languages: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.root.extend(languages)?;
        Ok(self)
    }

    /// Resolve a dotted path. See [`Node::get`].
    pub fn get(&mut self, path: &str) -> Result<Lookup<'_>> {
        self.root.get(path)
    }

    /// Resolve several dotted paths into one aggregated node.
    /// See [`Node::get_all`].
    pub fn get_all(&mut self, keys: &[&str]) -> Result<Node> {
        self.root.get_all(keys)
    }

    /// Dotted-path existence test.
    pub fn contains(&mut self, path: &str) -> Result<bool> {
        Ok(!self.get(path)?.is_absent())
    }

    pub fn len(&mut self) -> Result<usize> {
        self.root.len()
    }

    pub fn is_empty(&mut self) -> Result<bool> {
        self.root.is_empty()
    }

    /// Serialize the whole tree to a plain JSON mapping.
    pub fn to_value(&mut self) -> Result<Value> {
        self.root.to_value()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }
}

/// Resolve error codes against a message table.
///
/// The table is whatever a lookup produced: a decoded mapping or a node.
/// Every code with a textual message in the table appears in the result;
/// missing codes are silently omitted.
pub fn resolve_errors(codes: &[&str], table: Lookup<'_>) -> Result<BTreeMap<String, String>> {
    let mut resolved = BTreeMap::new();
    match table {
        Lookup::Value(Value::Object(map)) => {
            for code in codes {
                if let Some(Value::String(message)) = map.get(*code) {
                    resolved.insert((*code).to_string(), message.clone());
                }
            }
        }
        Lookup::Node(node) => {
            for code in codes {
                if let Some(message) = node.get(code)?.as_str() {
                    resolved.insert((*code).to_string(), message.to_owned());
                }
            }
        }
        _ => {}
    }
    Ok(resolved)
}
