//! Tree nodes and lazy materialization
//!
//! A [`Node`] is a single addressable location in the resource tree. It is
//! constructed cheaply with its addressing parameters and performs no I/O
//! until the first read-style operation triggers [`Node::load`], which
//! materializes it exactly once: fallback-language directory scans first,
//! the own-language scan on top, then the node's own leaf import when it is
//! addressed at a file.

use std::fs;
use std::path::{Path, PathBuf};

use lexicon_content::{Format, decode_file, read_raw};
use serde_json::Value;

use crate::children::{Children, Entry};
use crate::error::{Error, Result};

/// One addressable location in the resource tree.
#[derive(Debug)]
pub struct Node {
    /// Own segment name, empty for the root
    name: String,
    /// Slash-joined path from the storage root, excluding language and
    /// storage prefixes
    path: String,
    /// Current locale, may be empty
    language: String,
    /// Storage root directory
    storage: PathBuf,
    /// Fallback language chain, poorest-priority-first
    extends: Vec<String>,
    /// Leaf format matched at scan time, `None` for directories
    format: Option<Format>,
    children: Children,
    loaded: bool,
    /// Cached raw text for raw-text leaves
    raw: Option<String>,
}

/// Result of a lookup: the absence marker, transparently decoded raw text,
/// a directly materialized value, or a nested node for further navigation.
#[derive(Debug)]
pub enum Lookup<'a> {
    Absent,
    Text(&'a str),
    Value(&'a Value),
    Node(&'a mut Node),
}

impl<'a> Lookup<'a> {
    /// Continue resolving a dotted path against this result.
    ///
    /// Anything that is not a node yields [`Lookup::Absent`]: navigation is
    /// total over arbitrary paths.
    pub fn get(self, path: &str) -> Result<Lookup<'a>> {
        match self {
            Lookup::Node(node) => node.get(path),
            _ => Ok(Lookup::Absent),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Lookup::Absent)
    }

    /// View the result as text: raw-text content or a string value.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Lookup::Text(text) => Some(text),
            Lookup::Value(value) => value.as_str(),
            Lookup::Node(_) | Lookup::Absent => None,
        }
    }

    pub fn as_value(&self) -> Option<&'a Value> {
        match *self {
            Lookup::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_node(self) -> Option<&'a mut Node> {
        match self {
            Lookup::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl Node {
    /// Construct a root node. No I/O happens until the first access.
    pub fn root(language: impl Into<String>, storage: impl Into<PathBuf>) -> Self {
        Self::with_chain(language.into(), storage.into(), Vec::new())
    }

    pub(crate) fn with_chain(language: String, storage: PathBuf, extends: Vec<String>) -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            language,
            storage,
            extends,
            format: None,
            children: Children::default(),
            loaded: false,
            raw: None,
        }
    }

    /// Detached node used for aggregation results: already loaded, no
    /// backing storage, children keyed by position.
    fn detached(items: Vec<Value>) -> Self {
        let mut children = Children::default();
        for (index, item) in items.into_iter().enumerate() {
            children.insert(index.to_string(), Entry::Value(item));
        }
        Self {
            name: String::new(),
            path: String::new(),
            language: String::new(),
            storage: PathBuf::new(),
            extends: Vec::new(),
            format: None,
            children,
            loaded: true,
            raw: None,
        }
    }

    // -----------------------------------------------------------------
    // Pure accessors (no I/O)
    // -----------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slash-joined path from the storage root, excluding language and
    /// storage prefixes.
    pub fn relative_path(&self) -> &str {
        &self.path
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage
    }

    pub fn fallback_chain(&self) -> &[String] {
        &self.extends
    }

    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Compose `storage / language / path`, omitting empty segments.
    pub fn directory_path(&self) -> PathBuf {
        compose_path(&self.storage, &self.language, &self.path)
    }

    // -----------------------------------------------------------------
    // Fallback chain
    // -----------------------------------------------------------------

    /// Append fallback language codes to the chain.
    ///
    /// Codes are validated before any I/O: a code must be non-empty, start
    /// with an ASCII letter, and contain only ASCII alphanumerics, `-` or
    /// `_`. An empty iterator is a valid no-op. Appending after the node is
    /// materialized leaves existing content unchanged.
    pub fn extend<I, S>(&mut self, languages: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = languages.into_iter().map(Into::into).collect();
        for code in &codes {
            validate_language_code(code)?;
        }
        if self.loaded && !codes.is_empty() {
            tracing::warn!(
                node = %self.path,
                "fallback languages appended after materialization; existing content is unchanged"
            );
        }
        self.extends.extend(codes);
        Ok(self)
    }

    // -----------------------------------------------------------------
    // Materialization
    // -----------------------------------------------------------------

    /// Materialize this node. Idempotent: the filesystem is consulted at
    /// most once per node instance, on the first call.
    ///
    /// Scans run once per fallback language in chain order, then once for
    /// the node's own language, so own-language content wins on key
    /// collision. Structured files found by a scan are imported in the same
    /// pass, their entries overriding same-named scan slots. A node
    /// addressed at a structured file finally imports its backing file(s),
    /// own language last.
    pub fn load(&mut self) -> Result<()> {
        if self.loaded {
            return Ok(());
        }
        // One-shot even on failure: a malformed resource is a deployment
        // defect, retrying the scan cannot repair it.
        self.loaded = true;
        tracing::debug!(path = %self.path, language = %self.language, "materializing node");

        let languages = self.language_order();
        for language in &languages {
            let dir = compose_path(&self.storage, language, &self.path);
            self.scan_directory(&dir)?;
        }

        if let Some(format) = self.format {
            if format.is_structured() {
                for language in &languages {
                    self.import_leaf(language, format)?;
                }
            }
        }
        Ok(())
    }

    /// Fallback chain in application order, own language last.
    fn language_order(&self) -> Vec<String> {
        let mut order: Vec<String> = self
            .extends
            .iter()
            .filter(|language| **language != self.language)
            .cloned()
            .collect();
        order.push(self.language.clone());
        order
    }

    /// Own language first, then the chain richest-first.
    fn raw_language_order(&self) -> Vec<String> {
        let mut order = vec![self.language.clone()];
        order.extend(
            self.extends
                .iter()
                .rev()
                .filter(|language| **language != self.language)
                .cloned(),
        );
        order
    }

    fn scan_directory(&mut self, dir: &Path) -> Result<()> {
        // A missing directory is a normal, silent outcome.
        if !dir.is_dir() {
            return Ok(());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
            entries.push(entry.map_err(|e| Error::io(dir, e))?);
        }
        // Sorted order keeps later-wins merges deterministic.
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let entry_path = entry.path();

            if entry_path.is_dir() {
                self.upsert_scan_slot(&file_name, None);
                continue;
            }
            let Some((stem, ext)) = file_name.rsplit_once('.') else {
                tracing::debug!(entry = %file_name, "skipping extensionless entry");
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            let Some(format) = Format::from_extension(ext) else {
                tracing::debug!(entry = %file_name, "skipping unrecognized suffix");
                continue;
            };
            self.upsert_scan_slot(stem, Some(format));
            if format.is_structured() {
                let decoded = decode_file(&entry_path, format)?;
                self.merge_decoded(&entry_path, decoded);
            }
        }
        Ok(())
    }

    /// Create or reconcile the child slot for one directory entry.
    fn upsert_scan_slot(&mut self, base: &str, format: Option<Format>) {
        match self.children.get_mut(base) {
            None => {
                let child = Node {
                    name: base.to_string(),
                    path: join_segments(&self.path, base),
                    language: self.language.clone(),
                    storage: self.storage.clone(),
                    extends: self.extends.clone(),
                    format,
                    children: Children::default(),
                    loaded: false,
                    raw: None,
                };
                self.children.insert(base, Entry::Node(child));
            }
            Some(Entry::Node(node)) => {
                // A file and a directory sharing a base name merge into one
                // node; the leaf format sticks so its load both scans the
                // directory and imports the file. Later passes win.
                if format.is_some() {
                    node.format = format;
                }
            }
            // Decoded leaf content always wins over scan slots.
            Some(Entry::Value(_)) => {}
        }
    }

    /// Merge a decoded mapping into the children, overriding same-named
    /// slots. A well-formed document that is not a mapping contributes no
    /// entries.
    fn merge_decoded(&mut self, source: &Path, decoded: Value) {
        match decoded {
            Value::Object(map) => {
                for (key, value) in map {
                    self.children.insert(key, Entry::Value(value));
                }
            }
            _ => {
                tracing::warn!(
                    path = %source.display(),
                    "structured leaf is not a mapping; contributing no entries"
                );
            }
        }
    }

    /// Import the backing file for one language, first matching suffix wins.
    fn import_leaf(&mut self, language: &str, format: Format) -> Result<()> {
        for ext in format.extensions() {
            let file = self.leaf_file_path(language, ext);
            if file.is_file() {
                let decoded = decode_file(&file, format)?;
                self.merge_decoded(&file, decoded);
                return Ok(());
            }
        }
        Ok(())
    }

    fn leaf_file_path(&self, language: &str, ext: &str) -> PathBuf {
        let mut file = compose_path(&self.storage, language, &self.path).into_os_string();
        file.push(".");
        file.push(ext);
        PathBuf::from(file)
    }

    // -----------------------------------------------------------------
    // Raw content
    // -----------------------------------------------------------------

    /// Full verbatim text of a raw-text leaf, read once and cached.
    ///
    /// Returns `None` for non-raw-text nodes: misuse yields absence, never
    /// a panic. The own language is probed first, then the fallback chain
    /// richest-first; a leaf whose backing file is missing caches the empty
    /// string.
    pub fn raw_content(&mut self) -> Result<Option<&str>> {
        if self.format != Some(Format::RawText) {
            return Ok(None);
        }
        if self.raw.is_none() {
            let mut text = String::new();
            'probe: for language in self.raw_language_order() {
                for ext in Format::RawText.extensions() {
                    let file = self.leaf_file_path(&language, ext);
                    if file.is_file() {
                        text = read_raw(&file)?;
                        break 'probe;
                    }
                }
            }
            self.raw = Some(text);
        }
        Ok(self.raw.as_deref())
    }

    // -----------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------

    /// Resolve a dotted path against this node.
    ///
    /// Triggers this node's load (and the loads of the nodes the path
    /// descends through) but performs no other I/O and no other mutation.
    /// Raw-text children resolve transparently to their content.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexicon_tree::Node;
    ///
    /// let mut root = Node::root("en", "/nonexistent/storage");
    /// assert!(root.get("missing.key").unwrap().is_absent());
    /// ```
    pub fn get(&mut self, path: &str) -> Result<Lookup<'_>> {
        crate::path::resolve(self, path)
    }

    /// Resolve a single child key, triggering this node's load.
    pub(crate) fn lookup_child(&mut self, key: &str) -> Result<Lookup<'_>> {
        self.load()?;
        match self.children.get_mut(key) {
            None => Ok(Lookup::Absent),
            Some(Entry::Value(value)) => Ok(Lookup::Value(value)),
            Some(Entry::Node(node)) => {
                if node.format == Some(Format::RawText) {
                    // Callers never see a node for text-payload leaves.
                    match node.raw_content()? {
                        Some(text) => Ok(Lookup::Text(text)),
                        None => Ok(Lookup::Absent),
                    }
                } else {
                    Ok(Lookup::Node(node))
                }
            }
        }
    }

    /// Resolve several dotted paths and aggregate the results.
    ///
    /// Each resolved value is coerced to a flat list (a node flattens to
    /// its own children, a scalar becomes a one-element list, absence
    /// contributes nothing), the lists are concatenated in input order and
    /// returned as a detached, already-loaded node keyed by position.
    pub fn get_all(&mut self, keys: &[&str]) -> Result<Node> {
        let mut items = Vec::new();
        for key in keys {
            match self.get(key)? {
                Lookup::Absent => {}
                Lookup::Text(text) => items.push(Value::String(text.to_owned())),
                Lookup::Value(value) => flatten_value(value.clone(), &mut items),
                Lookup::Node(node) => items.extend(node.flattened_children()?),
            }
        }
        Ok(Node::detached(items))
    }

    /// This node's children as a flat list of values, in child order.
    fn flattened_children(&mut self) -> Result<Vec<Value>> {
        self.load()?;
        let mut items = Vec::new();
        for (_, entry) in self.children.iter_mut() {
            match entry {
                Entry::Value(value) => items.push(value.clone()),
                Entry::Node(node) => {
                    if node.format == Some(Format::RawText) {
                        let text = node.raw_content()?.unwrap_or_default().to_owned();
                        items.push(Value::String(text));
                    } else {
                        items.push(node.to_value()?);
                    }
                }
            }
        }
        Ok(items)
    }

    // -----------------------------------------------------------------
    // Read accessors (trigger load)
    // -----------------------------------------------------------------

    /// Number of children.
    pub fn len(&mut self) -> Result<usize> {
        self.load()?;
        Ok(self.children.len())
    }

    pub fn is_empty(&mut self) -> Result<bool> {
        self.load()?;
        Ok(self.children.is_empty())
    }

    /// Single-segment existence test.
    pub fn contains(&mut self, key: &str) -> Result<bool> {
        self.load()?;
        Ok(self.children.contains_key(key))
    }

    /// Child keys in insertion order.
    pub fn keys(&mut self) -> Result<impl Iterator<Item = &str>> {
        self.load()?;
        Ok(self.children.keys())
    }

    /// Child entries in insertion order.
    pub fn entries(&mut self) -> Result<impl Iterator<Item = (&str, &Entry)>> {
        self.load()?;
        Ok(self.children.iter())
    }

    /// Serialize the children to a plain JSON mapping.
    ///
    /// Nested nodes are materialized recursively; raw-text children
    /// serialize as their text.
    pub fn to_value(&mut self) -> Result<Value> {
        self.load()?;
        let mut map = serde_json::Map::new();
        for (key, entry) in self.children.iter_mut() {
            let value = match entry {
                Entry::Value(value) => value.clone(),
                Entry::Node(node) => {
                    if node.format == Some(Format::RawText) {
                        Value::String(node.raw_content()?.unwrap_or_default().to_owned())
                    } else {
                        node.to_value()?
                    }
                }
            };
            map.insert(key.to_owned(), value);
        }
        Ok(Value::Object(map))
    }
}

/// Coerce one resolved value to list items.
fn flatten_value(value: Value, items: &mut Vec<Value>) {
    match value {
        Value::Array(elements) => items.extend(elements),
        Value::Object(map) => items.extend(map.into_iter().map(|(_, v)| v)),
        scalar => items.push(scalar),
    }
}

/// Compose `storage / language / relative`, omitting empty segments.
fn compose_path(storage: &Path, language: &str, relative: &str) -> PathBuf {
    let mut path = storage.to_path_buf();
    if !language.is_empty() {
        path.push(language);
    }
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path
}

fn join_segments(parent: &str, base: &str) -> String {
    if parent.is_empty() {
        base.to_string()
    } else {
        format!("{parent}/{base}")
    }
}

fn validate_language_code(code: &str) -> Result<()> {
    let mut chars = code.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_alphabetic()
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidLanguage {
            code: code.to_string(),
        })
    }
}
