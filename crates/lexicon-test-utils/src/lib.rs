//! Shared test fixtures for the lexicon workspace.
//!
//! Provides [`TestStorage`], a builder for temporary storage-root layouts
//! (per-language directories with structured and raw-text leaves). It is a
//! dev-dependency only — never published.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A temporary storage root populated with resource files.
///
/// Paths are given relative to the root with `/` separators, e.g.
/// `en/example.json`; parent directories are created on demand. The
/// directory is removed when the fixture drops.
pub struct TestStorage {
    root: TempDir,
}

impl TestStorage {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create temp storage root"),
        }
    }

    /// The storage root path.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Write a file under the root, creating parent directories.
    pub fn file(&self, relative: &str, content: &str) -> &Self {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture directories");
        }
        fs::write(&path, content).expect("write fixture file");
        self
    }

    /// Write a JSON leaf from a `serde_json::Value`.
    pub fn json(&self, relative: &str, value: &serde_json::Value) -> &Self {
        self.file(relative, &value.to_string())
    }

    /// Create an empty directory under the root.
    pub fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.root.path().join(relative)).expect("create fixture directory");
        self
    }
}

impl Default for TestStorage {
    fn default() -> Self {
        Self::new()
    }
}
