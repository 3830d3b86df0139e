//! Error types for lexicon-tree

use std::path::PathBuf;

/// Result type for lexicon-tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while materializing or navigating the tree
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A structured leaf failed to decode. Malformed resource files are a
    /// deployment defect and are never swallowed.
    #[error(transparent)]
    Content(#[from] lexicon_content::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid fallback language code: {code:?}")]
    InvalidLanguage { code: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
