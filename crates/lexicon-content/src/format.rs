//! Leaf format detection

use serde::{Deserialize, Serialize};

/// Recognized leaf formats.
///
/// A format is inferred from the file extension when a directory is
/// scanned and stays fixed for the lifetime of the node it was matched
/// for. Entries with unrecognized extensions are ignored by the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// TOML key/value leaf
    Toml,
    /// JSON key/value leaf
    Json,
    /// YAML key/value leaf
    Yaml,
    /// Raw text leaf, returned verbatim
    RawText,
}

impl Format {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "html" | "txt" => Some(Self::RawText),
            _ => None,
        }
    }

    /// Get default file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Toml => &["toml"],
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
            Self::RawText => &["html", "txt"],
        }
    }

    /// Whether leaves of this format decode to a key/value mapping
    pub fn is_structured(&self) -> bool {
        !matches!(self, Self::RawText)
    }

    /// Display name used in parse errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::RawText => "raw text",
        }
    }
}
