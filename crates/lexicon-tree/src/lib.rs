//! Lazy, language-aware resource tree for Lexicon
//!
//! Serves localized text and structured configuration from a directory of
//! files organized by locale. Nodes materialize themselves on first access
//! (directory scan or leaf import, at most once per node), fallback
//! languages merge beneath own-language content, and dotted paths navigate
//! the lazily built tree.

pub mod children;
pub mod dictionary;
pub mod error;
pub mod node;
pub mod path;

pub use children::{Children, Entry};
pub use dictionary::{Dictionary, resolve_errors};
pub use error::{Error, Result};
pub use node::{Lookup, Node};
