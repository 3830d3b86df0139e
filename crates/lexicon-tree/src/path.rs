//! Dotted-path resolution
//!
//! A dotted path identifies a nested key by joining segment names with
//! `.`. Resolution splits on the first dot, descends one level into the
//! child node and recurses with the remainder, so `get("a.b.c")` on a root
//! is equivalent to `get("c")` on `get("b")` on `get("a")`.

use crate::error::Result;
use crate::node::{Lookup, Node};

/// Resolve a dotted path against a node.
///
/// Absence is a valid terminal value at any point: a missing segment, or a
/// remainder applied to something that is not a node (a decoded scalar, a
/// raw-text leaf), yields [`Lookup::Absent`] rather than an error. The only
/// mutation is the one-shot load of the nodes the path descends through.
///
/// # Examples
///
/// ```
/// use lexicon_tree::{Node, path::resolve};
///
/// let mut root = Node::root("en", "/nonexistent/storage");
/// assert!(resolve(&mut root, "a.b.c").unwrap().is_absent());
/// ```
pub fn resolve<'a>(node: &'a mut Node, path: &str) -> Result<Lookup<'a>> {
    match path.split_once('.') {
        None => node.lookup_child(path),
        Some((head, rest)) => match node.lookup_child(head)? {
            Lookup::Node(child) => resolve(child, rest),
            // The remainder cannot be applied to a non-node.
            _ => Ok(Lookup::Absent),
        },
    }
}
