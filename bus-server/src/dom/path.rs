//! Element lookup by id and by tag path.

use std::fmt;
use std::str::FromStr;

use super::Node;

/// Error returned when a path segment string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid path segment {segment:?}: {reason}")]
pub struct InvalidPathSegment {
    segment: String,
    reason: &'static str,
}

/// One step of a path through the document tree.
///
/// Written as `"tag"` (first direct child with that tag) or `"tag[n]"`
/// (n-th direct child with that tag, counting from zero).
///
/// # Examples
///
/// ```
/// use bus_server::dom::PathSegment;
///
/// let seg: PathSegment = "tr[2]".parse().unwrap();
/// assert_eq!(seg, PathSegment::Indexed("tr".into(), 2));
///
/// let seg: PathSegment = "tbody".parse().unwrap();
/// assert_eq!(seg, PathSegment::Tag("tbody".into()));
///
/// assert!("tr[x]".parse::<PathSegment>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// First direct child element with this tag.
    Tag(String),
    /// Zero-based n-th direct child element with this tag.
    Indexed(String, usize),
}

impl PathSegment {
    fn tag(&self) -> &str {
        match self {
            PathSegment::Tag(tag) | PathSegment::Indexed(tag, _) => tag,
        }
    }

    fn index(&self) -> usize {
        match self {
            PathSegment::Tag(_) => 0,
            PathSegment::Indexed(_, n) => *n,
        }
    }
}

impl FromStr for PathSegment {
    type Err = InvalidPathSegment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| InvalidPathSegment {
            segment: s.to_string(),
            reason,
        };

        let (tag, index) = match s.split_once('[') {
            None => (s, None),
            Some((tag, rest)) => {
                let digits = rest.strip_suffix(']').ok_or_else(|| invalid("missing closing bracket"))?;
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid("index must be a non-negative integer"));
                }
                let n: usize = digits.parse().map_err(|_| invalid("index out of range"))?;
                (tag, Some(n))
            }
        };

        if tag.is_empty() || !tag.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(invalid("tag must be non-empty and alphanumeric"));
        }

        Ok(match index {
            None => PathSegment::Tag(tag.to_string()),
            Some(n) => PathSegment::Indexed(tag.to_string(), n),
        })
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Tag(tag) => f.write_str(tag),
            PathSegment::Indexed(tag, n) => write!(f, "{tag}[{n}]"),
        }
    }
}

/// Parse a whole path such as `["tbody", "tr[1]"]`.
pub fn parse_path(segments: &[&str]) -> Result<Vec<PathSegment>, InvalidPathSegment> {
    segments.iter().map(|s| s.parse()).collect()
}

/// Depth-first, pre-order search for the first element with the given `id`.
///
/// Uses an explicit work list, so arbitrarily deep documents are fine.
pub fn find_by_id<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.attr("id") == Some(id) {
            return Some(node);
        }
        stack.extend(node.children().iter().rev());
    }
    None
}

/// Follow `path` from `root` through direct element children.
///
/// An empty path yields `root`. Any segment that matches nothing,
/// including an out-of-range index, yields `None`.
pub fn resolve_path<'a>(root: &'a Node, path: &[PathSegment]) -> Option<&'a Node> {
    let Some((segment, rest)) = path.split_first() else {
        return Some(root);
    };

    let next = root.children_with_tag(segment.tag()).nth(segment.index())?;
    resolve_path(next, rest)
}

/// The content of `node`'s first child, if that child is a text node.
pub fn first_text(node: &Node) -> Option<&str> {
    node.children().first().and_then(Node::as_text)
}
