//! Typed HTML document tree and path navigation.
//!
//! The arrivals page is parsed once into a [`Node`] tree, which is then
//! searched by element id and walked with short tag paths such as
//! `["tbody", "tr[1]", "td[0]", "font"]`.

mod node;
mod path;

pub use node::Node;
pub use path::{InvalidPathSegment, PathSegment, find_by_id, first_text, parse_path, resolve_path};
