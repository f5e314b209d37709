//! Document node type.

use scraper::{ElementRef, Html};

/// Tag name given to the synthetic node that wraps the `<html>` element.
pub const DOCUMENT_TAG: &str = "#document";

/// A node of a parsed HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with its attributes in document order.
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<Node>,
    },
    /// A run of character data.
    Text(String),
}

impl Node {
    /// Parse an HTML document.
    ///
    /// Parsing never fails: malformed markup is repaired the way a browser
    /// would (implied `<tbody>`, unclosed cells, and so on). The returned
    /// node is a `#document` element whose only child is `<html>`.
    pub fn parse_document(html: &str) -> Node {
        let document = Html::parse_document(html);
        Node::Element {
            tag: DOCUMENT_TAG.to_string(),
            attrs: Vec::new(),
            children: vec![convert(document.root_element())],
        }
    }

    /// Build an element node.
    pub fn element(tag: impl Into<String>, attrs: &[(&str, &str)], children: Vec<Node>) -> Node {
        Node::Element {
            tag: tag.into(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            children,
        }
    }

    /// Build a text node.
    pub fn text(content: impl Into<String>) -> Node {
        Node::Text(content.into())
    }

    /// The tag name, for elements.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            Node::Text(_) => None,
        }
    }

    /// The first value of the named attribute, for elements.
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Node::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            Node::Text(_) => None,
        }
    }

    /// Child nodes; empty for text.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text(_) => &[],
        }
    }

    /// Direct element children with the given tag, in document order.
    pub fn children_with_tag<'a, 'b>(&'a self, tag: &'b str) -> impl Iterator<Item = &'a Node> + use<'a, 'b> {
        self.children()
            .iter()
            .filter(move |child| child.tag() == Some(tag))
    }

    /// The text content, for text nodes.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(content) => Some(content),
            Node::Element { .. } => None,
        }
    }
}

impl Drop for Node {
    // Deep trees are dismantled through a work list so that dropping a
    // hostile page cannot overflow the stack.
    fn drop(&mut self) {
        let Node::Element { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Node::Element { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

/// A child of an element that has not been converted yet.
enum Pending<'a> {
    Element(ElementRef<'a>),
    Text(String),
}

/// An element being converted: its remaining children and those already built.
struct Frame<'a> {
    tag: String,
    attrs: Vec<(String, String)>,
    pending: std::vec::IntoIter<Pending<'a>>,
    children: Vec<Node>,
}

impl<'a> Frame<'a> {
    fn open(element: ElementRef<'a>) -> Self {
        let value = element.value();

        let attrs = value
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let pending: Vec<_> = element
            .children()
            .filter_map(|child| match ElementRef::wrap(child) {
                Some(el) => Some(Pending::Element(el)),
                None => child.value().as_text().map(|text| {
                    let content: &str = text;
                    Pending::Text(content.to_owned())
                }),
            })
            .collect();

        Frame {
            tag: value.name().to_string(),
            attrs,
            pending: pending.into_iter(),
            children: Vec::new(),
        }
    }

    fn finish(self) -> Node {
        Node::Element {
            tag: self.tag,
            attrs: self.attrs,
            children: self.children,
        }
    }
}

/// Convert a scraper element and its subtree without recursion.
fn convert(root: ElementRef<'_>) -> Node {
    let mut current = Frame::open(root);
    let mut parents = Vec::new();

    loop {
        match current.pending.next() {
            Some(Pending::Text(text)) => current.children.push(Node::Text(text)),
            Some(Pending::Element(child)) => {
                parents.push(std::mem::replace(&mut current, Frame::open(child)));
            }
            None => match parents.pop() {
                Some(parent) => {
                    let done = std::mem::replace(&mut current, parent);
                    current.children.push(done.finish());
                }
                None => return current.finish(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_wraps_html_in_document() {
        let doc = Node::parse_document("<html><body><p>hi</p></body></html>");
        assert_eq!(doc.tag(), Some(DOCUMENT_TAG));
        assert_eq!(doc.children().len(), 1);
        assert_eq!(doc.children()[0].tag(), Some("html"));
    }

    #[test]
    fn parse_keeps_attributes_in_order() {
        let doc = Node::parse_document(r#"<div id="a" class="b" data-x="c"></div>"#);
        let html = &doc.children()[0];
        let body = html.children_with_tag("body").next().unwrap();
        let div = body.children_with_tag("div").next().unwrap();

        match div {
            Node::Element { attrs, .. } => {
                let keys: Vec<_> = attrs.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["id", "class", "data-x"]);
            }
            Node::Text(_) => panic!("expected element"),
        }
        assert_eq!(div.attr("class"), Some("b"));
        assert_eq!(div.attr("missing"), None);
    }

    #[test]
    fn parse_inserts_implied_tbody() {
        let doc = Node::parse_document("<table id=t><tr><td>1</td></tr></table>");
        let html = &doc.children()[0];
        let body = html.children_with_tag("body").next().unwrap();
        let table = body.children_with_tag("table").next().unwrap();
        assert_eq!(table.children_with_tag("tbody").count(), 1);
    }

    #[test]
    fn parse_keeps_text_nodes() {
        let doc = Node::parse_document("<p>hello <b>there</b></p>");
        let html = &doc.children()[0];
        let body = html.children_with_tag("body").next().unwrap();
        let p = body.children_with_tag("p").next().unwrap();

        assert_eq!(p.children()[0].as_text(), Some("hello "));
        assert_eq!(p.children()[1].tag(), Some("b"));
    }

    #[test]
    fn text_nodes_have_no_tag_or_children() {
        let text = Node::text("x");
        assert_eq!(text.tag(), None);
        assert_eq!(text.attr("id"), None);
        assert!(text.children().is_empty());
    }

    #[test]
    fn parse_deeply_nested_document() {
        let depth = 20_000;
        let html = format!("{}<p id=\"leaf\">x</p>{}", "<div>".repeat(depth), "</div>".repeat(depth));

        let doc = Node::parse_document(&html);

        let mut node = &doc.children()[0];
        let mut divs = 0;
        while let Some(div) = node.children_with_tag("body").chain(node.children_with_tag("div")).next() {
            if div.tag() == Some("div") {
                divs += 1;
            }
            node = div;
        }
        assert!(divs > 1_000, "only {divs} nested divs survived parsing");
    }

    #[test]
    fn drop_deep_tree() {
        let mut node = Node::text("leaf");
        for _ in 0..100_000 {
            node = Node::element("div", &[], vec![node]);
        }
        drop(node);
    }
}
