//! In-memory XML tree model.
//!
//! Feeds parse into a plain owned tree: comparison never mutates or shares
//! nodes, so elements own their children directly.

use std::collections::HashMap;

mod parser;
mod printer;

pub use parser::{parse_document, FeedParser};
pub use printer::element_to_string;

/// A node in the parsed tree: an element or a run of character data.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element: tag name, attributes and children in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: HashMap<String, String>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Creates an element with no children.
    pub fn new(name: String, attributes: HashMap<String, String>) -> Self {
        XmlElement {
            name,
            attributes,
            children: Vec::new(),
        }
    }

    /// Tag name as written in the document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute map (unordered; printing sorts for determinism).
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Child nodes in document order.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Appends a child node.
    pub fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// Direct child elements in document order, text skipped.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// Whether any direct child is itself an element.
    pub fn has_element_children(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// Concatenated content of all direct text children.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let XmlNode::Text(text) = node {
                out.push_str(text);
            }
        }
        out
    }

    /// Every element below this one (`self` excluded), in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&XmlElement> = self.child_elements().collect();
        stack.reverse();
        Descendants { stack }
    }
}

/// Depth-first, document-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        // Children must surface before pending siblings, first child on top.
        let pushed_at = self.stack.len();
        for child in next.child_elements() {
            self.stack.push(child);
        }
        self.stack[pushed_at..].reverse();
        Some(next)
    }
}
