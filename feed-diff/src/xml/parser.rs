//! Streaming XML parser that builds the owned element tree.
//!
//! Uses quick-xml's event API. The whole document is materialized since
//! comparison needs random access to every product subtree.

use std::collections::HashMap;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{XmlElement, XmlNode};
use crate::config::Feed;
use crate::error::{Error, Result};

/// Parser for one feed document. Carries the feed label so parse failures
/// name the document that produced them.
pub struct FeedParser {
    feed: Feed,
}

impl FeedParser {
    /// Creates a parser for the given feed.
    pub fn new(feed: Feed) -> Self {
        FeedParser { feed }
    }

    /// Parses a complete document and returns its root element.
    pub fn parse(&self, xml: &str) -> Result<XmlElement> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = Reader::from_str(xml);
        // Keep text verbatim - trimming happens during normalization
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
        // Mismatched closing tags are malformed input, not recoverable
        reader.config_mut().check_end_names = true;

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let element = self.element_from_start(&reader, e)?;
                    stack.push(element);
                }
                Ok(Event::Empty(ref e)) => {
                    // Self-closing tag - a complete childless element
                    let element = self.element_from_start(&reader, e)?;
                    self.attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => match stack.pop() {
                    Some(element) => self.attach(&mut stack, &mut root, element)?,
                    None => return Err(self.fail("closing tag without opener")),
                },
                Ok(Event::Text(e)) => {
                    let raw = std::str::from_utf8(e.as_ref())
                        .map_err(|e| self.fail(e.to_string()))?;
                    let text = unescape(raw).map_err(|e| self.fail(e.to_string()))?;
                    self.push_text(&mut stack, &text)?;
                }
                Ok(Event::CData(ref e)) => {
                    // Treat CDATA like text
                    let text = String::from_utf8_lossy(e.as_ref());
                    self.push_text(&mut stack, &text)?;
                }
                Ok(Event::GeneralRef(ref e)) => {
                    let name = std::str::from_utf8(e.as_ref())
                        .map_err(|e| self.fail(e.to_string()))?;
                    match resolve_entity(name) {
                        Some(text) => self.push_text(&mut stack, &text)?,
                        None => {
                            return Err(self.fail(format!("undefined entity: &{};", name)))
                        }
                    }
                }
                Ok(Event::Comment(_)) | Ok(Event::Decl(_)) | Ok(Event::PI(_))
                | Ok(Event::DocType(_)) => {
                    // Carry no field data
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(self.fail(e.to_string())),
            }
        }

        if !stack.is_empty() {
            return Err(self.fail("document ended with unclosed elements"));
        }
        root.ok_or_else(|| self.fail("no root element"))
    }

    /// Decodes an element's name and attributes.
    fn element_from_start(&self, reader: &Reader<&[u8]>, e: &BytesStart) -> Result<XmlElement> {
        let name = reader
            .decoder()
            .decode(e.name().as_ref())
            .map_err(|e| self.fail(e.to_string()))?
            .to_string();

        let mut attributes = HashMap::new();
        for attr_result in e.attributes() {
            let attr =
                attr_result.map_err(|e| self.fail(format!("attribute error: {}", e)))?;
            let key = reader
                .decoder()
                .decode(attr.key.as_ref())
                .map_err(|e| self.fail(e.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| self.fail(e.to_string()))?
                .to_string();
            attributes.insert(key, value);
        }

        Ok(XmlElement::new(name, attributes))
    }

    /// Adds a completed element to the enclosing element, or installs it as
    /// the document root when the stack is empty.
    fn attach(
        &self,
        stack: &mut Vec<XmlElement>,
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => {
                parent.push_child(XmlNode::Element(element));
                Ok(())
            }
            None => {
                if root.is_some() {
                    return Err(self.fail("multiple root elements"));
                }
                *root = Some(element);
                Ok(())
            }
        }
    }

    /// Appends character data to the enclosing element. Non-whitespace text
    /// outside the root is malformed.
    fn push_text(&self, stack: &mut Vec<XmlElement>, text: &str) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => {
                if !text.is_empty() {
                    parent.push_child(XmlNode::Text(text.to_string()));
                }
                Ok(())
            }
            None => {
                if text.trim().is_empty() {
                    Ok(())
                } else {
                    Err(self.fail("character data outside the document root"))
                }
            }
        }
    }

    fn fail(&self, reason: impl Into<String>) -> Error {
        Error::Parse {
            feed: self.feed,
            reason: reason.into(),
        }
    }
}

/// Parses a feed document; errors name the offending feed.
pub fn parse_document(feed: Feed, xml: &str) -> Result<XmlElement> {
    FeedParser::new(feed).parse(xml)
}

/// Resolves predefined entities and numeric character references. `None`
/// means the reference is undefined in the input.
fn resolve_entity(name: &str) -> Option<String> {
    let name = name.strip_prefix('&').unwrap_or(name);
    let name = name.strip_suffix(';').unwrap_or(name);
    match name {
        "amp" => return Some("&".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        _ => {}
    }
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code).map(|c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> XmlElement {
        parse_document(Feed::Live, xml).unwrap()
    }

    #[test]
    fn test_parse_simple_document() {
        let root = parse("<catalog><product><id>1</id></product></catalog>");
        assert_eq!(root.name(), "catalog");
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_parse_with_attributes() {
        let root = parse(r#"<catalog version="2" lang="en"/>"#);
        assert_eq!(root.attributes().get("version"), Some(&"2".to_string()));
        assert_eq!(root.attributes().get("lang"), Some(&"en".to_string()));
    }

    #[test]
    fn test_entity_in_attribute_value() {
        let root = parse(r#"<v title="Tom &amp; Jerry"/>"#);
        assert_eq!(
            root.attributes().get("title"),
            Some(&"Tom & Jerry".to_string())
        );
    }

    #[test]
    fn test_text_kept_verbatim() {
        let root = parse("<name>  Blue   Shirt </name>");
        assert_eq!(root.text_content(), "  Blue   Shirt ");
    }

    #[test]
    fn test_entities_unescaped() {
        let root = parse("<name>Tom &amp; Jerry &lt;3</name>");
        assert_eq!(root.text_content(), "Tom & Jerry <3");
    }

    #[test]
    fn test_numeric_character_reference() {
        let root = parse("<name>caf&#233;</name>");
        assert_eq!(root.text_content(), "café");
    }

    #[test]
    fn test_cdata_treated_as_text() {
        let root = parse("<desc><![CDATA[5 < 6 & 7]]></desc>");
        assert_eq!(root.text_content(), "5 < 6 & 7");
    }

    #[test]
    fn test_declaration_and_comments_skipped() {
        let root = parse("<?xml version=\"1.0\"?><!-- head --><c><!-- x --><id>1</id></c>");
        assert_eq!(root.name(), "c");
        assert_eq!(root.child_elements().count(), 1);
    }

    #[test]
    fn test_error_names_the_feed() {
        let err = parse_document(Feed::Server, "<a><b></a>").unwrap_err();
        assert!(err.to_string().contains("server feed"));
        match err {
            Error::Parse { feed, .. } => assert_eq!(feed, Feed::Server),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unclosed_element_is_fatal() {
        assert!(parse_document(Feed::Live, "<a><b>").is_err());
    }

    #[test]
    fn test_empty_input_is_fatal() {
        assert!(parse_document(Feed::Live, "").is_err());
        assert!(parse_document(Feed::Live, "   ").is_err());
    }

    #[test]
    fn test_second_root_is_fatal() {
        assert!(parse_document(Feed::Live, "<a/><b/>").is_err());
    }

    #[test]
    fn test_undefined_entity_is_fatal() {
        assert!(parse_document(Feed::Live, "<a>&nope;</a>").is_err());
    }

    #[test]
    fn test_leading_bom_accepted() {
        let root = parse("\u{feff}<catalog/>");
        assert_eq!(root.name(), "catalog");
    }
}
