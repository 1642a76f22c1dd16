//! Canonical subtree serialization.
//!
//! Nested fields are compared as strings, so the output must be stable for
//! equal trees: attributes are emitted in sorted order and childless
//! elements self-close.

use quick_xml::escape::escape;

use super::{XmlElement, XmlNode};

/// Serializes an element, including its own tag, to a canonical string.
pub fn element_to_string(element: &XmlElement) -> String {
    let mut out = String::new();
    write_element(&mut out, element);
    out
}

fn write_element(out: &mut String, element: &XmlElement) {
    out.push('<');
    out.push_str(element.name());

    // Sorted for deterministic output
    let mut attr_names: Vec<&String> = element.attributes().keys().collect();
    attr_names.sort();
    for name in attr_names {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(element.attributes()[name].as_str()));
        out.push('"');
    }

    if element.children().is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in element.children() {
        match child {
            XmlNode::Element(e) => write_element(out, e),
            XmlNode::Text(text) => out.push_str(&escape(text.as_str())),
        }
    }
    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Feed;
    use crate::xml::parse_document;

    fn roundtrip(xml: &str) -> String {
        element_to_string(&parse_document(Feed::Live, xml).unwrap())
    }

    #[test]
    fn test_serialize_nested_subtree() {
        assert_eq!(
            roundtrip("<sizes><size>M</size><size>L</size></sizes>"),
            "<sizes><size>M</size><size>L</size></sizes>"
        );
    }

    #[test]
    fn test_attributes_sorted() {
        assert_eq!(roundtrip(r#"<v b="2" a="1"/>"#), r#"<v a="1" b="2" />"#);
    }

    #[test]
    fn test_empty_element_self_closes() {
        assert_eq!(roundtrip("<v></v>"), "<v />");
    }

    #[test]
    fn test_text_re_escaped() {
        assert_eq!(
            roundtrip("<name>Tom &amp; Jerry</name>"),
            "<name>Tom &amp; Jerry</name>"
        );
    }

    #[test]
    fn test_attribute_order_does_not_affect_output() {
        assert_eq!(
            roundtrip(r#"<v a="1" b="2"/>"#),
            roundtrip(r#"<v b="2" a="1"/>"#)
        );
    }

    #[test]
    fn test_whitespace_between_children_preserved() {
        let xml = "<sizes>\n  <size>M</size>\n</sizes>";
        assert_eq!(roundtrip(xml), xml);
    }
}
