//! Flattening of product elements into comparable field maps.

use std::collections::BTreeMap;

use crate::config::CompareConfig;
use crate::normalize::{normalize_text, normalize_url};
use crate::xml::{element_to_string, XmlElement};

/// A product reduced to a flat map of field name to normalized value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRecord {
    fields: BTreeMap<String, String>,
}

impl FlatRecord {
    pub fn new() -> Self {
        FlatRecord::default()
    }

    /// Sets a field value. A repeated field overwrites the previous value,
    /// so the last occurrence in document order wins.
    pub fn insert(&mut self, field: String, value: String) {
        self.fields.insert(field, value);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Returns the field value, or `""` when the field is absent.
    pub fn value_or_empty(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Field names in ascending order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        FlatRecord {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Turns product elements into [`FlatRecord`]s under one rule set.
pub struct Flattener<'a> {
    config: &'a CompareConfig,
}

impl<'a> Flattener<'a> {
    pub fn new(config: &'a CompareConfig) -> Self {
        Flattener { config }
    }

    /// Flattens the direct children of a product element.
    ///
    /// Ignored fields are skipped entirely. A child with element children
    /// becomes a serialized subtree string; a leaf becomes its normalized
    /// text, with URL fields additionally reduced to path and query.
    pub fn flatten(&self, product: &XmlElement) -> FlatRecord {
        let mut record = FlatRecord::new();
        for child in product.child_elements() {
            let tag = child.name().trim();
            if self.config.ignored_fields.contains(tag) {
                continue;
            }
            let value = if child.has_element_children() {
                normalize_text(&element_to_string(child))
            } else {
                let text = normalize_text(&child.text_content());
                if self.config.url_fields.contains(tag) {
                    normalize_url(&text)
                } else {
                    text
                }
            };
            record.insert(tag.to_string(), value);
        }
        record
    }
}
