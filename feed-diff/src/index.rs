//! Indexing of parsed feeds by product identity.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::config::{CompareConfig, Feed};
use crate::error::Result;
use crate::flatten::{FlatRecord, Flattener};
use crate::normalize::normalize_text;
use crate::xml::{parse_document, XmlElement};

/// Tag name that marks a product element.
pub const PRODUCT_TAG: &str = "product";
/// Preferred identity field.
pub const ID_FIELD: &str = "id";
/// Fallback identity field.
pub const MPN_FIELD: &str = "mpn";

/// Identity of one product within a feed.
///
/// Ordering follows the rendered form (`id:` sorts before `mpn:`), so sorted
/// key listings and sorted display output agree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdentityKey {
    Id(String),
    Mpn(String),
}

impl IdentityKey {
    /// Derives the identity of a flattened product. The `id` field wins when
    /// it has content; `mpn` is the fallback. Returns `None` when neither
    /// carries a value, in which case the product cannot be matched.
    pub fn derive(record: &FlatRecord) -> Option<IdentityKey> {
        let id = normalize_text(record.value_or_empty(ID_FIELD));
        if !id.is_empty() {
            return Some(IdentityKey::Id(id));
        }
        let mpn = normalize_text(record.value_or_empty(MPN_FIELD));
        if !mpn.is_empty() {
            return Some(IdentityKey::Mpn(mpn));
        }
        None
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Id(value) => write!(f, "id:{}", value),
            IdentityKey::Mpn(value) => write!(f, "mpn:{}", value),
        }
    }
}

/// All products of one feed, flattened and keyed by identity.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    records: BTreeMap<IdentityKey, FlatRecord>,
}

impl CatalogIndex {
    /// Parses a feed document and indexes every product in it.
    pub fn build(feed: Feed, xml: &str, config: &CompareConfig) -> Result<CatalogIndex> {
        let root = parse_document(feed, xml)?;
        let index = CatalogIndex::from_root(&root, config);
        debug!(feed = %feed, products = index.len(), "indexed feed");
        Ok(index)
    }

    /// Indexes every `product` element in the tree, at any depth, in
    /// document order. Products without an identity are dropped; products
    /// sharing a key collapse to the last one seen.
    pub fn from_root(root: &XmlElement, config: &CompareConfig) -> CatalogIndex {
        let flattener = Flattener::new(config);
        let mut records = BTreeMap::new();
        for product in root.descendants().filter(|el| el.name() == PRODUCT_TAG) {
            let record = flattener.flatten(product);
            let key = match IdentityKey::derive(&record) {
                Some(key) => key,
                None => continue,
            };
            records.insert(key, record);
        }
        CatalogIndex { records }
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&FlatRecord> {
        self.records.get(key)
    }

    pub fn contains_key(&self, key: &IdentityKey) -> bool {
        self.records.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &IdentityKey> {
        self.records.keys()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
