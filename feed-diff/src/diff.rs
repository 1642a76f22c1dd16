//! Field-by-field comparison of two flattened products.

use std::collections::BTreeSet;

use crate::flatten::FlatRecord;

/// One differing field between the live and server version of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    /// Field name.
    pub field: String,
    /// Value on the live side, empty when the field is absent there.
    pub live: String,
    /// Value on the server side, empty when the field is absent there.
    pub server: String,
}

/// Compares two records over the union of their field names, in ascending
/// field order. A field missing on one side reads as the empty string, so
/// "absent" and "present but empty" compare equal. An empty result means
/// the records match.
pub fn diff_records(live: &FlatRecord, server: &FlatRecord) -> Vec<DiffEntry> {
    let mut fields: BTreeSet<&str> = live.field_names().collect();
    fields.extend(server.field_names());

    let mut entries = Vec::new();
    for field in fields {
        let live_value = live.value_or_empty(field);
        let server_value = server.value_or_empty(field);
        if live_value != server_value {
            entries.push(DiffEntry {
                field: field.to_string(),
                live: live_value.to_string(),
                server: server_value.to_string(),
            });
        }
    }
    entries
}
