//! Read-side selectors over a document snapshot

use crate::domain::{FormDocument, FormField};
use std::collections::HashSet;
use std::sync::Arc;

/// Fields of a section in display order.
///
/// Ids without a matching field are skipped.
pub fn ordered_fields(doc: &FormDocument, section_id: &str) -> Vec<Arc<FormField>> {
    doc.section(section_id)
        .map(|section| {
            section
                .field_order
                .iter()
                .filter_map(|id| doc.field(id).cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Every section's `field_order`, concatenated in section order
pub fn flat_field_order(doc: &FormDocument) -> Vec<&str> {
    doc.sections()
        .values()
        .flat_map(|s| s.field_order.iter().map(String::as_str))
        .collect()
}

/// Fields no section references, in insertion order
pub fn unreferenced_fields(doc: &FormDocument) -> Vec<&str> {
    let referenced: HashSet<&str> = flat_field_order(doc).into_iter().collect();
    doc.fields()
        .keys()
        .map(String::as_str)
        .filter(|id| !referenced.contains(id))
        .collect()
}

/// Section ids and their ordered field ids
pub fn layout(doc: &FormDocument) -> Vec<(&str, &[String])> {
    doc.sections()
        .values()
        .map(|s| (s.id.as_str(), s.field_order.as_slice()))
        .collect()
}

/// Resolve a flat position to `(section id, position inside it)`.
///
/// A position on a boundary belongs to the earlier section, past the end it
/// lands after the last field of the last section.
pub fn locate_flat_index(doc: &FormDocument, index: usize) -> Option<(String, usize)> {
    let mut offset = 0;
    let mut last = None;
    for section in doc.sections().values() {
        let len = section.field_order.len();
        if index <= offset + len {
            return Some((section.id.clone(), index - offset));
        }
        offset += len;
        last = Some((section.id.clone(), len));
    }
    last
}
