//! Form events
//!
//! Raised by the store after a mutation has been applied. Skipped mutations
//! raise nothing.

use crate::domain::aggregates::FormDocument;
use crate::domain::value_objects::GridAxis;
use std::sync::Arc;

/// What changed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    DocumentReplaced { document_id: String },
    HeaderUpdated,
    SectionAdded { section_id: String },
    SectionUpdated { section_id: String },
    SectionRemoved { section_id: String },
    FieldsReordered { section_id: String },
    FieldAdded { field_id: String, section_id: Option<String> },
    FieldUpdated { field_id: String },
    FieldRemoved { field_id: String },
    OptionsChanged { field_id: String },
    TableChanged { field_id: String, axis: GridAxis },
}

impl FormEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            FormEvent::DocumentReplaced { .. } => "document.replaced",
            FormEvent::HeaderUpdated => "header.updated",
            FormEvent::SectionAdded { .. } => "section.added",
            FormEvent::SectionUpdated { .. } => "section.updated",
            FormEvent::SectionRemoved { .. } => "section.removed",
            FormEvent::FieldsReordered { .. } => "section.reordered",
            FormEvent::FieldAdded { .. } => "field.added",
            FormEvent::FieldUpdated { .. } => "field.updated",
            FormEvent::FieldRemoved { .. } => "field.removed",
            FormEvent::OptionsChanged { .. } => "field.options_changed",
            FormEvent::TableChanged { .. } => "field.table_changed",
        }
    }

    /// Field the event is about, if any
    pub fn field_id(&self) -> Option<&str> {
        match self {
            FormEvent::FieldAdded { field_id, .. }
            | FormEvent::FieldUpdated { field_id }
            | FormEvent::FieldRemoved { field_id }
            | FormEvent::OptionsChanged { field_id }
            | FormEvent::TableChanged { field_id, .. } => Some(field_id),
            _ => None,
        }
    }

    /// Section the event is about, if any
    pub fn section_id(&self) -> Option<&str> {
        match self {
            FormEvent::SectionAdded { section_id }
            | FormEvent::SectionUpdated { section_id }
            | FormEvent::SectionRemoved { section_id }
            | FormEvent::FieldsReordered { section_id } => Some(section_id),
            FormEvent::FieldAdded { section_id, .. } => section_id.as_deref(),
            _ => None,
        }
    }
}

/// Notification delivered to subscribers
#[derive(Clone, Debug)]
pub struct StoreEvent {
    pub event: FormEvent,
    /// Store version after the mutation
    pub version: u64,
    /// Document after the mutation
    pub snapshot: Arc<FormDocument>,
}
