//! Form Document Aggregate
//!
//! The normalized document: a header, sections keyed by id and fields keyed
//! by id. Sections own the display order of their fields through
//! `field_order`.
//!
//! # Invariants
//! - every id in a `field_order` is a key of `fields`
//! - a field id appears in at most one `field_order`
//! - map keys equal the id of the entity stored under them
//!
//! Entities sit behind `Arc`. Editing goes through `Arc::make_mut`, so a
//! document cloned from a snapshot only reallocates the entities it edits;
//! every sibling keeps its pointer identity.

use super::{FormField, Section};
use crate::config::StoreConfig;
use crate::domain::value_objects::{ChoiceOption, GridAxis, UserInputOption};
use forms_common::new_document_id;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Form title block
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormHeader {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormHeader {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Root aggregate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDocument {
    id: String,
    header: Arc<FormHeader>,
    #[serde(default)]
    sections: IndexMap<String, Arc<Section>>,
    #[serde(default)]
    fields: IndexMap<String, Arc<FormField>>,
}

impl FormDocument {
    /// Empty document without sections
    pub fn new(id: impl Into<String>, header: FormHeader) -> Self {
        Self {
            id: id.into(),
            header: Arc::new(header),
            sections: IndexMap::new(),
            fields: IndexMap::new(),
        }
    }

    /// Session-start document: fresh UUID, one empty section, no fields
    pub fn with_default_section(config: &StoreConfig) -> Self {
        let mut header = FormHeader::new(config.default_form_title.clone());
        header.description = config.default_form_description.clone();

        let section = Section::new(
            config.id_generator().generate(),
            config.default_section_title.clone(),
        );
        Self::new(new_document_id(), header).with_section(section)
    }

    /// Builder-style insert, keyed by `section.id`
    pub fn with_section(mut self, section: Section) -> Self {
        self.insert_section(section);
        self
    }

    /// Builder-style insert into `fields` only, no ordering
    pub fn with_field(mut self, field: FormField) -> Self {
        self.insert_field(field);
        self
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header(&self) -> &FormHeader {
        &self.header
    }

    pub fn header_arc(&self) -> &Arc<FormHeader> {
        &self.header
    }

    pub fn sections(&self) -> &IndexMap<String, Arc<Section>> {
        &self.sections
    }

    pub fn fields(&self) -> &IndexMap<String, Arc<FormField>> {
        &self.fields
    }

    pub fn section(&self, id: &str) -> Option<&Arc<Section>> {
        self.sections.get(id)
    }

    pub fn field(&self, id: &str) -> Option<&Arc<FormField>> {
        self.fields.get(id)
    }

    /// Option of an option-bearing field
    pub fn option(&self, field_id: &str, option_id: &str) -> Option<UserInputOption> {
        self.field(field_id)?.config.options()?.find(option_id)
    }

    /// Row or column of a grid field
    pub fn grid_option(&self, field_id: &str, axis: GridAxis, id: &str) -> Option<ChoiceOption> {
        self.field(field_id)?
            .config
            .table()?
            .axis(axis)
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }

    /// Section whose `field_order` holds `field_id`
    pub fn section_of(&self, field_id: &str) -> Option<&Arc<Section>> {
        self.sections
            .values()
            .find(|s| s.field_order.iter().any(|id| id == field_id))
    }

    // =========================================================================
    // Copy-on-write access for the store
    // =========================================================================

    pub(crate) fn header_mut(&mut self) -> &mut FormHeader {
        Arc::make_mut(&mut self.header)
    }

    pub(crate) fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.get_mut(id).map(Arc::make_mut)
    }

    pub(crate) fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.get_mut(id).map(Arc::make_mut)
    }

    pub(crate) fn insert_section(&mut self, section: Section) {
        self.sections.insert(section.id.clone(), Arc::new(section));
    }

    pub(crate) fn remove_section(&mut self, id: &str) -> Option<Arc<Section>> {
        self.sections.shift_remove(id)
    }

    pub(crate) fn insert_field(&mut self, field: FormField) {
        self.fields.insert(field.id.clone(), Arc::new(field));
    }

    pub(crate) fn remove_field(&mut self, id: &str) -> Option<Arc<FormField>> {
        self.fields.shift_remove(id)
    }

    /// Drop `field_id` from every `field_order` that holds it.
    ///
    /// Sections without the id are left alone.
    pub(crate) fn strip_field_refs(&mut self, field_id: &str) -> usize {
        let mut touched = 0;
        for section in self.sections.values_mut() {
            if section.field_order.iter().any(|id| id == field_id) {
                Arc::make_mut(section)
                    .field_order
                    .retain(|id| id != field_id);
                touched += 1;
            }
        }
        touched
    }
}
