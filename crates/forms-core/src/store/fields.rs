//! Field operations

use super::{Applied, FormStore};
use crate::domain::{
    default_config_with, FieldKind, FieldPatch, FormAnswer, FormDocument, FormEvent, FormField,
    Mutation, SkipReason,
};
use crate::selectors::locate_flat_index;

fn field_mut<'a>(doc: &'a mut FormDocument, field_id: &str) -> Result<&'a mut FormField, SkipReason> {
    doc.field_mut(field_id)
        .ok_or_else(|| SkipReason::MissingField(field_id.to_string()))
}

fn updated(field_id: &str) -> Applied {
    Applied::event(FormEvent::FieldUpdated {
        field_id: field_id.to_string(),
    })
}

/// Store `field` and order it at `slot`, a section id and a position
/// clamped to that section's length. Without a slot the field only lands
/// in `fields` and every section order is left as it was.
fn place(
    doc: &mut FormDocument,
    field: FormField,
    slot: Option<(String, usize)>,
) -> Result<Applied, SkipReason> {
    let field_id = field.id.clone();
    doc.insert_field(field);

    let section_id = match slot {
        Some((section_id, position)) => {
            doc.strip_field_refs(&field_id);
            let section = doc
                .section_mut(&section_id)
                .ok_or_else(|| SkipReason::MissingSection(section_id.clone()))?;
            let position = position.min(section.field_order.len());
            section.field_order.insert(position, field_id.clone());
            Some(section_id)
        }
        None => None,
    };

    Ok(Applied::created(
        FormEvent::FieldAdded {
            field_id: field_id.clone(),
            section_id,
        },
        field_id,
    ))
}

impl FormStore {
    /// Insert `field` and append it to `section_id`.
    ///
    /// The field keeps its id. When the section is missing the field is
    /// still stored, just not ordered anywhere.
    pub fn add_field(&self, section_id: &str, field: FormField) -> Mutation {
        self.commit("add_field", move |doc| {
            let slot = doc
                .section(section_id)
                .map(|s| (section_id.to_string(), s.field_order.len()));
            if slot.is_none() {
                tracing::debug!(section_id, field_id = %field.id, "section missing, field left unordered");
            }
            place(doc, field, slot).map(|applied| Applied::event(applied.event))
        })
    }

    /// Append a new field of `kind` with generated ids and default config
    pub fn append_new_field(&self, section_id: &str, kind: FieldKind) -> Mutation {
        let field = FormField::of_kind(kind, &self.ids);
        self.commit("append_new_field", move |doc| {
            let len = doc
                .section(section_id)
                .map(|s| s.field_order.len())
                .ok_or_else(|| SkipReason::MissingSection(section_id.to_string()))?;
            place(doc, field, Some((section_id.to_string(), len)))
        })
    }

    /// Insert a copy of `field` at `index` of the flat field order.
    ///
    /// The copy gets a new field id and new option, row and column ids, so
    /// inserting the same field twice never aliases.
    pub fn insert_field(&self, index: usize, field: &FormField) -> Mutation {
        let copy = field.fresh_copy(&self.ids);
        self.commit("insert_field", move |doc| {
            let slot = locate_flat_index(doc, index);
            place(doc, copy, slot)
        })
    }

    /// Insert a copy of `field` at `index` inside one section
    pub fn insert_field_in(&self, section_id: &str, index: usize, field: &FormField) -> Mutation {
        let copy = field.fresh_copy(&self.ids);
        self.commit("insert_field_in", move |doc| {
            if doc.section(section_id).is_none() {
                return Err(SkipReason::MissingSection(section_id.to_string()));
            }
            place(doc, copy, Some((section_id.to_string(), index)))
        })
    }

    /// Copy a field and put the copy right after the original
    pub fn duplicate_field(&self, field_id: &str) -> Mutation {
        let ids = &self.ids;
        self.commit("duplicate_field", move |doc| {
            let copy = doc
                .field(field_id)
                .ok_or_else(|| SkipReason::MissingField(field_id.to_string()))?
                .fresh_copy(ids);
            let slot = doc.section_of(field_id).and_then(|s| {
                s.position_of(field_id).map(|position| (s.id.clone(), position + 1))
            });
            place(doc, copy, slot)
        })
    }

    pub fn update_field(&self, field_id: &str, patch: FieldPatch) -> Mutation {
        self.commit("update_field", move |doc| {
            let field = field_mut(doc, field_id)?;
            if let Some(config) = &patch.config {
                config.check_options(field_id)?;
            }
            patch.apply(field);
            Ok(updated(field_id))
        })
    }

    /// Swap the config for the default of `kind`.
    ///
    /// Any stored answer is dropped along with the old config.
    pub fn change_field_type(&self, field_id: &str, kind: FieldKind) -> Mutation {
        let config = default_config_with(kind, &self.ids);
        self.commit("change_field_type", move |doc| {
            let field = field_mut(doc, field_id)?;
            field.config = config;
            field.answer = None;
            Ok(updated(field_id))
        })
    }

    /// Delete a field and strip it from every section
    pub fn remove_field(&self, field_id: &str) -> Mutation {
        self.commit("remove_field", move |doc| {
            doc.remove_field(field_id)
                .ok_or_else(|| SkipReason::MissingField(field_id.to_string()))?;
            doc.strip_field_refs(field_id);
            Ok(Applied::event(FormEvent::FieldRemoved {
                field_id: field_id.to_string(),
            }))
        })
    }

    pub fn set_answer(&self, field_id: &str, answer: FormAnswer) -> Mutation {
        self.commit("set_answer", move |doc| {
            field_mut(doc, field_id)?.answer = Some(answer);
            Ok(updated(field_id))
        })
    }

    pub fn clear_answer(&self, field_id: &str) -> Mutation {
        self.commit("clear_answer", move |doc| {
            field_mut(doc, field_id)?.answer = None;
            Ok(updated(field_id))
        })
    }
}
