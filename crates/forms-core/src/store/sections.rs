//! Section operations

use super::{Applied, FormStore};
use crate::domain::{FormDocument, FormEvent, Mutation, Section, SectionPatch, SkipReason};
use crate::integrity::check_permutation;
use forms_common::{FormsError, FormsResult};

impl FormStore {
    /// Insert `section` under its id, replacing any section with that id
    pub fn add_section(&self, section: Section) -> Mutation {
        self.commit("add_section", move |doc| {
            let section_id = section.id.clone();
            doc.insert_section(section);
            Ok(Applied::event(FormEvent::SectionAdded { section_id }))
        })
    }

    /// Merge `patch` into a section.
    ///
    /// A new field order goes through the same check as `reorder_fields`.
    pub fn update_section(&self, section_id: &str, patch: SectionPatch) -> Mutation {
        let strict = self.config.strict_ordering;
        self.commit("update_section", move |doc| {
            let SectionPatch { title, field_order } = patch;
            if let Some(order) = field_order {
                replace_order(doc, section_id, order, strict)?;
            }
            let section = doc
                .section_mut(section_id)
                .ok_or_else(|| SkipReason::MissingSection(section_id.to_string()))?;
            SectionPatch {
                title,
                field_order: None,
            }
            .apply(section);
            Ok(Applied::event(FormEvent::SectionUpdated {
                section_id: section_id.to_string(),
            }))
        })
    }

    /// Drop a section. Its fields stay in the document, unreferenced.
    pub fn remove_section(&self, section_id: &str) -> Mutation {
        self.commit("remove_section", move |doc| {
            doc.remove_section(section_id)
                .ok_or_else(|| SkipReason::MissingSection(section_id.to_string()))?;
            Ok(Applied::event(FormEvent::SectionRemoved {
                section_id: section_id.to_string(),
            }))
        })
    }

    /// Replace the field order of a section.
    ///
    /// The new order is taken as given unless `strict_ordering` is set, in
    /// which case it must be a permutation of the current one.
    pub fn reorder_fields(&self, section_id: &str, order: Vec<String>) -> Mutation {
        let strict = self.config.strict_ordering;
        self.commit("reorder_fields", move |doc| {
            replace_order(doc, section_id, order, strict)
        })
    }

    /// Like `reorder_fields` with the permutation check always on
    pub fn reorder_fields_strict(&self, section_id: &str, order: Vec<String>) -> FormsResult<()> {
        match self.commit("reorder_fields_strict", move |doc| {
            replace_order(doc, section_id, order, true)
        }) {
            Mutation::Skipped(SkipReason::MissingSection(id)) => Err(FormsError::SectionNotFound(id)),
            Mutation::Skipped(SkipReason::InvalidOrder(reason)) => Err(FormsError::InvalidOrder {
                section_id: section_id.to_string(),
                reason,
            }),
            _ => Ok(()),
        }
    }

    /// Move the field at `from` to `to` inside one section
    pub fn move_field(&self, section_id: &str, from: usize, to: usize) -> Mutation {
        self.commit("move_field", move |doc| {
            let section = doc
                .section(section_id)
                .ok_or_else(|| SkipReason::MissingSection(section_id.to_string()))?;
            let len = section.field_order.len();
            for index in [from, to] {
                if index >= len {
                    return Err(SkipReason::OutOfRange {
                        section_id: section_id.to_string(),
                        index,
                    });
                }
            }
            let mut order = section.field_order.clone();
            let id = order.remove(from);
            order.insert(to, id);
            replace_order(doc, section_id, order, false)
        })
    }
}

fn replace_order(
    doc: &mut FormDocument,
    section_id: &str,
    order: Vec<String>,
    strict: bool,
) -> Result<Applied, SkipReason> {
    let section = doc
        .section_mut(section_id)
        .ok_or_else(|| SkipReason::MissingSection(section_id.to_string()))?;
    if strict {
        if let Err(reason) = check_permutation(&section.field_order, &order) {
            tracing::warn!(section_id, %reason, "rejected field order");
            return Err(SkipReason::InvalidOrder(reason));
        }
    }
    section.field_order = order;
    Ok(Applied::event(FormEvent::FieldsReordered {
        section_id: section_id.to_string(),
    }))
}
