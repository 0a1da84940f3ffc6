//! Option, row and column operations
//!
//! Option operations apply to multiple choice, checkbox and dropdown fields;
//! row and column operations to the grid kinds. Anything else is skipped.

use super::{Applied, FormStore};
use crate::domain::{
    ChoiceOption, FormDocument, FormEvent, FormField, GridAxis, Mutation, NewOption, OptionPatch,
    SkipReason, UserInputOption,
};

fn field_mut<'a>(doc: &'a mut FormDocument, field_id: &str) -> Result<&'a mut FormField, SkipReason> {
    doc.field_mut(field_id)
        .ok_or_else(|| SkipReason::MissingField(field_id.to_string()))
}

fn options_changed(field_id: &str) -> FormEvent {
    FormEvent::OptionsChanged {
        field_id: field_id.to_string(),
    }
}

fn table_changed(field_id: &str, axis: GridAxis) -> FormEvent {
    FormEvent::TableChanged {
        field_id: field_id.to_string(),
        axis,
    }
}

impl FormStore {
    // =========================================================================
    // Options
    // =========================================================================

    /// Append an option with a generated id
    pub fn add_option(&self, field_id: &str, option: NewOption) -> Mutation {
        let option_id = self.ids.generate();
        self.commit("add_option", move |doc| {
            let created = option.with_id(option_id.clone());
            field_mut(doc, field_id)?
                .config
                .edit_options(field_id, |options| {
                    options.push(created);
                    Ok(())
                })?;
            Ok(Applied::created(options_changed(field_id), option_id))
        })
    }

    pub fn update_option(&self, field_id: &str, option_id: &str, patch: OptionPatch) -> Mutation {
        self.commit("update_option", move |doc| {
            field_mut(doc, field_id)?
                .config
                .edit_options(field_id, |options| {
                    let option = options
                        .iter_mut()
                        .find(|o| o.id == option_id)
                        .ok_or_else(|| SkipReason::MissingOption(option_id.to_string()))?;
                    patch.apply(option);
                    Ok(())
                })?;
            Ok(Applied::event(options_changed(field_id)))
        })
    }

    pub fn remove_option(&self, field_id: &str, option_id: &str) -> Mutation {
        self.commit("remove_option", move |doc| {
            field_mut(doc, field_id)?
                .config
                .edit_options(field_id, |options| {
                    let before = options.len();
                    options.retain(|o| o.id != option_id);
                    if options.len() == before {
                        return Err(SkipReason::MissingOption(option_id.to_string()));
                    }
                    Ok(())
                })?;
            Ok(Applied::event(options_changed(field_id)))
        })
    }

    /// Replace the whole option list
    pub fn set_options(&self, field_id: &str, options: Vec<UserInputOption>) -> Mutation {
        self.commit("set_options", move |doc| {
            field_mut(doc, field_id)?
                .config
                .edit_options(field_id, |current| {
                    *current = options;
                    Ok(())
                })?;
            Ok(Applied::event(options_changed(field_id)))
        })
    }

    // =========================================================================
    // Grid rows and columns
    // =========================================================================

    pub fn add_row(&self, field_id: &str, label: impl Into<String>) -> Mutation {
        self.add_axis_entry("add_row", field_id, GridAxis::Rows, label.into())
    }

    pub fn add_column(&self, field_id: &str, label: impl Into<String>) -> Mutation {
        self.add_axis_entry("add_column", field_id, GridAxis::Columns, label.into())
    }

    pub fn update_row(&self, field_id: &str, row_id: &str, patch: OptionPatch) -> Mutation {
        self.update_axis_entry("update_row", field_id, GridAxis::Rows, row_id, patch)
    }

    pub fn update_column(&self, field_id: &str, column_id: &str, patch: OptionPatch) -> Mutation {
        self.update_axis_entry("update_column", field_id, GridAxis::Columns, column_id, patch)
    }

    pub fn remove_row(&self, field_id: &str, row_id: &str) -> Mutation {
        self.remove_axis_entry("remove_row", field_id, GridAxis::Rows, row_id)
    }

    pub fn remove_column(&self, field_id: &str, column_id: &str) -> Mutation {
        self.remove_axis_entry("remove_column", field_id, GridAxis::Columns, column_id)
    }

    fn add_axis_entry(&self, op: &'static str, field_id: &str, axis: GridAxis, label: String) -> Mutation {
        let entry_id = self.ids.generate();
        self.commit(op, move |doc| {
            let entry = ChoiceOption::new(entry_id.clone(), label);
            field_mut(doc, field_id)?
                .config
                .edit_axis(field_id, axis, |entries| {
                    entries.push(entry);
                    Ok(())
                })?;
            Ok(Applied::created(table_changed(field_id, axis), entry_id))
        })
    }

    fn update_axis_entry(
        &self,
        op: &'static str,
        field_id: &str,
        axis: GridAxis,
        entry_id: &str,
        patch: OptionPatch,
    ) -> Mutation {
        self.commit(op, move |doc| {
            field_mut(doc, field_id)?
                .config
                .edit_axis(field_id, axis, |entries| {
                    let entry = entries
                        .iter_mut()
                        .find(|o| o.id == entry_id)
                        .ok_or_else(|| SkipReason::MissingOption(entry_id.to_string()))?;
                    patch.apply_plain(entry);
                    Ok(())
                })?;
            Ok(Applied::event(table_changed(field_id, axis)))
        })
    }

    fn remove_axis_entry(&self, op: &'static str, field_id: &str, axis: GridAxis, entry_id: &str) -> Mutation {
        self.commit(op, move |doc| {
            field_mut(doc, field_id)?
                .config
                .edit_axis(field_id, axis, |entries| {
                    let before = entries.len();
                    entries.retain(|o| o.id != entry_id);
                    if entries.len() == before {
                        return Err(SkipReason::MissingOption(entry_id.to_string()));
                    }
                    Ok(())
                })?;
            Ok(Applied::event(table_changed(field_id, axis)))
        })
    }
}
