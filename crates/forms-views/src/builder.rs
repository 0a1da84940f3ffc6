//! Builder adapter
//!
//! `FieldEditor` binds the store's edit operations to one field, the way a
//! builder card does. `BuilderView` renders each card with its settings and
//! the actions currently on offer.

use crate::adapter::{render_document, FieldView, RenderedForm};
use crate::text::{self, Block, NOT_IMPLEMENTED};
use forms_core::{
    ChoiceConfig, DateConfig, DropdownConfig, FieldConfig, FieldKind, FieldPatch,
    FileUploadConfig, FormDocument, FormField, FormStore, GridAxis, GridConfig,
    LinearScaleConfig, LongAnswerConfig, Mutation, NewOption, OptionPatch, RatingConfig,
    ShortAnswerConfig, SkipReason, TimeConfig, TimeKind,
};
use std::fmt;
use std::sync::Arc;

/// Something the builder card lets the author do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    AddOption,
    AddOther,
    AddRow,
    AddColumn,
    ChangeType,
    ToggleRequired,
    Duplicate,
    Remove,
}

impl EditAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AddOption => "Add Option",
            Self::AddOther => "Add Other Option",
            Self::AddRow => "Add Row",
            Self::AddColumn => "Add Column",
            Self::ChangeType => "Change Type",
            Self::ToggleRequired => "Required",
            Self::Duplicate => "Duplicate",
            Self::Remove => "Delete",
        }
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Actions offered for `field` in its current state.
///
/// "Add Other Option" only shows on multiple choice and checkbox fields
/// that have no write-in option yet.
pub fn available_actions(field: &FormField) -> Vec<EditAction> {
    let mut actions = Vec::new();
    if let Some(options) = field.config.options() {
        actions.push(EditAction::AddOption);
        let takes_other = !matches!(field.config, FieldConfig::Dropdown(_));
        if takes_other && !options.has_other() {
            actions.push(EditAction::AddOther);
        }
    }
    if field.config.has_table() {
        actions.push(EditAction::AddRow);
        actions.push(EditAction::AddColumn);
    }
    actions.extend([
        EditAction::ChangeType,
        EditAction::ToggleRequired,
        EditAction::Duplicate,
        EditAction::Remove,
    ]);
    actions
}

/// Edit callbacks for one field
#[derive(Debug, Clone)]
pub struct FieldEditor<'s> {
    store: &'s FormStore,
    field_id: String,
}

impl<'s> FieldEditor<'s> {
    pub fn new(store: &'s FormStore, field_id: impl Into<String>) -> Self {
        Self {
            store,
            field_id: field_id.into(),
        }
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    /// Current state of the field, `None` once it is gone
    pub fn field(&self) -> Option<Arc<FormField>> {
        self.store.get_field(&self.field_id)
    }

    pub fn actions(&self) -> Vec<EditAction> {
        self.field()
            .map(|f| available_actions(&f))
            .unwrap_or_default()
    }

    fn missing(&self) -> Mutation {
        Mutation::Skipped(SkipReason::MissingField(self.field_id.clone()))
    }

    pub fn set_title(&self, title: impl Into<String>) -> Mutation {
        self.store
            .update_field(&self.field_id, FieldPatch::new().title(title))
    }

    pub fn set_description(&self, description: impl Into<String>) -> Mutation {
        self.store
            .update_field(&self.field_id, FieldPatch::new().description(description))
    }

    pub fn set_image_url(&self, url: impl Into<String>) -> Mutation {
        self.store
            .update_field(&self.field_id, FieldPatch::new().image_url(url))
    }

    pub fn toggle_required(&self) -> Mutation {
        match self.field() {
            Some(field) => self
                .store
                .update_field(&self.field_id, FieldPatch::new().required(!field.required)),
            None => self.missing(),
        }
    }

    pub fn change_type(&self, kind: FieldKind) -> Mutation {
        self.store.change_field_type(&self.field_id, kind)
    }

    /// Edit the current config and write it back whole
    pub fn edit_config<F>(&self, edit: F) -> Mutation
    where
        F: FnOnce(&mut FieldConfig),
    {
        let Some(field) = self.field() else {
            return self.missing();
        };
        let mut config = field.config.clone();
        edit(&mut config);
        self.store
            .update_field(&self.field_id, FieldPatch::new().config(config))
    }

    pub fn duplicate(&self) -> Mutation {
        self.store.duplicate_field(&self.field_id)
    }

    pub fn remove(&self) -> Mutation {
        self.store.remove_field(&self.field_id)
    }

    /// Append "Option N", numbered after the existing options
    pub fn add_option(&self) -> Mutation {
        let next = self
            .field()
            .and_then(|f| f.config.options().map(|o| o.len()))
            .unwrap_or(0)
            + 1;
        self.store
            .add_option(&self.field_id, NewOption::labeled(format!("Option {}", next)))
    }

    pub fn add_other(&self) -> Mutation {
        self.store
            .add_option(&self.field_id, NewOption::other("Other"))
    }

    pub fn rename_option(&self, option_id: &str, label: impl Into<String>) -> Mutation {
        self.store
            .update_option(&self.field_id, option_id, OptionPatch::label(label))
    }

    pub fn remove_option(&self, option_id: &str) -> Mutation {
        self.store.remove_option(&self.field_id, option_id)
    }

    fn next_label(&self, axis: GridAxis) -> String {
        let count = self
            .field()
            .and_then(|f| f.config.table().map(|t| t.axis(axis).len()))
            .unwrap_or(0);
        match axis {
            GridAxis::Rows => format!("Row {}", count + 1),
            GridAxis::Columns => format!("Column {}", count + 1),
        }
    }

    pub fn add_row(&self) -> Mutation {
        self.store
            .add_row(&self.field_id, self.next_label(GridAxis::Rows))
    }

    pub fn add_column(&self) -> Mutation {
        self.store
            .add_column(&self.field_id, self.next_label(GridAxis::Columns))
    }

    pub fn rename_row(&self, row_id: &str, label: impl Into<String>) -> Mutation {
        self.store
            .update_row(&self.field_id, row_id, OptionPatch::label(label))
    }

    pub fn rename_column(&self, column_id: &str, label: impl Into<String>) -> Mutation {
        self.store
            .update_column(&self.field_id, column_id, OptionPatch::label(label))
    }

    pub fn remove_row(&self, row_id: &str) -> Mutation {
        self.store.remove_row(&self.field_id, row_id)
    }

    pub fn remove_column(&self, column_id: &str) -> Mutation {
        self.store.remove_column(&self.field_id, column_id)
    }
}

/// Author-facing view
#[derive(Debug, Default, Clone, Copy)]
pub struct BuilderView;

impl BuilderView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&mut self, doc: &FormDocument) -> RenderedForm {
        render_document(self, doc)
    }

    fn card(field: &FormField, body: impl FnOnce(&mut Block)) -> Block {
        let mut block = Block::new();
        let kind = field.kind().map_or("Unknown", |k| k.label());
        block.push(format!("#{} [{}]", field.id, kind));
        block.extend(text::question(field).into_lines());
        body(&mut block);
        let actions: Vec<String> = available_actions(field)
            .into_iter()
            .map(|a| match a {
                EditAction::ToggleRequired => {
                    format!("{}: {}", a, if field.required { "on" } else { "off" })
                }
                _ => a.to_string(),
            })
            .collect();
        block.item(format!("| {} |", actions.join(" | ")));
        block
    }
}

impl FieldView for BuilderView {
    type Output = Block;

    fn short_answer(&mut self, field: &FormField, config: &ShortAnswerConfig) -> Block {
        Self::card(field, |b| {
            let input = config.input_type.unwrap_or_default();
            b.item(format!("Input type: {}", input.as_str()));
            if let Some(rule) = &config.validation {
                b.item(format!("Validation: {:?} {} ({})", rule.object, rule.constraint, rule.error_text));
            }
        })
    }

    fn long_answer(&mut self, field: &FormField, config: &LongAnswerConfig) -> Block {
        Self::card(field, |b| {
            if let Some(rule) = &config.validation {
                b.item(format!("Validation: {:?} {} ({})", rule.object, rule.constraint, rule.error_text));
            }
        })
    }

    fn multiple_choice(&mut self, field: &FormField, config: &ChoiceConfig) -> Block {
        Self::card(field, |b| option_rows(b, config, "( )"))
    }

    fn checkbox(&mut self, field: &FormField, config: &ChoiceConfig) -> Block {
        Self::card(field, |b| option_rows(b, config, "[ ]"))
    }

    fn dropdown(&mut self, field: &FormField, config: &DropdownConfig) -> Block {
        Self::card(field, |b| {
            for (i, option) in config.options.iter().enumerate() {
                b.item(format!("{}. {} <{}>", i + 1, option.label, option.id));
            }
            shuffle_note(b, config.shuffle);
        })
    }

    fn linear_scale(&mut self, field: &FormField, config: &LinearScaleConfig) -> Block {
        Self::card(field, |b| {
            let values = config.values();
            b.item(format!("Scale: {} to {}", values.start, values.end.saturating_sub(1)));
            if let Some(low) = &config.low {
                b.item(format!("Low label: {}", low));
            }
            if let Some(high) = &config.high {
                b.item(format!("High label: {}", high));
            }
        })
    }

    fn rating(&mut self, field: &FormField, config: &RatingConfig) -> Block {
        Self::card(field, |b| {
            b.item(format!(
                "{} x{} (stroke {}, fill {})",
                config.icon, config.count, config.stroke, config.fill
            ));
        })
    }

    fn multiple_choice_grid(&mut self, field: &FormField, config: &GridConfig) -> Block {
        Self::card(field, |b| grid_rows(b, config))
    }

    fn checkbox_grid(&mut self, field: &FormField, config: &GridConfig) -> Block {
        Self::card(field, |b| grid_rows(b, config))
    }

    fn date(&mut self, field: &FormField, config: &DateConfig) -> Block {
        Self::card(field, |b| {
            b.item(format!("Include time: {}", yes_no(config.include_time)));
        })
    }

    fn time(&mut self, field: &FormField, config: &TimeConfig) -> Block {
        Self::card(field, |b| {
            let kind = match config.kind {
                TimeKind::Time => "time of day",
                TimeKind::Duration => "duration",
            };
            b.item(format!("Answer: {}", kind));
        })
    }

    fn file_upload(&mut self, field: &FormField, config: &FileUploadConfig) -> Block {
        Self::card(field, |b| {
            let types = if config.accepted_file_types.is_empty() {
                "any".to_string()
            } else {
                config.accepted_file_types.join(", ")
            };
            b.item(format!("Accepted types: {}", types));
            match config.max_file_size.filter(|m| *m > 0) {
                Some(max) => b.item(format!("Max size: {}", text::byte_size(max))),
                None => b.item("Max size: unlimited"),
            }
        })
    }

    fn unsupported(&mut self, field: &FormField) -> Block {
        Self::card(field, |b| b.item(NOT_IMPLEMENTED))
    }
}

fn option_rows(block: &mut Block, config: &ChoiceConfig, marker: &str) {
    for option in &config.options {
        let tag = if option.other { " (other)" } else { "" };
        block.item(format!("{} {}{} <{}>", marker, option.label, tag, option.id));
    }
    shuffle_note(block, config.shuffle);
}

fn grid_rows(block: &mut Block, config: &GridConfig) {
    for (axis, entries) in [
        (GridAxis::Rows, &config.table.rows),
        (GridAxis::Columns, &config.table.columns),
    ] {
        let names: Vec<String> = entries
            .iter()
            .map(|o| format!("{} <{}>", o.label, o.id))
            .collect();
        block.item(format!("{}: {}", axis.as_str(), names.join(", ")));
    }
    shuffle_note(block, config.shuffle);
    if config.limit_to_one_per_column {
        block.item("Limit to one response per column");
    }
}

fn shuffle_note(block: &mut Block, shuffle: bool) {
    if shuffle {
        block.item("Shuffle option order");
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forms_core::fixtures::{seed_document, SEED_SECTION_ID};
    use forms_core::StoreConfig;

    fn store() -> FormStore {
        FormStore::with_document(seed_document(), StoreConfig::default())
    }

    #[test]
    fn test_add_other_gating() {
        let store = store();
        let checkbox = FieldEditor::new(&store, "3");
        assert!(!checkbox.actions().contains(&EditAction::AddOther));

        let other_id = checkbox
            .field()
            .unwrap()
            .config
            .options()
            .unwrap()
            .to_vec()
            .into_iter()
            .find(|o| o.other)
            .unwrap()
            .id;
        checkbox.remove_option(&other_id);
        assert!(checkbox.actions().contains(&EditAction::AddOther));

        assert!(checkbox.add_other().is_applied());
        assert!(checkbox.add_other().is_skipped());

        let dropdown = FieldEditor::new(&store, "4");
        assert!(!dropdown.actions().contains(&EditAction::AddOther));
        assert!(dropdown.add_other().is_skipped());
    }

    #[test]
    fn test_numbered_labels() {
        let store = store();
        let dropdown = FieldEditor::new(&store, "4");
        let created = dropdown.add_option();
        let option = store.get_option("4", created.created_id().unwrap()).unwrap();
        assert_eq!(option.label, "Option 4");

        let grid = FieldEditor::new(&store, "7");
        let row = grid.add_row();
        assert_eq!(store.get_row("7", row.created_id().unwrap()).unwrap().label, "Row 4");
        let column = grid.add_column();
        assert_eq!(
            store.get_column("7", column.created_id().unwrap()).unwrap().label,
            "Column 4"
        );
    }

    #[test]
    fn test_card_edits() {
        let store = store();
        let editor = FieldEditor::new(&store, "1");
        editor.set_title("Tell us more");
        editor.toggle_required();
        let field = editor.field().unwrap();
        assert_eq!(field.title.as_deref(), Some("Tell us more"));
        assert!(field.required);

        editor.change_type(FieldKind::LinearScale);
        editor.edit_config(|config| {
            if let FieldConfig::LinearScale(scale) = config {
                scale.count = 10;
                scale.low = Some("Meh".into());
            }
        });
        match &editor.field().unwrap().config {
            FieldConfig::LinearScale(scale) => assert_eq!(scale.count, 10),
            other => panic!("unexpected config {:?}", other),
        }
    }

    #[test]
    fn test_edit_config_cannot_add_second_other() {
        let store = store();
        let editor = FieldEditor::new(&store, "2");
        let outcome = editor.edit_config(|config| {
            if let FieldConfig::MultipleChoice(choice) = config {
                choice
                    .options
                    .push(forms_core::UserInputOption::other("x", "Also other"));
            }
        });
        assert_eq!(outcome, Mutation::Skipped(SkipReason::DuplicateOther("2".into())));
        assert_eq!(editor.field().unwrap().config.options().unwrap().len(), 4);
    }

    #[test]
    fn test_oversized_counts_render_capped() {
        let scale = FormField::new(
            "s",
            FieldConfig::LinearScale(LinearScaleConfig {
                count: u32::MAX,
                ..LinearScaleConfig::default()
            }),
        );
        let block = crate::adapter::dispatch(&mut BuilderView::new(), &scale);
        assert!(block.lines().contains(&"  Scale: 1 to 10".to_string()));

        let preview = crate::adapter::dispatch(&mut crate::PreviewView::new(), &scale);
        let values = preview.lines().last().unwrap();
        assert_eq!(values.matches('(').count(), 10);

        let rating = FormField::new(
            "r",
            FieldConfig::Rating(RatingConfig {
                count: u32::MAX,
                ..RatingConfig::default()
            }),
        );
        let preview = crate::adapter::dispatch(&mut crate::PreviewView::new(), &rating);
        assert_eq!(preview.lines().last().unwrap().chars().filter(|c| *c == '☆').count(), 10);
    }

    #[test]
    fn test_duplicate_and_remove() {
        let store = store();
        let editor = FieldEditor::new(&store, "6");
        let copy = editor.duplicate();
        let copy_id = copy.created_id().unwrap().to_string();
        let order = store.get_section(SEED_SECTION_ID).unwrap().field_order.clone();
        assert_eq!(order[7], copy_id);

        assert!(editor.remove().is_applied());
        assert!(editor.field().is_none());
        assert!(editor.actions().is_empty());
        assert!(editor.toggle_required().is_skipped());
        assert!(editor.edit_config(|_| {}).is_skipped());
    }

    #[test]
    fn test_builder_cards() {
        let rendered = BuilderView::new().render(&seed_document());
        let choice = &rendered.field("2").unwrap().lines;
        assert_eq!(choice[0], "#2 [Multiple Choice]");
        assert!(choice.contains(&"  ( ) Other (other) <3>".to_string()));
        assert_eq!(
            choice.last().unwrap(),
            "  | Add Option | Change Type | Required: on | Duplicate | Delete |"
        );

        let grid = &rendered.field("8").unwrap().lines;
        assert!(grid.contains(&"  Limit to one response per column".to_string()));
        assert!(grid.last().unwrap().contains("Add Row | Add Column"));

        let long = &rendered.field("1").unwrap().lines;
        assert!(long.last().unwrap().contains("Required: off"));
    }
}
