//! Fill adapter
//!
//! `FillSession` captures a respondent's answers locally against one
//! document snapshot. Nothing reaches the store until `commit_to`.

use crate::adapter::{render_document, FieldView, RenderedForm};
use crate::error::{ViewError, ViewResult};
use crate::preview::{
    choice_lines, date_placeholder, grid_lines, rating_line, scale_line, time_placeholder,
    upload_notes,
};
use crate::text::{self, Block, NOT_IMPLEMENTED};
use forms_core::selectors::flat_field_order;
use forms_core::{
    grid_key, ChoiceConfig, DateConfig, DropdownConfig, FieldConfig, FileUploadConfig,
    FormAnswer, FormDocument, FormField, FormStore, GridConfig, LinearScaleConfig,
    LongAnswerConfig, RatingConfig, ShortAnswerConfig, TimeConfig,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Local answer capture for one respondent
#[derive(Debug, Clone)]
pub struct FillSession {
    document: Arc<FormDocument>,
    answers: BTreeMap<String, FormAnswer>,
}

impl FillSession {
    /// Start from `document`, picking up any answers already stored on it
    pub fn new(document: Arc<FormDocument>) -> Self {
        let answers = document
            .fields()
            .values()
            .filter_map(|f| f.answer.clone().map(|a| (f.id.clone(), a)))
            .collect();
        Self { document, answers }
    }

    pub fn from_store(store: &FormStore) -> Self {
        Self::new(store.snapshot())
    }

    pub fn document(&self) -> &Arc<FormDocument> {
        &self.document
    }

    pub fn answer(&self, field_id: &str) -> Option<&FormAnswer> {
        self.answers.get(field_id)
    }

    pub fn answers(&self) -> &BTreeMap<String, FormAnswer> {
        &self.answers
    }

    /// Drop the answer for `field_id`, `true` if there was one
    pub fn clear(&mut self, field_id: &str) -> bool {
        self.answers.remove(field_id).is_some()
    }

    fn field(&self, field_id: &str) -> ViewResult<Arc<FormField>> {
        self.document
            .field(field_id)
            .cloned()
            .ok_or_else(|| ViewError::FieldNotFound(field_id.to_string()))
    }

    /// Edit the choice map of `field_id`, replacing a text answer if present
    fn edit_choices<R, F>(&mut self, field_id: &str, edit: F) -> R
    where
        F: FnOnce(&mut BTreeMap<String, bool>) -> R,
    {
        let mut choices = match self.answers.remove(field_id) {
            Some(FormAnswer::Choices(map)) => map,
            _ => BTreeMap::new(),
        };
        let result = edit(&mut choices);
        self.answers
            .insert(field_id.to_string(), FormAnswer::Choices(choices));
        result
    }

    /// Single selection for multiple choice and dropdown fields
    pub fn choose(&mut self, field_id: &str, option_id: &str) -> ViewResult<()> {
        let field = self.field(field_id)?;
        match &field.config {
            FieldConfig::MultipleChoice(_) | FieldConfig::Dropdown(_) => {}
            config => return Err(wrong_input(field_id, config, "a single choice")),
        }
        ensure_option(&field, option_id)?;
        self.answers
            .insert(field_id.to_string(), FormAnswer::choice(option_id));
        Ok(())
    }

    /// Flip one checkbox, returning its new state
    pub fn toggle(&mut self, field_id: &str, option_id: &str) -> ViewResult<bool> {
        let field = self.field(field_id)?;
        if !matches!(field.config, FieldConfig::Checkbox(_)) {
            return Err(wrong_input(field_id, &field.config, "a checkbox toggle"));
        }
        ensure_option(&field, option_id)?;
        Ok(self.edit_choices(field_id, |choices| {
            let state = !choices.get(option_id).copied().unwrap_or(false);
            choices.insert(option_id.to_string(), state);
            state
        }))
    }

    /// Select a grid cell, returning its new state.
    ///
    /// A multiple choice grid keeps one cell per row. A checkbox grid toggles
    /// the cell. Either kind keeps one cell per column when
    /// `limit_to_one_per_column` is set.
    pub fn choose_cell(
        &mut self,
        field_id: &str,
        row_id: &str,
        column_id: &str,
    ) -> ViewResult<bool> {
        let field = self.field(field_id)?;
        let (grid, single_per_row) = match &field.config {
            FieldConfig::MultipleChoiceGrid(grid) => (grid, true),
            FieldConfig::CheckboxGrid(grid) => (grid, false),
            config => return Err(wrong_input(field_id, config, "a grid cell")),
        };
        for (id, entries) in [(row_id, &grid.table.rows), (column_id, &grid.table.columns)] {
            if !entries.iter().any(|o| o.id == id) {
                return Err(ViewError::ChoiceNotFound {
                    field_id: field_id.to_string(),
                    choice_id: id.to_string(),
                });
            }
        }

        let key = grid_key(row_id, column_id);
        Ok(self.edit_choices(field_id, |choices| {
            let state = single_per_row || !choices.get(&key).copied().unwrap_or(false);
            if state {
                if single_per_row {
                    for column in &grid.table.columns {
                        choices.remove(&grid_key(row_id, &column.id));
                    }
                }
                if grid.limit_to_one_per_column {
                    for row in &grid.table.rows {
                        choices.remove(&grid_key(&row.id, column_id));
                    }
                }
            }
            choices.insert(key, state);
            state
        }))
    }

    /// Free text for short/long answers, dates, times and file names
    pub fn write_text(&mut self, field_id: &str, value: impl Into<String>) -> ViewResult<()> {
        let field = self.field(field_id)?;
        match &field.config {
            FieldConfig::ShortAnswer(_)
            | FieldConfig::LongAnswer(_)
            | FieldConfig::Date(_)
            | FieldConfig::Time(_)
            | FieldConfig::FileUpload(_) => {}
            config => return Err(wrong_input(field_id, config, "text")),
        }
        self.answers
            .insert(field_id.to_string(), FormAnswer::text(value));
        Ok(())
    }

    /// Point on a linear scale or rating
    pub fn pick_value(&mut self, field_id: &str, value: u32) -> ViewResult<()> {
        let field = self.field(field_id)?;
        let (min, max) = match &field.config {
            FieldConfig::LinearScale(scale) => {
                let values = scale.values();
                (values.start, values.end.saturating_sub(1))
            }
            FieldConfig::Rating(rating) => (1, rating.levels()),
            config => return Err(wrong_input(field_id, config, "a number")),
        };
        if !(min..=max).contains(&value) {
            return Err(ViewError::OutOfRange {
                field_id: field_id.to_string(),
                value,
                min,
                max,
            });
        }
        self.answers
            .insert(field_id.to_string(), FormAnswer::text(value.to_string()));
        Ok(())
    }

    /// Required fields without an answer, in display order
    pub fn missing_required(&self) -> Vec<String> {
        flat_field_order(&self.document)
            .into_iter()
            .filter(|id| {
                self.document.field(id).map_or(false, |f| f.required)
                    && self.answers.get(*id).map_or(true, is_blank)
            })
            .map(String::from)
            .collect()
    }

    /// Write every captured answer to `store`, returning how many landed
    pub fn commit_to(&self, store: &FormStore) -> usize {
        let applied = self
            .answers
            .iter()
            .filter(|(field_id, answer)| store.set_answer(field_id, (*answer).clone()).is_applied())
            .count();
        tracing::debug!(
            document_id = self.document.id(),
            applied,
            captured = self.answers.len(),
            "answers committed"
        );
        applied
    }

    pub fn render(&self) -> RenderedForm {
        render_document(&mut FillView::new(self), &self.document)
    }
}

fn wrong_input(field_id: &str, config: &FieldConfig, input: &'static str) -> ViewError {
    ViewError::WrongInput {
        field_id: field_id.to_string(),
        type_tag: config.type_tag(),
        input,
    }
}

fn ensure_option(field: &FormField, option_id: &str) -> ViewResult<()> {
    let found = field
        .config
        .options()
        .and_then(|options| options.find(option_id))
        .is_some();
    if found {
        Ok(())
    } else {
        Err(ViewError::ChoiceNotFound {
            field_id: field.id.clone(),
            choice_id: option_id.to_string(),
        })
    }
}

fn is_blank(answer: &FormAnswer) -> bool {
    match answer {
        FormAnswer::Text(value) => value.trim().is_empty(),
        FormAnswer::Choices(_) => answer.selected().is_empty(),
    }
}

/// Respondent view with the session's answers filled in
pub struct FillView<'a> {
    session: &'a FillSession,
}

impl<'a> FillView<'a> {
    pub fn new(session: &'a FillSession) -> Self {
        Self { session }
    }

    fn text(&self, field: &FormField) -> Option<&'a str> {
        self.session.answer(&field.id).and_then(FormAnswer::as_text)
    }

    fn selected(&self, field: &FormField, key: &str) -> bool {
        self.session
            .answer(&field.id)
            .map_or(false, |a| a.is_selected(key))
    }

    fn number(&self, field: &FormField) -> Option<u32> {
        self.text(field).and_then(|v| v.parse().ok())
    }

    fn choices(&self, field: &FormField, config: &ChoiceConfig, on: &str, off: &str) -> Block {
        let mut block = text::question(field);
        let mut marked = Block::new();
        choice_lines(&mut marked, config, "");
        for (option, line) in config.options.iter().zip(marked.into_lines()) {
            let marker = if self.selected(field, &option.id) { on } else { off };
            block.item(format!("{}{}", marker, line.trim_start()));
        }
        block
    }

    fn grid(&self, field: &FormField, config: &GridConfig, on: &str, off: &str) -> Block {
        let mut block = text::question(field);
        grid_lines(&mut block, config, |row, column| {
            let marker = if self.selected(field, &grid_key(row, column)) { on } else { off };
            marker.to_string()
        });
        block
    }

    fn text_input(&self, field: &FormField, placeholder: &str) -> Block {
        let mut block = text::question(field);
        match self.text(field) {
            Some(value) => block.item(format!("[{}]", value)),
            None => block.item(format!("[{}]", placeholder)),
        }
        block
    }
}

impl FieldView for FillView<'_> {
    type Output = Block;

    fn short_answer(&mut self, field: &FormField, _config: &ShortAnswerConfig) -> Block {
        self.text_input(field, "____________")
    }

    fn long_answer(&mut self, field: &FormField, _config: &LongAnswerConfig) -> Block {
        self.text_input(field, "________________________________")
    }

    fn multiple_choice(&mut self, field: &FormField, config: &ChoiceConfig) -> Block {
        self.choices(field, config, "(•) ", "( ) ")
    }

    fn checkbox(&mut self, field: &FormField, config: &ChoiceConfig) -> Block {
        self.choices(field, config, "[x] ", "[ ] ")
    }

    fn dropdown(&mut self, field: &FormField, config: &DropdownConfig) -> Block {
        let mut block = text::question(field);
        let chosen = config
            .options
            .iter()
            .find(|o| self.selected(field, &o.id))
            .map(|o| o.label.as_str())
            .unwrap_or("Choose");
        block.item(format!("[{} v]", chosen));
        block
    }

    fn linear_scale(&mut self, field: &FormField, config: &LinearScaleConfig) -> Block {
        let mut block = text::question(field);
        let picked = self.number(field);
        block.item(scale_line(config, |v| {
            if Some(v) == picked {
                format!("[{}]", v)
            } else {
                format!("({})", v)
            }
        }));
        block
    }

    fn rating(&mut self, field: &FormField, config: &RatingConfig) -> Block {
        let mut block = text::question(field);
        block.item(rating_line(config, self.number(field).unwrap_or(0)));
        block
    }

    fn multiple_choice_grid(&mut self, field: &FormField, config: &GridConfig) -> Block {
        self.grid(field, config, "(•)", "( )")
    }

    fn checkbox_grid(&mut self, field: &FormField, config: &GridConfig) -> Block {
        self.grid(field, config, "[x]", "[ ]")
    }

    fn date(&mut self, field: &FormField, config: &DateConfig) -> Block {
        self.text_input(field, date_placeholder(config))
    }

    fn time(&mut self, field: &FormField, config: &TimeConfig) -> Block {
        self.text_input(field, time_placeholder(config))
    }

    fn file_upload(&mut self, field: &FormField, config: &FileUploadConfig) -> Block {
        let mut block = self.text_input(field, "Add Files");
        upload_notes(&mut block, config);
        block
    }

    fn unsupported(&mut self, field: &FormField) -> Block {
        let mut block = text::question(field);
        block.item(NOT_IMPLEMENTED);
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forms_core::fixtures::seed_document;
    use forms_core::StoreConfig;

    fn session() -> FillSession {
        FillSession::new(Arc::new(seed_document()))
    }

    #[test]
    fn test_choose_replaces_previous() {
        let mut session = session();
        session.choose("2", "0").unwrap();
        session.choose("2", "1").unwrap();
        assert_eq!(session.answer("2").unwrap().selected(), vec!["1"]);

        assert_eq!(
            session.choose("2", "9"),
            Err(ViewError::ChoiceNotFound {
                field_id: "2".into(),
                choice_id: "9".into(),
            })
        );
    }

    #[test]
    fn test_toggle_checkbox() {
        let mut session = session();
        assert!(session.toggle("3", "0").unwrap());
        assert!(session.toggle("3", "2").unwrap());
        assert!(!session.toggle("3", "0").unwrap());
        assert_eq!(session.answer("3").unwrap().selected(), vec!["2"]);

        assert!(matches!(
            session.toggle("2", "0"),
            Err(ViewError::WrongInput { type_tag: "multiple_choice", .. })
        ));
    }

    #[test]
    fn test_grid_rules() {
        let mut session = session();
        // one per row
        session.choose_cell("7", "0", "0").unwrap();
        session.choose_cell("7", "0", "2").unwrap();
        assert_eq!(session.answer("7").unwrap().selected(), vec!["0:2"]);

        // checkbox grid limited to one per column
        session.choose_cell("8", "0", "1").unwrap();
        session.choose_cell("8", "0", "2").unwrap();
        session.choose_cell("8", "2", "1").unwrap();
        assert_eq!(session.answer("8").unwrap().selected(), vec!["0:2", "2:1"]);

        assert!(!session.choose_cell("8", "0", "2").unwrap());
        assert!(session.choose_cell("8", "5", "0").is_err());
    }

    #[test]
    fn test_pick_value_bounds() {
        let mut session = session();
        session.pick_value("5", 5).unwrap();
        assert_eq!(session.answer("5").unwrap().as_text(), Some("5"));
        assert_eq!(
            session.pick_value("5", 6),
            Err(ViewError::OutOfRange {
                field_id: "5".into(),
                value: 6,
                min: 1,
                max: 5,
            })
        );
        assert!(session.pick_value("6", 0).is_err());
        assert!(session.pick_value("0", 1).is_err());
    }

    #[test]
    fn test_missing_required() {
        let mut session = session();
        let missing = session.missing_required();
        assert!(missing.contains(&"0".to_string()));
        assert!(!missing.contains(&"1".to_string()));

        session.write_text("0", "Ada").unwrap();
        session.write_text("9", "   ").unwrap();
        let missing = session.missing_required();
        assert!(!missing.contains(&"0".to_string()));
        assert!(missing.contains(&"9".to_string()));
    }

    #[test]
    fn test_commit_to_store() {
        let store = FormStore::with_document(seed_document(), StoreConfig::default());
        let mut session = FillSession::from_store(&store);
        session.write_text("0", "Ada").unwrap();
        session.toggle("3", "1").unwrap();

        assert_eq!(session.commit_to(&store), 2);
        let stored = store.get_field("3").unwrap();
        assert!(stored.answer.as_ref().unwrap().is_selected("1"));

        store.remove_field("0");
        assert_eq!(session.commit_to(&store), 1);

        let resumed = FillSession::from_store(&store);
        assert!(resumed.answer("3").is_some());
    }

    #[test]
    fn test_fill_rendering_marks_answers() {
        let mut session = session();
        session.choose("2", "1").unwrap();
        session.pick_value("6", 2).unwrap();
        session.choose("4", "2").unwrap();
        session.write_text("10", "01:30").unwrap();

        let rendered = session.render();
        let choice = &rendered.field("2").unwrap().lines;
        assert!(choice.contains(&"  (•) Option 2".to_string()));
        assert!(choice.contains(&"  ( ) Option 1".to_string()));
        assert!(choice.contains(&"  ( ) Other: ________".to_string()));

        assert_eq!(rendered.field("6").unwrap().lines.last().unwrap(), "  ★ ★ ☆ ☆ ☆");
        assert_eq!(rendered.field("4").unwrap().lines.last().unwrap(), "  [Option 3 v]");
        assert_eq!(rendered.field("10").unwrap().lines.last().unwrap(), "  [01:30]");
    }
}
