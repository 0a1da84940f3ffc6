//! Field view dispatch
//!
//! A `FieldView` has one entry point per field kind. `dispatch` matches on
//! the config exhaustively, so adding a kind to `FieldConfig` breaks every
//! view until it handles the new kind. Configs with an unknown tag go to
//! `unsupported`.

use crate::text::{self, Block};
use forms_core::selectors::ordered_fields;
use forms_core::{
    ChoiceConfig, DateConfig, DropdownConfig, FieldConfig, FileUploadConfig, FormDocument,
    FormField, GridConfig, LinearScaleConfig, LongAnswerConfig, RatingConfig, ShortAnswerConfig,
    TimeConfig,
};
use serde::Serialize;

/// Per-kind renderer
pub trait FieldView {
    type Output;

    fn short_answer(&mut self, field: &FormField, config: &ShortAnswerConfig) -> Self::Output;
    fn long_answer(&mut self, field: &FormField, config: &LongAnswerConfig) -> Self::Output;
    fn multiple_choice(&mut self, field: &FormField, config: &ChoiceConfig) -> Self::Output;
    fn checkbox(&mut self, field: &FormField, config: &ChoiceConfig) -> Self::Output;
    fn dropdown(&mut self, field: &FormField, config: &DropdownConfig) -> Self::Output;
    fn linear_scale(&mut self, field: &FormField, config: &LinearScaleConfig) -> Self::Output;
    fn rating(&mut self, field: &FormField, config: &RatingConfig) -> Self::Output;
    fn multiple_choice_grid(&mut self, field: &FormField, config: &GridConfig) -> Self::Output;
    fn checkbox_grid(&mut self, field: &FormField, config: &GridConfig) -> Self::Output;
    fn date(&mut self, field: &FormField, config: &DateConfig) -> Self::Output;
    fn time(&mut self, field: &FormField, config: &TimeConfig) -> Self::Output;
    fn file_upload(&mut self, field: &FormField, config: &FileUploadConfig) -> Self::Output;

    /// Config tag this build does not know
    fn unsupported(&mut self, field: &FormField) -> Self::Output;
}

/// Route `field` to the matching method of `view`
pub fn dispatch<V: FieldView + ?Sized>(view: &mut V, field: &FormField) -> V::Output {
    match &field.config {
        FieldConfig::ShortAnswer(c) => view.short_answer(field, c),
        FieldConfig::LongAnswer(c) => view.long_answer(field, c),
        FieldConfig::MultipleChoice(c) => view.multiple_choice(field, c),
        FieldConfig::Checkbox(c) => view.checkbox(field, c),
        FieldConfig::Dropdown(c) => view.dropdown(field, c),
        FieldConfig::LinearScale(c) => view.linear_scale(field, c),
        FieldConfig::Rating(c) => view.rating(field, c),
        FieldConfig::MultipleChoiceGrid(c) => view.multiple_choice_grid(field, c),
        FieldConfig::CheckboxGrid(c) => view.checkbox_grid(field, c),
        FieldConfig::Date(c) => view.date(field, c),
        FieldConfig::Time(c) => view.time(field, c),
        FieldConfig::FileUpload(c) => view.file_upload(field, c),
        FieldConfig::Unsupported => {
            tracing::debug!(field_id = %field.id, "rendering fallback for unknown field type");
            view.unsupported(field)
        }
    }
}

// =============================================================================
// Rendered document
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedField {
    pub field_id: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub lines: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub section_id: String,
    pub title: String,
    pub fields: Vec<RenderedField>,
}

/// Whole document run through one view
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedForm {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sections: Vec<RenderedSection>,
}

impl RenderedForm {
    pub fn field(&self, field_id: &str) -> Option<&RenderedField> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.field_id == field_id)
    }

    /// Plain text, one blank line between fields
    pub fn to_text(&self) -> String {
        let mut out = Block::new();
        out.push(text::underline(&self.title, '='));
        if let Some(description) = &self.description {
            out.push(description.clone());
        }
        for section in &self.sections {
            out.blank();
            out.push(text::underline(&section.title, '-'));
            for field in &section.fields {
                out.blank();
                out.extend(field.lines.iter().cloned());
            }
        }
        out.into_string()
    }
}

/// Render every section in order. Fields no section references are left out.
pub fn render_document<V>(view: &mut V, doc: &FormDocument) -> RenderedForm
where
    V: FieldView<Output = Block> + ?Sized,
{
    let sections = doc
        .sections()
        .values()
        .map(|section| RenderedSection {
            section_id: section.id.clone(),
            title: section.title.clone(),
            fields: ordered_fields(doc, &section.id)
                .iter()
                .map(|field| RenderedField {
                    field_id: field.id.clone(),
                    type_tag: field.config.type_tag().to_string(),
                    lines: dispatch(view, field).into_lines(),
                })
                .collect(),
        })
        .collect();

    RenderedForm {
        title: doc.header().title.clone(),
        description: doc.header().description.clone(),
        sections,
    }
}
