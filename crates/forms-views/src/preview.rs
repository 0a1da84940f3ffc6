//! Preview adapter
//!
//! Shows the form the way a respondent would see it, without any answers.

use crate::adapter::{render_document, FieldView, RenderedForm};
use crate::text::{self, Block, NOT_IMPLEMENTED};
use forms_core::{
    ChoiceConfig, DateConfig, DropdownConfig, FileUploadConfig, FormDocument, FormField,
    GridConfig, InputType, LinearScaleConfig, LongAnswerConfig, RatingConfig, ShortAnswerConfig,
    TimeConfig, TimeKind,
};

const GRID_CELL: usize = 10;

/// Read-only respondent view
#[derive(Debug, Default, Clone, Copy)]
pub struct PreviewView;

impl PreviewView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&mut self, doc: &FormDocument) -> RenderedForm {
        render_document(self, doc)
    }
}

/// Choice list with radio or checkbox markers
pub(crate) fn choice_lines(block: &mut Block, config: &ChoiceConfig, marker: &str) {
    for option in &config.options {
        if option.other {
            block.item(format!("{} {}: ________", marker, option.label));
        } else {
            block.item(format!("{} {}", marker, option.label));
        }
    }
}

pub(crate) fn grid_lines<F>(block: &mut Block, config: &GridConfig, mut cell: F)
where
    F: FnMut(&str, &str) -> String,
{
    let columns = &config.table.columns;
    block.item(text::grid_row(
        "",
        columns.iter().map(|c| c.label.as_str()),
        GRID_CELL,
    ));
    for row in &config.table.rows {
        let cells: Vec<String> = columns.iter().map(|c| cell(&row.id, &c.id)).collect();
        block.item(text::grid_row(
            &row.label,
            cells.iter().map(String::as_str),
            GRID_CELL,
        ));
    }
}

pub(crate) fn scale_line(config: &LinearScaleConfig, mut mark: impl FnMut(u32) -> String) -> String {
    let values: Vec<String> = config.values().map(|v| mark(v)).collect();
    let mut line = String::new();
    if let Some(low) = config.low.as_deref() {
        line.push_str(low);
        line.push(' ');
    }
    line.push_str(&values.join(" "));
    if let Some(high) = config.high.as_deref() {
        line.push(' ');
        line.push_str(high);
    }
    line
}

pub(crate) fn rating_line(config: &RatingConfig, filled: u32) -> String {
    let (on, off) = text::rating_glyphs(config.icon);
    (1..=config.levels())
        .map(|i| if i <= filled { on } else { off })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn date_placeholder(config: &DateConfig) -> &'static str {
    if config.include_time {
        "YYYY-MM-DD HH:mm"
    } else {
        "YYYY-MM-DD"
    }
}

pub(crate) fn time_placeholder(config: &TimeConfig) -> &'static str {
    match config.kind {
        TimeKind::Time => "Time",
        TimeKind::Duration => "Duration",
    }
}

pub(crate) fn upload_notes(block: &mut Block, config: &FileUploadConfig) {
    if !config.accepted_file_types.is_empty() {
        block.item(format!("Accepts: {}", config.accepted_file_types.join(", ")));
    }
    if let Some(max) = config.max_file_size.filter(|m| *m > 0) {
        block.item(format!("Max size: {}", text::byte_size(max)));
    }
}

impl FieldView for PreviewView {
    type Output = Block;

    fn short_answer(&mut self, field: &FormField, config: &ShortAnswerConfig) -> Block {
        let mut block = text::question(field);
        let input = config.input_type.unwrap_or(InputType::Text);
        block.item(format!("[____________] ({})", input.as_str()));
        block
    }

    fn long_answer(&mut self, field: &FormField, _config: &LongAnswerConfig) -> Block {
        let mut block = text::question(field);
        block.item("[________________________________]");
        block
    }

    fn multiple_choice(&mut self, field: &FormField, config: &ChoiceConfig) -> Block {
        let mut block = text::question(field);
        choice_lines(&mut block, config, "( )");
        block
    }

    fn checkbox(&mut self, field: &FormField, config: &ChoiceConfig) -> Block {
        let mut block = text::question(field);
        choice_lines(&mut block, config, "[ ]");
        block
    }

    fn dropdown(&mut self, field: &FormField, config: &DropdownConfig) -> Block {
        let mut block = text::question(field);
        for (i, option) in config.options.iter().enumerate() {
            block.item(format!("{}. {}", i + 1, option.label));
        }
        block
    }

    fn linear_scale(&mut self, field: &FormField, config: &LinearScaleConfig) -> Block {
        let mut block = text::question(field);
        block.item(scale_line(config, |v| format!("({})", v)));
        block
    }

    fn rating(&mut self, field: &FormField, config: &RatingConfig) -> Block {
        let mut block = text::question(field);
        block.item(rating_line(config, 0));
        block
    }

    fn multiple_choice_grid(&mut self, field: &FormField, config: &GridConfig) -> Block {
        let mut block = text::question(field);
        grid_lines(&mut block, config, |_, _| "( )".to_string());
        block
    }

    fn checkbox_grid(&mut self, field: &FormField, config: &GridConfig) -> Block {
        let mut block = text::question(field);
        grid_lines(&mut block, config, |_, _| "[ ]".to_string());
        if config.limit_to_one_per_column {
            block.item("One response per column");
        }
        block
    }

    fn date(&mut self, field: &FormField, config: &DateConfig) -> Block {
        let mut block = text::question(field);
        block.item(format!("[{}]", date_placeholder(config)));
        block
    }

    fn time(&mut self, field: &FormField, config: &TimeConfig) -> Block {
        let mut block = text::question(field);
        block.item(format!("[{}]", time_placeholder(config)));
        block
    }

    fn file_upload(&mut self, field: &FormField, config: &FileUploadConfig) -> Block {
        let mut block = text::question(field);
        block.item("[Add Files]");
        upload_notes(&mut block, config);
        block
    }

    fn unsupported(&mut self, field: &FormField) -> Block {
        let mut block = text::question(field);
        block.item(NOT_IMPLEMENTED);
        block
    }
}
