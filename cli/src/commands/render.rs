//! Render command

use crate::config::Config;
use crate::output::OutputFormat;
use crate::ViewKind;
use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use forms_core::{FieldConfig, FormStore};
use forms_views::{BuilderView, FillSession, PreviewView, RenderedForm};
use std::path::Path;

pub fn handle(
    view: ViewKind,
    file: Option<&Path>,
    answers: &[String],
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let document = super::load_document(file)?;
    if !answers.is_empty() && !matches!(view, ViewKind::Fill) {
        bail!("--answer only applies to the fill view");
    }

    let rendered = match view {
        ViewKind::Builder => BuilderView::new().render(&document),
        ViewKind::Preview => PreviewView::new().render(&document),
        ViewKind::Fill => {
            let store = FormStore::with_document(document, config.store.clone());
            fill(&store, answers)?
        }
    };
    format.print_text(&rendered, &rendered.to_text())
}

fn fill(store: &FormStore, answers: &[String]) -> Result<RenderedForm> {
    let mut session = FillSession::from_store(store);
    for entry in answers {
        let (field_id, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("expected FIELD=VALUE, got {}", entry))?;
        apply_answer(&mut session, field_id, value)
            .with_context(|| format!("answering field {}", field_id))?;
    }
    session.commit_to(store);

    for field_id in session.missing_required() {
        eprintln!("{} required field {} has no answer", "warning:".yellow().bold(), field_id);
    }
    Ok(session.render())
}

/// Route a raw value to the session call the field's kind takes.
///
/// Checkboxes take comma separated option ids and grids take `ROW:COLUMN`
/// cells, also comma separated.
pub fn apply_answer(session: &mut FillSession, field_id: &str, value: &str) -> Result<()> {
    let config = session
        .document()
        .field(field_id)
        .map(|f| f.config.clone())
        .ok_or_else(|| anyhow!("no field {}", field_id))?;

    match config {
        FieldConfig::MultipleChoice(_) | FieldConfig::Dropdown(_) => {
            session.choose(field_id, value)?;
        }
        FieldConfig::Checkbox(_) => {
            for option_id in value.split(',') {
                session.toggle(field_id, option_id.trim())?;
            }
        }
        FieldConfig::MultipleChoiceGrid(_) | FieldConfig::CheckboxGrid(_) => {
            for cell in value.split(',') {
                let (row, column) = cell
                    .split_once(':')
                    .ok_or_else(|| anyhow!("expected ROW:COLUMN, got {}", cell))?;
                session.choose_cell(field_id, row.trim(), column.trim())?;
            }
        }
        FieldConfig::LinearScale(_) | FieldConfig::Rating(_) => {
            let picked: u32 = value
                .parse()
                .with_context(|| format!("{} is not a number", value))?;
            session.pick_value(field_id, picked)?;
        }
        FieldConfig::ShortAnswer(_)
        | FieldConfig::LongAnswer(_)
        | FieldConfig::Date(_)
        | FieldConfig::Time(_)
        | FieldConfig::FileUpload(_) => {
            session.write_text(field_id, value)?;
        }
        FieldConfig::Unsupported => bail!("field {} has an unknown type", field_id),
    }
    Ok(())
}
