//! Default config command

use crate::output::OutputFormat;
use anyhow::Result;
use forms_core::{default_config, FieldKind};

pub fn handle(kind: &str, format: OutputFormat) -> Result<()> {
    let kind: FieldKind = kind.parse()?;
    format.print(&default_config(kind))
}
