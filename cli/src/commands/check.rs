//! Check command

use crate::output::OutputFormat;
use anyhow::{bail, Result};
use colored::Colorize;
use forms_core::check_integrity;
use std::path::Path;

pub fn handle(file: &Path, format: OutputFormat) -> Result<()> {
    let document = super::read_document(file)?;
    let issues: Vec<String> = check_integrity(&document)
        .iter()
        .map(ToString::to_string)
        .collect();

    match format {
        OutputFormat::Table => {
            if issues.is_empty() {
                println!("{} {}", "ok".green().bold(), file.display());
            }
            for issue in &issues {
                println!("{} {}", "issue:".red().bold(), issue);
            }
        }
        _ => format.print(&issues)?,
    }

    if !issues.is_empty() {
        bail!("{} integrity issue(s) in {}", issues.len(), file.display());
    }
    Ok(())
}
