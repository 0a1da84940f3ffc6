//! Seed command

use crate::output::OutputFormat;
use anyhow::Result;
use forms_core::fixtures::seed_document;

pub fn handle(format: OutputFormat) -> Result<()> {
    format.print(&seed_document())
}
