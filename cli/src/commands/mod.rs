//! CLI Commands

pub mod check;
pub mod config;
pub mod default_config;
pub mod kinds;
pub mod render;
pub mod seed;

use anyhow::{Context, Result};
use forms_core::{fixtures::seed_document, FormDocument};
use std::fs;
use std::path::Path;

/// Read a document from JSON or YAML, picked by extension
pub fn read_document(path: &Path) -> Result<FormDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let document = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?,
    };
    tracing::debug!(path = %path.display(), "document loaded");
    Ok(document)
}

pub fn load_document(path: Option<&Path>) -> Result<FormDocument> {
    match path {
        Some(path) => read_document(path),
        None => Ok(seed_document()),
    }
}
