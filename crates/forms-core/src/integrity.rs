//! Structural integrity checks
//!
//! The store keeps these invariants on its own; documents handed in through
//! `set_form` or deserialization are not checked unless asked.

use crate::domain::{FieldConfig, FormDocument, LinearScaleConfig, RatingConfig};
use forms_common::{FormsError, FormsResult};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// One broken invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    #[error("section {section_id} references missing field {field_id}")]
    DanglingFieldRef { section_id: String, field_id: String },

    #[error("field {field_id} is listed in several sections: {sections:?}")]
    SharedField { field_id: String, sections: Vec<String> },

    #[error("section {section_id} lists field {field_id} more than once")]
    RepeatedInSection { section_id: String, field_id: String },

    #[error("entry stored under {key} carries id {id}")]
    KeyMismatch { key: String, id: String },

    #[error("field {field_id} has {count} other options")]
    MultipleOther { field_id: String, count: usize },

    #[error("field {field_id} reuses option id {option_id}")]
    DuplicateOptionId { field_id: String, option_id: String },

    #[error("linear scale {field_id} has count {count}, expected {min}..={max}")]
    ScaleCountOutOfRange {
        field_id: String,
        count: u32,
        min: u32,
        max: u32,
    },

    #[error("rating {field_id} has count {count}, expected {min}..={max}")]
    RatingCountOutOfRange {
        field_id: String,
        count: u32,
        min: u32,
        max: u32,
    },
}

/// Every broken invariant of `doc`, sections first then fields
pub fn check_integrity(doc: &FormDocument) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    let mut membership: HashMap<&str, Vec<String>> = HashMap::new();

    for (key, section) in doc.sections() {
        if key != &section.id {
            issues.push(IntegrityIssue::KeyMismatch {
                key: key.clone(),
                id: section.id.clone(),
            });
        }
        let mut seen = HashSet::new();
        for field_id in &section.field_order {
            if !seen.insert(field_id.as_str()) {
                issues.push(IntegrityIssue::RepeatedInSection {
                    section_id: section.id.clone(),
                    field_id: field_id.clone(),
                });
                continue;
            }
            if doc.field(field_id).is_none() {
                issues.push(IntegrityIssue::DanglingFieldRef {
                    section_id: section.id.clone(),
                    field_id: field_id.clone(),
                });
            }
            membership
                .entry(field_id.as_str())
                .or_default()
                .push(section.id.clone());
        }
    }

    let mut shared: Vec<_> = membership
        .into_iter()
        .filter(|(_, sections)| sections.len() > 1)
        .collect();
    shared.sort();
    for (field_id, sections) in shared {
        issues.push(IntegrityIssue::SharedField {
            field_id: field_id.to_string(),
            sections,
        });
    }

    for (key, field) in doc.fields() {
        if key != &field.id {
            issues.push(IntegrityIssue::KeyMismatch {
                key: key.clone(),
                id: field.id.clone(),
            });
        }
        check_config(&field.id, &field.config, &mut issues);
    }

    issues
}

fn check_config(field_id: &str, config: &FieldConfig, issues: &mut Vec<IntegrityIssue>) {
    if let Some(options) = config.options() {
        let others = options.to_vec().iter().filter(|o| o.other).count();
        if others > 1 {
            issues.push(IntegrityIssue::MultipleOther {
                field_id: field_id.to_string(),
                count: others,
            });
        }
        duplicate_ids(field_id, options.to_vec().iter().map(|o| o.id.as_str()), issues);
    }

    if let Some(table) = config.table() {
        duplicate_ids(field_id, table.rows.iter().map(|o| o.id.as_str()), issues);
        duplicate_ids(field_id, table.columns.iter().map(|o| o.id.as_str()), issues);
    }

    match config {
        FieldConfig::LinearScale(scale)
            if !(LinearScaleConfig::MIN_COUNT..=LinearScaleConfig::MAX_COUNT).contains(&scale.count) =>
        {
            issues.push(IntegrityIssue::ScaleCountOutOfRange {
                field_id: field_id.to_string(),
                count: scale.count,
                min: LinearScaleConfig::MIN_COUNT,
                max: LinearScaleConfig::MAX_COUNT,
            });
        }
        FieldConfig::Rating(rating)
            if !(RatingConfig::MIN_COUNT..=RatingConfig::MAX_COUNT).contains(&rating.count) =>
        {
            issues.push(IntegrityIssue::RatingCountOutOfRange {
                field_id: field_id.to_string(),
                count: rating.count,
                min: RatingConfig::MIN_COUNT,
                max: RatingConfig::MAX_COUNT,
            });
        }
        _ => {}
    }
}

fn duplicate_ids<'a>(
    field_id: &str,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<IntegrityIssue>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(IntegrityIssue::DuplicateOptionId {
                field_id: field_id.to_string(),
                option_id: id.to_string(),
            });
        }
    }
}

/// `Ok` when `doc` has no integrity issues
pub fn ensure_integrity(doc: &FormDocument) -> FormsResult<()> {
    let issues = check_integrity(doc);
    if issues.is_empty() {
        return Ok(());
    }
    let summary = issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(FormsError::Integrity(summary))
}

/// Check that `proposed` is a permutation of `current`
pub fn check_permutation(current: &[String], proposed: &[String]) -> Result<(), String> {
    if current.len() != proposed.len() {
        return Err(format!(
            "expected {} ids, got {}",
            current.len(),
            proposed.len()
        ));
    }
    let mut remaining: HashSet<&str> = current.iter().map(String::as_str).collect();
    for id in proposed {
        if !remaining.remove(id.as_str()) {
            return Err(format!("unexpected or repeated id {}", id));
        }
    }
    Ok(())
}
