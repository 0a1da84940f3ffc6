//! Answer Value Object
//!
//! Only the shape is defined here. Nothing in the core validates or submits
//! answers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Respondent answer stored on a field
///
/// Text answers cover short/long answers, dates, times and file names;
/// choice answers map option ids (or `row:column` keys for grids) to a
/// selected flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormAnswer {
    Text(String),
    Choices(BTreeMap<String, bool>),
}

impl FormAnswer {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Single selection
    pub fn choice(option_id: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(option_id.into(), true);
        Self::Choices(map)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Choices(_) => None,
        }
    }

    pub fn is_selected(&self, key: &str) -> bool {
        match self {
            Self::Choices(map) => map.get(key).copied().unwrap_or(false),
            Self::Text(_) => false,
        }
    }

    /// Ids currently marked as selected
    pub fn selected(&self) -> Vec<&str> {
        match self {
            Self::Choices(map) => map
                .iter()
                .filter(|(_, on)| **on)
                .map(|(id, _)| id.as_str())
                .collect(),
            Self::Text(_) => Vec::new(),
        }
    }
}

/// Key used for a grid cell inside a choice answer
pub fn grid_key(row_id: &str, column_id: &str) -> String {
    format!("{}:{}", row_id, column_id)
}
