//! Form aggregates
//!
//! `FormDocument` is the aggregate root. Sections and fields are entities
//! inside it, referenced from outside by id only.

mod document;
mod field;
mod patch;

pub use document::{FormDocument, FormHeader};
pub use field::FormField;
pub use patch::{FieldPatch, HeaderPatch, SectionPatch};

use serde::{Deserialize, Serialize};

/// Ordered group of fields
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub field_order: Vec<String>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            field_order: Vec::new(),
        }
    }

    pub fn with_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_order = order.into_iter().map(Into::into).collect();
        self
    }

    pub fn position_of(&self, field_id: &str) -> Option<usize> {
        self.field_order.iter().position(|id| id == field_id)
    }
}
