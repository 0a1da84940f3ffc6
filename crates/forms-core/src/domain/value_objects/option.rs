//! Choice Option Value Objects
//!
//! Options are the selectable choices of a choice field and the row/column
//! labels of a grid field. Ids are scoped to one field.

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Plain option: dropdown choices, grid rows and grid columns
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Option that may be the write-in "other" choice
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserInputOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub other: bool,
}

impl UserInputOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            other: false,
        }
    }

    /// The write-in sentinel
    pub fn other(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            other: true,
        }
    }
}

impl From<ChoiceOption> for UserInputOption {
    fn from(option: ChoiceOption) -> Self {
        Self::new(option.id, option.label)
    }
}

impl From<UserInputOption> for ChoiceOption {
    fn from(option: UserInputOption) -> Self {
        Self::new(option.id, option.label)
    }
}

/// Option to be created; the store assigns the id
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOption {
    pub label: String,
    #[serde(default)]
    pub other: bool,
}

impl NewOption {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            other: false,
        }
    }

    pub fn other(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            other: true,
        }
    }

    pub(crate) fn with_id(self, id: String) -> UserInputOption {
        UserInputOption {
            id,
            label: self.label,
            other: self.other,
        }
    }
}

/// Partial update for an option, row or column
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Ignored for rows, columns and dropdown choices unless `Some(true)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<bool>,
}

impl OptionPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            other: None,
        }
    }

    pub fn with_other(mut self, other: bool) -> Self {
        self.other = Some(other);
        self
    }

    pub fn apply(&self, option: &mut UserInputOption) {
        if let Some(label) = &self.label {
            option.label = label.clone();
        }
        if let Some(other) = self.other {
            option.other = other;
        }
    }

    pub fn apply_plain(&self, option: &mut ChoiceOption) {
        if let Some(label) = &self.label {
            option.label = label.clone();
        }
    }
}

/// Which list of a grid an operation targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridAxis {
    Rows,
    Columns,
}

impl GridAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rows => "rows",
            Self::Columns => "columns",
        }
    }
}

/// Rows and columns of a grid field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTable {
    #[serde(default)]
    pub rows: Vec<ChoiceOption>,
    #[serde(default)]
    pub columns: Vec<ChoiceOption>,
}

impl GridTable {
    pub fn new(rows: Vec<ChoiceOption>, columns: Vec<ChoiceOption>) -> Self {
        Self { rows, columns }
    }

    pub fn axis(&self, axis: GridAxis) -> &[ChoiceOption] {
        match axis {
            GridAxis::Rows => &self.rows,
            GridAxis::Columns => &self.columns,
        }
    }

    pub fn axis_mut(&mut self, axis: GridAxis) -> &mut Vec<ChoiceOption> {
        match axis {
            GridAxis::Rows => &mut self.rows,
            GridAxis::Columns => &mut self.columns,
        }
    }
}
