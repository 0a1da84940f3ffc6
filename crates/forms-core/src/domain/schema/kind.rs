//! Field kinds

use forms_common::FormsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The twelve field types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    ShortAnswer,
    LongAnswer,
    MultipleChoice,
    Checkbox,
    Dropdown,
    LinearScale,
    Rating,
    MultipleChoiceGrid,
    CheckboxGrid,
    Date,
    Time,
    FileUpload,
}

impl FieldKind {
    /// Every kind, in the order the type picker lists them
    pub const ALL: [FieldKind; 12] = [
        FieldKind::ShortAnswer,
        FieldKind::LongAnswer,
        FieldKind::MultipleChoice,
        FieldKind::Checkbox,
        FieldKind::Dropdown,
        FieldKind::FileUpload,
        FieldKind::LinearScale,
        FieldKind::Rating,
        FieldKind::MultipleChoiceGrid,
        FieldKind::CheckboxGrid,
        FieldKind::Date,
        FieldKind::Time,
    ];

    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortAnswer => "short_answer",
            Self::LongAnswer => "long_answer",
            Self::MultipleChoice => "multiple_choice",
            Self::Checkbox => "checkbox",
            Self::Dropdown => "dropdown",
            Self::LinearScale => "linear_scale",
            Self::Rating => "rating",
            Self::MultipleChoiceGrid => "multiple_choice_grid",
            Self::CheckboxGrid => "checkbox_grid",
            Self::Date => "date",
            Self::Time => "time",
            Self::FileUpload => "file_upload",
        }
    }

    /// Label shown in the type picker
    pub fn label(&self) -> &'static str {
        match self {
            Self::ShortAnswer => "Short Answer",
            Self::LongAnswer => "Paragraph",
            Self::MultipleChoice => "Multiple Choice",
            Self::Checkbox => "Checkboxes",
            Self::Dropdown => "Dropdown",
            Self::LinearScale => "Linear Scale",
            Self::Rating => "Rating",
            Self::MultipleChoiceGrid => "Multiple Choice Grid",
            Self::CheckboxGrid => "Checkbox Grid",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::FileUpload => "File Upload",
        }
    }

    pub fn has_options(&self) -> bool {
        matches!(self, Self::MultipleChoice | Self::Checkbox | Self::Dropdown)
    }

    pub fn has_table(&self) -> bool {
        matches!(self, Self::MultipleChoiceGrid | Self::CheckboxGrid)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FormsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FormsError::UnknownFieldType(s.to_string()))
    }
}
