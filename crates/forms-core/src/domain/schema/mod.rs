//! Field Configuration Schema
//!
//! `FieldConfig` is a closed sum type keyed by the `type` tag. Each variant
//! carries only the attributes its field kind uses, so switching the kind of
//! a field always means replacing the whole config.
//!
//! Two refinement groups gate the list operations:
//! - option bearing: multiple choice, checkbox, dropdown
//! - tabular: multiple choice grid, checkbox grid

mod defaults;
mod kind;

pub use defaults::{default_config, default_config_with};
pub use kind::FieldKind;

use crate::domain::outcome::SkipReason;
use crate::domain::value_objects::{
    ChoiceOption, GridAxis, GridTable, InputType, RatingIcon, ScaleStart, TimeKind,
    UserInputOption, Validation,
};
use forms_common::IdGenerator;
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

fn default_scale_count() -> u32 {
    5
}

fn default_rating_count() -> u32 {
    5
}

fn default_stroke() -> String {
    "orange".into()
}

fn default_fill() -> String {
    "gold".into()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortAnswerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongAnswerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

/// Multiple choice and checkbox
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceConfig {
    #[serde(default)]
    pub options: Vec<UserInputOption>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub shuffle: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownConfig {
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub shuffle: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearScaleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<String>,
    #[serde(default)]
    pub start: ScaleStart,
    #[serde(default = "default_scale_count")]
    pub count: u32,
}

impl LinearScaleConfig {
    pub const MIN_COUNT: u32 = 2;
    pub const MAX_COUNT: u32 = 10;

    /// Values offered to the respondent, `start..start + count` with the
    /// count capped at `MAX_COUNT`
    pub fn values(&self) -> std::ops::Range<u32> {
        let start = self.start.value();
        start..start.saturating_add(self.count.min(Self::MAX_COUNT))
    }
}

impl Default for LinearScaleConfig {
    fn default() -> Self {
        Self {
            low: None,
            high: None,
            start: ScaleStart::One,
            count: default_scale_count(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingConfig {
    #[serde(default)]
    pub icon: RatingIcon,
    #[serde(default = "default_stroke")]
    pub stroke: String,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_rating_count")]
    pub count: u32,
}

impl RatingConfig {
    pub const MIN_COUNT: u32 = 1;
    pub const MAX_COUNT: u32 = 10;

    /// Number of icons shown, capped at `MAX_COUNT`
    pub fn levels(&self) -> u32 {
        self.count.min(Self::MAX_COUNT)
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            icon: RatingIcon::Star,
            stroke: default_stroke(),
            fill: default_fill(),
            count: default_rating_count(),
        }
    }
}

/// Multiple choice grid and checkbox grid
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    #[serde(default)]
    pub table: GridTable,
    #[serde(default, skip_serializing_if = "is_false")]
    pub shuffle: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub limit_to_one_per_column: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateConfig {
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_time: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConfig {
    #[serde(default)]
    pub kind: TimeKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadConfig {
    #[serde(default)]
    pub accepted_file_types: Vec<String>,
    /// Bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,
}

/// Type-specific configuration of a field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldConfig {
    ShortAnswer(ShortAnswerConfig),
    LongAnswer(LongAnswerConfig),
    MultipleChoice(ChoiceConfig),
    Checkbox(ChoiceConfig),
    Dropdown(DropdownConfig),
    LinearScale(LinearScaleConfig),
    Rating(RatingConfig),
    MultipleChoiceGrid(GridConfig),
    CheckboxGrid(GridConfig),
    Date(DateConfig),
    Time(TimeConfig),
    FileUpload(FileUploadConfig),
    /// Tag this build does not know; views render a placeholder
    #[serde(other)]
    Unsupported,
}

/// Borrowed view over the options of an option-bearing config
#[derive(Debug, Clone, Copy)]
pub enum OptionList<'a> {
    UserInput(&'a [UserInputOption]),
    Plain(&'a [ChoiceOption]),
}

impl<'a> OptionList<'a> {
    pub fn len(&self) -> usize {
        match self {
            Self::UserInput(options) => options.len(),
            Self::Plain(options) => options.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, option_id: &str) -> Option<UserInputOption> {
        match self {
            Self::UserInput(options) => options.iter().find(|o| o.id == option_id).cloned(),
            Self::Plain(options) => options
                .iter()
                .find(|o| o.id == option_id)
                .cloned()
                .map(Into::into),
        }
    }

    pub fn to_vec(&self) -> Vec<UserInputOption> {
        match self {
            Self::UserInput(options) => options.to_vec(),
            Self::Plain(options) => options.iter().cloned().map(Into::into).collect(),
        }
    }

    pub fn has_other(&self) -> bool {
        match self {
            Self::UserInput(options) => options.iter().any(|o| o.other),
            Self::Plain(_) => false,
        }
    }
}

impl FieldConfig {
    /// Kind of this config, `None` for an unsupported tag
    pub fn kind(&self) -> Option<FieldKind> {
        let kind = match self {
            Self::ShortAnswer(_) => FieldKind::ShortAnswer,
            Self::LongAnswer(_) => FieldKind::LongAnswer,
            Self::MultipleChoice(_) => FieldKind::MultipleChoice,
            Self::Checkbox(_) => FieldKind::Checkbox,
            Self::Dropdown(_) => FieldKind::Dropdown,
            Self::LinearScale(_) => FieldKind::LinearScale,
            Self::Rating(_) => FieldKind::Rating,
            Self::MultipleChoiceGrid(_) => FieldKind::MultipleChoiceGrid,
            Self::CheckboxGrid(_) => FieldKind::CheckboxGrid,
            Self::Date(_) => FieldKind::Date,
            Self::Time(_) => FieldKind::Time,
            Self::FileUpload(_) => FieldKind::FileUpload,
            Self::Unsupported => return None,
        };
        Some(kind)
    }

    /// Wire tag, `"unsupported"` for unknown configs
    pub fn type_tag(&self) -> &'static str {
        self.kind().map(|k| k.as_str()).unwrap_or("unsupported")
    }

    pub fn has_options(&self) -> bool {
        self.kind().map_or(false, |k| k.has_options())
    }

    pub fn has_table(&self) -> bool {
        self.kind().map_or(false, |k| k.has_table())
    }

    pub fn options(&self) -> Option<OptionList<'_>> {
        match self {
            Self::MultipleChoice(c) | Self::Checkbox(c) => Some(OptionList::UserInput(&c.options)),
            Self::Dropdown(c) => Some(OptionList::Plain(&c.options)),
            _ => None,
        }
    }

    pub fn table(&self) -> Option<&GridTable> {
        match self {
            Self::MultipleChoiceGrid(c) | Self::CheckboxGrid(c) => Some(&c.table),
            _ => None,
        }
    }

    /// Apply `edit` to the option list.
    ///
    /// The list is only written back when `edit` succeeds and the result has
    /// at most one write-in option (none at all for dropdowns).
    pub fn edit_options<F>(&mut self, field_id: &str, edit: F) -> Result<(), SkipReason>
    where
        F: FnOnce(&mut Vec<UserInputOption>) -> Result<(), SkipReason>,
    {
        match self {
            Self::MultipleChoice(c) | Self::Checkbox(c) => {
                let mut next = c.options.clone();
                edit(&mut next)?;
                single_other(field_id, &next)?;
                c.options = next;
                Ok(())
            }
            Self::Dropdown(c) => {
                let mut next: Vec<UserInputOption> =
                    c.options.iter().cloned().map(Into::into).collect();
                edit(&mut next)?;
                if next.iter().any(|o| o.other) {
                    return Err(SkipReason::OtherNotAllowed(field_id.to_string()));
                }
                c.options = next.into_iter().map(Into::into).collect();
                Ok(())
            }
            _ => Err(SkipReason::NotOptionBearing(field_id.to_string())),
        }
    }

    /// Option rules a whole replacement config must satisfy.
    ///
    /// Dropdown options carry no write-in flag, so only multiple choice and
    /// checkbox lists can break the one-`other` rule.
    pub fn check_options(&self, field_id: &str) -> Result<(), SkipReason> {
        match self {
            Self::MultipleChoice(c) | Self::Checkbox(c) => single_other(field_id, &c.options),
            _ => Ok(()),
        }
    }

    /// Apply `edit` to one axis of the grid
    pub fn edit_axis<F>(&mut self, field_id: &str, axis: GridAxis, edit: F) -> Result<(), SkipReason>
    where
        F: FnOnce(&mut Vec<ChoiceOption>) -> Result<(), SkipReason>,
    {
        match self {
            Self::MultipleChoiceGrid(c) | Self::CheckboxGrid(c) => {
                let mut next = c.table.axis(axis).to_vec();
                edit(&mut next)?;
                *c.table.axis_mut(axis) = next;
                Ok(())
            }
            _ => Err(SkipReason::NotTabular(field_id.to_string())),
        }
    }

    /// Give every option, row and column a fresh id
    pub fn refresh_ids(&mut self, ids: &IdGenerator) {
        match self {
            Self::MultipleChoice(c) | Self::Checkbox(c) => {
                for option in &mut c.options {
                    option.id = ids.generate();
                }
            }
            Self::Dropdown(c) => {
                for option in &mut c.options {
                    option.id = ids.generate();
                }
            }
            Self::MultipleChoiceGrid(c) | Self::CheckboxGrid(c) => {
                for option in c.table.rows.iter_mut().chain(c.table.columns.iter_mut()) {
                    option.id = ids.generate();
                }
            }
            _ => {}
        }
    }

    /// Every option, row and column id carried by this config
    pub fn nested_ids(&self) -> Vec<&str> {
        match self {
            Self::MultipleChoice(c) | Self::Checkbox(c) => {
                c.options.iter().map(|o| o.id.as_str()).collect()
            }
            Self::Dropdown(c) => c.options.iter().map(|o| o.id.as_str()).collect(),
            Self::MultipleChoiceGrid(c) | Self::CheckboxGrid(c) => c
                .table
                .rows
                .iter()
                .chain(c.table.columns.iter())
                .map(|o| o.id.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn single_other(field_id: &str, options: &[UserInputOption]) -> Result<(), SkipReason> {
    if options.iter().filter(|o| o.other).count() > 1 {
        return Err(SkipReason::DuplicateOther(field_id.to_string()));
    }
    Ok(())
}

/// True for multiple choice, checkbox and dropdown
pub fn has_options(config: &FieldConfig) -> bool {
    config.has_options()
}

/// True for the two grid kinds
pub fn has_table(config: &FieldConfig) -> bool {
    config.has_table()
}
