//! Form value objects

mod answer;
mod option;

pub use answer::{grid_key, FormAnswer};
pub use option::{ChoiceOption, GridAxis, GridTable, NewOption, OptionPatch, UserInputOption};

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a validation rule constrains
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationObject {
    Length,
    Regex,
    Text,
    Number,
}

/// Validation rule placeholder (shape only, never executed by the core)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub object: ValidationObject,
    pub constraint: String,
    pub error_text: String,
}

impl Validation {
    pub fn new(
        object: ValidationObject,
        constraint: impl Into<String>,
        error_text: impl Into<String>,
    ) -> Self {
        Self {
            object,
            constraint: constraint.into(),
            error_text: error_text.into(),
        }
    }
}

/// HTML input type of a short answer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputType {
    #[default]
    Text,
    Email,
    Number,
    Tel,
    Url,
    Password,
    Search,
    Date,
    Time,
    DatetimeLocal,
    Month,
    Week,
    Color,
}

impl InputType {
    /// HTML attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Password => "password",
            Self::Search => "search",
            Self::Date => "date",
            Self::Time => "time",
            Self::DatetimeLocal => "datetime-local",
            Self::Month => "month",
            Self::Week => "week",
            Self::Color => "color",
        }
    }
}

/// Rating glyph
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingIcon {
    #[default]
    Star,
    Heart,
    Like,
}

impl fmt::Display for RatingIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Star => "star",
            Self::Heart => "heart",
            Self::Like => "like",
        };
        write!(f, "{}", name)
    }
}

/// Time of day or elapsed duration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeKind {
    #[default]
    Time,
    Duration,
}

/// First value of a linear scale
///
/// Serialized as the bare number `0` or `1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ScaleStart {
    Zero,
    #[default]
    One,
}

impl ScaleStart {
    pub fn value(&self) -> u32 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

impl TryFrom<u8> for ScaleStart {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            other => Err(format!("scale start must be 0 or 1, got {}", other)),
        }
    }
}

impl From<ScaleStart> for u8 {
    fn from(start: ScaleStart) -> Self {
        start.value() as u8
    }
}
