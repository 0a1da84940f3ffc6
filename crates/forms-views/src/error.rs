//! View errors

use thiserror::Error;

/// Rejected answer input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("field {field_id} ({type_tag}) does not accept {input}")]
    WrongInput {
        field_id: String,
        type_tag: &'static str,
        input: &'static str,
    },

    #[error("field {field_id} has no choice {choice_id}")]
    ChoiceNotFound { field_id: String, choice_id: String },

    #[error("value {value} is outside {min}..={max} for field {field_id}")]
    OutOfRange {
        field_id: String,
        value: u32,
        min: u32,
        max: u32,
    },
}

pub type ViewResult<T> = std::result::Result<T, ViewError>;
