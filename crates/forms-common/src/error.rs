//! Error types for the form builder

use thiserror::Error;

/// Form builder error type
///
/// Store mutations never produce these for missing ids or type mismatches;
/// they only surface from the strict entry points and from configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormsError {
    /// Field not found
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// Section not found
    #[error("section not found: {0}")]
    SectionNotFound(String),

    /// Proposed field order is not a permutation of the current one
    #[error("invalid field order for section {section_id}: {reason}")]
    InvalidOrder {
        /// Section the reorder targeted
        section_id: String,
        /// Human readable reason
        reason: String,
    },

    /// Document breaks a structural invariant
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// Field type tag not recognised
    #[error("unknown field type: {0}")]
    UnknownFieldType(String),

    /// Configuration error
    #[error("config error: {0}")]
    ConfigError(String),
}

/// Result type for the form builder
pub type FormsResult<T> = Result<T, FormsError>;
