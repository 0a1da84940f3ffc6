//! Mutation outcomes
//!
//! Store mutations never fail. They either change the document or leave it
//! untouched, and the outcome says which.

use std::fmt;

/// Why a mutation left the document unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingField(String),
    MissingSection(String),
    MissingOption(String),
    /// Option operation against a field without an option list
    NotOptionBearing(String),
    /// Row/column operation against a field without a grid
    NotTabular(String),
    /// Field already has a write-in option
    DuplicateOther(String),
    /// Dropdowns have no write-in option
    OtherNotAllowed(String),
    /// Position outside the section's field order
    OutOfRange { section_id: String, index: usize },
    /// Reorder rejected by strict ordering
    InvalidOrder(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(id) => write!(f, "field {} not found", id),
            Self::MissingSection(id) => write!(f, "section {} not found", id),
            Self::MissingOption(id) => write!(f, "option {} not found", id),
            Self::NotOptionBearing(id) => write!(f, "field {} has no options", id),
            Self::NotTabular(id) => write!(f, "field {} has no grid", id),
            Self::DuplicateOther(id) => write!(f, "field {} already has an other option", id),
            Self::OtherNotAllowed(id) => write!(f, "field {} cannot take an other option", id),
            Self::OutOfRange { section_id, index } => {
                write!(f, "index {} out of range in section {}", index, section_id)
            }
            Self::InvalidOrder(reason) => write!(f, "invalid order: {}", reason),
        }
    }
}

/// Result of a store mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Document changed
    Applied,
    /// Document changed and a new entity was created with this id
    Created(String),
    /// Document unchanged
    Skipped(SkipReason),
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        !self.is_skipped()
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn created_id(&self) -> Option<&str> {
        match self {
            Self::Created(id) => Some(id),
            _ => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Skipped(reason) => Some(reason),
            _ => None,
        }
    }
}
