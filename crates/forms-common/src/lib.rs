//! Form Builder Common - Shared building blocks
//!
//! This crate provides the leaf pieces every other crate in the workspace
//! depends on:
//! - Identifier generation (short hex ids and document UUIDs)
//! - Error handling
//! - Tracing bootstrap
//!
//! Nothing in here knows about fields, sections or documents.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod id;
pub mod telemetry;

pub use error::*;
pub use id::{new_document_id, new_id, Entropy, IdGenerator};
