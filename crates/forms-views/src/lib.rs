//! Form Builder Views
//!
//! Adapters that turn a form document into something a person works with:
//! the author's builder cards, a respondent preview and an interactive fill
//! session. Every adapter dispatches on the field kind through one
//! exhaustive `FieldView` trait, so a new kind fails to compile until each
//! view handles it.
//!
//! ## Example
//! ```
//! use forms_core::fixtures::seed_document;
//! use forms_views::PreviewView;
//!
//! let rendered = PreviewView::new().render(&seed_document());
//! assert_eq!(rendered.sections[0].fields.len(), 12);
//! ```

pub mod adapter;
pub mod builder;
pub mod error;
pub mod fill;
pub mod preview;
pub mod text;

pub use adapter::{dispatch, render_document, FieldView, RenderedField, RenderedForm, RenderedSection};
pub use builder::{available_actions, BuilderView, EditAction, FieldEditor};
pub use error::{ViewError, ViewResult};
pub use fill::{FillSession, FillView};
pub use preview::PreviewView;
pub use text::Block;
