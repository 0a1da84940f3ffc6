//! Form Builder Core
//!
//! Field configuration schema, the normalized form document and the store
//! that mutates it.
//!
//! ## Features
//! - Twelve field kinds as one tagged `FieldConfig` union
//! - Normalized document: sections own field order, fields keyed by id
//! - Copy-on-write snapshots with per-entity sharing
//! - Missing ids and kind mismatches skip instead of failing
//! - Change notifications for subscribers
//!
//! ## Example
//! ```
//! use forms_core::{FieldKind, FieldPatch, FormStore};
//!
//! let store = FormStore::default();
//! let section = store.snapshot().sections().keys().next().unwrap().clone();
//!
//! let id = store
//!     .append_new_field(&section, FieldKind::MultipleChoice)
//!     .created_id()
//!     .unwrap()
//!     .to_string();
//! store.update_field(&id, FieldPatch::new().title("Favourite colour"));
//!
//! assert_eq!(store.get_field(&id).unwrap().title.as_deref(), Some("Favourite colour"));
//! ```

pub mod config;
pub mod domain;
pub mod fixtures;
pub mod integrity;
pub mod selectors;
pub mod store;

pub use config::StoreConfig;
pub use domain::*;
pub use integrity::{check_integrity, ensure_integrity, IntegrityIssue};
pub use store::{FormStore, SubscriptionId};

pub use forms_common::{new_document_id, new_id, FormsError, FormsResult, IdGenerator};
