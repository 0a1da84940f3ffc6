//! Domain module
//!
//! Value objects, the field configuration schema, the document aggregate,
//! events and mutation outcomes.

pub mod aggregates;
pub mod events;
pub mod outcome;
pub mod schema;
pub mod value_objects;

pub use aggregates::*;
pub use events::*;
pub use outcome::*;
pub use schema::*;
pub use value_objects::*;
