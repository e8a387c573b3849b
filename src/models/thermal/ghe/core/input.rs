//! Named input objects and the loader that resolves them into systems.
//!
//! Inputs arrive as plain records that refer to each other by name. The
//! loader validates every record, resolves references, and collects all
//! problems of a pass before failing.

mod error;
mod loader;
mod records;

pub use error::{InputError, InputErrors, ObjectKind};
pub use loader::InputSet;
pub use records::{
    ArrayInput, PropertiesInput, ResponseFactorsInput, SingleBoreholeInput, SystemInput,
};
