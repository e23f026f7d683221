//! JSON Schema (draft-04) generation from a type-checked TypeScript program.
//!
//! The front end dumps the checker's symbol/type graph as JSON
//! ([`program::Program`]); [`generate`] walks it from a named type and
//! returns the schema document.
pub mod annotations;
pub mod classify;
pub mod collector;
pub mod definition;
pub mod error;
pub mod generator;
pub mod literal;
pub mod options;
pub mod output;
pub mod path_de;
pub mod program;

#[cfg(test)]
mod test_support;

pub use definition::Definition;
pub use error::{Error, LoadError, Result};
pub use generator::{generate, SchemaGenerator, ALL_TYPES};
pub use options::Options;
pub use program::Program;
