//! Self-describing data-transfer objects.
//!
//! - [`Schema`] / [`Field`]: the ordered field table of a DTO type, with a
//!   getter and setter per field and optional read-only [`Method`]s
//! - [`Dto`]: hydration, validation, completeness, equality, hashing,
//!   iteration and rendering, all driven by the schema
//! - [`dto!`]: declares a struct of optional fields and its schema
//! - [`Record`]: a DTO whose schema is assembled at runtime
//!
//! Field values travel as [`serde_json::Value`] scalars, with `Null` as the
//! unset state, and a DTO's normalized form is a [`Mapping`].

mod dto;
mod error;
mod macros;
mod record;
mod schema;
pub mod value;

pub use dto::{Dto, FieldIter};
pub use error::{Error, Result};
pub use record::Record;
pub use schema::{Field, FieldKind, Method, Schema, SchemaBuilder};
pub use value::{Mapping, Scalar};

pub use serde_json::Value;
