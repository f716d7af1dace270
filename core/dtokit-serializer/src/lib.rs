//! Converts DTOs to and from their normalized mapping and wire text.
//!
//! A [`Serializer`] wraps one DTO instance:
//! - `normalize` / `denormalize`: DTO ⇄ [`Mapping`](dtokit_model::Mapping)
//! - `serialize` / `deserialize`: DTO ⇄ JSON text
//! - `encode` / `decode`: mapping → text and text → mapping, via the DTO
//!
//! Key validation is shared with [`Dto::hydrate`](dtokit_model::Dto::hydrate),
//! so a mapping rejected by one is rejected by the other.

mod config;
mod serializer;

pub use config::{SerializerConfig, WireStyle};
pub use serializer::Serializer;
