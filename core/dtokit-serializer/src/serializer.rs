use dtokit_model::value::checked_mapping;
use dtokit_model::{Dto, Error, Mapping, Result};
use serde_json::Value;
use tracing::trace;

use crate::config::{SerializerConfig, WireStyle};

const OWNER: &str = "Serializer";

/// Wraps a single DTO and converts it to and from mappings and wire text.
///
/// Every operation that writes into the DTO validates its input exactly
/// like [`Dto::hydrate`]: a non-mapping is [`Error::TypeConstraint`], an
/// empty mapping [`Error::EmptyInput`], an undeclared key
/// [`Error::UnknownField`]. Keys missing from the input leave their
/// fields untouched, which makes `denormalize` usable as a merge step.
pub struct Serializer<'a, T: Dto> {
    object: &'a mut T,
    config: SerializerConfig,
}

impl<'a, T: Dto> Serializer<'a, T> {
    pub fn new(object: &'a mut T) -> Self {
        Self::with_config(object, SerializerConfig::default())
    }

    pub fn with_config(object: &'a mut T, config: SerializerConfig) -> Self {
        Self { object, config }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub fn object(&self) -> &T {
        self.object
    }

    /// Releases the wrapped object.
    pub fn into_inner(self) -> &'a mut T {
        self.object
    }

    /// Reads every field, in schema order.
    pub fn normalize(&self) -> Mapping {
        self.object.to_mapping()
    }

    /// Writes the entries of `source` into the object and returns it.
    pub fn denormalize(&mut self, source: &Value) -> Result<&mut T> {
        let mapping = checked_mapping(OWNER, "denormalize", source)?;
        trace!(
            type_name = %self.object.type_name(),
            keys = mapping.len(),
            "denormalizing"
        );
        self.object.apply(mapping)?;
        Ok(&mut *self.object)
    }

    /// Normalizes the object and encodes it as wire text.
    pub fn serialize(&self) -> Result<String> {
        let value = Value::Object(self.normalize());
        let text = match self.config.style {
            WireStyle::Compact => serde_json::to_string(&value)?,
            WireStyle::Pretty => serde_json::to_string_pretty(&value)?,
        };
        Ok(text)
    }

    /// Decodes wire text and denormalizes it into the object.
    pub fn deserialize(&mut self, input: &str) -> Result<&mut T> {
        if input.is_empty() {
            return Err(Error::EmptyInput {
                owner: OWNER.to_string(),
                operation: "deserialize",
                what: "string",
            });
        }
        let value: Value = serde_json::from_str(input)?;
        let mapping = checked_mapping(OWNER, "deserialize", &value)?;
        self.object.apply(mapping)?;
        Ok(&mut *self.object)
    }

    /// Denormalizes `source`, then serializes the object.
    pub fn encode(&mut self, source: &Value) -> Result<String> {
        checked_mapping(OWNER, "encode", source)?;
        self.denormalize(source)?;
        self.serialize()
    }

    /// Deserializes `input`, then normalizes the object.
    pub fn decode(&mut self, input: &str) -> Result<Mapping> {
        if input.is_empty() {
            return Err(Error::EmptyInput {
                owner: OWNER.to_string(),
                operation: "decode",
                what: "string",
            });
        }
        self.deserialize(input)?;
        Ok(self.normalize())
    }
}
