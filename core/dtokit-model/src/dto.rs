use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use std::iter::FusedIterator;
use std::sync::Arc;

use serde_json::Value;

use crate::schema::Schema;
use crate::value::{Mapping, checked_mapping, hash_value};
use crate::{Error, Result};

/// A data-transfer object that describes its own fields.
///
/// Implementors only provide [`Dto::schema`]; hydration, completeness,
/// equality, hashing, iteration and rendering are all driven by the
/// schema's dispatch table. Most types get their implementation from
/// [`dto!`](crate::dto).
pub trait Dto: Any + Sized {
    /// The field table for this instance's type.
    fn schema(&self) -> &Arc<Schema<Self>>;

    fn type_name(&self) -> &str {
        self.schema().type_name()
    }

    /// Field names in declaration order.
    fn fields(&self) -> Vec<&str> {
        self.schema().fields()
    }

    fn field_count(&self) -> usize {
        self.schema().len()
    }

    /// Builds a default instance and hydrates it from `source`.
    fn from_source(source: Option<&Value>) -> Result<Self>
    where
        Self: Default,
    {
        let mut dto = Self::default();
        dto.hydrate(source)?;
        Ok(dto)
    }

    /// Populates fields from a key/value mapping.
    ///
    /// `None` leaves the instance untouched. A non-mapping fails with
    /// [`Error::TypeConstraint`], an empty mapping with [`Error::EmptyInput`],
    /// and an undeclared key with [`Error::UnknownField`] before any setter runs.
    fn hydrate(&mut self, source: Option<&Value>) -> Result<()> {
        let Some(source) = source else {
            return Ok(());
        };
        let schema = Arc::clone(self.schema());
        let mapping = checked_mapping(schema.type_name(), "hydrate", source)?;
        self.apply(mapping)
    }

    /// Applies every entry of `mapping` through its setter, in mapping order.
    ///
    /// All keys are checked against the schema first, so an unknown key
    /// leaves the instance unchanged. Fields missing from `mapping` are not
    /// touched.
    fn apply(&mut self, mapping: &Mapping) -> Result<()> {
        let schema = Arc::clone(self.schema());
        if let Some(key) = mapping.keys().find(|key| !schema.contains(key)) {
            return Err(Error::unknown_field(schema.type_name(), key));
        }
        for (key, value) in mapping {
            if let Some(field) = schema.field(key) {
                field.write(self, value.clone())?;
            }
        }
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Value> {
        let schema = self.schema();
        schema
            .field(name)
            .map(|field| field.read(self))
            .ok_or_else(|| Error::unknown_field(schema.type_name(), name))
    }

    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let schema = Arc::clone(self.schema());
        let field = schema
            .field(name)
            .ok_or_else(|| Error::unknown_field(schema.type_name(), name))?;
        field.write(self, value)
    }

    /// Calls a registered read-only method by name.
    fn invoke(&self, method: &str) -> Result<Value> {
        let schema = self.schema();
        schema
            .method(method)
            .map(|m| m.call(self))
            .ok_or_else(|| Error::unknown_field(schema.type_name(), method))
    }

    /// True when no field is absent.
    fn is_complete(&self) -> bool {
        self.iter().all(|(_, value)| !value.is_null())
    }

    /// Field-by-field equality with another instance of the same type.
    fn equals(&self, other: &Self) -> bool {
        let schema = self.schema();
        schema.same_shape(other.schema())
            && schema.iter().all(|field| field.read(self) == field.read(other))
    }

    /// Like [`Dto::equals`], but false for any value of another concrete type.
    fn equals_any(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| self.equals(other))
    }

    /// Feeds the ordered field values into `state`.
    fn hash_fields<H: Hasher>(&self, state: &mut H) {
        for (_, value) in self.iter() {
            hash_value(&value, state);
        }
    }

    fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash_fields(&mut hasher);
        hasher.finish()
    }

    /// Lazily yields `(name, value)` pairs in schema order.
    fn iter(&self) -> FieldIter<'_, Self> {
        FieldIter {
            target: self,
            schema: self.schema(),
            position: 0,
        }
    }

    fn to_mapping(&self) -> Mapping {
        self.iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    /// Compact JSON rendering of [`Dto::iter`], in schema order.
    fn render(&self) -> String {
        Value::Object(self.to_mapping()).to_string()
    }
}

/// Iterator over a DTO's fields; see [`Dto::iter`].
pub struct FieldIter<'a, T> {
    target: &'a T,
    schema: &'a Schema<T>,
    position: usize,
}

impl<'a, T> Iterator for FieldIter<'a, T> {
    type Item = (&'a str, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let field = self.schema.field_at(self.position)?;
        self.position += 1;
        Some((field.name(), field.read(self.target)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.schema.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for FieldIter<'_, T> {}

impl<T> FusedIterator for FieldIter<'_, T> {}
