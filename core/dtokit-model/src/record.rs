//! DTOs whose field set is only known at runtime.
//!
//! Used when the shape comes from data (a CSV header, a JSON document)
//! rather than from a Rust type.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::Value;

use crate::schema::{FieldKind, Schema};
use crate::value::{Mapping, is_scalar};
use crate::{Dto, Error, Result};

/// A flat record backed by a runtime [`Schema`].
///
/// Records only compare equal when their schemas have the same shape.
#[derive(Clone)]
pub struct Record {
    schema: Arc<Schema<Record>>,
    values: Vec<Value>,
}

impl Record {
    /// Builds a schema of untyped fields, in the given order.
    pub fn define<I, S>(type_name: &str, names: I) -> Result<Arc<Schema<Record>>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut builder = Schema::builder(type_name);
        for (position, name) in names.into_iter().enumerate() {
            let name: String = name.into();
            if !seen.insert(name.clone()) {
                return Err(Error::DuplicateField {
                    owner: type_name.to_string(),
                    field: name,
                });
            }
            let owner = type_name.to_string();
            let field = name.clone();
            builder = builder.field(
                name,
                FieldKind::Any,
                move |record: &Record| record.values.get(position).cloned().unwrap_or(Value::Null),
                move |record: &mut Record, value: Value| {
                    if !is_scalar(&value) {
                        return Err(Error::InvalidValue {
                            owner: owner.clone(),
                            field: field.clone(),
                            reason: "expected a scalar value".to_string(),
                        });
                    }
                    if let Some(slot) = record.values.get_mut(position) {
                        *slot = value;
                    }
                    Ok(())
                },
            );
        }
        Ok(Arc::new(builder.build()))
    }

    /// An all-absent record for `schema`.
    pub fn new(schema: Arc<Schema<Record>>) -> Self {
        let values = vec![Value::Null; schema.len()];
        Self { schema, values }
    }

    /// A record hydrated from `mapping`; see [`Dto::hydrate`].
    pub fn from_mapping(schema: Arc<Schema<Record>>, mapping: &Mapping) -> Result<Self> {
        let mut record = Self::new(schema);
        record.hydrate(Some(&Value::Object(mapping.clone())))?;
        Ok(record)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Dto for Record {
    fn schema(&self) -> &Arc<Schema<Self>> {
        &self.schema
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_fields(state);
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type_name", &self.schema.type_name())
            .field("values", &self.to_mapping())
            .finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
