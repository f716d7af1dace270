use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

type Getter<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, Value) -> Result<()> + Send + Sync>;

/// The scalar type a field accepts.
///
/// Carried on every [`Field`] so tooling can report what a DTO expects
/// without touching an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Bool,
    /// Any scalar; used by runtime records and untyped fields.
    Any,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Any => "any",
        };
        f.write_str(name)
    }
}

/// A named field with its reader and writer for instances of `T`.
pub struct Field<T> {
    name: String,
    kind: FieldKind,
    getter: Getter<T>,
    setter: Setter<T>,
}

impl<T> Field<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Reads the field's current value; `Value::Null` when unset.
    pub fn read(&self, target: &T) -> Value {
        (self.getter)(target)
    }

    /// Writes `value` through the field's setter. Setter errors are returned as-is.
    pub fn write(&self, target: &mut T, value: Value) -> Result<()> {
        (self.setter)(target, value)
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A named, read-only computed member. Never counted as a field.
pub struct Method<T> {
    name: String,
    call: Getter<T>,
}

impl<T> Method<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, target: &T) -> Value {
        (self.call)(target)
    }
}

/// Ordered dispatch table describing a DTO type.
///
/// Built once per type and shared by hydration, serialization and the
/// collection merge. Field order is declaration order.
pub struct Schema<T> {
    type_name: String,
    fields: Vec<Field<T>>,
    positions: HashMap<String, usize>,
    methods: Vec<Method<T>>,
}

impl<T> Schema<T> {
    pub fn builder(type_name: impl Into<String>) -> SchemaBuilder<T> {
        SchemaBuilder {
            type_name: type_name.into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Method names in registration order.
    pub fn methods(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field<T>> {
        self.fields.iter()
    }

    pub fn field(&self, name: &str) -> Option<&Field<T>> {
        self.position(name).map(|pos| &self.fields[pos])
    }

    pub fn field_at(&self, position: usize) -> Option<&Field<T>> {
        self.fields.get(position)
    }

    pub fn method(&self, name: &str) -> Option<&Method<T>> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when both schemas describe the same type name with the same
    /// field names in the same order.
    pub fn same_shape(&self, other: &Schema<T>) -> bool {
        std::ptr::eq(self, other)
            || (self.type_name == other.type_name
                && self.fields.len() == other.fields.len()
                && self
                    .fields
                    .iter()
                    .zip(&other.fields)
                    .all(|(a, b)| a.name == b.name))
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("methods", &self.methods())
            .finish()
    }
}

/// Collects fields and methods for a [`Schema`].
pub struct SchemaBuilder<T> {
    type_name: String,
    fields: Vec<Field<T>>,
    methods: Vec<Method<T>>,
}

impl<T> SchemaBuilder<T> {
    /// Registers a field. Registering a name twice replaces the earlier
    /// accessors but keeps the original position.
    pub fn field<G, S>(mut self, name: impl Into<String>, kind: FieldKind, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Value + Send + Sync + 'static,
        S: Fn(&mut T, Value) -> Result<()> + Send + Sync + 'static,
    {
        let field = Field {
            name: name.into(),
            kind,
            getter: Box::new(get),
            setter: Box::new(set),
        };
        match self.fields.iter().position(|f| f.name == field.name) {
            Some(pos) => self.fields[pos] = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn method<C>(mut self, name: impl Into<String>, call: C) -> Self
    where
        C: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.methods.push(Method {
            name: name.into(),
            call: Box::new(call),
        });
        self
    }

    pub fn build(self) -> Schema<T> {
        let positions = self
            .fields
            .iter()
            .enumerate()
            .map(|(pos, f)| (f.name.clone(), pos))
            .collect();
        tracing::trace!(
            type_name = %self.type_name,
            fields = self.fields.len(),
            methods = self.methods.len(),
            "schema built"
        );
        Schema {
            type_name: self.type_name,
            fields: self.fields,
            positions,
            methods: self.methods,
        }
    }
}
