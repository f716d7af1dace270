//! Conversions between typed field storage and wire values.

use std::hash::{Hash, Hasher};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::schema::FieldKind;
use crate::{Error, Result};

/// Flat, insertion-ordered key/value mapping: the normalized form of a DTO.
pub type Mapping = Map<String, Value>;

/// A type that can back a DTO field.
pub trait Scalar: Serialize + DeserializeOwned {
    const KIND: FieldKind;
}

macro_rules! impl_scalar {
    ($kind:ident: $($ty:ty),+) => {
        $(impl Scalar for $ty {
            const KIND: FieldKind = FieldKind::$kind;
        })+
    };
}

impl_scalar!(Text: String, char);
impl_scalar!(Integer: i8, i16, i32, i64, u8, u16, u32, u64);
impl_scalar!(Float: f32, f64);
impl_scalar!(Bool: bool);
impl_scalar!(Any: Value);

/// Renders an optional field as a wire value; `None` becomes `Null`.
///
/// JSON has no NaN or infinity, so a non-finite float reads back as `Null`
/// and the field counts as absent: it fails [`Dto::is_complete`] and is
/// filled in by a collection merge.
///
/// [`Dto::is_complete`]: crate::Dto::is_complete
pub fn to_field_value<V: Serialize>(value: &Option<V>) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Converts a wire value into an optional field; `Null` becomes `None`.
///
/// A value of the wrong type is reported as [`Error::InvalidValue`].
pub fn from_field_value<V: DeserializeOwned>(owner: &str, field: &str, value: Value) -> Result<Option<V>> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| Error::InvalidValue {
            owner: owner.to_string(),
            field: field.to_string(),
            reason: e.to_string(),
        })
}

/// Checks that `source` is a non-empty mapping and borrows it.
pub fn checked_mapping<'a>(owner: &str, operation: &'static str, source: &'a Value) -> Result<&'a Mapping> {
    let Value::Object(mapping) = source else {
        return Err(Error::TypeConstraint {
            owner: owner.to_string(),
            operation,
            expected: "a mapping",
        });
    };
    if mapping.is_empty() {
        return Err(Error::EmptyInput {
            owner: owner.to_string(),
            operation,
            what: "mapping",
        });
    }
    Ok(mapping)
}

/// Whether `value` may be stored in a flat DTO field.
pub fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Feeds `value` into `state` consistently with `Value`'s equality.
///
/// Float zeros compare equal regardless of sign, so they hash alike.
pub fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Number(n) if n.is_f64() => {
            let float = n.as_f64().unwrap_or_default();
            let float = if float == 0.0 { 0.0 } else { float };
            float.to_bits().hash(state);
        }
        other => other.to_string().hash(state),
    }
}
