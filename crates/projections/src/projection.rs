//! Applying a policy to serialized entities.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{ProjectionPolicy, Result};

/// Output of [`project`]: the shaped JSON view of an entity or collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Projected(Value);

impl Projected {
    /// Borrows the shaped value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the projection, returning the shaped value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Serializes the shaped value to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.0)?)
    }
}

impl Serialize for Projected {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Serializes `source` and omits every field the policy excludes.
///
/// A single entity becomes an object without the excluded keys. A collection
/// becomes an array in which each element is shaped the same way, in the
/// original order. Only the entity's own fields are considered; nested
/// objects are left as they are. Remaining keys keep their serialization
/// order, so identical input and policy always yield identical output.
pub fn project<T>(source: &T, policy: &ProjectionPolicy) -> Result<Projected>
where
    T: Serialize + ?Sized,
{
    let value = match serde_json::to_value(source)? {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| shape_entity(item, policy))
                .collect(),
        ),
        other => shape_entity(other, policy),
    };

    Ok(Projected(value))
}

fn shape_entity(value: Value, policy: &ProjectionPolicy) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .filter(|(key, _)| !policy.excludes(key))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}
