//! Extension trait for reading and writing the keys of a tagged union's wire object

use serde_json::{Map, Value};

use crate::spec::FieldNameKeys;

/// Extension trait for type-safe JSON field access
pub trait JsonObjectAccess {
    /// Get field value using any type that can be a string reference
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Value>;

    /// Insert field with value using any type that converts to String and any value that can become
    /// JSON
    fn insert_field<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<Value>;

    /// Get the tag and payload entries named by `keys`
    fn get_tagged_fields(&self, keys: FieldNameKeys) -> (Option<&Value>, Option<&Value>) {
        (self.get_field(keys.tag), self.get_field(keys.value))
    }
}

impl JsonObjectAccess for Map<String, Value> {
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Value> {
        self.get(field.as_ref())
    }

    fn insert_field<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<Value>,
    {
        self.insert(field.into(), value.into());
    }
}

/// Build the `{tag_key: tag, value_key: payload}` wire object, tag first
pub fn tagged_object(keys: FieldNameKeys, tag: &str, payload: Value) -> Map<String, Value> {
    let mut object = Map::with_capacity(2);
    object.insert_field(keys.tag, tag);
    object.insert_field(keys.value, payload);
    object
}
