//! The field table a spec type publishes to the union engine
//!
//! A spec is a plain struct whose fields are the possible variants of a union. The
//! `UnionSpec` derive turns each field into a `VariantField` entry, in declaration order, so
//! the containers can walk the fields without knowing the concrete struct.

use std::any::Any;
use std::fmt;

use serde_json::Value;

use crate::payload::{DecodeMode, PayloadError};

/// Wire key holding the variant tag when a spec does not override it
pub const DEFAULT_TAG_KEY: &str = "type";

/// Wire key holding the payload when a spec does not override it
pub const DEFAULT_VALUE_KEY: &str = "value";

/// Describes one variant field of a spec type
pub struct VariantField<S> {
    /// Rust identifier of the field
    pub name:    &'static str,
    /// Explicit tag, if the field overrides its name on the wire
    pub tag:     Option<&'static str>,
    /// Whether the field currently holds its zero value
    pub is_zero: fn(&S) -> bool,
    /// The field's payload, unwrapped from `Option` when the field is optional
    pub value:   for<'a> fn(&'a S) -> &'a (dyn Any + 'static),
    /// Encode the field's payload
    pub encode:  fn(&S) -> serde_json::Result<Value>,
    /// Decode a payload into a fresh spec with only this field set
    pub decode:  fn(&Value, DecodeMode) -> Result<S, PayloadError>,
}

impl<S> VariantField<S> {
    /// Tag used on the wire: the explicit tag, or the field name
    #[must_use]
    pub fn tag_name(&self) -> &'static str {
        self.tag.unwrap_or(self.name)
    }
}

impl<S> fmt::Debug for VariantField<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantField")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Names of the two keys of a tagged union's wire object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldNameKeys {
    /// Key holding the variant tag
    pub tag:   &'static str,
    /// Key holding the payload
    pub value: &'static str,
}

impl FieldNameKeys {
    /// `("type", "value")`
    pub const DEFAULT: Self = Self::new(DEFAULT_TAG_KEY, DEFAULT_VALUE_KEY);

    /// Create a key pair
    #[must_use]
    pub const fn new(tag: &'static str, value: &'static str) -> Self {
        Self { tag, value }
    }
}

impl Default for FieldNameKeys {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Hook for spec types that pick their own tagged wire keys in code
///
/// Implement this and add `#[union(resolver)]` to the derive. For fixed names the
/// `tag_key`/`value_key` attributes are shorter.
pub trait FieldNameResolver {
    /// Returns `(tag_key, value_key)`
    fn tagged_field_names() -> (&'static str, &'static str);
}

/// A record type whose fields enumerate the variants of a union
///
/// Usually derived. A hand-written impl may set `FIELDS` to `None` to declare a type that is
/// not record-shaped; every validating operation then fails with `Error::NotARecord`.
pub trait UnionSpec: Default + Sized + 'static {
    /// Field table in declaration order, or `None` for a non-record type
    const FIELDS: Option<&'static [VariantField<Self>]>;

    /// Wire keys used by `TaggedUnion`
    fn field_name_keys() -> FieldNameKeys {
        FieldNameKeys::DEFAULT
    }
}
