//! Tagged union: the active variant travels inside a wrapper object that names it
//!
//! Wire form: `{"<tag_key>": "<tag>", "<value_key>": <payload>}`, with the keys from
//! [`UnionSpec::field_name_keys`] (`"type"`/`"value"` unless the type overrides them). The tag
//! is the field's `#[variant(tag = "...")]` override, or the field name.

use std::any::Any;

use error_stack::Report;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{self, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::json_object::{JsonObjectAccess, tagged_object};
use crate::payload::DecodeMode;
use crate::scanner::{self, ActiveVariant, VariantState};
use crate::spec::{FieldNameKeys, UnionSpec};

/// A discriminated union whose variants are the fields of `S`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaggedUnion<S> {
    /// The variant record; at most one field should be set
    pub value: S,
}

impl<S: UnionSpec> TaggedUnion<S> {
    /// Wrap a spec value
    #[must_use]
    pub const fn new(value: S) -> Self {
        Self { value }
    }

    /// The variant record
    #[must_use]
    pub const fn spec(&self) -> &S {
        &self.value
    }

    /// The variant record, for setting or clearing variants
    pub const fn spec_mut(&mut self) -> &mut S {
        &mut self.value
    }

    /// Unwrap the variant record
    #[must_use]
    pub fn into_inner(self) -> S {
        self.value
    }

    /// Wire keys for the tag and the payload
    #[must_use]
    pub fn field_name_keys() -> FieldNameKeys {
        S::field_name_keys()
    }

    /// Which fields are set; `None` when the type is not a record
    #[must_use]
    pub fn state(&self) -> Option<VariantState> {
        scanner::resolve(&self.value).state()
    }

    /// Payload of the active variant
    ///
    /// Returns `None` when no field or more than one field is set.
    #[must_use]
    pub fn active_value(&self) -> Option<&(dyn Any + 'static)> {
        self.active_variant().map(|active| active.value)
    }

    /// The active variant with its name and tag
    #[must_use]
    pub fn active_variant(&self) -> Option<ActiveVariant<'_>> {
        scanner::resolve(&self.value)
            .single()
            .map(ActiveVariant::from)
    }

    /// Tag of the active variant
    #[must_use]
    pub fn tag(&self) -> Option<&'static str> {
        self.active_variant().map(|active| active.tag)
    }

    /// Encode to JSON bytes
    pub fn encode(&self) -> Result<Vec<u8>> {
        let value = self.encode_value()?;
        serde_json::to_vec(&value).map_err(|error| Report::new(Error::Encode(error)))
    }

    /// Encode to a JSON value
    pub fn encode_value(&self) -> Result<Value> {
        let active = scanner::resolve(&self.value).require_single()?;
        let tag = active.field.tag_name();

        let payload = (active.field.encode)(&self.value).map_err(|error| {
            Report::new(Error::Encode(error)).attach(format!("variant: {tag}"))
        })?;

        tracing::debug!(variant = tag, field = active.name(), "encoded tagged union");
        Ok(Value::Object(tagged_object(S::field_name_keys(), tag, payload)))
    }

    /// Decode from JSON bytes
    ///
    /// `null` reads as an empty wrapper object, so it fails on the missing tag key.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let object: Option<Map<String, Value>> = serde_json::from_slice(bytes)
            .map_err(|error| Report::new(Error::MalformedInput(error)))?;
        Self::decode_object(&object.unwrap_or_default())
    }

    /// Decode from a JSON value
    pub fn decode_value(value: &Value) -> Result<Self> {
        let object = Option::<Map<String, Value>>::deserialize(value)
            .map_err(|error| Report::new(Error::MalformedInput(error)))?;
        Self::decode_object(&object.unwrap_or_default())
    }

    /// Decode from JSON bytes into `self`
    ///
    /// On failure `self` is left unchanged.
    pub fn decode_from(&mut self, bytes: &[u8]) -> Result<()> {
        *self = Self::decode(bytes)?;
        Ok(())
    }

    fn decode_object(object: &Map<String, Value>) -> Result<Self> {
        let fields = scanner::record_fields::<S>()?;
        let keys = S::field_name_keys();

        let (raw_tag, raw_value) = object.get_tagged_fields(keys);
        let raw_tag = raw_tag.ok_or_else(|| Report::new(Error::missing_variant_field(keys.tag)))?;
        let raw_value =
            raw_value.ok_or_else(|| Report::new(Error::missing_value_field(keys.value)))?;

        let tag = String::deserialize(raw_tag)
            .map_err(|error| Report::new(Error::InvalidVariantTag(error)))?;

        let mut matched = fields.iter().filter(|field| field.tag_name() == tag);
        let Some(field) = matched.next() else {
            return Err(Report::new(Error::unknown_variant(tag)));
        };
        if matched.next().is_some() {
            return Err(Report::new(Error::MultipleFieldsMatched(tag)));
        }

        let value = (field.decode)(raw_value, DecodeMode::Lenient).map_err(|error| {
            Report::new(Error::from(error)).attach(format!("variant: {tag}"))
        })?;
        if (field.is_zero)(&value) {
            return Err(Report::new(Error::ZeroPayload(tag)));
        }

        tracing::debug!(variant = %tag, field = field.name, "decoded tagged union");
        Ok(Self::new(value))
    }
}

impl<S: UnionSpec> From<S> for TaggedUnion<S> {
    fn from(value: S) -> Self {
        Self::new(value)
    }
}

impl<S: UnionSpec> Serialize for TaggedUnion<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> core::result::Result<Ser::Ok, Ser::Error> {
        self.encode_value()
            .map_err(|report| <Ser::Error as ser::Error>::custom(report.current_context()))?
            .serialize(serializer)
    }
}

impl<'de, S: UnionSpec> Deserialize<'de> for TaggedUnion<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::decode_value(&value)
            .map_err(|report| <D::Error as de::Error>::custom(report.current_context()))
    }
}
