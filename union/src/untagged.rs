//! Untagged union: the active variant's payload is written as-is
//!
//! Nothing on the wire names the variant, so decode tries each field of the record in
//! declaration order. A field matches when the input decodes into its type with no unknown
//! keys and the result is not the type's zero value. The first match wins.

use std::any::Any;

use error_stack::Report;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{self, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::payload::DecodeMode;
use crate::scanner::{self, ActiveVariant, VariantState};
use crate::spec::{UnionSpec, VariantField};

/// An untagged union whose variants are the fields of `S`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Union<S> {
    /// The variant record; at most one field should be set
    pub value: S,
}

impl<S: UnionSpec> Union<S> {
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

    /// The active variant with its name
    #[must_use]
    pub fn active_variant(&self) -> Option<ActiveVariant<'_>> {
        scanner::resolve(&self.value)
            .single()
            .map(ActiveVariant::from)
    }

    /// Encode to JSON bytes
    pub fn encode(&self) -> Result<Vec<u8>> {
        let value = self.encode_value()?;
        serde_json::to_vec(&value).map_err(|error| Report::new(Error::Encode(error)))
    }

    /// Encode the active payload to a JSON value
    pub fn encode_value(&self) -> Result<Value> {
        let active = scanner::resolve(&self.value).require_single()?;

        let payload = (active.field.encode)(&self.value).map_err(|error| {
            Report::new(Error::Encode(error)).attach(format!("variant: {}", active.name()))
        })?;

        tracing::debug!(field = active.name(), "encoded untagged union");
        Ok(payload)
    }

    /// Decode from JSON bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let fields = scanner::record_fields::<S>()?;
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|error| Report::new(Error::MalformedInput(error)))?;
        Self::try_fields(fields, &value)
    }

    /// Decode from a JSON value
    pub fn decode_value(value: &Value) -> Result<Self> {
        let fields = scanner::record_fields::<S>()?;
        Self::try_fields(fields, value)
    }

    /// Decode from JSON bytes into `self`
    ///
    /// On failure `self` is left unchanged.
    pub fn decode_from(&mut self, bytes: &[u8]) -> Result<()> {
        *self = Self::decode(bytes)?;
        Ok(())
    }

    fn try_fields(fields: &'static [VariantField<S>], value: &Value) -> Result<Self> {
        let mode = DecodeMode::Strict;
        for (index, field) in fields.iter().enumerate() {
            let candidate = match (field.decode)(value, mode) {
                Ok(candidate) => candidate,
                Err(error) => {
                    tracing::trace!(field = field.name, %mode, %error, "untagged candidate rejected");
                    continue;
                }
            };

            if (field.is_zero)(&candidate) {
                tracing::trace!(field = field.name, "untagged candidate decoded to zero value");
                continue;
            }

            tracing::debug!(field = field.name, index, "decoded untagged union");
            return Ok(Self::new(candidate));
        }

        Err(Report::new(Error::NoFieldMatched).attach(format!("tried {} fields", fields.len())))
    }
}

impl<S: UnionSpec> From<S> for Union<S> {
    fn from(value: S) -> Self {
        Self::new(value)
    }
}

impl<S: UnionSpec> Serialize for Union<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> core::result::Result<Ser::Ok, Ser::Error> {
        self.encode_value()
            .map_err(|report| <Ser::Error as ser::Error>::custom(report.current_context()))?
            .serialize(serializer)
    }
}

impl<'de, S: UnionSpec> Deserialize<'de> for Union<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::decode_value(&value)
            .map_err(|report| <D::Error as de::Error>::custom(report.current_context()))
    }
}
