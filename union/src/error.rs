use thiserror::Error;

use crate::payload::PayloadError;

/// Result type for the `json_union` library
pub type Result<T> = core::result::Result<T, error_stack::Report<Error>>;

/// Failures raised while encoding or decoding a union
#[derive(Debug, Error)]
pub enum Error {
    /// The union type is not record-shaped
    #[error("spec must be a struct")]
    NotARecord,

    /// Encode attempted with no field set
    #[error("zero variants set")]
    ZeroVariants,

    /// Encode attempted with more than one field set
    #[error("multiple variants set")]
    MultipleVariants,

    /// Tagged wrapper is missing its discriminator key
    #[error("missing variant field: {0}")]
    MissingVariantField(String),

    /// Tagged wrapper is missing its payload key
    #[error("missing value field: {0}")]
    MissingValueField(String),

    /// Discriminator is present but is not a string
    #[error("invalid variant tag: {0}")]
    InvalidVariantTag(#[source] serde_json::Error),

    /// Discriminator names no field of the record
    #[error("unknown variant: {0}")]
    UnknownVariant(String),

    /// More than one spec field carries the same tag
    #[error("multiple fields matched")]
    MultipleFieldsMatched(String),

    /// Tagged decode selected a field but its payload is the field's zero value
    #[error("zero value for variant: {0}")]
    ZeroPayload(String),

    /// Untagged decode found no field that accepts the input
    #[error("no field matched")]
    NoFieldMatched,

    /// Wire bytes are not parseable as JSON (or not an object, where one is required)
    #[error(transparent)]
    MalformedInput(serde_json::Error),

    /// The payload failed to decode into the selected field's type
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// The payload failed to encode
    #[error(transparent)]
    Encode(serde_json::Error),
}

impl Error {
    /// Create a "missing variant field" error for the given wire key
    #[must_use]
    pub fn missing_variant_field(key: &str) -> Self {
        Self::MissingVariantField(key.to_string())
    }

    /// Create a "missing value field" error for the given wire key
    #[must_use]
    pub fn missing_value_field(key: &str) -> Self {
        Self::MissingValueField(key.to_string())
    }

    /// Create an "unknown variant" error for the given tag
    #[must_use]
    pub fn unknown_variant(tag: impl Into<String>) -> Self {
        Self::UnknownVariant(tag.into())
    }
}
