//! Tagged and untagged JSON unions over a record of optional variants
//!
//! A union is described by a plain struct, the *spec*, with one field per possible variant.
//! At most one field may hold a non-zero value at a time. Two containers wrap a spec:
//!
//! - [`TaggedUnion`] encodes the active variant inside a wrapper object that names it:
//!   `{"type": "circle", "value": {"radius": 5}}`
//! - [`Union`] encodes the active variant's payload directly (`{"radius": 5}`) and picks
//!   the variant on decode by trying each field in declaration order
//!
//! # Usage
//!
//! ```
//! use json_union::{TaggedUnion, Union, UnionSpec};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! #[serde(default)]
//! struct Circle {
//!     radius: f64,
//! }
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! #[serde(default)]
//! struct Rectangle {
//!     width:  f64,
//!     height: f64,
//! }
//!
//! #[derive(Debug, Default, PartialEq, UnionSpec)]
//! struct Shape {
//!     #[variant(tag = "circle")]
//!     circle:    Option<Circle>,
//!     #[variant(tag = "rectangle")]
//!     rectangle: Option<Rectangle>,
//! }
//!
//! let shape = TaggedUnion::new(Shape {
//!     circle: Some(Circle { radius: 5.0 }),
//!     ..Shape::default()
//! });
//! assert_eq!(
//!     shape.encode().expect("one variant is set"),
//!     br#"{"type":"circle","value":{"radius":5}}"#
//! );
//!
//! let decoded = Union::<Shape>::decode(br#"{"height":10}"#).expect("rectangle matches");
//! assert_eq!(
//!     decoded.value.rectangle,
//!     Some(Rectangle { width: 0.0, height: 10.0 })
//! );
//! ```
//!
//! # Zero values
//!
//! A field counts as set when it differs from its type's `Default`. `Option` fields are the
//! natural fit: `None` is unset. A payload that is legitimately equal to its default (a
//! plain `Circle` field of radius 0) cannot be told apart from an unset field.

extern crate self as json_union;

mod error;
mod json_object;
pub mod payload;
mod scanner;
mod spec;
mod tagged;
mod untagged;

#[cfg(test)]
mod test_shapes;

pub use error::{Error, Result};
pub use json_union_macros::UnionSpec;
pub use payload::{DecodeMode, PayloadError};
pub use scanner::{ActiveVariant, ScannedField, VariantState, scan};
pub use spec::{
    DEFAULT_TAG_KEY, DEFAULT_VALUE_KEY, FieldNameKeys, FieldNameResolver, UnionSpec, VariantField,
};
pub use tagged::TaggedUnion;
pub use untagged::Union;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
