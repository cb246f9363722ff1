//! Shape payloads and specs shared by the container tests

use serde::{Deserialize, Serialize};

use crate::{FieldNameResolver, UnionSpec, VariantField};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Circle {
    pub radius: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rectangle {
    pub width:  f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Triangle {
    pub base:   f64,
    pub height: f64,
}

pub fn circle(radius: f64) -> Circle {
    Circle { radius }
}

pub fn rectangle(width: f64, height: f64) -> Rectangle {
    Rectangle { width, height }
}

pub fn triangle(base: f64, height: f64) -> Triangle {
    Triangle { base, height }
}

#[derive(Debug, Clone, Default, PartialEq, UnionSpec)]
pub struct Shape {
    #[variant(tag = "circle")]
    pub circle:    Option<Circle>,
    #[variant(tag = "rectangle")]
    pub rectangle: Option<Rectangle>,
    #[variant(tag = "triangle")]
    pub triangle:  Option<Triangle>,
}

#[derive(Debug, Clone, Default, PartialEq, UnionSpec)]
#[union(tag_key = "kind", value_key = "data")]
pub struct CustomKeysShape {
    #[variant(tag = "circle")]
    pub circle:    Option<Circle>,
    #[variant(tag = "rectangle")]
    pub rectangle: Option<Rectangle>,
}

#[derive(Debug, Clone, Default, PartialEq, UnionSpec)]
#[union(resolver)]
pub struct ResolvedKeysShape {
    #[variant(tag = "circle")]
    pub circle:    Option<Circle>,
    #[variant(tag = "rectangle")]
    pub rectangle: Option<Rectangle>,
}

impl FieldNameResolver for ResolvedKeysShape {
    fn tagged_field_names() -> (&'static str, &'static str) {
        ("kind", "data")
    }
}

/// Variants held by value rather than in an `Option`
#[derive(Debug, Clone, Default, PartialEq, UnionSpec)]
pub struct NonOptionShape {
    #[variant(tag = "circle")]
    pub circle:    Circle,
    #[variant(tag = "rectangle")]
    pub rectangle: Rectangle,
}

/// No explicit tags: field names go on the wire
#[derive(Debug, Clone, Default, PartialEq, UnionSpec)]
pub struct UntaggedNamesShape {
    pub circle:    Option<Circle>,
    pub rectangle: Option<Rectangle>,
    pub triangle:  Option<Triangle>,
}

#[derive(Debug, Clone, Default, PartialEq, UnionSpec)]
#[union(rename_all = "PascalCase")]
pub struct PascalShape {
    pub circle:    Option<Circle>,
    #[variant(tag = "rect")]
    pub rectangle: Option<Rectangle>,
}

#[derive(Debug, Clone, Default, PartialEq, UnionSpec)]
pub struct DuplicateTagShape {
    #[variant(tag = "circle")]
    pub circle: Option<Circle>,
    #[variant(tag = "circle")]
    pub round:  Option<Circle>,
}

#[derive(Debug, Clone, Default, PartialEq, UnionSpec)]
pub struct EmptyShape {}

/// A spec that is not a record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scalar(pub i64);

impl UnionSpec for Scalar {
    const FIELDS: Option<&'static [VariantField<Self>]> = None;
}
