//! Procedural macros for json_union

mod shared;
mod union_spec;

use proc_macro::TokenStream;

/// Derives `json_union::UnionSpec` for a struct whose fields are the possible variants of a
/// union.
///
/// # Example
///
/// ```ignore
/// #[derive(Default, UnionSpec)]
/// #[union(tag_key = "kind", value_key = "data")]
/// pub struct Shape {
///     #[variant(tag = "circle")]
///     circle: Option<Circle>,
///
///     #[variant(tag = "rectangle")]
///     rectangle: Option<Rectangle>,
/// }
/// ```
///
/// This will generate a field table with one entry per field, in declaration order. Each
/// entry knows its variant tag, how to test the field for its zero value, and how to encode
/// and decode the field's payload.
///
/// Container attributes (`#[union(...)]`):
/// - `rename_all = "..."` - derive tags from field names with a case rule
/// - `tag_key = "..."`, `value_key = "..."` - wire keys used by `TaggedUnion`
/// - `resolver` - take the wire keys from the type's `FieldNameResolver` impl
///
/// Field attributes (`#[variant(...)]`):
/// - `tag = "..."` - explicit variant tag
/// - `skip` - leave the field out of the table
#[proc_macro_derive(UnionSpec, attributes(union, variant))]
pub fn derive_union_spec(input: TokenStream) -> TokenStream {
    union_spec::derive_union_spec_impl(input)
}
