//! UnionSpec derive macro implementation

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, parse_macro_input, parse_quote};

use crate::shared::{ContainerAttrs, VariantAttrs, option_inner_type};

/// Implementation of the UnionSpec derive macro
pub fn derive_union_spec_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let container = ContainerAttrs::from_attrs(&input.attrs)?;
    let fields = record_fields(input)?;

    let mut descriptors = Vec::new();
    let mut field_types = Vec::new();
    for field in fields {
        let attrs = VariantAttrs::from_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        descriptors.push(generate_descriptor(field, &attrs, &container));
        field_types.push(field.ty.clone());
    }

    let struct_name = &input.ident;

    // Generic specs get the field bounds the generated accessors rely on
    let mut generics = input.generics.clone();
    if generics.type_params().next().is_some() {
        let (_, input_ty_generics, _) = input.generics.split_for_impl();
        let where_clause = generics.make_where_clause();
        where_clause.predicates.push(parse_quote! {
            #struct_name #input_ty_generics: ::core::default::Default
        });
        for param in input.generics.type_params() {
            let ident = &param.ident;
            where_clause.predicates.push(parse_quote! { #ident: 'static });
        }
        for ty in &field_types {
            where_clause.predicates.push(parse_quote! {
                #ty: ::core::default::Default
                    + ::core::cmp::PartialEq
                    + ::json_union::__private::serde::Serialize
                    + ::json_union::__private::serde::de::DeserializeOwned
            });
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let field_name_keys = generate_field_name_keys(&container);

    Ok(quote! {
        impl #impl_generics ::json_union::UnionSpec for #struct_name #ty_generics #where_clause {
            const FIELDS: ::core::option::Option<&'static [::json_union::VariantField<Self>]> =
                ::core::option::Option::Some(&[
                    #(#descriptors,)*
                ]);

            #field_name_keys
        }
    })
}

/// Named fields of the deriving struct; unit structs are records with no fields
fn record_fields(input: &DeriveInput) -> syn::Result<Vec<&Field>> {
    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(named) => Ok(named.named.iter().collect()),
            Fields::Unit => Ok(Vec::new()),
            Fields::Unnamed(unnamed) => Err(syn::Error::new_spanned(
                unnamed,
                "UnionSpec can only be derived for structs with named fields",
            )),
        },
        Data::Enum(data_enum) => Err(syn::Error::new_spanned(
            data_enum.enum_token,
            "UnionSpec can only be derived for structs",
        )),
        Data::Union(data_union) => Err(syn::Error::new_spanned(
            data_union.union_token,
            "UnionSpec can only be derived for structs",
        )),
    }
}

/// Generate one `VariantField` entry of the field table
fn generate_descriptor(
    field: &Field,
    attrs: &VariantAttrs,
    container: &ContainerAttrs,
) -> TokenStream2 {
    // Only named fields reach this point
    let Some(field_ident) = field.ident.as_ref() else {
        return quote! {};
    };
    let field_name = field_ident.unraw().to_string();

    let tag = attrs
        .tag
        .clone()
        .or_else(|| container.rename_all.map(|rule| rule.apply(&field_name)));
    let tag_token = tag.map_or_else(
        || quote! { ::core::option::Option::None },
        |tag| quote! { ::core::option::Option::Some(#tag) },
    );

    // Option fields expose the payload itself once set
    let value_expr = if option_inner_type(&field.ty).is_some() {
        quote! {
            match &spec.#field_ident {
                ::core::option::Option::Some(inner) => inner as &(dyn ::core::any::Any + 'static),
                ::core::option::Option::None => &spec.#field_ident as &(dyn ::core::any::Any + 'static),
            }
        }
    } else {
        quote! { &spec.#field_ident as &(dyn ::core::any::Any + 'static) }
    };

    quote! {
        ::json_union::VariantField {
            name: #field_name,
            tag: #tag_token,
            is_zero: |spec| ::json_union::payload::is_zero(&spec.#field_ident),
            value: |spec| #value_expr,
            encode: |spec| ::json_union::payload::encode(&spec.#field_ident),
            decode: |value, mode| {
                ::core::result::Result::Ok(Self {
                    #field_ident: ::json_union::payload::decode(value, mode)?,
                    ..::core::default::Default::default()
                })
            },
        }
    }
}

/// Generate the `field_name_keys` override, if the container asks for one
fn generate_field_name_keys(container: &ContainerAttrs) -> TokenStream2 {
    if container.resolver {
        return quote! {
            fn field_name_keys() -> ::json_union::FieldNameKeys {
                let (tag, value) =
                    <Self as ::json_union::FieldNameResolver>::tagged_field_names();
                ::json_union::FieldNameKeys::new(tag, value)
            }
        };
    }

    if container.tag_key.is_none() && container.value_key.is_none() {
        return quote! {};
    }

    let tag_key = container.tag_key.as_ref().map_or_else(
        || quote! { ::json_union::FieldNameKeys::DEFAULT.tag },
        |key| quote! { #key },
    );
    let value_key = container.value_key.as_ref().map_or_else(
        || quote! { ::json_union::FieldNameKeys::DEFAULT.value },
        |key| quote! { #key },
    );

    quote! {
        fn field_name_keys() -> ::json_union::FieldNameKeys {
            ::json_union::FieldNameKeys::new(#tag_key, #value_key)
        }
    }
}
