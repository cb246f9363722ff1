//! Attribute parsing shared by the `UnionSpec` derive

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase,
};
use syn::{Attribute, GenericArgument, LitStr, PathArguments, Type};

/// Case rule applied to field names when no explicit tag is given
#[derive(Clone, Copy)]
pub enum RenameRule {
    Lower,
    Upper,
    Snake,
    Camel,
    Pascal,
    Kebab,
    ScreamingSnake,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "snake_case" => Ok(Self::Snake),
            "camelCase" => Ok(Self::Camel),
            "PascalCase" => Ok(Self::Pascal),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            other => Err(syn::Error::new(
                lit.span(),
                format!("unknown rename_all rule `{other}`"),
            )),
        }
    }

    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase(),
            Self::Snake => name.to_snake_case(),
            Self::Camel => name.to_lower_camel_case(),
            Self::Pascal => name.to_upper_camel_case(),
            Self::Kebab => name.to_kebab_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
        }
    }
}

/// Parsed `#[union(...)]` attributes
#[derive(Default)]
pub struct ContainerAttrs {
    pub rename_all: Option<RenameRule>,
    pub tag_key:    Option<LitStr>,
    pub value_key:  Option<LitStr>,
    pub resolver:   bool,
}

impl ContainerAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("union")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    let s: LitStr = meta.value()?.parse()?;
                    parsed.rename_all = Some(RenameRule::parse(&s)?);
                    Ok(())
                } else if meta.path.is_ident("tag_key") {
                    parsed.tag_key = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("value_key") {
                    parsed.value_key = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("resolver") {
                    parsed.resolver = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported union attribute"))
                }
            })?;
        }

        if parsed.resolver {
            if let Some(key) = parsed.tag_key.as_ref().or(parsed.value_key.as_ref()) {
                return Err(syn::Error::new(
                    key.span(),
                    "`resolver` cannot be combined with `tag_key` or `value_key`",
                ));
            }
        }

        Ok(parsed)
    }
}

/// Parsed `#[variant(...)]` attributes
#[derive(Default)]
pub struct VariantAttrs {
    pub tag:  Option<String>,
    pub skip: bool,
}

impl VariantAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("variant")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("tag") {
                    let s: LitStr = meta.value()?.parse()?;
                    if s.value().is_empty() {
                        return Err(syn::Error::new(s.span(), "variant tag cannot be empty"));
                    }
                    parsed.tag = Some(s.value());
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported variant attribute"))
                }
            })?;
        }

        Ok(parsed)
    }
}

/// Returns `T` when `ty` is spelled `Option<T>` (optionally path-qualified)
pub fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, reason = "tests fail loudly on unexpected errors")]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn test_rename_rules() {
        let cases = [
            ("lowercase", "bounding_box"),
            ("UPPERCASE", "BOUNDING_BOX"),
            ("snake_case", "bounding_box"),
            ("camelCase", "boundingBox"),
            ("PascalCase", "BoundingBox"),
            ("kebab-case", "bounding-box"),
            ("SCREAMING_SNAKE_CASE", "BOUNDING_BOX"),
        ];

        for (rule, expected) in cases {
            let lit = LitStr::new(rule, proc_macro2::Span::call_site());
            let rule = RenameRule::parse(&lit).expect("known rule");
            assert_eq!(rule.apply("bounding_box"), expected);
        }
    }

    #[test]
    fn test_unknown_rename_rule() {
        let lit = LitStr::new("Title Case", proc_macro2::Span::call_site());
        assert!(RenameRule::parse(&lit).is_err());
    }

    #[test]
    fn test_container_attrs() {
        let attrs: Vec<Attribute> = vec![parse_quote! {
            #[union(rename_all = "PascalCase", tag_key = "kind")]
        }];
        let parsed = ContainerAttrs::from_attrs(&attrs).expect("valid attrs");
        assert!(parsed.rename_all.is_some());
        assert_eq!(parsed.tag_key.map(|key| key.value()), Some("kind".to_string()));
        assert!(parsed.value_key.is_none());
        assert!(!parsed.resolver);

        let attrs: Vec<Attribute> = vec![parse_quote! {
            #[union(resolver, value_key = "data")]
        }];
        assert!(ContainerAttrs::from_attrs(&attrs).is_err());
    }

    #[test]
    fn test_variant_attrs() {
        let attrs: Vec<Attribute> = vec![parse_quote! { #[variant(tag = "circle")] }];
        let parsed = VariantAttrs::from_attrs(&attrs).expect("valid attrs");
        assert_eq!(parsed.tag.as_deref(), Some("circle"));
        assert!(!parsed.skip);

        let attrs: Vec<Attribute> = vec![parse_quote! { #[variant(skip)] }];
        assert!(VariantAttrs::from_attrs(&attrs).expect("valid attrs").skip);

        let attrs: Vec<Attribute> = vec![parse_quote! { #[variant(tag = "")] }];
        assert!(VariantAttrs::from_attrs(&attrs).is_err());
    }

    #[test]
    fn test_option_inner_type() {
        let ty: Type = parse_quote! { Option<Circle> };
        assert!(option_inner_type(&ty).is_some());

        let ty: Type = parse_quote! { ::core::option::Option<Vec<u8>> };
        assert!(option_inner_type(&ty).is_some());

        let ty: Type = parse_quote! { Circle };
        assert!(option_inner_type(&ty).is_none());

        let ty: Type = parse_quote! { Vec<Option<Circle>> };
        assert!(option_inner_type(&ty).is_none());
    }
}
