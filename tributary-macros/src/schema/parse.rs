use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Expr, Field, GenericArgument, LitInt, LitStr, Path, PathArguments, Token, Type,
    punctuated::Punctuated,
};

#[derive(Default)]
pub struct ContainerAttrs {
    pub name: Option<LitStr>,
    pub description: Option<LitStr>,
}

pub enum ConstraintAttr {
    Bound(&'static str, Expr),
    Length(&'static str, LitInt),
    Choices(Vec<LitStr>),
}

impl ConstraintAttr {
    pub fn bounds_below(&self) -> bool {
        matches!(self, Self::Bound("Ge" | "Gt", _))
    }

    pub fn bounds_above(&self) -> bool {
        matches!(self, Self::Bound("Le" | "Lt", _))
    }

    pub fn to_tokens(&self, core: &Path) -> TokenStream2 {
        match self {
            Self::Bound(variant, expr) => {
                let v = syn::Ident::new(variant, proc_macro2::Span::call_site());
                quote! { #core::schema::Constraint::#v((#expr) as f64) }
            }
            Self::Length(variant, lit) => {
                let v = syn::Ident::new(variant, proc_macro2::Span::call_site());
                quote! { #core::schema::Constraint::#v(#lit) }
            }
            Self::Choices(values) => {
                quote! {
                    #core::schema::Constraint::Choices(
                        ::std::vec![#(::std::string::String::from(#values)),*]
                    )
                }
            }
        }
    }
}

#[derive(Default)]
pub struct FieldAttrs {
    pub description: Option<LitStr>,
    pub default: Option<Expr>,
    pub ty: Option<LitStr>,
    pub constraints: Vec<ConstraintAttr>,
}

fn schema_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|a| a.path().is_ident("schema"))
}

pub fn container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();
    for attr in schema_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                out.name = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("description") {
                out.description = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `name` or `description`"))
            }
        })?;
    }
    Ok(out)
}

pub fn field_attrs(field: &Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in schema_attrs(&field.attrs) {
        attr.parse_nested_meta(|meta| {
            let path = &meta.path;
            if path.is_ident("description") {
                out.description = Some(meta.value()?.parse()?);
            } else if path.is_ident("default") {
                out.default = Some(meta.value()?.parse()?);
            } else if path.is_ident("ty") {
                out.ty = Some(meta.value()?.parse()?);
            } else if path.is_ident("ge") {
                out.constraints
                    .push(ConstraintAttr::Bound("Ge", meta.value()?.parse()?));
            } else if path.is_ident("gt") {
                out.constraints
                    .push(ConstraintAttr::Bound("Gt", meta.value()?.parse()?));
            } else if path.is_ident("le") {
                out.constraints
                    .push(ConstraintAttr::Bound("Le", meta.value()?.parse()?));
            } else if path.is_ident("lt") {
                out.constraints
                    .push(ConstraintAttr::Bound("Lt", meta.value()?.parse()?));
            } else if path.is_ident("min_length") {
                out.constraints
                    .push(ConstraintAttr::Length("MinLength", meta.value()?.parse()?));
            } else if path.is_ident("max_length") {
                out.constraints
                    .push(ConstraintAttr::Length("MaxLength", meta.value()?.parse()?));
            } else if path.is_ident("choices") {
                let content;
                syn::parenthesized!(content in meta.input);
                let values = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                if values.is_empty() {
                    return Err(meta.error("`choices` needs at least one value"));
                }
                out.constraints
                    .push(ConstraintAttr::Choices(values.into_iter().collect()));
            } else {
                return Err(meta.error("unsupported schema attribute"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// `Option<T>` -> `Some(T)`.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    if let Type::Path(tp) = ty
        && tp.qself.is_none()
        && let Some(seg) = tp.path.segments.last()
        && seg.ident == "Option"
        && let PathArguments::AngleBracketed(args) = &seg.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner);
    }
    None
}

/// Map a Rust type to a `FieldType` variant name.
pub fn infer_field_type(ty: &Type) -> Option<&'static str> {
    match ty {
        Type::Reference(r) => infer_field_type(&r.elem),
        Type::Path(tp) => {
            let seg = tp.path.segments.last()?;
            let name = seg.ident.to_string();
            match name.as_str() {
                "String" | "str" => Some("String"),
                "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64"
                | "usize" => Some("Integer"),
                "f32" | "f64" => Some("Number"),
                "bool" => Some("Boolean"),
                "NaiveDate" => Some("Date"),
                "NaiveDateTime" => Some("NaiveDateTime"),
                "DateTime" => Some("DateTime"),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Primitive integer types whose range is narrower than the engine's, with
/// whether a lower and an upper bound apply.
pub fn integer_range(ty: &Type) -> Option<(&syn::Ident, bool, bool)> {
    let Type::Path(tp) = ty else {
        return None;
    };
    let ident = &tp.path.segments.last()?.ident;
    let (lower, upper) = match ident.to_string().as_str() {
        "i8" | "i16" | "i32" | "u8" | "u16" | "u32" => (true, true),
        "u64" | "usize" => (true, false),
        _ => return None,
    };
    Some((ident, lower, upper))
}

/// Map an explicit `ty = "..."` override to a `FieldType` variant name.
pub fn field_type_from_str(lit: &LitStr) -> syn::Result<&'static str> {
    match lit.value().as_str() {
        "string" => Ok("String"),
        "integer" => Ok("Integer"),
        "number" => Ok("Number"),
        "boolean" => Ok("Boolean"),
        "date" => Ok("Date"),
        "datetime" => Ok("DateTime"),
        "naive_datetime" => Ok("NaiveDateTime"),
        other => Err(syn::Error::new_spanned(
            lit,
            format!(
                "unknown schema type `{other}`; expected string, integer, number, boolean, date, datetime or naive_datetime"
            ),
        )),
    }
}
