mod parse;

use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Data, DataStruct, DeriveInput, Fields, Path, parse_macro_input};

use proc_macro_crate::{FoundCrate, crate_name};

fn resolve_tributary_core_path() -> Path {
    // Prefer a direct dependency, then the facade's hidden re-export.
    match crate_name("tributary-core") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            return syn::parse_quote! { ::#ident };
        }
        Ok(FoundCrate::Itself) => return syn::parse_quote! { ::tributary_core },
        Err(_) => {}
    }
    match crate_name("tributary") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            syn::parse_quote! { ::#ident::__core }
        }
        _ => syn::parse_quote! { ::tributary_core },
    }
}

pub fn derive_schema_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Schema cannot be derived for generic types",
        ));
    }
    let Data::Struct(DataStruct {
        fields: Fields::Named(named),
        ..
    }) = &input.data
    else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Schema can only be derived for structs with named fields",
        ));
    };

    let core = resolve_tributary_core_path();
    let container = parse::container_attrs(&input.attrs)?;
    let ident = &input.ident;
    let schema_name = container
        .name
        .as_ref()
        .map_or_else(|| ident.to_string(), syn::LitStr::value);
    let schema_description = match &container.description {
        Some(d) => quote! { ::core::option::Option::Some(#d) },
        None => quote! { ::core::option::Option::None },
    };

    let mut specs = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let attrs = parse::field_attrs(field)?;
        let field_name = field_ident.to_string();
        let field_name = field_name.trim_start_matches("r#");

        let description = attrs.description.ok_or_else(|| {
            syn::Error::new_spanned(
                field_ident,
                format!("field `{field_name}` needs #[schema(description = \"...\")]"),
            )
        })?;

        let (inner_ty, nullable) = match parse::option_inner(&field.ty) {
            Some(inner) => (inner, true),
            None => (&field.ty, false),
        };
        let variant = match &attrs.ty {
            Some(lit) => parse::field_type_from_str(lit)?,
            None => parse::infer_field_type(inner_ty).ok_or_else(|| {
                syn::Error::new_spanned(
                    &field.ty,
                    "cannot infer schema type; add #[schema(ty = \"...\")]",
                )
            })?,
        };
        let numeric = matches!(variant, "Integer" | "Number");
        let variant = Ident::new(variant, Span::call_site());

        let mut spec = quote! {
            #core::schema::FieldSpec::new(#field_name, #core::schema::FieldType::#variant, #description)
        };
        if nullable {
            spec = quote! { #spec.nullable() };
        }
        if let Some(default) = &attrs.default {
            spec = quote! { #spec.default_value(#core::__private::serde_json::json!(#default)) };
        }
        for constraint in &attrs.constraints {
            let c = constraint.to_tokens(&core);
            spec = quote! { #spec.constraint(#c) };
        }
        // Range of the Rust integer type, unless bounded explicitly.
        if numeric && let Some((int_ty, lower, upper)) = parse::integer_range(inner_ty) {
            if lower && !attrs.constraints.iter().any(parse::ConstraintAttr::bounds_below) {
                spec = quote! {
                    #spec.constraint(#core::schema::Constraint::Ge(::core::primitive::#int_ty::MIN as f64))
                };
            }
            if upper && !attrs.constraints.iter().any(parse::ConstraintAttr::bounds_above) {
                spec = quote! {
                    #spec.constraint(#core::schema::Constraint::Le(::core::primitive::#int_ty::MAX as f64))
                };
            }
        }
        specs.push(spec);
    }

    Ok(quote! {
        impl #core::schema::Schematic for #ident {
            fn schema() -> &'static #core::schema::Schema {
                static SCHEMA: ::std::sync::OnceLock<#core::schema::Schema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    #core::schema::Schema::new(
                        #schema_name,
                        #schema_description,
                        ::std::vec![#(#specs),*],
                    )
                })
            }
        }
    })
}
