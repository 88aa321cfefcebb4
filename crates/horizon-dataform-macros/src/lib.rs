//! Procedural macros for Horizon Dataform record and choice types.
//!
//! This crate provides `#[derive(Record)]` for structs edited by a record
//! widget and `#[derive(Choice)]` for fieldless enums shown as selectable
//! lists.
//!
//! # Attributes
//!
//! ## `#[field(...)]`
//!
//! Per-field display metadata:
//!
//! ```ignore
//! #[derive(Record)]
//! struct Settings {
//!     #[field(default = true)]
//!     enabled: bool,
//!
//!     #[field(default = "untitled")]
//!     title: String,
//!
//!     // Edit a percentage as an integer while storing a ratio
//!     #[field(display = i32, from_display = percent_to_ratio, to_display = ratio_to_percent)]
//!     ratio: f64,
//! }
//! ```
//!
//! Field attributes:
//! - `default = expr`: Default value, pushed into the control at construction.
//!   String literals are converted to `String`.
//! - `default`: Use `Default::default()` as the default value
//! - `display = Type`: Pick the control for `Type` instead of the field type
//! - `from_display = fn`: Converts the control value (display type) into the field value
//! - `to_display = fn`: Converts the field value into the control value (display type)
//!
//! ## `#[record(...)]`
//!
//! Struct-level configuration:
//!
//! ```ignore
//! #[derive(Record)]
//! #[record(name = "Camera settings")]  // Record type name used by containers
//! struct CameraSettings {
//!     // ...
//! }
//! ```
//!
//! ## `#[choice(...)]`
//!
//! Variant-level configuration for `#[derive(Choice)]`:
//!
//! ```ignore
//! #[derive(Clone, Copy, Choice)]
//! enum Interpolation {
//!     #[choice(label = "Nearest neighbour")]
//!     Nearest,
//!     Linear,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Field, Fields, Ident, Lit, Token, Type,
    parse_macro_input,
};

/// Derive the `Record` and `FieldKind` traits for a struct with named fields.
///
/// This macro generates:
/// - A `RecordSchema` listing every field in declared order
/// - Conversions between the struct and its `RecordValue`
/// - A `FieldKind` implementation so the struct can be nested in other records
///
/// # Example
///
/// ```ignore
/// use horizon_dataform_macros::Record;
///
/// #[derive(Record)]
/// struct Flags {
///     flag: bool,
///     #[field(default = 5)]
///     count: i32,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record, field))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_derive_record(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive the `Choice` and `FieldKind` traits for a fieldless enum.
///
/// # Example
///
/// ```ignore
/// use horizon_dataform_macros::Choice;
///
/// #[derive(Clone, Copy, Choice)]
/// enum Shape {
///     Circle,
///     Square,
/// }
/// ```
#[proc_macro_derive(Choice, attributes(choice))]
pub fn derive_choice(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_derive_choice(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Parsed `#[field(...)]` information.
struct FieldInfo {
    ident: Ident,
    ty: Type,
    default: Option<DefaultValue>,
    display: Option<Type>,
    from_display: Option<Expr>,
    to_display: Option<Expr>,
}

/// How a field default was declared.
enum DefaultValue {
    /// `#[field(default)]`
    Implicit,
    /// `#[field(default = expr)]`
    Explicit(Expr),
}

fn impl_derive_record(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record derive does not support generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Record derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Record derive only supports structs",
            ));
        }
    };

    let type_name = parse_record_name(&input.attrs)?.unwrap_or_else(|| struct_name.to_string());

    let infos = fields
        .iter()
        .map(parse_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let schema_fields: Vec<TokenStream2> = infos.iter().map(generate_field_schema).collect();

    let to_fields = infos.iter().map(|info| {
        let ident = &info.ident;
        let name = ident.to_string();
        quote! {
            .with_field(#name, ::horizon_dataform_core::FieldKind::to_value(&self.#ident))
        }
    });

    let from_fields = infos.iter().map(|info| {
        let ident = &info.ident;
        let name = ident.to_string();
        quote! {
            #ident: ::horizon_dataform_core::take_field(&mut value, #name)?,
        }
    });

    let expanded = quote! {
        impl ::horizon_dataform_core::Record for #struct_name {
            fn schema() -> ::horizon_dataform_core::RecordSchema {
                ::horizon_dataform_core::RecordSchema::new(#type_name)
                    #(.with_field(#schema_fields))*
            }

            fn to_record_value(&self) -> ::horizon_dataform_core::RecordValue {
                ::horizon_dataform_core::RecordValue::new(#type_name)
                    #(#to_fields)*
            }

            #[allow(unused_mut)]
            fn from_record_value(
                mut value: ::horizon_dataform_core::RecordValue,
            ) -> ::horizon_dataform_core::ValueResult<Self> {
                ::horizon_dataform_core::expect_record_type(&value, #type_name)?;
                Ok(Self {
                    #(#from_fields)*
                })
            }
        }

        impl ::horizon_dataform_core::FieldKind for #struct_name {
            fn field_type() -> ::horizon_dataform_core::FieldType {
                ::horizon_dataform_core::FieldType::Record(
                    <Self as ::horizon_dataform_core::Record>::schema(),
                )
            }

            fn to_value(&self) -> ::horizon_dataform_core::Value {
                ::horizon_dataform_core::Value::Record(
                    <Self as ::horizon_dataform_core::Record>::to_record_value(self),
                )
            }

            fn from_value(
                value: ::horizon_dataform_core::Value,
            ) -> ::horizon_dataform_core::ValueResult<Self> {
                match value {
                    ::horizon_dataform_core::Value::Record(record) => {
                        <Self as ::horizon_dataform_core::Record>::from_record_value(record)
                    }
                    other => Err(::horizon_dataform_core::ValueError::type_mismatch(
                        #type_name,
                        other.kind_name(),
                    )),
                }
            }
        }
    };

    Ok(expanded)
}

/// Parse struct-level `#[record(name = "...")]`.
fn parse_record_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;

    for attr in attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(parse_string(meta.value()?.parse()?)?);
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute"))
            }
        })?;
    }

    Ok(name)
}

/// Parse a field and its `#[field(...)]` attributes.
fn parse_field(field: &Field) -> syn::Result<FieldInfo> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Record fields must be named"))?;

    let mut info = FieldInfo {
        ident,
        ty: field.ty.clone(),
        default: None,
        display: None,
        from_display: None,
        to_display: None,
    };

    for attr in &field.attrs {
        if !attr.path().is_ident("field") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if meta.input.peek(Token![=]) {
                    let expr: Expr = meta.value()?.parse()?;
                    info.default = Some(DefaultValue::Explicit(expr));
                } else {
                    info.default = Some(DefaultValue::Implicit);
                }
            } else if meta.path.is_ident("display") {
                info.display = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("from_display") {
                info.from_display = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("to_display") {
                info.to_display = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error("unsupported field attribute"));
            }
            Ok(())
        })?;
    }

    Ok(info)
}

/// Generate the `FieldSchema` expression for one field.
fn generate_field_schema(info: &FieldInfo) -> TokenStream2 {
    let name = info.ident.to_string();
    let ty = &info.ty;
    let display_ty = info.display.as_ref().unwrap_or(ty);

    let default = info.default.as_ref().map(|default| {
        let expr = match default {
            DefaultValue::Implicit => quote! { <#ty as ::core::default::Default>::default() },
            DefaultValue::Explicit(Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            })) => quote! { ::std::string::String::from(#lit) },
            DefaultValue::Explicit(expr) => quote! { #expr },
        };
        quote! {
            .with_default({
                let default: #ty = #expr;
                ::horizon_dataform_core::FieldKind::to_value(&default)
            })
        }
    });

    let display = info.display.as_ref().map(|display| {
        quote! {
            .with_display(<#display as ::horizon_dataform_core::FieldKind>::field_type())
        }
    });

    let from_display = info.from_display.as_ref().map(|f| {
        quote! {
            .with_from_display(::horizon_dataform_core::converter::<#display_ty, #ty, _>(#f))
        }
    });

    let to_display = info.to_display.as_ref().map(|f| {
        quote! {
            .with_to_display(::horizon_dataform_core::converter::<#ty, #display_ty, _>(#f))
        }
    });

    quote! {
        ::horizon_dataform_core::FieldSchema::new(
            #name,
            <#ty as ::horizon_dataform_core::FieldKind>::field_type(),
        )
        #default
        #display
        #from_display
        #to_display
    }
}

fn impl_derive_choice(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let enum_name = &input.ident;
    let type_name = enum_name.to_string();

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Choice derive only supports enums",
            ));
        }
    };

    if variants.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "Choice derive requires at least one variant",
        ));
    }

    let mut idents = Vec::new();
    let mut names = Vec::new();
    let mut labels = Vec::new();

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Choice derive only supports fieldless variants",
            ));
        }

        let name = variant.ident.to_string();
        let mut label = name.clone();

        for attr in &variant.attrs {
            if !attr.path().is_ident("choice") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("label") {
                    label = parse_string(meta.value()?.parse()?)?;
                    Ok(())
                } else {
                    Err(meta.error("unsupported choice attribute"))
                }
            })?;
        }

        idents.push(variant.ident.clone());
        names.push(name);
        labels.push(label);
    }

    let expanded = quote! {
        impl ::horizon_dataform_core::Choice for #enum_name {
            fn choice_spec() -> ::horizon_dataform_core::ChoiceSpec {
                ::horizon_dataform_core::ChoiceSpec {
                    type_name: ::std::string::String::from(#type_name),
                    variants: ::std::vec![
                        #(::horizon_dataform_core::ChoiceVariant {
                            name: ::std::string::String::from(#names),
                            label: ::std::string::String::from(#labels),
                        }),*
                    ],
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    #(Self::#idents => #names,)*
                }
            }

            fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#names => ::core::option::Option::Some(Self::#idents),)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::horizon_dataform_core::FieldKind for #enum_name {
            fn field_type() -> ::horizon_dataform_core::FieldType {
                ::horizon_dataform_core::FieldType::Choice(
                    <Self as ::horizon_dataform_core::Choice>::choice_spec(),
                )
            }

            fn to_value(&self) -> ::horizon_dataform_core::Value {
                ::horizon_dataform_core::Value::Choice(::std::string::String::from(
                    <Self as ::horizon_dataform_core::Choice>::name(self),
                ))
            }

            fn from_value(
                value: ::horizon_dataform_core::Value,
            ) -> ::horizon_dataform_core::ValueResult<Self> {
                ::horizon_dataform_core::choice_from_value(value)
            }
        }
    };

    Ok(expanded)
}

/// Extract a string literal from an attribute value.
fn parse_string(expr: Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) => Ok(lit_str.value()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}
