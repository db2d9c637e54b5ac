//! Record derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{field_attrs, struct_attrs};
use crate::common::syn_types::{is_integer_type, is_option};
use crate::sql_ident::{sql_name, sql_name_lit};

struct FieldInfo<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    column: String,
    is_key: bool,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let struct_attrs = struct_attrs(&input.attrs)?;
    let table = struct_attrs
        .table
        .as_ref()
        .map(|lit| sql_name_lit(lit, "table"))
        .transpose()?;

    let mut infos = Vec::with_capacity(fields.len());
    let mut explicit_key = None;
    let mut seen = HashSet::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = field_attrs(&field.attrs)?;
        if attrs.skip {
            if attrs.is_id {
                return Err(syn::Error::new_spanned(
                    field,
                    "the key field cannot be skipped",
                ));
            }
            continue;
        }

        let column = match &attrs.column {
            Some(lit) => sql_name_lit(lit, "column")?,
            None => {
                let raw = ident.to_string();
                sql_name(raw.strip_prefix("r#").unwrap_or(&raw), ident.span(), "column")?
            }
        };

        if !seen.insert(column.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate column '{column}'"),
            ));
        }

        if attrs.is_id {
            if explicit_key.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one field can be marked #[bean(id)]",
                ));
            }
            explicit_key = Some(infos.len());
        }

        infos.push(FieldInfo {
            ident,
            ty: &field.ty,
            column,
            is_key: false,
        });
    }

    // A field named `id` is the key unless another field is marked explicitly.
    let key_index = explicit_key.or_else(|| infos.iter().position(|f| f.ident == "id"));
    if let Some(i) = key_index {
        let key = &mut infos[i];
        if is_option(key.ty) {
            return Err(syn::Error::new_spanned(
                key.ty,
                "the key field must be a plain integer, not an Option",
            ));
        }
        if !is_integer_type(key.ty) {
            return Err(syn::Error::new_spanned(
                key.ty,
                "the key field must be an integer type (i8..i64, u8..u64)",
            ));
        }
        key.is_key = true;
    }

    let field_entries: Vec<_> = infos
        .iter()
        .map(|f| {
            let ident = f.ident;
            let ty = f.ty;
            let column = &f.column;
            let is_key = f.is_key;
            quote! {
                ::beansql::FieldValue {
                    name: ::std::string::String::from(#column),
                    kind: <#ty as ::beansql::ScalarField>::KIND,
                    value: ::beansql::ScalarField::to_value(&self.#ident),
                    key: #is_key,
                }
            }
        })
        .collect();

    let assignments: Vec<_> = infos
        .iter()
        .map(|f| {
            let ident = f.ident;
            let column = &f.column;
            quote! {
                ::beansql::__private::assign_field(&mut self.#ident, #column, __params)?;
            }
        })
        .collect();

    let table_fn = table.map(|table| {
        quote! {
            fn table_name(&self) -> ::std::string::String {
                ::std::string::String::from(#table)
            }
        }
    });

    let entity_impl = key_index.map(|i| {
        let key = &infos[i];
        let ident = key.ident;
        let ty = key.ty;
        let column = &key.column;
        let message = format!("key '{column}' does not fit in an i64");
        quote! {
            impl #impl_generics ::beansql::Entity for #name #ty_generics #where_clause {
                fn id_column(&self) -> &str {
                    #column
                }

                fn id(&self) -> ::beansql::BeanResult<i64> {
                    <i64 as ::core::convert::TryFrom<#ty>>::try_from(self.#ident)
                        .map_err(|_| ::beansql::BeanError::introspection(#type_name, #message))
                }
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::beansql::Record for #name #ty_generics #where_clause {
            fn type_name(&self) -> &str {
                #type_name
            }

            #table_fn

            fn field_values(&self) -> ::beansql::BeanResult<::std::vec::Vec<::beansql::FieldValue>> {
                ::std::result::Result::Ok(::std::vec![#(#field_entries),*])
            }
        }

        #entity_impl

        impl #impl_generics ::beansql::Inflate for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn inflate_from<__P: ::beansql::ParamSource + ?Sized>(
                &mut self,
                __params: &__P,
            ) -> ::beansql::BeanResult<()> {
                #(#assignments)*
                ::std::result::Result::Ok(())
            }
        }
    })
}
