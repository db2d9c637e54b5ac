//! Attribute parsing for the Record derive macro.
//!
//! Handles struct-level and field-level `#[bean(...)]` attributes.

use syn::{Attribute, LitStr, Result};

/// Struct-level `#[bean(table = "...")]`.
#[derive(Default)]
pub(crate) struct StructAttrList {
    pub(crate) table: Option<LitStr>,
}

impl syn::parse::Parse for StructAttrList {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut table = None;

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            let _: syn::Token![=] = input.parse()?;
            let value: LitStr = input.parse()?;

            match ident.to_string().as_str() {
                "table" => table = Some(value),
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown struct attribute `{other}` (expected `table`)"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(Self { table })
    }
}

/// Field-level `#[bean(id, skip, column = "...")]`.
#[derive(Default)]
pub(crate) struct FieldAttrList {
    pub(crate) is_id: bool,
    pub(crate) skip: bool,
    pub(crate) column: Option<LitStr>,
}

impl syn::parse::Parse for FieldAttrList {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = Self::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            match ident.to_string().as_str() {
                "id" => attrs.is_id = true,
                "skip" => attrs.skip = true,
                "column" => {
                    let _: syn::Token![=] = input.parse()?;
                    attrs.column = Some(input.parse()?);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown field attribute `{other}` (expected `id`, `skip` or `column`)"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attrs)
    }
}

/// Merge every `#[bean(...)]` on a struct.
pub(crate) fn struct_attrs(attrs: &[Attribute]) -> Result<StructAttrList> {
    let mut out = StructAttrList::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("bean")) {
        let parsed: StructAttrList = attr.parse_args()?;
        if parsed.table.is_some() {
            out.table = parsed.table;
        }
    }
    Ok(out)
}

/// Merge every `#[bean(...)]` on a field.
pub(crate) fn field_attrs(attrs: &[Attribute]) -> Result<FieldAttrList> {
    let mut out = FieldAttrList::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("bean")) {
        let parsed: FieldAttrList = attr.parse_args()?;
        out.is_id |= parsed.is_id;
        out.skip |= parsed.skip;
        if parsed.column.is_some() {
            out.column = parsed.column;
        }
    }
    Ok(out)
}
