//! Derive macros for beansql
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod common;
mod record;
mod sql_ident;

/// Derive `Record`, `Inflate` and (when a key field exists) `Entity`.
///
/// # Example
///
/// ```ignore
/// use beansql::Record;
///
/// #[derive(Record, Default)]
/// struct TestBean {
///     name: Option<String>,
///     age: i32,
///     id: i64,
/// }
/// ```
///
/// # Generated
///
/// - `Record`: type name `"TestBean"`, table `testbean`, one field entry per
///   non-skipped field in declaration order
/// - `Entity`: when a field is named `id` or marked `#[bean(id)]`
/// - `Inflate`: assigns each field from the parameter named after its column
///
/// # Attributes
///
/// - `#[bean(table = "name")]` - Override the table name
/// - `#[bean(id)]` - Mark the integer key field (defaults to a field named `id`)
/// - `#[bean(column = "name")]` - Map field to a different column name
/// - `#[bean(skip)]` - Leave the field out of statements and inflation
#[proc_macro_derive(Record, attributes(bean))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
