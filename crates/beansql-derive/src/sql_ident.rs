//! Table and column names accepted by `#[derive(Record)]`.

use proc_macro2::Span;
use syn::{Error, LitStr, Result};

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_valid_sql_ident(name: &str) -> bool {
    match name.as_bytes() {
        [first, rest @ ..] => {
            (first.is_ascii_alphabetic() || *first == b'_')
                && rest.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_')
        }
        [] => false,
    }
}

/// Trimmed, validated and lowercased SQL name.
pub(crate) fn sql_name(raw: &str, span: Span, what: &str) -> Result<String> {
    let name = raw.trim();
    if is_valid_sql_ident(name) {
        return Ok(name.to_lowercase());
    }
    let message = if name.is_empty() {
        format!("{what} name must not be empty")
    } else {
        format!("{what} name `{name}` is not a plain SQL identifier ([A-Za-z_][A-Za-z0-9_]*)")
    };
    Err(Error::new(span, message))
}

/// [`sql_name`] for a string literal attribute value.
pub(crate) fn sql_name_lit(lit: &LitStr, what: &str) -> Result<String> {
    sql_name(&lit.value(), lit.span(), what)
}
