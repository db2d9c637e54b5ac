//! Field introspection: which fields of a record take part in a statement.

use crate::error::{BeanError, BeanResult};
use crate::record::Record;
use crate::value::{ScalarKind, Value};
use crate::zero::ZeroValues;
use serde::Serialize;
use std::collections::HashSet;

/// A field together with its presence flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: ScalarKind,
    pub value: Value,
    pub key: bool,
    pub present: bool,
}

impl FieldDescriptor {
    /// SQL literal rendering of the value.
    pub fn literal(&self) -> String {
        self.value.to_sql_literal()
    }
}

/// A present field: column name, bound value and its literal rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentField {
    pub name: String,
    pub value: Value,
    pub literal: String,
    pub key: bool,
}

/// Ordered mapping from column name to literal text, restricted to present
/// fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentFields {
    fields: Vec<PresentField>,
}

impl PresentFields {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PresentField> {
        self.fields.iter()
    }

    /// Literal text of a column, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.literal.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Column names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Literal texts, in the same order as [`names`](Self::names).
    pub fn literals(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.literal.as_str()).collect()
    }

    /// Values to bind positionally, in the same order as [`names`](Self::names).
    pub fn values(&self) -> Vec<Value> {
        self.fields.iter().map(|f| f.value.clone()).collect()
    }

    /// Same mapping without key columns.
    pub fn without_keys(&self) -> PresentFields {
        PresentFields {
            fields: self.fields.iter().filter(|f| !f.key).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PresentFields {
    type Item = &'a PresentField;
    type IntoIter = std::slice::Iter<'a, PresentField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Describe every field of a record, present or not.
///
/// Column names are lowercased. Two fields that collapse to the same name, an
/// empty name, or a value whose kind disagrees with the declared kind are
/// reported as [`BeanError::Introspection`].
pub fn describe<R: Record + ?Sized>(
    record: &R,
    zeros: &ZeroValues,
) -> BeanResult<Vec<FieldDescriptor>> {
    let fields = record.field_values()?;
    let mut seen = HashSet::with_capacity(fields.len());
    let mut out = Vec::with_capacity(fields.len());

    for field in fields {
        let name = field.name.to_lowercase();
        if name.is_empty() {
            return Err(BeanError::introspection(
                record.type_name(),
                "field with an empty name",
            ));
        }
        if !seen.insert(name.clone()) {
            return Err(BeanError::introspection(
                record.type_name(),
                format!("duplicate column '{name}'"),
            ));
        }
        if let Some(actual) = field.value.kind()
            && actual != field.kind
        {
            return Err(BeanError::introspection(
                record.type_name(),
                format!(
                    "field '{name}' is declared {} but holds a {actual} value",
                    field.kind
                ),
            ));
        }

        let present = zeros.is_present(&field.value);
        out.push(FieldDescriptor {
            name,
            kind: field.kind,
            value: field.value,
            key: field.key,
            present,
        });
    }

    Ok(out)
}

/// Present fields of a record under the given zero-value table.
pub fn present_fields_with<R: Record + ?Sized>(
    record: &R,
    zeros: &ZeroValues,
) -> BeanResult<PresentFields> {
    let fields = describe(record, zeros)?
        .into_iter()
        .filter(|d| d.present)
        .map(|d| PresentField {
            literal: d.value.to_sql_literal(),
            name: d.name,
            value: d.value,
            key: d.key,
        })
        .collect();
    Ok(PresentFields { fields })
}

/// Present fields of a record under the standard zero-value table.
pub fn present_fields<R: Record + ?Sized>(record: &R) -> BeanResult<PresentFields> {
    present_fields_with(record, &ZeroValues::shared())
}
