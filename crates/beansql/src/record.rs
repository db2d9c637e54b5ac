//! Record traits.
//!
//! A [`Record`] exposes its fields as an ordered table of [`FieldValue`]s; the
//! order is the declaration order and decides the column order of every
//! generated statement. [`Entity`] adds the integer key that update and delete
//! statements target.
//!
//! Both traits are normally generated by `#[derive(Record)]`:
//!
//! ```ignore
//! use beansql::Record;
//!
//! #[derive(Record, Default)]
//! struct TestBean {
//!     name: Option<String>,
//!     age: i32,
//!     id: i64,
//! }
//! ```

use crate::error::BeanResult;
use crate::value::{ScalarKind, Value};

/// One field of a record, as reported by [`Record::field_values`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    /// Column name. Lowercased by the introspector.
    pub name: String,
    /// Declared kind (kept for null values, which carry no kind themselves).
    pub kind: ScalarKind,
    /// Current value.
    pub value: Value,
    /// Whether this is the entity key column.
    pub key: bool,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, kind: ScalarKind, value: Value) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
            key: false,
        }
    }

    /// Mark the field as the entity key.
    pub fn key(mut self) -> Self {
        self.key = true;
        self
    }
}

/// A value object whose fields can be enumerated.
pub trait Record {
    /// Declared type name, e.g. `TestBean`.
    fn type_name(&self) -> &str;

    /// Table the record maps to: the type name lowercased.
    fn table_name(&self) -> String {
        self.type_name().to_lowercase()
    }

    /// All fields in declaration order, present or not.
    ///
    /// Returns [`BeanError::Introspection`](crate::BeanError::Introspection)
    /// when the fields cannot be enumerated.
    fn field_values(&self) -> BeanResult<Vec<FieldValue>>;
}

/// A record identified by an integer key.
pub trait Entity: Record {
    /// Key column name.
    fn id_column(&self) -> &str {
        "id"
    }

    /// Current key value.
    fn id(&self) -> BeanResult<i64>;
}

impl<R: Record + ?Sized> Record for &R {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn table_name(&self) -> String {
        (**self).table_name()
    }

    fn field_values(&self) -> BeanResult<Vec<FieldValue>> {
        (**self).field_values()
    }
}

impl<E: Entity + ?Sized> Entity for &E {
    fn id_column(&self) -> &str {
        (**self).id_column()
    }

    fn id(&self) -> BeanResult<i64> {
        (**self).id()
    }
}
