//! Zero-value table used by the presence rule.
//!
//! A field counts as present when its value is non-null and differs from the
//! zero value registered for its [`ScalarKind`]. Kinds without an entry (by
//! default: booleans, text, dates, UUIDs) are present whenever non-null.

use crate::value::{ScalarKind, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

static STANDARD: LazyLock<Arc<ZeroValues>> = LazyLock::new(|| Arc::new(ZeroValues::standard()));

/// Mapping from scalar kind to the value that makes a field absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroValues {
    zeros: BTreeMap<ScalarKind, Value>,
}

impl ZeroValues {
    /// An empty table: every non-null value is present.
    pub fn none() -> Self {
        Self {
            zeros: BTreeMap::new(),
        }
    }

    /// Numeric zeros and `'\0'` for characters.
    ///
    /// `false` is deliberately not registered for [`ScalarKind::Bool`]: a
    /// boolean field takes part in every statement once it is non-null. Use
    /// [`ZeroValues::with_zero`] to opt into suppressing `false`.
    pub fn standard() -> Self {
        Self::none()
            .with_zero(ScalarKind::Int8, Value::Int8(0))
            .with_zero(ScalarKind::Int16, Value::Int16(0))
            .with_zero(ScalarKind::Int32, Value::Int32(0))
            .with_zero(ScalarKind::Int64, Value::Int64(0))
            .with_zero(ScalarKind::UInt8, Value::UInt8(0))
            .with_zero(ScalarKind::UInt16, Value::UInt16(0))
            .with_zero(ScalarKind::UInt32, Value::UInt32(0))
            .with_zero(ScalarKind::UInt64, Value::UInt64(0))
            .with_zero(ScalarKind::Float32, Value::Float32(0.0))
            .with_zero(ScalarKind::Float64, Value::Float64(0.0))
            .with_zero(ScalarKind::Char, Value::Char('\0'))
    }

    /// Shared handle to the [`standard`](Self::standard) table.
    pub fn shared() -> Arc<ZeroValues> {
        Arc::clone(&STANDARD)
    }

    /// Register (or replace) the zero value of a kind.
    ///
    /// A value whose kind differs from `kind` never matches anything.
    pub fn with_zero(mut self, kind: ScalarKind, zero: Value) -> Self {
        self.zeros.insert(kind, zero);
        self
    }

    /// Remove the zero value of a kind, making it always present.
    pub fn without_zero(mut self, kind: ScalarKind) -> Self {
        self.zeros.remove(&kind);
        self
    }

    /// The zero value registered for `kind`.
    pub fn zero_of(&self, kind: ScalarKind) -> Option<&Value> {
        self.zeros.get(&kind)
    }

    /// Whether `value` equals the zero of its own kind.
    ///
    /// Floats compare numerically, so `-0.0` is a zero too.
    pub fn is_zero(&self, value: &Value) -> bool {
        value
            .kind()
            .and_then(|kind| self.zeros.get(&kind))
            .is_some_and(|zero| zero == value)
    }

    /// Presence rule: non-null and not the zero of its kind.
    pub fn is_present(&self, value: &Value) -> bool {
        !value.is_null() && !self.is_zero(value)
    }
}

impl Default for ZeroValues {
    fn default() -> Self {
        Self::standard()
    }
}
