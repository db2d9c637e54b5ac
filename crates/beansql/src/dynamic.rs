//! Records whose field table is only known at runtime.
//!
//! A [`RecordSchema`] plays the role `#[derive(Record)]` plays for Rust
//! structs: it declares the field names, kinds and order, and optionally the
//! integer key. A [`DynRecord`] holds one nullable value per schema field.
//!
//! ```ignore
//! use beansql::{DynRecord, RecordSchema, ScalarKind, build_update};
//!
//! let schema = RecordSchema::new("TestBean")
//!     .field("name", ScalarKind::Text)
//!     .field("age", ScalarKind::Int32)
//!     .key_field("id", ScalarKind::Int64);
//! let bean = DynRecord::new(schema)
//!     .with("name", "calo")?
//!     .with("age", 20)?
//!     .with("id", 22i64)?;
//! assert_eq!(build_update(&bean)?, "update testbean set name='calo',age=20 where id=22");
//! ```

use crate::error::{BeanError, BeanResult};
use crate::inflate::{Inflate, ParamSource};
use crate::record::{Entity, FieldValue, Record};
use crate::value::{ScalarKind, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub kind: ScalarKind,
    #[serde(default)]
    pub key: bool,
}

/// Declared shape of a runtime record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Type name; the table defaults to this name lowercased.
    pub name: String,
    /// Table name override.
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            fields: Vec::new(),
        }
    }

    /// Override the table name.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            kind,
            key: false,
        });
        self
    }

    /// Append the key field.
    pub fn key_field(mut self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            kind,
            key: true,
        });
        self
    }

    pub fn key(&self) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.key)
    }

    pub fn table_name(&self) -> String {
        self.table
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Check names, uniqueness and the key declaration.
    pub fn validate(&self) -> BeanResult<()> {
        if !is_valid_ident(&self.name) {
            return Err(BeanError::schema(format!(
                "record name '{}' is not a valid identifier",
                self.name
            )));
        }
        if let Some(table) = &self.table
            && !is_valid_ident(table)
        {
            return Err(BeanError::schema(format!(
                "table '{table}' of record '{}' is not a valid identifier",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !is_valid_ident(&field.name) {
                return Err(BeanError::schema(format!(
                    "field '{}' of record '{}' is not a valid identifier",
                    field.name, self.name
                )));
            }
            if !seen.insert(field.name.to_lowercase()) {
                return Err(BeanError::schema(format!(
                    "record '{}' declares field '{}' twice",
                    self.name, field.name
                )));
            }
        }

        let keys: Vec<_> = self.fields.iter().filter(|f| f.key).collect();
        if keys.len() > 1 {
            return Err(BeanError::schema(format!(
                "record '{}' declares {} key fields",
                self.name,
                keys.len()
            )));
        }
        if let Some(key) = keys.first()
            && !key.kind.is_integer()
        {
            return Err(BeanError::schema(format!(
                "key field '{}' of record '{}' must be an integer, not {}",
                key.name, self.name, key.kind
            )));
        }
        Ok(())
    }
}

fn is_valid_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A record instance over a [`RecordSchema`]. Every field starts out null.
#[derive(Debug, Clone, PartialEq)]
pub struct DynRecord {
    schema: Arc<RecordSchema>,
    values: Vec<Value>,
}

impl DynRecord {
    /// Field names are lowercased, so the key column is spelled the same in
    /// every statement.
    pub fn new(schema: impl Into<Arc<RecordSchema>>) -> Self {
        let mut schema = schema.into();
        if schema
            .fields
            .iter()
            .any(|f| f.name.chars().any(|c| c.is_ascii_uppercase()))
        {
            for field in &mut Arc::make_mut(&mut schema).fields {
                field.name = field.name.to_lowercase();
            }
        }
        let values = vec![Value::Null; schema.fields.len()];
        Self { schema, values }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Current value of a field (case-insensitive name).
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.position(name).map(|i| &self.values[i])
    }

    /// Set a field. The value must be null or of the declared kind.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> BeanResult<()> {
        let value = value.into();
        let Some(i) = self.schema.position(name) else {
            return Err(BeanError::introspection(
                &self.schema.name,
                format!("no field named '{name}'"),
            ));
        };
        let declared = self.schema.fields[i].kind;
        if let Some(actual) = value.kind()
            && actual != declared
        {
            return Err(BeanError::introspection(
                &self.schema.name,
                format!("field '{name}' is declared {declared}, got a {actual} value"),
            ));
        }
        self.values[i] = value;
        Ok(())
    }

    /// Chainable [`set`](Self::set).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> BeanResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }
}

impl Record for DynRecord {
    fn type_name(&self) -> &str {
        &self.schema.name
    }

    fn table_name(&self) -> String {
        self.schema.table_name()
    }

    fn field_values(&self) -> BeanResult<Vec<FieldValue>> {
        self.schema
            .validate()
            .map_err(|e| BeanError::introspection(&self.schema.name, e.to_string()))?;
        Ok(self
            .schema
            .fields
            .iter()
            .zip(&self.values)
            .map(|(f, v)| FieldValue {
                name: f.name.clone(),
                kind: f.kind,
                value: v.clone(),
                key: f.key,
            })
            .collect())
    }
}

impl Entity for DynRecord {
    fn id_column(&self) -> &str {
        self.schema.key().map_or("id", |k| k.name.as_str())
    }

    /// A null key reads as 0.
    fn id(&self) -> BeanResult<i64> {
        let Some(key) = self.schema.key() else {
            return Err(BeanError::introspection(
                &self.schema.name,
                "record has no key field",
            ));
        };
        let value = self.get(&key.name).unwrap_or(&Value::Null);
        let id = match *value {
            Value::Null => Some(0),
            Value::Int8(v) => Some(i64::from(v)),
            Value::Int16(v) => Some(i64::from(v)),
            Value::Int32(v) => Some(i64::from(v)),
            Value::Int64(v) => Some(v),
            Value::UInt8(v) => Some(i64::from(v)),
            Value::UInt16(v) => Some(i64::from(v)),
            Value::UInt32(v) => Some(i64::from(v)),
            Value::UInt64(v) => i64::try_from(v).ok(),
            _ => None,
        };
        id.ok_or_else(|| {
            BeanError::introspection(
                &self.schema.name,
                format!("key '{}' holds {value}, not an i64 id", key.name),
            )
        })
    }
}

impl Inflate for DynRecord {
    /// Parameters are matched by lowercase field name; an empty parameter
    /// sets the field to null.
    fn inflate_from<P: ParamSource + ?Sized>(&mut self, params: &P) -> BeanResult<()> {
        let schema = Arc::clone(&self.schema);
        for (i, field) in schema.fields.iter().enumerate() {
            let column = field.name.to_lowercase();
            let Some(raw) = params.get(&column) else {
                continue;
            };
            self.values[i] = if raw.is_empty() {
                Value::Null
            } else {
                field
                    .kind
                    .parse_value(&raw)
                    .map_err(|message| BeanError::inflate(&column, &raw, message))?
            };
        }
        Ok(())
    }
}
