//! # beansql
//!
//! Convention-driven SQL for plain value objects ("beans").
//!
//! Given a record, beansql looks at which fields hold a non-default value and
//! emits select-by-example, insert, update-by-id and delete-by-id statements
//! against a table named after the record's type.
//!
//! ## Features
//!
//! - **Presence rule**: a field takes part in a statement when it is non-null
//!   and not the zero of its numeric/character type; booleans and strings
//!   always count once non-null
//! - **Declared order**: columns follow the field declaration order, so output
//!   is reproducible
//! - **Literal and template twins**: every statement exists with inline
//!   literals and with `?` placeholders plus the values to bind
//! - **Derive**: `#[derive(Record)]` generates the field table, the entity key
//!   accessor and request-parameter population
//!
//! ## Example
//!
//! ```ignore
//! use beansql::{Record, SqlBuilder, build_update};
//!
//! #[derive(Record, Default)]
//! struct TestBean {
//!     name: Option<String>,
//!     age: i32,
//!     id: i64,
//! }
//!
//! let bean = TestBean { name: Some("calo".into()), age: 20, id: 22 };
//! assert_eq!(
//!     build_update(&bean)?,
//!     "update testbean set name='calo',age=20 where id=22"
//! );
//!
//! let stmt = SqlBuilder::new().update_template(&bean)?;
//! assert_eq!(stmt.sql, "update testbean set name=?,age=? where id=?");
//! assert_eq!(stmt.params.len(), 3);
//! ```
//!
//! ## Security
//!
//! Literal statements interpolate values without escaping. Use the template
//! statements and bind [`Statement::params`] whenever a value can come from
//! user input.

pub mod builder;
pub mod dynamic;
pub mod error;
pub mod inflate;
pub mod introspect;
pub mod prelude;
pub mod record;
pub mod value;
pub mod zero;

pub use builder::{
    IdPolicy, SqlBuilder, Statement, StatementKind, build_delete, build_delete_template,
    build_insert, build_insert_template, build_select, build_select_template, build_update,
    build_update_template,
};
pub use dynamic::{DynRecord, FieldSchema, RecordSchema};
pub use error::{BeanError, BeanResult};
pub use inflate::{FnParams, Inflate, ParamSource, inflate, inflate_new, params_fn};
pub use introspect::{
    FieldDescriptor, PresentField, PresentFields, describe, present_fields, present_fields_with,
};
pub use record::{Entity, FieldValue, Record};
pub use value::{ScalarField, ScalarKind, Value};
pub use zero::ZeroValues;

#[cfg(feature = "derive")]
pub use beansql_derive::Record;

// Used by generated code.
#[doc(hidden)]
pub mod __private {
    pub use crate::inflate::assign_field;
}
