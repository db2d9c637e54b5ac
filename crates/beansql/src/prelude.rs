//! Convenient imports for typical `beansql` usage.
//!
//! ```ignore
//! use beansql::prelude::*;
//! ```

pub use crate::{
    BeanError, BeanResult, DynRecord, Entity, Inflate, ParamSource, Record, RecordSchema,
    ScalarKind, SqlBuilder, Statement, StatementKind, Value,
};
