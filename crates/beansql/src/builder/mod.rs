//! Statement builder.
//!
//! Turns the present fields of a record into one of four statement shapes,
//! each in a literal and a template (`?` placeholder) flavor:
//!
//! | shape  | literal                                             | template                               |
//! |--------|-----------------------------------------------------|----------------------------------------|
//! | select | `select a,b from t where 1=1 and a='x' and b=2`     | `select a,b from t where 1=1 and a=? and b=?` |
//! | insert | `insert into t(a,b) values('x',2)`                  | `insert into t(a,b) values(?,?)`       |
//! | update | `update t set a='x',b=2 where id=22`                | `update t set a=?,b=? where id=?`      |
//! | delete | `delete from t where id= 22`                        | `delete from t where id= ?`            |
//!
//! ## Design
//!
//! - The table is the record's type name lowercased, never quoted.
//! - Columns appear in declaration order; literal and template variants of
//!   the same record always agree on order.
//! - Literal values are interpolated without escaping. Prefer the template
//!   variants and bind [`Statement::params`] for untrusted input.
//! - Update and delete key on the entity id. By default a zero id is not
//!   rejected ([`IdPolicy::Allow`]); [`SqlBuilder::strict`] turns it into
//!   [`BeanError::InvalidRecordState`].

mod delete;
mod insert;
mod select;
mod statement;
mod update;

pub use statement::{Statement, StatementKind};

use crate::error::{BeanError, BeanResult};
use crate::introspect::{self, FieldDescriptor, PresentFields};
use crate::record::{Entity, Record};
use crate::value::Value;
use crate::zero::ZeroValues;
use std::sync::Arc;

/// What to do when an update or delete targets a zero id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Emit `where id=0` as-is.
    #[default]
    Allow,
    /// Fail with [`BeanError::InvalidRecordState`]. Also rejects an update
    /// with no column to set.
    Reject,
}

/// Value rendering of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Literal,
    Template,
}

/// Configurable statement builder.
///
/// Holds no per-statement state: one builder can be shared across threads and
/// reused for any number of records.
#[derive(Debug, Clone)]
pub struct SqlBuilder {
    zeros: Arc<ZeroValues>,
    id_policy: IdPolicy,
}

impl Default for SqlBuilder {
    fn default() -> Self {
        Self {
            zeros: ZeroValues::shared(),
            id_policy: IdPolicy::Allow,
        }
    }
}

impl SqlBuilder {
    /// Builder with the standard zero-value table and [`IdPolicy::Allow`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that refuses to target a zero id.
    pub fn strict() -> Self {
        Self::default().id_policy(IdPolicy::Reject)
    }

    /// Replace the zero-value table.
    pub fn zero_values(mut self, zeros: ZeroValues) -> Self {
        self.zeros = Arc::new(zeros);
        self
    }

    /// Set the zero-id policy.
    pub fn id_policy(mut self, policy: IdPolicy) -> Self {
        self.id_policy = policy;
        self
    }

    pub fn zeros(&self) -> &ZeroValues {
        &self.zeros
    }

    pub fn policy(&self) -> IdPolicy {
        self.id_policy
    }

    /// Every field of the record with its presence flag.
    pub fn describe<R: Record + ?Sized>(&self, record: &R) -> BeanResult<Vec<FieldDescriptor>> {
        introspect::describe(record, &self.zeros)
    }

    /// Present fields of the record.
    pub fn present_fields<R: Record + ?Sized>(&self, record: &R) -> BeanResult<PresentFields> {
        introspect::present_fields_with(record, &self.zeros)
    }

    // ==================== select ====================

    /// `select <cols> from <table> where 1=1[ and <col>=<literal>...]`
    pub fn select<R: Record + ?Sized>(&self, record: &R) -> BeanResult<Statement> {
        let fields = self.present_fields(record)?;
        let table = record.table_name();
        let sql = select::select_sql(&table, &fields, Mode::Literal);
        Ok(self.finish(Statement::literal(StatementKind::Select, table, sql)))
    }

    /// `select <cols> from <table> where 1=1[ and <col>=?...]`
    pub fn select_template<R: Record + ?Sized>(&self, record: &R) -> BeanResult<Statement> {
        let fields = self.present_fields(record)?;
        let table = record.table_name();
        let sql = select::select_sql(&table, &fields, Mode::Template);
        let params = fields.values();
        Ok(self.finish(Statement::template(
            StatementKind::Select,
            table,
            sql,
            params,
        )))
    }

    // ==================== insert ====================

    /// `insert into <table>(<cols>) values(<literals>)`
    ///
    /// The id column is included only when it is non-zero.
    pub fn insert<E: Entity + ?Sized>(&self, entity: &E) -> BeanResult<Statement> {
        let fields = self.present_fields(entity)?;
        let table = entity.table_name();
        let sql = insert::insert_sql(&table, &fields, Mode::Literal);
        Ok(self.finish(Statement::literal(StatementKind::Insert, table, sql)))
    }

    /// `insert into <table>(<cols>) values(?,...)`
    pub fn insert_template<E: Entity + ?Sized>(&self, entity: &E) -> BeanResult<Statement> {
        let fields = self.present_fields(entity)?;
        let table = entity.table_name();
        let sql = insert::insert_sql(&table, &fields, Mode::Template);
        let params = fields.values();
        Ok(self.finish(Statement::template(
            StatementKind::Insert,
            table,
            sql,
            params,
        )))
    }

    // ==================== update ====================

    /// `update <table> set <col>=<literal>,... where id=<id>`
    ///
    /// The key column never appears in the SET list.
    pub fn update<E: Entity + ?Sized>(&self, entity: &E) -> BeanResult<Statement> {
        let set = self.update_columns(entity)?;
        let id = self.target_id(entity)?;
        let table = entity.table_name();
        let sql = update::update_sql(&table, &set, entity.id_column(), id, Mode::Literal);
        Ok(self.finish(Statement::literal(StatementKind::Update, table, sql)))
    }

    /// `update <table> set <col>=?,... where id=?`
    pub fn update_template<E: Entity + ?Sized>(&self, entity: &E) -> BeanResult<Statement> {
        let set = self.update_columns(entity)?;
        let id = self.target_id(entity)?;
        let table = entity.table_name();
        let sql = update::update_sql(&table, &set, entity.id_column(), id, Mode::Template);
        let mut params = set.values();
        params.push(Value::Int64(id));
        Ok(self.finish(Statement::template(
            StatementKind::Update,
            table,
            sql,
            params,
        )))
    }

    // ==================== delete ====================

    /// `delete from <table> where id= <id>`
    pub fn delete<E: Entity + ?Sized>(&self, entity: &E) -> BeanResult<Statement> {
        let id = self.target_id(entity)?;
        let table = entity.table_name();
        let sql = delete::delete_sql(&table, entity.id_column(), id, Mode::Literal);
        Ok(self.finish(Statement::literal(StatementKind::Delete, table, sql)))
    }

    /// `delete from <table> where id= ?`
    pub fn delete_template<E: Entity + ?Sized>(&self, entity: &E) -> BeanResult<Statement> {
        let id = self.target_id(entity)?;
        let table = entity.table_name();
        let sql = delete::delete_sql(&table, entity.id_column(), id, Mode::Template);
        Ok(self.finish(Statement::template(
            StatementKind::Delete,
            table,
            sql,
            vec![Value::Int64(id)],
        )))
    }

    /// Build any statement shape by kind.
    pub fn build<E: Entity + ?Sized>(
        &self,
        kind: StatementKind,
        template: bool,
        entity: &E,
    ) -> BeanResult<Statement> {
        match (kind, template) {
            (StatementKind::Select, false) => self.select(entity),
            (StatementKind::Select, true) => self.select_template(entity),
            (StatementKind::Insert, false) => self.insert(entity),
            (StatementKind::Insert, true) => self.insert_template(entity),
            (StatementKind::Update, false) => self.update(entity),
            (StatementKind::Update, true) => self.update_template(entity),
            (StatementKind::Delete, false) => self.delete(entity),
            (StatementKind::Delete, true) => self.delete_template(entity),
        }
    }

    fn update_columns<E: Entity + ?Sized>(&self, entity: &E) -> BeanResult<PresentFields> {
        let set = self.present_fields(entity)?.without_keys();
        if set.is_empty() && self.id_policy == IdPolicy::Reject {
            return Err(BeanError::invalid_state(format!(
                "update of {} has no column to set",
                entity.table_name()
            )));
        }
        Ok(set)
    }

    fn target_id<E: Entity + ?Sized>(&self, entity: &E) -> BeanResult<i64> {
        let id = entity.id()?;
        if id == 0 && self.id_policy == IdPolicy::Reject {
            return Err(BeanError::invalid_state(format!(
                "{} has a zero {}; refusing to target {}",
                entity.type_name(),
                entity.id_column(),
                entity.table_name()
            )));
        }
        Ok(id)
    }

    fn finish(&self, stmt: Statement) -> Statement {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "beansql.sql",
            kind = %stmt.kind,
            table = %stmt.table,
            template = stmt.template,
            param_count = stmt.params.len(),
            sql = %truncate_sql(&stmt.sql, MAX_LOGGED_SQL),
        );
        stmt
    }
}

#[cfg(feature = "tracing")]
const MAX_LOGGED_SQL: usize = 200;

/// Cut `sql` to at most `max` bytes on a char boundary.
#[cfg(feature = "tracing")]
fn truncate_sql(sql: &str, max: usize) -> std::borrow::Cow<'_, str> {
    if sql.len() <= max {
        return std::borrow::Cow::Borrowed(sql);
    }
    let mut end = max;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    std::borrow::Cow::Owned(format!("{}...", &sql[..end]))
}

// ==================== shared text helpers ====================

/// `(<src>)`
pub(crate) fn wrap(src: &str) -> String {
    format!("({src})")
}

/// `name=literal` or `name=?` per field.
pub(crate) fn assignments(fields: &PresentFields, mode: Mode) -> Vec<String> {
    fields
        .iter()
        .map(|f| match mode {
            Mode::Literal => format!("{}={}", f.name, f.literal),
            Mode::Template => format!("{}=?", f.name),
        })
        .collect()
}

/// `?,?,...` with `n` placeholders.
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

// ==================== free functions ====================

/// Literal select-by-example with the default builder.
pub fn build_select<R: Record + ?Sized>(record: &R) -> BeanResult<String> {
    SqlBuilder::default().select(record).map(Statement::into_sql)
}

/// Template select-by-example with the default builder.
pub fn build_select_template<R: Record + ?Sized>(record: &R) -> BeanResult<String> {
    SqlBuilder::default()
        .select_template(record)
        .map(Statement::into_sql)
}

/// Literal insert with the default builder.
pub fn build_insert<E: Entity + ?Sized>(entity: &E) -> BeanResult<String> {
    SqlBuilder::default().insert(entity).map(Statement::into_sql)
}

/// Template insert with the default builder.
pub fn build_insert_template<E: Entity + ?Sized>(entity: &E) -> BeanResult<String> {
    SqlBuilder::default()
        .insert_template(entity)
        .map(Statement::into_sql)
}

/// Literal update-by-id with the default builder.
pub fn build_update<E: Entity + ?Sized>(entity: &E) -> BeanResult<String> {
    SqlBuilder::default().update(entity).map(Statement::into_sql)
}

/// Template update-by-id with the default builder.
pub fn build_update_template<E: Entity + ?Sized>(entity: &E) -> BeanResult<String> {
    SqlBuilder::default()
        .update_template(entity)
        .map(Statement::into_sql)
}

/// Literal delete-by-id with the default builder.
pub fn build_delete<E: Entity + ?Sized>(entity: &E) -> BeanResult<String> {
    SqlBuilder::default().delete(entity).map(Statement::into_sql)
}

/// Template delete-by-id with the default builder.
pub fn build_delete_template<E: Entity + ?Sized>(entity: &E) -> BeanResult<String> {
    SqlBuilder::default()
        .delete_template(entity)
        .map(Statement::into_sql)
}
