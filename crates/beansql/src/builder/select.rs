use super::{Mode, assignments};
use crate::introspect::PresentFields;

/// `where 1=1` is always emitted; each condition is appended with ` and `.
pub(super) fn select_sql(table: &str, fields: &PresentFields, mode: Mode) -> String {
    let columns = fields.names().join(",");
    let conditions = assignments(fields, mode);

    let mut sql = format!("select {columns} from {table} where 1=1");
    if !conditions.is_empty() {
        sql.push_str(" and ");
        sql.push_str(&conditions.join(" and "));
    }
    sql
}
