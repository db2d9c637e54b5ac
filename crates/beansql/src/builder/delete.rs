use super::Mode;

// Note the space after `=`.
pub(super) fn delete_sql(table: &str, id_column: &str, id: i64, mode: Mode) -> String {
    match mode {
        Mode::Literal => format!("delete from {table} where {id_column}= {id}"),
        Mode::Template => format!("delete from {table} where {id_column}= ?"),
    }
}
