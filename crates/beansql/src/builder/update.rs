use super::{Mode, assignments};
use crate::introspect::PresentFields;

pub(super) fn update_sql(
    table: &str,
    set: &PresentFields,
    id_column: &str,
    id: i64,
    mode: Mode,
) -> String {
    let set = assignments(set, mode).join(",");
    match mode {
        Mode::Literal => format!("update {table} set {set} where {id_column}={id}"),
        Mode::Template => format!("update {table} set {set} where {id_column}=?"),
    }
}
