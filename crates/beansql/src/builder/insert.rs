use super::{Mode, placeholders, wrap};
use crate::introspect::PresentFields;

pub(super) fn insert_sql(table: &str, fields: &PresentFields, mode: Mode) -> String {
    let columns = fields.names().join(",");
    let values = match mode {
        Mode::Literal => fields.literals().join(","),
        Mode::Template => placeholders(fields.len()),
    };
    format!("insert into {table}({columns}) values{}", wrap(&values))
}
