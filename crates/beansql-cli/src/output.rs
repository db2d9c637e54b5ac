use crate::cli::OutputFormat;
use beansql::{FieldDescriptor, Statement};

pub fn print_statements(statements: &[Statement], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_statements(statements)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(statements)?),
    }
    Ok(())
}

pub fn print_fields(fields: &[FieldDescriptor], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_fields(fields)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(fields)?),
    }
    Ok(())
}

/// One `-- kind` header per statement, the SQL, and the bind values of
/// template statements.
fn render_statements(statements: &[Statement]) -> String {
    let mut out = String::new();
    for stmt in statements {
        out.push_str(&format!("-- {}\n{}\n", stmt.kind, stmt.sql));
        if stmt.is_template() {
            let params: Vec<String> = stmt.params.iter().map(|v| v.to_sql_literal()).collect();
            out.push_str(&format!("-- params: [{}]\n", params.join(", ")));
        }
    }
    out
}

fn render_fields(fields: &[FieldDescriptor]) -> String {
    let name_width = fields
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(0)
        .max("field".len());

    let mut out = format!("{:<name_width$}  {:<9}  {:<7}  value\n", "field", "kind", "present");
    for f in fields {
        let marker = if f.key { " (key)" } else { "" };
        out.push_str(&format!(
            "{:<name_width$}  {:<9}  {:<7}  {}{marker}\n",
            f.name,
            f.kind.as_str(),
            if f.present { "yes" } else { "no" },
            f.literal(),
        ));
    }
    out
}
