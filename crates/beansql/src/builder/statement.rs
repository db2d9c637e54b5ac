use crate::value::Value;
use serde::Serialize;
use std::fmt;

/// Statement shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub const ALL: [StatementKind; 4] = [
        StatementKind::Select,
        StatementKind::Insert,
        StatementKind::Update,
        StatementKind::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "select",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "select" => Ok(StatementKind::Select),
            "insert" => Ok(StatementKind::Insert),
            "update" => Ok(StatementKind::Update),
            "delete" => Ok(StatementKind::Delete),
            other => Err(format!("unknown statement kind '{other}'")),
        }
    }
}

/// A generated statement.
///
/// Literal statements carry no parameters. Template statements carry one value
/// per `?`, in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub table: String,
    pub sql: String,
    pub template: bool,
    pub params: Vec<Value>,
}

impl Statement {
    pub(crate) fn literal(kind: StatementKind, table: String, sql: String) -> Self {
        Self {
            kind,
            table,
            sql,
            template: false,
            params: Vec::new(),
        }
    }

    pub(crate) fn template(
        kind: StatementKind,
        table: String,
        sql: String,
        params: Vec<Value>,
    ) -> Self {
        Self {
            kind,
            table,
            sql,
            template: true,
            params,
        }
    }

    pub fn is_template(&self) -> bool {
        self.template
    }

    /// Number of `?` placeholders in the SQL text.
    ///
    /// Counts raw `?` characters, so a literal statement whose string values
    /// contain `?` reports those too.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn into_sql(self) -> String {
        self.sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn statement_serializes_with_untagged_params() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let stmt = Statement::template(
            StatementKind::Insert,
            "visit".to_string(),
            "insert into visit(who,day,ref,note) values(?,?,?,?)".to_string(),
            vec![
                Value::Int64(7),
                Value::Date(date),
                Value::Uuid(Uuid::nil()),
                Value::Null,
            ],
        );

        assert_eq!(
            serde_json::to_value(&stmt).unwrap(),
            json!({
                "kind": "insert",
                "table": "visit",
                "sql": "insert into visit(who,day,ref,note) values(?,?,?,?)",
                "template": true,
                "params": [7, "2024-03-01", "00000000-0000-0000-0000-000000000000", null],
            })
        );
    }

    #[test]
    fn literal_statement_has_no_params() {
        let stmt = Statement::literal(
            StatementKind::Delete,
            "t".to_string(),
            "delete from t where id= 1".to_string(),
        );
        let value = serde_json::to_value(&stmt).unwrap();
        assert_eq!(value["kind"], "delete");
        assert_eq!(value["template"], false);
        assert_eq!(value["params"], json!([]));
        assert_eq!(stmt.placeholder_count(), 0);
    }
}
