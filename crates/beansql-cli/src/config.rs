use beansql::{BeanError, IdPolicy, RecordSchema, ScalarKind, SqlBuilder, Value, ZeroValues};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_path: PathBuf,
    pub file: ConfigFile,
}

impl ProjectConfig {
    pub fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;

        let file = ConfigFile::parse(&raw).map_err(|e| {
            anyhow::anyhow!(
                "invalid config file {}: {e:#}",
                config_path.display()
            )
        })?;

        Ok(Self { config_path, file })
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Look a record up by name, case-insensitively.
    pub fn record(&self, name: &str) -> anyhow::Result<Arc<RecordSchema>> {
        let Some(schema) = self
            .file
            .records
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
        else {
            let known: Vec<&str> = self.file.records.iter().map(|r| r.name.as_str()).collect();
            return Err(anyhow::Error::new(BeanError::UnknownRecord(name.to_string())).context(
                format!(
                    "{} declares: {}",
                    self.config_path.display(),
                    known.join(", ")
                ),
            ));
        };
        Ok(Arc::new(schema.clone()))
    }

    /// Builder configured from `[presence]` and `[builder]`; `--strict` wins
    /// over the file.
    pub fn sql_builder(&self, strict_override: bool) -> SqlBuilder {
        let mut zeros = ZeroValues::standard();
        if self.file.presence.suppress_false_booleans {
            zeros = zeros.with_zero(ScalarKind::Bool, Value::Bool(false));
        }
        let policy = if strict_override || self.file.builder.strict_ids {
            IdPolicy::Reject
        } else {
            IdPolicy::Allow
        };
        SqlBuilder::new().zero_values(zeros).id_policy(policy)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,

    #[serde(default)]
    pub presence: PresenceConfig,

    #[serde(default)]
    pub builder: BuilderConfig,

    #[serde(default)]
    pub records: Vec<RecordSchema>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresenceConfig {
    /// Treat `false` as the zero value of boolean fields.
    #[serde(default)]
    pub suppress_false_booleans: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuilderConfig {
    /// Refuse update/delete statements that target a zero id.
    #[serde(default)]
    pub strict_ids: bool,
}

impl ConfigFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(raw)?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim() != "1" {
            anyhow::bail!("unsupported config version: {}", self.version);
        }

        if self.records.is_empty() {
            anyhow::bail!("at least one [[records]] entry is required");
        }

        let mut seen = std::collections::HashSet::<String>::new();
        for r in &self.records {
            if !seen.insert(r.name.to_lowercase()) {
                anyhow::bail!("duplicate records.name: {}", r.name);
            }
            if r.fields.is_empty() {
                anyhow::bail!("records.fields must not be empty (record: {})", r.name);
            }
            r.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beansql::{Entity, StatementKind};

    const SAMPLE: &str = r#"
version = "1"

[[records]]
name = "TestBean"
fields = [
  { name = "name", kind = "text" },
  { name = "age", kind = "int32" },
  { name = "id", kind = "int64", key = true },
]

[[records]]
name = "Person"
table = "people"
fields = [
  { name = "name", kind = "text" },
  { name = "member", kind = "bool" },
]
"#;

    #[test]
    fn parses_sample() {
        let file = ConfigFile::parse(SAMPLE).unwrap();
        assert_eq!(file.records.len(), 2);
        assert!(!file.presence.suppress_false_booleans);
        assert!(!file.builder.strict_ids);
        let bean = &file.records[0];
        assert_eq!(bean.key().map(|k| k.name.as_str()), Some("id"));
        assert_eq!(file.records[1].table_name(), "people");
    }

    #[test]
    fn rejects_bad_version_and_empty_records() {
        assert!(ConfigFile::parse("version = \"2\"\n").is_err());
        assert!(ConfigFile::parse("version = \"1\"\n").is_err());
    }

    #[test]
    fn rejects_duplicate_names_and_bad_schemas() {
        let dup = r#"
version = "1"
[[records]]
name = "A"
fields = [{ name = "x", kind = "text" }]
[[records]]
name = "a"
fields = [{ name = "y", kind = "text" }]
"#;
        assert!(ConfigFile::parse(dup).is_err());

        let text_key = r#"
version = "1"
[[records]]
name = "A"
fields = [{ name = "id", kind = "text", key = true }]
"#;
        assert!(ConfigFile::parse(text_key).is_err());

        let unknown_kind = r#"
version = "1"
[[records]]
name = "A"
fields = [{ name = "id", kind = "decimal" }]
"#;
        assert!(ConfigFile::parse(unknown_kind).is_err());
    }

    #[test]
    fn load_and_lookup() {
        let path = std::env::temp_dir().join(format!("beansql-config-{}.toml", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        let config = ProjectConfig::load(path.clone()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.record("testbean").unwrap().name, "TestBean");
        let err = format!("{:#}", config.record("Nope").unwrap_err());
        assert!(err.contains("TestBean"));
        assert!(err.contains("Person"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ProjectConfig::load(PathBuf::from("/nonexistent/beansql.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn builder_settings_apply() {
        let raw = format!("{SAMPLE}\n[presence]\nsuppress_false_booleans = true\n[builder]\nstrict_ids = true\n");
        let file = ConfigFile::parse(&raw).unwrap();
        let config = ProjectConfig {
            config_path: PathBuf::from("beansql.toml"),
            file,
        };
        let builder = config.sql_builder(false);
        assert_eq!(builder.policy(), IdPolicy::Reject);
        assert!(builder.zeros().is_zero(&Value::Bool(false)));

        let schema = config.record("TestBean").unwrap();
        let bean = beansql::DynRecord::new(schema);
        assert_eq!(bean.id().unwrap(), 0);
        assert!(
            builder
                .build(StatementKind::Delete, false, &bean)
                .unwrap_err()
                .is_invalid_state()
        );
    }
}
