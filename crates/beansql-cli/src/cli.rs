use beansql::StatementKind;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Build,
    Fields,
    Records,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Build(BuildArgs),
    Fields(FieldsArgs),
    Records(RecordsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct BuildArgs {
    pub config: PathBuf,
    pub record: String,
    /// `None` means every statement the record supports.
    pub kinds: Option<Vec<StatementKind>>,
    pub template: bool,
    pub strict: bool,
    pub format: OutputFormat,
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct FieldsArgs {
    pub config: PathBuf,
    pub record: String,
    pub format: OutputFormat,
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct RecordsArgs {
    pub config: PathBuf,
}

const DEFAULT_CONFIG: &str = "beansql.toml";

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help(HelpTopic::Root)),
        "build" => parse_build(it.map(|s| s.as_str())),
        "fields" => parse_fields(it.map(|s| s.as_str())),
        "records" => parse_records(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_build<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut record: Option<String> = None;
    let mut kinds: Option<Vec<StatementKind>> = None;
    let mut template = false;
    let mut strict = false;
    let mut format = OutputFormat::Text;
    let mut params = Vec::new();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Build)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = PathBuf::from(v);
            }
            _ if token.starts_with("--config=") => {
                config = PathBuf::from(token.trim_start_matches("--config="));
            }
            "--kind" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--kind requires a value");
                };
                kinds = parse_kinds(v)?;
            }
            _ if token.starts_with("--kind=") => {
                kinds = parse_kinds(token.trim_start_matches("--kind="))?;
            }
            "--format" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--format requires a value");
                };
                format = parse_format(v)?;
            }
            _ if token.starts_with("--format=") => {
                format = parse_format(token.trim_start_matches("--format="))?;
            }
            "--template" => template = true,
            "--strict" => strict = true,
            _ if token.starts_with('-') => anyhow::bail!("unknown argument: {token}"),
            _ if token.contains('=') => params.push(parse_param(token)?),
            _ if record.is_none() => record = Some(token.to_string()),
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    let Some(record) = record else {
        anyhow::bail!("build requires a record name");
    };

    Ok(Command::Build(BuildArgs {
        config,
        record,
        kinds,
        template,
        strict,
        format,
        params,
    }))
}

fn parse_fields<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut record: Option<String> = None;
    let mut format = OutputFormat::Text;
    let mut params = Vec::new();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Fields)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = PathBuf::from(v);
            }
            _ if token.starts_with("--config=") => {
                config = PathBuf::from(token.trim_start_matches("--config="));
            }
            "--format" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--format requires a value");
                };
                format = parse_format(v)?;
            }
            _ if token.starts_with("--format=") => {
                format = parse_format(token.trim_start_matches("--format="))?;
            }
            _ if token.starts_with('-') => anyhow::bail!("unknown argument: {token}"),
            _ if token.contains('=') => params.push(parse_param(token)?),
            _ if record.is_none() => record = Some(token.to_string()),
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    let Some(record) = record else {
        anyhow::bail!("fields requires a record name");
    };

    Ok(Command::Fields(FieldsArgs {
        config,
        record,
        format,
        params,
    }))
}

fn parse_records<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Records)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = PathBuf::from(v);
            }
            _ if token.starts_with("--config=") => {
                config = PathBuf::from(token.trim_start_matches("--config="));
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    Ok(Command::Records(RecordsArgs { config }))
}

/// `all`, or a comma-separated list of statement kinds.
fn parse_kinds(v: &str) -> anyhow::Result<Option<Vec<StatementKind>>> {
    if v.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    let kinds = v
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<StatementKind>().map_err(anyhow::Error::msg))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if kinds.is_empty() {
        anyhow::bail!("--kind must not be empty");
    }
    Ok(Some(kinds))
}

fn parse_format(v: &str) -> anyhow::Result<OutputFormat> {
    match v {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }
}

/// `name=value`; the name is matched against lowercase column names.
fn parse_param(token: &str) -> anyhow::Result<(String, String)> {
    let Some((name, value)) = token.split_once('=') else {
        anyhow::bail!("expected name=value, got {token}");
    };
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("parameter name must not be empty: {token}");
    }
    Ok((name.to_lowercase(), value.to_string()))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
beansql - build SQL statements from records described in beansql.toml

USAGE:
  beansql <COMMAND> [OPTIONS]

COMMANDS:
  build         Print select/insert/update/delete statements for a record
  fields        Show which fields of a record are present
  records       List the record types in the config

Run `beansql <command> --help` for more."
            );
        }
        HelpTopic::Build => {
            println!(
                "\
USAGE:
  beansql build <RECORD> [OPTIONS] [name=value ...]

OPTIONS:
  --config <FILE>       Config file path (default: beansql.toml)
  --kind <KINDS>        all, or a comma list of select,insert,update,delete (default: all)
  --template            Emit `?` placeholders and list the values to bind
  --strict              Refuse update/delete statements that target a zero id
  --format <FORMAT>     text or json (default: text)
  -h, --help            Print help

Each name=value pair sets the field with that (case-insensitive) name.
An empty value sets the field to null."
            );
        }
        HelpTopic::Fields => {
            println!(
                "\
USAGE:
  beansql fields <RECORD> [OPTIONS] [name=value ...]

OPTIONS:
  --config <FILE>       Config file path (default: beansql.toml)
  --format <FORMAT>     text or json (default: text)
  -h, --help            Print help"
            );
        }
        HelpTopic::Records => {
            println!(
                "\
USAGE:
  beansql records [OPTIONS]

OPTIONS:
  --config <FILE>       Config file path (default: beansql.toml)
  -h, --help            Print help"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        std::iter::once("beansql")
            .chain(v.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parse_build_with_params() {
        let cmd = parse_args(&args(&[
            "build",
            "TestBean",
            "--kind",
            "update,delete",
            "--template",
            "Name=calo",
            "age=20",
            "id=22",
        ]))
        .unwrap();
        let Command::Build(build) = cmd else {
            panic!("expected build");
        };

        assert_eq!(build.record, "TestBean");
        assert_eq!(build.config, PathBuf::from("beansql.toml"));
        assert_eq!(
            build.kinds,
            Some(vec![StatementKind::Update, StatementKind::Delete])
        );
        assert!(build.template);
        assert!(!build.strict);
        assert_eq!(
            build.params,
            vec![
                ("name".to_string(), "calo".to_string()),
                ("age".to_string(), "20".to_string()),
                ("id".to_string(), "22".to_string()),
            ]
        );
    }

    #[test]
    fn parse_build_all_and_json() {
        let cmd = parse_args(&args(&[
            "build",
            "--config=demo.toml",
            "TestBean",
            "--kind=all",
            "--format",
            "json",
            "--strict",
        ]))
        .unwrap();
        let Command::Build(build) = cmd else {
            panic!("expected build");
        };
        assert_eq!(build.config, PathBuf::from("demo.toml"));
        assert_eq!(build.kinds, None);
        assert_eq!(build.format, OutputFormat::Json);
        assert!(build.strict);
    }

    #[test]
    fn parse_param_keeps_equals_in_value() {
        assert_eq!(
            parse_param("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn build_requires_record() {
        assert!(parse_args(&args(&["build", "age=1"])).is_err());
    }

    #[test]
    fn rejects_unknown_kind_and_flag() {
        assert!(parse_args(&args(&["build", "T", "--kind", "upsert"])).is_err());
        assert!(parse_args(&args(&["build", "T", "--verbose"])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
    }

    #[test]
    fn help_topics() {
        assert!(matches!(
            parse_args(&args(&[])).unwrap(),
            Command::Help(HelpTopic::Root)
        ));
        assert!(matches!(
            parse_args(&args(&["fields", "--help"])).unwrap(),
            Command::Help(HelpTopic::Fields)
        ));
        assert!(matches!(
            parse_args(&args(&["records", "-h"])).unwrap(),
            Command::Help(HelpTopic::Records)
        ));
    }

    #[test]
    fn parse_fields_and_records() {
        let Command::Fields(fields) =
            parse_args(&args(&["fields", "TestBean", "age=0", "--format=json"])).unwrap()
        else {
            panic!("expected fields");
        };
        assert_eq!(fields.record, "TestBean");
        assert_eq!(fields.format, OutputFormat::Json);
        assert_eq!(fields.params.len(), 1);

        let Command::Records(records) =
            parse_args(&args(&["records", "--config", "x.toml"])).unwrap()
        else {
            panic!("expected records");
        };
        assert_eq!(records.config, PathBuf::from("x.toml"));
    }
}
