use crate::cli::BuildArgs;
use crate::config::ProjectConfig;
use crate::output;
use beansql::{DynRecord, Inflate, StatementKind};

pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let config = ProjectConfig::load(args.config.clone())?;
    let schema = config.record(&args.record)?;
    let has_key = schema.key().is_some();

    let mut record = DynRecord::new(schema);
    record.inflate_from(&args.params)?;

    let builder = config.sql_builder(args.strict);
    let kinds = match &args.kinds {
        Some(kinds) => {
            if !has_key
                && let Some(kind) = kinds
                    .iter()
                    .find(|k| matches!(k, StatementKind::Update | StatementKind::Delete))
            {
                anyhow::bail!(
                    "record {} has no key field; cannot build a {kind} statement",
                    record.schema().name
                );
            }
            kinds.clone()
        }
        None => StatementKind::ALL
            .into_iter()
            .filter(|k| {
                let needs_key = matches!(k, StatementKind::Update | StatementKind::Delete);
                if needs_key && !has_key {
                    tracing::warn!(
                        record = %record.schema().name,
                        kind = %k,
                        "skipping statement: record has no key field"
                    );
                    return false;
                }
                true
            })
            .collect(),
    };

    let mut statements = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let stmt = builder.build(kind, args.template, &record)?;
        tracing::info!(record = %record.schema().name, kind = %kind, "built statement");
        statements.push(stmt);
    }

    output::print_statements(&statements, args.format)
}
