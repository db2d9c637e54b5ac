use crate::cli::FieldsArgs;
use crate::config::ProjectConfig;
use crate::output;
use beansql::{DynRecord, Inflate};

pub fn run(args: FieldsArgs) -> anyhow::Result<()> {
    let config = ProjectConfig::load(args.config.clone())?;
    let schema = config.record(&args.record)?;

    let mut record = DynRecord::new(schema);
    record.inflate_from(&args.params)?;

    let fields = config.sql_builder(false).describe(&record)?;
    tracing::debug!(
        record = %record.schema().name,
        present = fields.iter().filter(|f| f.present).count(),
        total = fields.len(),
        "described record"
    );

    output::print_fields(&fields, args.format)
}
