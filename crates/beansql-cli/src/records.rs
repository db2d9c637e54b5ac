use crate::cli::RecordsArgs;
use crate::config::ProjectConfig;

pub fn run(args: RecordsArgs) -> anyhow::Result<()> {
    let config = ProjectConfig::load(args.config)?;

    println!("{}:", config.path().display());
    for record in &config.file.records {
        let key = record
            .key()
            .map_or_else(|| "no key".to_string(), |k| format!("key {}", k.name));
        println!(
            "  {} -> {} ({} fields, {key})",
            record.name,
            record.table_name(),
            record.fields.len()
        );
    }

    Ok(())
}
