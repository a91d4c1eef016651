use anyhow::Context;
use clap::Parser;
use project_importer::config::cli::{resolve_input, PreviewArgs};
use project_importer::utils::logger;
use project_importer::{read_table, ImportSettings, PreviewReport};

fn main() -> anyhow::Result<()> {
    let args = PreviewArgs::parse();
    logger::init_cli_logger(args.verbose, false);

    let settings = ImportSettings::load_optional(args.config.as_deref())?;
    let input = resolve_input(args.input, &settings);

    let table = read_table(&input).with_context(|| format!("Error reading table '{}'", input))?;
    let report = PreviewReport::from_records(&table.records);
    println!("{}", report);

    if report.has_missing_required() {
        tracing::warn!("Rows with missing required fields will likely be rejected by the backend");
    }
    Ok(())
}
