use anyhow::Context;
use clap::Parser;
use project_importer::config::cli::{resolve_input, UpdateArgs};
use project_importer::config::load_dotenv;
use project_importer::utils::logger;
use project_importer::utils::validation::Validate;
use project_importer::{read_table, BackendConfig, Credentials, ImportSettings, RestTable, SalesUpdater};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = UpdateArgs::parse();
    logger::init_cli_logger(args.common.verbose, args.common.log_json);
    load_dotenv();

    let settings = ImportSettings::load_optional(args.common.config.as_deref())?;
    let backend = BackendConfig::resolve(
        Credentials::from_env(),
        &settings,
        args.common.table,
        args.common.timeout,
    );
    backend.validate()?;
    for var in backend.missing_credentials() {
        tracing::warn!("{} is not set; every update will fail", var);
    }

    let input = resolve_input(args.input, &settings);
    let table = read_table(&input).with_context(|| format!("Error reading table '{}'", input))?;

    let updater = SalesUpdater::new(RestTable::new(backend)?);
    let summary = updater.run(&table.records).await;

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
