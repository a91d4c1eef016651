use clap::Parser;
use project_importer::config::cli::{resolve_error_file, resolve_input, resolve_progress_interval};
use project_importer::config::load_dotenv;
use project_importer::domain::model::ImportSummary;
use project_importer::utils::logger;
use project_importer::utils::validation::Validate;
use project_importer::{
    BackendConfig, Credentials, ImportArgs, ImportEngine, ImportError, ImportOptions,
    ImportSettings, LocalStorage, RestTable,
};

#[tokio::main]
async fn main() {
    let args = ImportArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.common.verbose, args.common.log_json);
    tracing::debug!("CLI args: {:?}", args);

    match run(args).await {
        Ok(summary) => {
            let (succeeded, failed) = summary.counts();
            tracing::info!("Import finished: {} succeeded, {} failed", succeeded, failed);
            std::process::exit(if failed == 0 { 0 } else { 1 });
        }
        Err(e) => {
            report_fatal(e);
            std::process::exit(1);
        }
    }
}

async fn run(args: ImportArgs) -> Result<ImportSummary, ImportError> {
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
        tracing::warn!("{} is not set; every insert will fail", var);
    }
    tracing::info!("Target table: {}", backend.table);

    let input = resolve_input(args.input, &settings);
    let options = ImportOptions {
        error_file: resolve_error_file(args.error_file, &settings),
        progress_interval: resolve_progress_interval(&settings),
    };

    let engine = ImportEngine::new(RestTable::new(backend)?, LocalStorage::default(), options);
    engine.run(&input).await
}

fn report_fatal(e: ImportError) {
    tracing::error!(
        "Import aborted: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("Fatal error: {}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());
    eprintln!("{:?}", anyhow::Error::new(e).context("import aborted"));
}
