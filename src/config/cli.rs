use super::settings::ImportSettings;
use super::{DEFAULT_ERROR_FILE, DEFAULT_INPUT, DEFAULT_PROGRESS_INTERVAL};
use clap::{Args, Parser};

#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Target table name (default: projects)
    #[arg(long)]
    pub table: Option<String>,

    /// Per-request timeout in seconds (default: 30)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "project-importer")]
#[command(about = "Import spreadsheet rows into the projects table, one insert per row")]
pub struct ImportArgs {
    /// Input table (.xlsx, .xls, .ods or .csv)
    pub input: Option<String>,

    /// Where to write failed rows (default: import_errors.json)
    #[arg(long)]
    pub error_file: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "preview-import")]
#[command(about = "Show what an import would send, without touching the backend")]
pub struct PreviewArgs {
    /// Input table (.xlsx, .xls, .ods or .csv)
    pub input: Option<String>,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "update-sales")]
#[command(about = "Update sales_source / sales_person_id on existing rows, matched by id")]
pub struct UpdateArgs {
    /// Input table (.xlsx, .xls, .ods or .csv) with an `id` column
    pub input: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Positional argument, then the settings file, then the built-in name.
pub fn resolve_input(cli_input: Option<String>, settings: &ImportSettings) -> String {
    cli_input
        .or_else(|| settings.import.input.clone())
        .unwrap_or_else(|| DEFAULT_INPUT.to_string())
}

pub fn resolve_error_file(cli_value: Option<String>, settings: &ImportSettings) -> String {
    cli_value
        .or_else(|| settings.import.error_file.clone())
        .unwrap_or_else(|| DEFAULT_ERROR_FILE.to_string())
}

pub fn resolve_progress_interval(settings: &ImportSettings) -> usize {
    settings
        .import
        .progress_interval
        .unwrap_or(DEFAULT_PROGRESS_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_args_defaults() {
        let args = ImportArgs::parse_from(["project-importer"]);
        assert!(args.input.is_none());
        assert!(!args.common.verbose);

        let settings = ImportSettings::default();
        assert_eq!(resolve_input(args.input, &settings), DEFAULT_INPUT);
        assert_eq!(resolve_error_file(args.error_file, &settings), DEFAULT_ERROR_FILE);
        assert_eq!(resolve_progress_interval(&settings), 50);
    }

    #[test]
    fn test_import_args_positional_and_flags() {
        let args = ImportArgs::parse_from([
            "project-importer",
            "rows.csv",
            "--table",
            "staging_projects",
            "--error-file",
            "failed.json",
            "-v",
        ]);
        assert_eq!(args.input.as_deref(), Some("rows.csv"));
        assert_eq!(args.common.table.as_deref(), Some("staging_projects"));
        assert_eq!(args.error_file.as_deref(), Some("failed.json"));
        assert!(args.common.verbose);
    }

    #[test]
    fn test_settings_fill_in_missing_flags() {
        let settings = ImportSettings::from_toml_str(
            "[import]\ninput = \"from_file.xlsx\"\nerror_file = \"e.json\"\nprogress_interval = 5\n",
        )
        .unwrap();
        assert_eq!(resolve_input(None, &settings), "from_file.xlsx");
        assert_eq!(resolve_input(Some("cli.xlsx".into()), &settings), "cli.xlsx");
        assert_eq!(resolve_error_file(None, &settings), "e.json");
        assert_eq!(resolve_progress_interval(&settings), 5);
    }
}
