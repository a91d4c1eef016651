use crate::adapters::table::read_table;
use crate::config::{DEFAULT_ERROR_FILE, DEFAULT_PROGRESS_INTERVAL};
use crate::core::cleaner::clean_record;
use crate::domain::model::{FailedRow, ImportSummary, LoadError, Record};
use crate::domain::ports::{Storage, TableWriter};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

const ERROR_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub error_file: String,
    pub progress_interval: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            error_file: DEFAULT_ERROR_FILE.to_string(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Parse once, then clean and insert each row in source order.
pub struct ImportEngine<W: TableWriter, S: Storage> {
    writer: W,
    storage: S,
    options: ImportOptions,
}

impl<W: TableWriter, S: Storage> ImportEngine<W, S> {
    pub fn new(writer: W, storage: S, options: ImportOptions) -> Self {
        Self {
            writer,
            storage,
            options,
        }
    }

    pub async fn run(&self, input: impl AsRef<Path>) -> Result<ImportSummary> {
        println!("Starting project import...");

        // Extract
        let table = read_table(input)?;

        // Transform + Load
        self.import_records(table.records).await
    }

    pub async fn import_records(&self, records: Vec<Record>) -> Result<ImportSummary> {
        let total = records.len();
        let interval = self.options.progress_interval.max(1);
        let mut summary = ImportSummary {
            total,
            ..ImportSummary::default()
        };

        println!("\nImporting {} rows...", total);

        for (index, record) in records.into_iter().enumerate() {
            let row = index + 1;
            let cleaned = clean_record(&record);

            match self.writer.insert_row(&cleaned).await {
                Ok(()) => {
                    summary.succeeded += 1;
                    tracing::debug!("Row {} inserted", row);
                }
                Err(err) => {
                    summary.failed += 1;
                    let error = err.to_string();
                    let preview: String = error.chars().take(ERROR_PREVIEW_CHARS).collect();

                    // 傳輸錯誤保留原始列，遠端拒絕則保留清理後的列
                    let data = match err {
                        LoadError::Rejected { status, .. } => {
                            println!("Error on row {}: {}", row, preview);
                            tracing::warn!(row, status, "Row rejected by backend");
                            cleaned.data
                        }
                        LoadError::Transport(_) => {
                            println!("Exception on row {}: {}", row, preview);
                            tracing::warn!(row, "Request failed before a response arrived");
                            record.data
                        }
                    };

                    summary.failures.push(FailedRow { row, error, data });
                }
            }

            if row % interval == 0 {
                println!("Progress: {}/{} rows processed...", row, total);
            }
        }

        print_summary(&summary);

        if !summary.failures.is_empty() {
            summary.error_file = Some(self.write_failures(&summary.failures).await?);
        }

        println!("\nImport completed!");
        Ok(summary)
    }

    async fn write_failures(&self, failures: &[FailedRow]) -> Result<PathBuf> {
        println!(
            "\nSaving {} errors to {}...",
            failures.len(),
            self.options.error_file
        );
        let json = serde_json::to_string_pretty(failures)?;
        self.storage
            .write_file(&self.options.error_file, json.as_bytes())
            .await?;
        tracing::info!("Wrote {} failed rows to {}", failures.len(), self.options.error_file);
        println!("Error details saved!");
        Ok(PathBuf::from(&self.options.error_file))
    }
}

fn print_summary(summary: &ImportSummary) {
    let rule = "=".repeat(50);
    println!("\n{}", rule);
    println!("IMPORT SUMMARY");
    println!("{}", rule);
    println!("Total rows: {}", summary.total);
    println!("Successfully imported: {}", summary.succeeded);
    println!("Failed: {}", summary.failed);
}
