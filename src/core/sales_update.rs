use crate::domain::model::{Record, Row, UpdateFailure, UpdateSummary};
use crate::domain::ports::TableWriter;
use serde_json::Value;

/// Columns copied onto existing rows when present in the input table.
pub const SALES_FIELDS: &[&str] = &["sales_source", "sales_person_id"];

/// Replays the sales columns of each row as an update keyed by `id`.
pub struct SalesUpdater<W: TableWriter> {
    writer: W,
}

impl<W: TableWriter> SalesUpdater<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub async fn run(&self, records: &[Record]) -> UpdateSummary {
        let mut summary = UpdateSummary {
            total: records.len(),
            ..UpdateSummary::default()
        };
        println!("Found {} rows to update", records.len());

        for (index, record) in records.iter().enumerate() {
            let row = index + 1;

            let Some(id) = clean_text(record.data.get("id")) else {
                println!("Skipping row {}: no id provided", row);
                summary.skipped += 1;
                continue;
            };

            let changes = sales_changes(record);
            if changes.is_empty() {
                println!("Skipping row {} (id {}): no sales columns to update", row, id);
                summary.skipped += 1;
                continue;
            }

            match self.writer.update_row(&id, &changes).await {
                Ok(Some(updated)) => {
                    let label = updated
                        .get("title")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| id.clone());
                    let fields: Vec<&str> = changes.keys().map(String::as_str).collect();
                    println!("Updated {}: {}", label, fields.join(", "));
                    summary.updated += 1;
                }
                Ok(None) => {
                    println!("Row {}: id {} not found", row, id);
                    summary.skipped += 1;
                }
                Err(err) => {
                    tracing::warn!(row, id = %id, "Update failed: {}", err);
                    summary.failed += 1;
                    summary.failures.push(UpdateFailure {
                        row,
                        id,
                        error: err.to_string(),
                    });
                }
            }
        }

        print_summary(&summary);
        summary
    }
}

/// Present sales columns only; blank values become null so the update clears them.
pub fn sales_changes(record: &Record) -> Row {
    SALES_FIELDS
        .iter()
        .filter_map(|field| {
            let value = record.data.get(*field)?;
            let cleaned = clean_text(Some(value)).map(Value::String).unwrap_or(Value::Null);
            Some((field.to_string(), cleaned))
        })
        .collect()
}

/// Trimmed text of a cell. Only null and blank strings count as empty; a
/// numeric 0 stays `"0"`.
fn clean_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

fn print_summary(summary: &UpdateSummary) {
    println!("\n=== Update Summary ===");
    println!("Total records: {}", summary.total);
    println!("Successfully updated: {}", summary.updated);
    println!("Skipped: {}", summary.skipped);
    println!("Failed: {}", summary.failed);

    if !summary.failures.is_empty() {
        println!("\n=== Errors ===");
        for failure in &summary.failures {
            println!("Row {} (ID: {}): {}", failure.row, failure.id, failure.error);
        }
    }
}
