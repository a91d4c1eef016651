//! Reads the input table (first sheet, first row = headers) into row records.

use crate::domain::model::{ParsedTable, Record, Row};
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::validate_file_extension;
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use serde_json::{json, Value};
use std::path::Path;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"];

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses `path` into one [`Record`] per data row.
///
/// Columns whose header cell is empty are dropped from every record, and
/// cells beyond the last header are ignored. Date cells become ISO-8601 text.
pub fn read_table(path: impl AsRef<Path>) -> Result<ParsedTable> {
    let path = path.as_ref();
    let display = path.display().to_string();
    tracing::info!("Reading input table: {}", path.display());

    if !path.is_file() {
        return Err(ImportError::file_access(&display, "file does not exist"));
    }
    validate_file_extension("input", &display, SUPPORTED_EXTENSIONS)
        .map_err(|e| ImportError::file_access(&display, e))?;

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let table = if is_csv {
        read_csv(path, &display)?
    } else {
        read_spreadsheet(path, &display)?
    };

    let preview: Vec<&str> = table.headers.iter().take(5).map(String::as_str).collect();
    tracing::info!(
        "Found {} columns: {}{}",
        table.headers.len(),
        preview.join(", "),
        if table.headers.len() > 5 { "..." } else { "" }
    );
    tracing::info!("Parsed {} rows", table.records.len());

    Ok(table)
}

fn read_spreadsheet(path: &Path, display: &str) -> Result<ParsedTable> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ImportError::file_access(display, e))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| ImportError::file_access(display, e))?,
        None => return Err(ImportError::file_access(display, "workbook has no sheets")),
    };

    // The range begins at the first used cell, so a blank first sheet row
    // means there are no headers at all.
    let first_used_row = match range.start() {
        Some((row, _)) => row as usize,
        None => {
            return Ok(ParsedTable {
                headers: Vec::new(),
                records: Vec::new(),
            })
        }
    };

    let mut rows = range.rows();
    let (headers, leading_blank_rows): (Vec<Option<String>>, usize) = if first_used_row == 0 {
        let header_row = rows.next().unwrap_or_default();
        (header_row.iter().map(header_name).collect(), 0)
    } else {
        (Vec::new(), first_used_row - 1)
    };

    let mut records: Vec<Record> = (0..leading_blank_rows).map(|_| Record::default()).collect();
    for row in rows {
        let mut data = Row::new();
        for (index, cell) in row.iter().enumerate() {
            if let Some(Some(name)) = headers.get(index) {
                data.insert(name.clone(), cell_to_value(cell));
            }
        }
        records.push(Record { data });
    }

    Ok(ParsedTable {
        headers: headers.into_iter().flatten().collect(),
        records,
    })
}

fn read_csv(path: &Path, display: &str) -> Result<ParsedTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ImportError::file_access(display, e))?;

    let headers: Vec<Option<String>> = reader
        .headers()?
        .iter()
        .map(|h| (!h.is_empty()).then(|| h.to_string()))
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut data = Row::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(name) = header {
                let value = row
                    .get(index)
                    .map(|v| Value::String(v.to_string()))
                    .unwrap_or(Value::Null);
                data.insert(name.clone(), value);
            }
        }
        records.push(Record { data });
    }

    Ok(ParsedTable {
        headers: headers.into_iter().flatten().collect(),
        records,
    })
}

fn header_name(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => match cell_to_value(other) {
            Value::String(s) => Some(s),
            Value::Null => None,
            value => Some(value.to_string()),
        },
    }
}

/// Converts a spreadsheet cell to a JSON scalar.
pub fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => json!(*i),
        Data::Float(f) => {
            // 整數值的浮點數轉成整數
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                json!(*f as i64)
            } else {
                json!(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::String(excel_datetime_to_iso(dt)),
        Data::DateTimeIso(s) => Value::String(s.clone()),
        Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(e) => Value::String(e.to_string()),
    }
}

fn excel_datetime_to_iso(dt: &ExcelDateTime) -> String {
    let serial = dt.as_f64();
    if dt.is_duration() {
        return format_clock(serial);
    }
    // Serials below 1 carry only a time of day.
    if (0.0..1.0).contains(&serial) {
        return format_clock(serial);
    }
    // calamine applies the workbook's 1900 or 1904 epoch.
    match dt.as_datetime() {
        Some(datetime) => datetime.format(ISO_FORMAT).to_string(),
        None => serial.to_string(),
    }
}

fn format_clock(serial: f64) -> String {
    let total_seconds = (serial * 86_400.0).round() as i64;
    format!(
        "{:02}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    )
}
