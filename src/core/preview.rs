//! Offline look at an input table before importing it.

use crate::core::cleaner::is_blank;
use crate::domain::model::Record;
use serde_json::Value;
use std::fmt;

const SAMPLE_ROWS: usize = 5;

/// Columns shown for each sample row, with their labels.
const SAMPLE_FIELDS: &[(&str, &str)] = &[
    ("company_name", "Company"),
    ("project_reference", "Project Reference"),
    ("project_name", "Project Name"),
    ("deposit_paid", "Deposit Paid"),
    ("client_number", "Client Number"),
];

pub const REQUIRED_FIELDS: &[&str] = &["title", "status_id", "created_by", "project_type_id"];

#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewReport {
    pub total: usize,
    pub samples: Vec<SampleRow>,
    pub with_deposit_paid: usize,
    pub with_project_reference: usize,
    pub with_client_number: usize,
    pub with_company_name: usize,
    /// Missing count per entry of [`REQUIRED_FIELDS`], same order.
    pub missing_required: Vec<(&'static str, usize)>,
}

impl PreviewReport {
    pub fn from_records(records: &[Record]) -> Self {
        let count = |predicate: &dyn Fn(&Record) -> bool| {
            records.iter().filter(|&r| predicate(r)).count()
        };

        let samples = records
            .iter()
            .take(SAMPLE_ROWS)
            .map(|record| SampleRow {
                title: text(record, "title").unwrap_or_else(|| "Untitled".to_string()),
                fields: SAMPLE_FIELDS
                    .iter()
                    .map(|(key, label)| (*label, text(record, key).unwrap_or_else(|| "N/A".to_string())))
                    .collect(),
            })
            .collect();

        Self {
            total: records.len(),
            samples,
            with_deposit_paid: count(&|r: &Record| is_true(r.data.get("deposit_paid"))),
            with_project_reference: count(&|r: &Record| has_value(r, "project_reference")),
            with_client_number: count(&|r: &Record| has_value(r, "client_number")),
            with_company_name: count(&|r: &Record| has_value(r, "company_name")),
            missing_required: REQUIRED_FIELDS
                .iter()
                .map(|field| (*field, count(&|r: &Record| !has_value(r, field))))
                .collect(),
        }
    }

    pub fn has_missing_required(&self) -> bool {
        self.missing_required.iter().any(|(_, missing)| *missing > 0)
    }
}

impl fmt::Display for PreviewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Import Preview ===\n")?;
        writeln!(f, "Total rows in table: {}\n", self.total)?;

        writeln!(f, "First {} rows:", self.samples.len())?;
        for (index, sample) in self.samples.iter().enumerate() {
            writeln!(f, "\n{}. {}", index + 1, sample.title)?;
            for (label, value) in &sample.fields {
                writeln!(f, "   {}: {}", label, value)?;
            }
        }

        writeln!(f, "\n\n=== Statistics ===")?;
        writeln!(f, "Rows with deposit paid: {}", self.with_deposit_paid)?;
        writeln!(f, "Rows with reference number: {}", self.with_project_reference)?;
        writeln!(f, "Rows with client number: {}", self.with_client_number)?;
        writeln!(f, "Rows with company name: {}", self.with_company_name)?;

        writeln!(f, "\n=== Data Validation ===")?;
        for (field, missing) in &self.missing_required {
            writeln!(f, "Rows missing {}: {}", field, missing)?;
        }

        if self.has_missing_required() {
            writeln!(f, "\nWarning: some rows are missing required fields!")?;
        } else {
            writeln!(f, "\nAll rows have required fields")?;
        }

        writeln!(f, "\n=== Ready to Import ===")?;
        write!(f, "Run: project-importer <INPUT>")
    }
}

fn has_value(record: &Record, key: &str) -> bool {
    record.data.get(key).is_some_and(|v| !is_blank(v))
}

fn text(record: &Record, key: &str) -> Option<String> {
    match record.data.get(key)? {
        value if is_blank(value) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_true(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(data) => Record { data },
            _ => panic!("expected object"),
        }
    }

    fn sample_records() -> Vec<Record> {
        vec![
            record(json!({
                "title": "Alpha", "status_id": "s1", "created_by": "u1", "project_type_id": "t1",
                "company_name": "Acme", "deposit_paid": "TRUE", "client_number": 42
            })),
            record(json!({
                "title": "", "status_id": "s1", "created_by": "u1", "project_type_id": null,
                "deposit_paid": true, "project_reference": "REF-1"
            })),
            record(json!({
                "title": "Gamma", "status_id": "s2", "created_by": "u2", "project_type_id": "t2",
                "deposit_paid": "no", "company_name": ""
            })),
        ]
    }

    #[test]
    fn test_statistics() {
        let report = PreviewReport::from_records(&sample_records());

        assert_eq!(report.total, 3);
        assert_eq!(report.with_deposit_paid, 2);
        assert_eq!(report.with_project_reference, 1);
        assert_eq!(report.with_client_number, 1);
        assert_eq!(report.with_company_name, 1);
        assert_eq!(
            report.missing_required,
            vec![("title", 1), ("status_id", 0), ("created_by", 0), ("project_type_id", 1)]
        );
        assert!(report.has_missing_required());
    }

    #[test]
    fn test_samples_fall_back_to_placeholders() {
        let report = PreviewReport::from_records(&sample_records());

        assert_eq!(report.samples.len(), 3);
        assert_eq!(report.samples[0].title, "Alpha");
        assert_eq!(report.samples[0].fields[0], ("Company", "Acme".to_string()));
        assert_eq!(report.samples[0].fields[4], ("Client Number", "42".to_string()));
        assert_eq!(report.samples[1].title, "Untitled");
        assert_eq!(report.samples[1].fields[0], ("Company", "N/A".to_string()));
    }

    #[test]
    fn test_rendering_mentions_every_section() {
        let complete = vec![record(json!({
            "title": "A", "status_id": "s", "created_by": "u", "project_type_id": "t"
        }))];
        let rendered = PreviewReport::from_records(&complete).to_string();

        assert!(rendered.contains("Total rows in table: 1"));
        assert!(rendered.contains("=== Statistics ==="));
        assert!(rendered.contains("All rows have required fields"));
        assert!(!rendered.contains("Warning"));
    }

    #[test]
    fn test_only_first_five_rows_are_sampled() {
        let rows: Vec<Record> = (0..8).map(|i| record(json!({"title": format!("P{}", i)}))).collect();
        let report = PreviewReport::from_records(&rows);
        assert_eq!(report.samples.len(), 5);
        assert_eq!(report.samples[4].title, "P4");
    }
}
