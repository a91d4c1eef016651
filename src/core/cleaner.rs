use crate::domain::model::{CleanedRecord, Record};
use serde_json::Value;

/// Drops entries whose value is null or an empty string.
///
/// Zero, `false`, whitespace and every other non-empty value pass through
/// untouched, in their original column order.
pub fn clean_record(record: &Record) -> CleanedRecord {
    let data = record
        .data
        .iter()
        .filter(|(_, value)| !is_blank(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    CleanedRecord { data }
}

pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
