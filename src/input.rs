use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::models::LoggedPeriod;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("period history must be a JSON array, got {0}")]
    NotAnArray(&'static str),
}

/// Period records decoded from an input document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    pub periods: Vec<LoggedPeriod>,
    /// Elements that were not `{start, end}` records.
    pub skipped: usize,
}

/// Decode a period history document.
/// Array elements that are not period records are skipped, not fatal.
pub fn read_history<R: Read>(reader: R) -> Result<History, HistoryError> {
    let document: Value = serde_json::from_reader(reader)?;
    let items = match document {
        Value::Array(items) => items,
        other => return Err(HistoryError::NotAnArray(kind_of(&other))),
    };

    let mut history = History::default();
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<LoggedPeriod>(item) {
            Ok(period) => history.periods.push(period),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping period record");
                history.skipped += 1;
            }
        }
    }

    tracing::debug!(
        periods = history.periods.len(),
        skipped = history.skipped,
        "loaded period history"
    );
    Ok(history)
}

/// Load a period history document from a file.
pub fn load_history(path: &Path) -> Result<History, HistoryError> {
    let file = File::open(path)?;
    read_history(BufReader::new(file))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_both_field_spellings() {
        let doc = br#"[
            {"start": "2024-01-01", "end": "2024-01-05"},
            {"start_date": "2024-01-29", "end_date": "2024-02-02", "notes": ""}
        ]"#;
        let history = read_history(&doc[..]).unwrap();
        assert_eq!(
            history.periods,
            vec![
                LoggedPeriod::new("2024-01-01", "2024-01-05"),
                LoggedPeriod::new("2024-01-29", "2024-02-02"),
            ]
        );
        assert_eq!(history.skipped, 0);
    }

    #[test]
    fn skips_records_that_are_not_periods() {
        let doc = br#"[{"start": "2024-01-01", "end": "2024-01-05"}, 42, {"start": "2024-01-29"}]"#;
        let history = read_history(&doc[..]).unwrap();
        assert_eq!(history.periods.len(), 1);
        assert_eq!(history.skipped, 2);
    }

    #[test]
    fn keeps_unparseable_dates_for_the_predictor() {
        let doc = br#"[{"start": "not-a-date", "end": "2024-01-05"}]"#;
        let history = read_history(&doc[..]).unwrap();
        assert_eq!(history.periods.len(), 1);
        assert!(history.periods[0].parse().is_none());
    }

    #[test]
    fn rejects_non_array_documents() {
        let err = read_history(&br#"{"periods": []}"#[..]).unwrap_err();
        assert!(matches!(err, HistoryError::NotAnArray("an object")));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = read_history(&b"[{"[..]).unwrap_err();
        assert!(matches!(err, HistoryError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_history(Path::new("/nonexistent/luna/history.json")).unwrap_err();
        assert!(matches!(err, HistoryError::Io(_)));
    }
}
