use paddock_types::PaddockError;
use serde_json::Value;

use crate::record::{RawRecord, Scalar};

/// Provider envelope field wrapping JSON payloads.
pub const ENVELOPE_FIELD: &str = "payLoad";

/// Decoded CSV body: header row plus one record per data row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvTable {
    /// Header names in column order.
    pub columns: Vec<String>,
    /// Data rows keyed by header name.
    pub rows: Vec<RawRecord>,
}

/// Drop a byte-order mark and surrounding CR/LF runs.
#[must_use]
pub fn strip_preamble(text: &str) -> &str {
    text.trim_matches(|c| matches!(c, '\u{feff}' | '\r' | '\n'))
}

/// Decode a CSV body with a header row.
///
/// Rows may be shorter or longer than the header: missing cells become
/// `Scalar::Null`, surplus cells are ignored. A blank body is an empty table.
///
/// # Errors
/// Returns `MalformedResponse` when the CSV reader rejects the body.
pub fn parse_csv(text: &str) -> Result<CsvTable, PaddockError> {
    let body = strip_preamble(text);
    if body.trim().is_empty() {
        return Ok(CsvTable::default());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let columns: Vec<String> = rdr
        .headers()
        .map_err(|e| PaddockError::MalformedResponse(format!("csv header: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(|e| PaddockError::MalformedResponse(format!("csv row: {e}")))?;
        let row = RawRecord::from_pairs(columns.iter().enumerate().map(|(i, col)| {
            let cell = rec.get(i).map_or(Scalar::Null, Scalar::from);
            (col.clone(), cell)
        }));
        rows.push(row);
    }

    Ok(CsvTable { columns, rows })
}

/// Unwrap the provider envelope: `{"payLoad": X, ...}` becomes `X`.
#[must_use]
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut obj) if obj.contains_key(ENVELOPE_FIELD) => {
            obj.remove(ENVELOPE_FIELD).unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Records from a JSON array of objects. Other shapes yield nothing.
#[must_use]
pub fn records_from_json(body: &Value) -> Vec<RawRecord> {
    body.as_array()
        .map(|items| items.iter().filter_map(RawRecord::from_json).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_bom_and_blank_lines() {
        let text = "\u{feff}\r\n\r\nNo,Horse Name\r\n4,Fast Deer\r\n\r\n";
        let table = parse_csv(text).unwrap();
        assert_eq!(table.columns, vec!["No", "Horse Name"]);
        assert_eq!(table.rows.len(), 1);
        let c = table.rows[0].canonicalize();
        assert_eq!(c.get("horse_name"), Some(&Scalar::from("Fast Deer")));
    }

    #[test]
    fn short_rows_fill_with_null() {
        let table = parse_csv("a,b,c\n1,2\n").unwrap();
        let c = table.rows[0].canonicalize();
        assert_eq!(c.get("c"), Some(&Scalar::Null));
    }

    #[test]
    fn blank_body_is_empty() {
        assert_eq!(parse_csv("\u{feff}\r\n").unwrap(), CsvTable::default());
    }

    #[test]
    fn envelope_unwraps_only_when_present() {
        let wrapped = json!({"statusCode": 200, "payLoad": [{"meetingId": 1}]});
        assert_eq!(unwrap_envelope(wrapped), json!([{"meetingId": 1}]));
        let bare = json!([{"meetingId": 2}]);
        assert_eq!(unwrap_envelope(bare.clone()), bare);
    }

    #[test]
    fn json_records_skip_non_objects() {
        let body = json!([{"a": 1}, 7, "x", {"b": null}]);
        let recs = records_from_json(&body);
        assert_eq!(recs.len(), 2);
        assert!(records_from_json(&json!({"a": 1})).is_empty());
    }
}
