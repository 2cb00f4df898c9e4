//! Reading and parsing grouping input.

use std::fmt;
use std::io::Read;
use std::path::Path;

use grouping_common::{GroupingError, GroupingResult};
use serde::Serialize;

/// A delimited input line together with the key parsed from one of its fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub line: usize,
    pub text: String,
    #[serde(skip)]
    pub key: f64,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Read the whole input, from stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> GroupingResult<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                return Err(GroupingError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

fn is_data_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Every whitespace-separated token is one value. `#` starts a comment line.
pub fn parse_values(content: &str) -> GroupingResult<Vec<f64>> {
    let mut values = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if !is_data_line(line) {
            continue;
        }
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| {
                GroupingError::input(format!("line {}: '{}' is not a number", idx + 1, token))
            })?;
            values.push(value);
        }
    }
    Ok(values)
}

/// Every CSV record is keyed by its `field`-th (zero-based) field.
///
/// Fields may be quoted, so a quoted field can contain the delimiter. Lines
/// starting with `#` are comments and rows may have differing lengths.
pub fn parse_records(content: &str, field: usize, delimiter: char) -> GroupingResult<Vec<Record>> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            GroupingError::input(format!("delimiter '{delimiter}' is not a single ASCII byte"))
        })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .comment(Some(b'#'))
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| GroupingError::input(e.to_string()))?;
        let line_no = row.position().map_or(0, |pos| pos.line() as usize);
        let raw = row.get(field).ok_or_else(|| {
            GroupingError::input(format!("line {line_no}: no field {field}"))
        })?;
        let key = raw.trim().parse::<f64>().map_err(|_| {
            GroupingError::input(format!(
                "line {line_no}: field {field} ('{}') is not a number",
                raw.trim()
            ))
        })?;
        records.push(Record {
            line: line_no,
            text: render_row(&row, delimiter)?,
            key,
        });
    }
    Ok(records)
}

/// Write a row back out, quoting fields only where needed.
fn render_row(row: &csv::StringRecord, delimiter: u8) -> GroupingResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer
        .write_record(row)
        .map_err(|e| GroupingError::input(e.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| GroupingError::input(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| GroupingError::input(e.to_string()))?;
    Ok(text.trim_end_matches('\n').to_string())
}
