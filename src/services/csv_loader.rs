use crate::error::{AppError, ChartError};
use crate::models::Dataset;

/// Parses raw CSV bytes into a `Dataset`.
///
/// The first record is the header list; header names are trimmed the way the
/// upload step normalizes them. Data rows are padded (or truncated) to the
/// header width so every row exposes a value for every header.
pub fn parse_csv(data: &[u8]) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ChartError::NoHeadersFound.into());
    }

    let width = headers.len();
    let mut rows = Vec::with_capacity(16);
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    Ok(Dataset { headers, rows })
}
