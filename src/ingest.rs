//! Sheet ingestion: reads the CSV export of the sensor spreadsheet.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};

use crate::models::RawSensorRow;

// ---

/// Read raw sensor rows from any CSV source with a header row.
///
/// Rows may be shorter or longer than the header; missing cells are simply
/// absent and extra cells are ignored. Cells that are not valid UTF-8 (Latin-1
/// exports) are decoded lossily so one bad cell never loses the sheet.
pub fn read_rows<R: Read>(source: R, prediction_prefix: &str) -> Result<Vec<RawSensorRow>> {
    // ---
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers: Vec<String> = reader
        .byte_headers()
        .context("Failed to read header row")?
        .iter()
        .map(decode_cell)
        .collect();
    tracing::debug!("Sheet columns: {:?}", headers);

    let mut rows = Vec::new();
    for (i, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Failed to read data row {}", i + 1))?;

        let columns: BTreeMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), decode_cell(value)))
            .collect();

        rows.push(RawSensorRow::from_columns(columns, prediction_prefix));
    }

    Ok(rows)
}

fn decode_cell(raw: &[u8]) -> String {
    let cell = String::from_utf8_lossy(raw);
    if let std::borrow::Cow::Owned(_) = cell {
        tracing::debug!("Replaced invalid UTF-8 in cell {:?}", cell);
    }
    cell.into_owned()
}

/// Read raw sensor rows from a CSV file on disk.
pub async fn load_rows(path: &Path, prediction_prefix: &str) -> Result<Vec<RawSensorRow>> {
    // ---
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read sensor sheet '{}'", path.display()))?;

    let rows = read_rows(bytes.as_slice(), prediction_prefix)
        .with_context(|| format!("Failed to parse sensor sheet '{}'", path.display()))?;

    tracing::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
