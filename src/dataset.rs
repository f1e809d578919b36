//! One render pass worth of normalized sensor records.

use serde::Serialize;

use crate::models::{RawSensorRow, SensorRecord};

/// A sheet row the normalizer refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub id: String,
    pub reason: String,
}

/// Valid records plus the rows that were dropped on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub records: Vec<SensorRecord>,
    pub rejected: Vec<RejectedRow>,
}

impl Dataset {
    /// Normalize every raw row. Malformed rows are logged and kept aside,
    /// they never abort the load.
    pub fn from_rows(rows: &[RawSensorRow], prediction_prefix: &str) -> Self {
        // ---
        let mut dataset = Dataset::default();

        for (i, raw) in rows.iter().enumerate() {
            match raw.to_record(prediction_prefix) {
                Ok(record) => dataset.records.push(record),
                Err(e) => {
                    tracing::warn!("Skipping row {} ({}): {}", i + 1, raw.id, e);
                    dataset.rejected.push(RejectedRow {
                        row: i + 1,
                        id: raw.id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Normalized {} rows: {} valid, {} rejected",
            rows.len(),
            dataset.records.len(),
            dataset.rejected.len()
        );
        dataset
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::DEFAULT_PREDICTION_PREFIX;

    fn raw(id: &str, location: &str, level: &str) -> RawSensorRow {
        // ---
        RawSensorRow {
            id: id.to_string(),
            location: location.to_string(),
            time: "09:00".to_string(),
            level: Some(level.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_malformed_rows_are_set_aside() {
        // ---
        let rows = vec![
            raw("A", "12.34,-56.78", "0.1"),
            raw("B", "bad-data", "0.5"),
            raw("C", "1.0,2.0", "oops"),
        ];

        let dataset = Dataset::from_rows(&rows, DEFAULT_PREDICTION_PREFIX);

        let ids: Vec<&str> = dataset.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert_eq!(dataset.rejected.len(), 1);
        assert_eq!(dataset.rejected[0].row, 2);
        assert_eq!(dataset.rejected[0].id, "B");
        assert!(dataset.rejected[0].reason.contains("bad-data"));
    }

    #[test]
    fn test_empty_sheet() {
        // ---
        let dataset = Dataset::from_rows(&[], DEFAULT_PREDICTION_PREFIX);
        assert!(dataset.records.is_empty());
        assert!(dataset.rejected.is_empty());
    }
}
