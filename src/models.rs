//! Sensor data models and the record normalizer.
//!
//! A [`RawSensorRow`] is a row as it comes out of the sheet, every field still
//! text. [`RawSensorRow::to_record`] turns it into a typed [`SensorRecord`],
//! keeping the difference between an empty reading and a reading of zero.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ParseError;

// ---

/// Column holding the sensor label (the QR code printed on the tank).
pub const ID_COLUMN: &str = "Datos Qr";

/// Column holding the `"lat,lon"` location text.
pub const LOCATION_COLUMN: &str = "Ubicación";

/// Column holding the display time of the reading.
pub const TIME_COLUMN: &str = "time";

/// Column holding the fill level as a fraction in [0, 1].
pub const LEVEL_COLUMN: &str = "nivel";

/// Default prefix of the hourly prediction columns (`nivel_predict_8`, ...).
pub const DEFAULT_PREDICTION_PREFIX: &str = "nivel_predict_";

/// Raw sensor row from the sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSensorRow {
    // ---
    pub id: String,
    pub location: String,
    pub time: String,
    pub level: Option<String>,
    /// Prediction columns by header, unfiltered.
    pub predictions: BTreeMap<String, String>,
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Normalized sensor record used by the map, summary and hourly chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorRecord {
    // ---
    pub id: String,
    pub location: Coordinates,
    pub timestamp: String,
    /// Fill level in percent. `None` when the sheet had no usable value.
    pub level: Option<f64>,
    /// Predicted level in percent by hour of day.
    pub hourly_predictions: BTreeMap<u32, Option<f64>>,
}

impl RawSensorRow {
    // ---
    /// Build a raw row from a header → value map, keeping the prediction
    /// columns that start with `prefix`. Other columns are ignored.
    pub fn from_columns(mut columns: BTreeMap<String, String>, prefix: &str) -> Self {
        // ---
        let id = columns.remove(ID_COLUMN).unwrap_or_default();
        let location = columns.remove(LOCATION_COLUMN).unwrap_or_default();
        let time = columns.remove(TIME_COLUMN).unwrap_or_default();
        let level = columns.remove(LEVEL_COLUMN);

        let predictions = columns
            .into_iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .collect();

        RawSensorRow {
            id,
            location,
            time,
            level,
            predictions,
        }
    }

    /// Normalize this row into a [`SensorRecord`].
    ///
    /// Fails only on a malformed location; bad level or prediction values
    /// become absent instead. When two columns name the same hour
    /// (`nivel_predict_8` and `nivel_predict_08`) the first in column-name
    /// order is kept and the other is rejected with a warning.
    pub fn to_record(&self, prefix: &str) -> Result<SensorRecord, ParseError> {
        // ---
        let location = parse_location(&self.location)?;

        let mut hourly_predictions = BTreeMap::new();
        for (column, raw) in &self.predictions {
            match prediction_hour(column, prefix) {
                Some(hour) => match hourly_predictions.entry(hour) {
                    Entry::Vacant(slot) => {
                        slot.insert(parse_percent(Some(raw)));
                    }
                    Entry::Occupied(_) => {
                        tracing::warn!(
                            "Sensor {}: rejecting column '{}', hour {} already read",
                            self.id,
                            column,
                            hour
                        );
                    }
                },
                None => {
                    tracing::debug!("Ignoring column '{}': no hour suffix", column);
                }
            }
        }

        Ok(SensorRecord {
            id: self.id.clone(),
            location,
            timestamp: self.time.clone(),
            level: parse_percent(self.level.as_deref()),
            hourly_predictions,
        })
    }
}

/// Parse a `"lat,lon"` field into [`Coordinates`].
pub fn parse_location(value: &str) -> Result<Coordinates, ParseError> {
    // ---
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 2 {
        return Err(ParseError::LocationShape {
            value: value.to_string(),
            parts: parts.len(),
        });
    }

    let component = |raw: &str| {
        parse_finite(raw).ok_or_else(|| ParseError::LocationComponent {
            value: value.to_string(),
            component: raw.trim().to_string(),
        })
    };

    Ok(Coordinates {
        lat: component(parts[0])?,
        lon: component(parts[1])?,
    })
}

/// Scale a raw fraction to a percentage; anything unparseable is absent,
/// and so is a value that overflows once scaled.
pub fn parse_percent(raw: Option<&str>) -> Option<f64> {
    raw.and_then(parse_finite)
        .map(|fraction| fraction * 100.0)
        .filter(|level| level.is_finite())
}

/// Hour of day encoded in a prediction column name, e.g. `nivel_predict_8` → 8.
///
/// The suffix must be ASCII digits only.
pub fn prediction_hour(column: &str, prefix: &str) -> Option<u32> {
    let suffix = column.strip_prefix(prefix)?.trim();
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
