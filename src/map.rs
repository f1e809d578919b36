//! Map view: colored sensor markers and the point the map is centered on.

use serde::Serialize;

use crate::colormap;
use crate::models::{Coordinates, SensorRecord};

// ---

/// Zoom level used when none is configured.
pub const DEFAULT_ZOOM: u8 = 17;

/// One marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub id: String,
    pub coordinates: Coordinates,
    pub level: f64,
    /// Marker fill, `#rrggbb`.
    pub color: String,
    /// HTML popup shown when the marker is clicked.
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// Mean position of all valid records; `None` for an empty dataset.
    pub center: Option<Coordinates>,
    pub zoom: u8,
    pub points: Vec<MapPoint>,
}

/// Build the map markers for a set of records.
///
/// Records without a level still count toward the map center but get no
/// marker.
pub fn build_map(records: &[SensorRecord], zoom: u8) -> MapView {
    // ---
    let points: Vec<MapPoint> = records
        .iter()
        .filter_map(|record| {
            let level = record.level?;
            Some(MapPoint {
                id: record.id.clone(),
                coordinates: record.location,
                level,
                color: colormap::color(level).to_hex(),
                popup: popup_text(record, level),
            })
        })
        .collect();

    let skipped = records.len() - points.len();
    if skipped > 0 {
        tracing::debug!("{} sensor(s) without a level left off the map", skipped);
    }

    MapView {
        center: centroid(records),
        zoom,
        points,
    }
}

/// Mean latitude and longitude of the given records.
pub fn centroid(records: &[SensorRecord]) -> Option<Coordinates> {
    if records.is_empty() {
        return None;
    }
    let n = records.len() as f64;
    let (lat, lon) = records.iter().fold((0.0, 0.0), |(lat, lon), r| {
        (lat + r.location.lat, lon + r.location.lon)
    });
    Some(Coordinates {
        lat: lat / n,
        lon: lon / n,
    })
}

fn popup_text(record: &SensorRecord, level: f64) -> String {
    format!(
        "<b>QR:</b> {}<br><b>Time:</b> {}<br><b>Level:</b> {:.1}%",
        record.id, record.timestamp, level
    )
}
