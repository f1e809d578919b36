//! Hourly aggregation of predicted levels.
//!
//! Collapses every sensor's hourly predictions into one mean series indexed
//! by hour of day and finds the hours with the highest and lowest mean.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::InsufficientData;
use crate::models::SensorRecord;

// ---

/// Level below which a tank is considered critical, in percent.
pub const CRITICAL_LEVEL: f64 = 30.0;

/// Level at or above which a tank is considered optimal, in percent.
pub const OPTIMAL_LEVEL: f64 = 80.0;

/// Mean predicted level for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub hour: u32,
    pub mean: f64,
    /// Number of sensors with a value for this hour.
    pub samples: usize,
}

/// Mean series sorted by hour, with its extrema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySeries {
    pub points: Vec<HourlyPoint>,
    pub max_hour: u32,
    pub min_hour: u32,
}

impl HourlySeries {
    /// Point for a given hour, if present.
    pub fn point(&self, hour: u32) -> Option<&HourlyPoint> {
        self.points.iter().find(|p| p.hour == hour)
    }

    pub fn max(&self) -> Option<&HourlyPoint> {
        self.point(self.max_hour)
    }

    pub fn min(&self) -> Option<&HourlyPoint> {
        self.point(self.min_hour)
    }
}

/// Build the mean hourly series across all records.
///
/// Hours are the union of hours with at least one present value; absent
/// values neither count toward the sum nor the sample count. Returns
/// [`InsufficientData`] when no hour has any value.
pub fn aggregate(records: &[SensorRecord]) -> Result<HourlySeries, InsufficientData> {
    // ---
    let mut sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for record in records {
        for (&hour, value) in &record.hourly_predictions {
            if let Some(value) = value {
                let entry = sums.entry(hour).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }
    }

    // BTreeMap iterates in ascending hour order
    let points: Vec<HourlyPoint> = sums
        .into_iter()
        .map(|(hour, (sum, samples))| HourlyPoint {
            hour,
            mean: sum / samples as f64,
            samples,
        })
        .collect();

    let first = points.first().ok_or(InsufficientData)?;

    // Strict comparisons keep the earliest hour on ties
    let (mut max, mut min) = (first, first);
    for point in &points[1..] {
        if point.mean > max.mean {
            max = point;
        }
        if point.mean < min.mean {
            min = point;
        }
    }

    tracing::debug!(
        "Hourly series: {} hours, max at {}:00 ({:.1}%), min at {}:00 ({:.1}%)",
        points.len(),
        max.hour,
        max.mean,
        min.hour,
        min.mean
    );

    let (max_hour, min_hour) = (max.hour, min.hour);
    Ok(HourlySeries {
        points,
        max_hour,
        min_hour,
    })
}
