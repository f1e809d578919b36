//! Level statistics shown next to the map.

use serde::Serialize;

use crate::dataset::Dataset;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSummary {
    /// Valid sensor records.
    pub sensors: usize,
    /// Rows dropped for a malformed location.
    pub rejected: usize,
    /// Sensors with a present level.
    pub with_level: usize,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub min: Option<f64>,
}

impl LevelSummary {
    /// Statistics over present levels only; absent levels are skipped.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        // ---
        let levels: Vec<f64> = dataset.records.iter().filter_map(|r| r.level).collect();

        let (max, mean, min) = if levels.is_empty() {
            (None, None, None)
        } else {
            let max = levels.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = levels.iter().copied().fold(f64::INFINITY, f64::min);
            let mean = levels.iter().sum::<f64>() / levels.len() as f64;
            (Some(max), Some(mean), Some(min))
        };

        LevelSummary {
            sensors: dataset.records.len(),
            rejected: dataset.rejected.len(),
            with_level: levels.len(),
            max,
            mean,
            min,
        }
    }
}
