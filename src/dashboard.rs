//! Dashboard assembly: one render pass from a dataset to everything the
//! map, sidebar and chart need.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dataset::Dataset;
use crate::hourly::{self, HourlySeries, CRITICAL_LEVEL, OPTIMAL_LEVEL};
use crate::map::{self, MapView, DEFAULT_ZOOM};
use crate::summary::LevelSummary;

// ---

/// Warning shown in place of the chart when no hourly data exists.
pub const NO_PREDICTION_WARNING: &str = "No hourly prediction data found";

/// Knobs for a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardOptions {
    pub map_zoom: u8,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            map_zoom: DEFAULT_ZOOM,
        }
    }
}

/// Hourly series with its reference lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyChart {
    pub series: HourlySeries,
    /// Critical reference line, in percent.
    pub critical: f64,
    /// Optimal reference line, in percent.
    pub optimal: f64,
}

/// What the chart area should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChartState {
    Ready(HourlyChart),
    NoData { warning: String },
}

impl ChartState {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        // ---
        match hourly::aggregate(&dataset.records) {
            Ok(series) => ChartState::Ready(HourlyChart {
                series,
                critical: CRITICAL_LEVEL,
                optimal: OPTIMAL_LEVEL,
            }),
            Err(e) => {
                tracing::warn!("Skipping hourly chart: {}", e);
                ChartState::NoData {
                    warning: NO_PREDICTION_WARNING.to_string(),
                }
            }
        }
    }
}

/// Complete dashboard document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub summary: LevelSummary,
    pub map: MapView,
    pub chart: ChartState,
}

impl Dashboard {
    pub fn build(dataset: &Dataset, options: &DashboardOptions) -> Self {
        // ---
        Dashboard {
            generated_at: Utc::now(),
            summary: LevelSummary::from_dataset(dataset),
            map: map::build_map(&dataset.records, options.map_zoom),
            chart: ChartState::from_dataset(dataset),
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::ingest::read_rows;
    use crate::models::DEFAULT_PREDICTION_PREFIX;

    fn dataset_from(sheet: &str) -> Dataset {
        // ---
        let rows = read_rows(sheet.as_bytes(), DEFAULT_PREDICTION_PREFIX).unwrap();
        Dataset::from_rows(&rows, DEFAULT_PREDICTION_PREFIX)
    }

    #[test]
    fn test_full_render_pass() {
        // ---
        let dataset = dataset_from(
            "\
Datos Qr,Ubicación,time,nivel,nivel_predict_8,nivel_predict_9,nivel_predict_10
A,\"1.0,1.0\",08:00,0.1,0.3,1.0,0.1
B,\"3.0,3.0\",08:00,0.5,0.5,0.8,0.3
C,bad-data,08:00,0.9,0.9,0.9,0.9
",
        );

        let dashboard = Dashboard::build(&dataset, &DashboardOptions::default());

        assert_eq!(dashboard.summary.sensors, 2);
        assert_eq!(dashboard.summary.rejected, 1);
        assert_eq!(dashboard.map.points.len(), 2);
        assert_eq!(dashboard.map.center.unwrap().lat, 2.0);

        match dashboard.chart {
            ChartState::Ready(chart) => {
                assert_eq!(chart.critical, 30.0);
                assert_eq!(chart.optimal, 80.0);
                assert_eq!(chart.series.max_hour, 9);
                assert_eq!(chart.series.min_hour, 10);
            }
            other => panic!("expected a chart, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_predictions_show_warning() {
        // ---
        let dataset = dataset_from("Datos Qr,Ubicación,time,nivel\nA,\"1,2\",08:00,0.4\n");
        let dashboard = Dashboard::build(&dataset, &DashboardOptions::default());

        assert_eq!(
            dashboard.chart,
            ChartState::NoData {
                warning: NO_PREDICTION_WARNING.to_string()
            }
        );
        // The rest of the dashboard still renders
        assert_eq!(dashboard.map.points.len(), 1);
    }

    #[test]
    fn test_chart_state_serialization() {
        // ---
        let state = ChartState::NoData {
            warning: "none".to_string(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "no_data");
        assert_eq!(json["warning"], "none");
    }
}
