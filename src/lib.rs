//! Water-tank level dashboard backend.
//!
//! Loads a sheet of tank sensor readings and derives what the dashboard
//! renders: colored map markers, level statistics and the mean hourly
//! prediction curve with its critical/optimal reference lines.
//!
//! The pipeline runs once per render pass:
//! `ingest` → `models` (normalize) → `map` / `summary` / `hourly` → `dashboard`.

pub mod colormap;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod hourly;
pub mod ingest;
pub mod map;
pub mod models;
pub mod routes;
pub mod summary;

pub use config::Config;
pub use dashboard::{ChartState, Dashboard, DashboardOptions, HourlyChart};
pub use dataset::{Dataset, RejectedRow};
pub use error::{InsufficientData, ParseError};
pub use hourly::{HourlyPoint, HourlySeries, CRITICAL_LEVEL, OPTIMAL_LEVEL};
pub use map::{MapPoint, MapView};
pub use models::{Coordinates, RawSensorRow, SensorRecord};
pub use summary::LevelSummary;
