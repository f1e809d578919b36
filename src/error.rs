//! Typed errors raised by the dashboard core.
//!
//! The shell (`main.rs`, `config`, `ingest`, `routes`) works with
//! `anyhow::Result`; the pure pipeline returns these so callers can match on
//! the failure and decide how to present it.

use thiserror::Error;

/// A raw sensor row that could not be turned into a [`SensorRecord`].
///
/// [`SensorRecord`]: crate::SensorRecord
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The location field did not split into exactly two parts on `,`.
    #[error("location '{value}' must be 'lat,lon' (found {parts} part(s))")]
    LocationShape { value: String, parts: usize },

    /// One of the two location components is not a finite number.
    #[error("location '{value}' has a non-numeric component '{component}'")]
    LocationComponent { value: String, component: String },
}

/// No hourly prediction values were found across the whole dataset.
///
/// This is a terminal state for the chart path, not a fatal error: the caller
/// shows a "no prediction data" warning instead of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no hourly prediction data found")]
pub struct InsufficientData;
