//! Summary statistics over a fetched [`StockSeries`].
//!
//! Every function here is pure. Series are non-empty by construction, so none
//! of the aggregates below can divide by zero.

use serde::Serialize;

use crate::{StockSeries, ValidationError};

/// Closes averaged by [`MovingAverageProjection`] when no window is given.
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 20;

/// Aggregate view of a whole series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub symbol: String,
    pub points: usize,
    pub latest_close: f64,
    pub average_close: f64,
    pub average_volume: f64,
    /// Population standard deviation of closes.
    pub volatility: f64,
    pub period_high: f64,
    pub period_low: f64,
}

impl SeriesSummary {
    pub fn from_series(series: &StockSeries) -> Self {
        let closes = series.points().iter().map(|bar| bar.close).collect::<Vec<_>>();
        let count = closes.len() as f64;

        let average_close = mean(&closes);
        let average_volume = series
            .points()
            .iter()
            .map(|bar| bar.volume as f64)
            .sum::<f64>()
            / count;
        let variance = closes
            .iter()
            .map(|close| (close - average_close).powi(2))
            .sum::<f64>()
            / count;

        Self {
            symbol: series.symbol().to_owned(),
            points: series.len(),
            latest_close: series.latest().close,
            average_close,
            average_volume,
            volatility: variance.sqrt(),
            period_high: series
                .points()
                .iter()
                .map(|bar| bar.high)
                .fold(f64::MIN, f64::max),
            period_low: series
                .points()
                .iter()
                .map(|bar| bar.low)
                .fold(f64::MAX, f64::min),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Naive next-close projection from the recent moving average.
///
/// The average covers the most recent `min(window, len)` closes, so short
/// series still produce a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageProjection {
    pub window: usize,
    pub window_used: usize,
    pub last_close: f64,
    pub moving_average: f64,
    pub change_pct: f64,
    pub direction: Direction,
    pub projected_price: f64,
}

impl MovingAverageProjection {
    pub fn from_series(series: &StockSeries, window: usize) -> Result<Self, ValidationError> {
        if window == 0 {
            return Err(ValidationError::ZeroWindow);
        }

        let recent = series
            .points()
            .iter()
            .take(window)
            .map(|bar| bar.close)
            .collect::<Vec<_>>();
        let last_close = series.latest().close;
        let moving_average = mean(&recent);

        let change_pct = if last_close == 0.0 {
            0.0
        } else {
            (moving_average - last_close) / last_close * 100.0
        };
        let direction = if change_pct > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };

        Ok(Self {
            window,
            window_used: recent.len(),
            last_close,
            moving_average,
            change_pct,
            direction,
            projected_price: last_close * (1.0 + change_pct / 100.0),
        })
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
