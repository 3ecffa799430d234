use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{TradingDate, ValidationError};

/// One daily OHLCV observation.
///
/// Prices are passed through as reported; `low <= open/close <= high` is not
/// enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl DailyBar {
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_finite("open", open)?;
        validate_finite("high", high)?;
        validate_finite("low", low)?;
        validate_finite("close", close)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Normalized daily series for one ticker.
///
/// Always non-empty, free of duplicate dates, and ordered most recent first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSeries {
    symbol: String,
    last_refreshed: String,
    points: Vec<DailyBar>,
}

impl StockSeries {
    /// Builds a series from bars in any order, sorting them descending by date.
    pub fn new(
        symbol: impl Into<String>,
        last_refreshed: impl Into<String>,
        mut points: Vec<DailyBar>,
    ) -> Result<Self, ValidationError> {
        if points.is_empty() {
            return Err(ValidationError::EmptySeries);
        }

        let mut seen = BTreeSet::new();
        for point in &points {
            if !seen.insert(point.date) {
                return Err(ValidationError::DuplicateDate {
                    date: point.date.to_string(),
                });
            }
        }

        points.sort_unstable_by(|a, b| b.date.cmp(&a.date));

        Ok(Self {
            symbol: symbol.into(),
            last_refreshed: last_refreshed.into(),
            points,
        })
    }

    /// Canonical ticker as echoed by the provider.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Provider-reported refresh timestamp, kept verbatim.
    pub fn last_refreshed(&self) -> &str {
        &self.last_refreshed
    }

    pub fn points(&self) -> &[DailyBar] {
        &self.points
    }

    pub fn latest(&self) -> &DailyBar {
        // Non-empty by construction.
        &self.points[0]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<DailyBar> {
        self.points
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}
