//! # Domain Models
//!
//! Canonical types produced by the series fetcher.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Trimmed, validated ticker as supplied by the caller |
//! | [`TradingDate`] | ISO 8601 calendar date of a bar |
//! | [`DailyBar`] | One day of open/high/low/close/volume |
//! | [`StockSeries`] | Non-empty, de-duplicated bars, most recent first |
//!
//! ## Validation
//!
//! ```rust
//! use stockscope_core::{DailyBar, StockSeries, TradingDate, ValidationError};
//!
//! let date = TradingDate::parse("2024-01-02").unwrap();
//! let bar = DailyBar::new(date, 10.0, 11.0, 9.5, 10.5, 1_200).unwrap();
//! let series = StockSeries::new("IBM", "2024-01-02", vec![bar]).unwrap();
//! assert_eq!(series.latest().close, 10.5);
//!
//! let empty = StockSeries::new("IBM", "2024-01-02", Vec::new());
//! assert_eq!(empty, Err(ValidationError::EmptySeries));
//! ```

mod date;
mod models;
mod symbol;

pub use date::TradingDate;
pub use models::{DailyBar, StockSeries};
pub use symbol::Symbol;
