//! # Stockscope Core
//!
//! Daily time-series fetcher and normalizer for the Alpha Vantage market-data API.
//!
//! ## Overview
//!
//! - **Canonical domain models** for symbols, trading dates, daily bars and series
//! - **Series source trait** with a four-way failure taxonomy
//! - **Alpha Vantage adapter** issuing one request per fetch, never retrying
//! - **Injected configuration** with an optional client-side request budget
//! - **Summary statistics** for display layers
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Alpha Vantage) |
//! | [`analytics`] | Series summary and moving-average projection |
//! | [`config`] | Provider configuration and environment loading |
//! | [`data_source`] | `SeriesSource` trait and `FetchError` |
//! | [`domain`] | Domain models (Symbol, TradingDate, DailyBar, StockSeries) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`throttling`] | Local request budget |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockscope_core::{AlphaVantageAdapter, ProviderConfig, SeriesSource, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = AlphaVantageAdapter::new(ProviderConfig::from_env());
//!     let series = adapter.fetch_series(&Symbol::parse("IBM")?).await?;
//!
//!     let latest = series.latest();
//!     println!("{} closed at {:.2} on {}", series.symbol(), latest.close, latest.date);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use stockscope_core::{FetchError, FetchErrorKind};
//!
//! fn advice(error: &FetchError) -> &'static str {
//!     match error.kind() {
//!         FetchErrorKind::Configuration => "check the API key",
//!         FetchErrorKind::RateLimited => "wait before asking again",
//!         FetchErrorKind::Provider => "check the symbol",
//!         FetchErrorKind::Transport => "check the network",
//!     }
//! }
//!
//! assert_eq!(advice(&FetchError::provider("Invalid API call.")), "check the symbol");
//! ```
//!
//! ## Security
//!
//! - The API key is never logged; request URLs are redacted before tracing
//! - HTTP errors are stripped of their URL before they reach callers

pub mod adapters;
pub mod analytics;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod throttling;

// Adapter implementations
pub use adapters::AlphaVantageAdapter;

// Statistics
pub use analytics::{
    Direction, MovingAverageProjection, SeriesSummary, DEFAULT_MOVING_AVERAGE_WINDOW,
};

// Configuration
pub use config::{ProviderConfig, QuotaPolicy};

// Series source trait and errors
pub use data_source::{FetchError, FetchErrorKind, SeriesSource};

// Domain models
pub use domain::{DailyBar, StockSeries, Symbol, TradingDate};

// Error types
pub use error::{CoreError, ValidationError};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Throttling
pub use throttling::QuotaGuard;
