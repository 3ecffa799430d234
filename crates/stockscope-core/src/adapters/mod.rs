//! Provider adapters implementing [`SeriesSource`](crate::SeriesSource).

pub mod alphavantage;

pub use alphavantage::AlphaVantageAdapter;
