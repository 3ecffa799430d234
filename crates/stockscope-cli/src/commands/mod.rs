mod series;
mod summary;

use std::time::Duration;

use serde::Serialize;
use stockscope_core::{
    AlphaVantageAdapter, CoreError, DailyBar, MovingAverageProjection, ProviderConfig, SeriesSource,
    SeriesSummary, StockSeries, Symbol,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Command output handed to the renderer.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Series(SeriesReport),
    Summary(SummaryReport),
}

#[derive(Debug, Serialize)]
pub struct SeriesReport {
    pub symbol: String,
    pub last_refreshed: String,
    pub total_points: usize,
    pub points: Vec<DailyBar>,
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub symbol: String,
    pub last_refreshed: String,
    pub summary: SeriesSummary,
    pub projection: MovingAverageProjection,
}

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    let adapter = AlphaVantageAdapter::new(provider_config(cli));

    match &cli.command {
        Command::Series(args) => series::run(args, &adapter).await,
        Command::Summary(args) => summary::run(args, &adapter).await,
    }
}

/// Environment first, then command-line overrides.
fn provider_config(cli: &Cli) -> ProviderConfig {
    let mut config = ProviderConfig::from_env();
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(timeout_ms));
    }
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    config
}

async fn fetch(source: &dyn SeriesSource, raw_symbol: &str) -> Result<StockSeries, CoreError> {
    let symbol = Symbol::parse(raw_symbol)?;
    tracing::info!(symbol = symbol.as_str(), "fetching daily series");
    Ok(source.fetch_series(&symbol).await?)
}
