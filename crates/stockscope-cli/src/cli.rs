//! CLI argument definitions for stockscope.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `series` | Fetch the daily series for a symbol |
//! | `summary` | Fetch a series and print summary statistics |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | env or `15000` | Request timeout in ms |
//! | `--base-url` | env or provider default | Query endpoint override |
//!
//! # Examples
//!
//! ```bash
//! stockscope series IBM --limit 5 --format table
//! stockscope summary RELIANCE.BSE --window 10 --pretty
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use stockscope_core::DEFAULT_MOVING_AVERAGE_WINDOW;

/// Daily stock series from Alpha Vantage.
///
/// The API key is read from `STOCKSCOPE_ALPHAVANTAGE_API_KEY` (or
/// `ALPHAVANTAGE_API_KEY`), including a `.env` file in the working directory.
#[derive(Debug, Parser)]
#[command(name = "stockscope", author, version, about = "Daily stock series from Alpha Vantage")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Request timeout in milliseconds (overrides STOCKSCOPE_HTTP_TIMEOUT_MS).
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Query endpoint (overrides STOCKSCOPE_ALPHAVANTAGE_BASE_URL).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON document.
    Json,
    /// Plain-text table for terminal display.
    Table,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the full daily series, most recent first.
    ///
    /// # Examples
    ///
    ///   stockscope series IBM
    ///   stockscope series AAPL --limit 30 --format table
    Series(SeriesArgs),

    /// Fetch a series and report averages, volatility and a moving-average projection.
    ///
    /// # Examples
    ///
    ///   stockscope summary IBM
    ///   stockscope summary MSFT --window 50
    Summary(SummaryArgs),
}

/// Arguments for the `series` command.
#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Ticker symbol (e.g., IBM, RELIANCE.BSE).
    pub symbol: String,

    /// Print only the most recent N points.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for the `summary` command.
#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Ticker symbol (e.g., IBM, RELIANCE.BSE).
    pub symbol: String,

    /// Number of recent closes in the moving average.
    #[arg(long, default_value_t = DEFAULT_MOVING_AVERAGE_WINDOW)]
    pub window: usize,
}
